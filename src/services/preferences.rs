//! Persisted UI preferences such as the collapsed sidebar or the last country
//! picked in the header.
//!
//! Controllers never touch a store directly; the presentation layer reads a
//! preference and passes the value in (e.g. as a selector's root parent).

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::domain::types::LocationCode;

pub const SIDEBAR_COLLAPSED: &str = "sidebarCollapsed";
pub const SELECTED_COUNTRY: &str = "selectedCountry";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("failed to access preferences file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed preference value: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("preference store lock poisoned")]
    Poisoned,
}

pub type PreferenceResult<T> = Result<T, PreferenceError>;

/// Key/value store for UI preferences.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> PreferenceResult<Option<Value>>;
    fn set(&self, key: &str, value: Value) -> PreferenceResult<()>;
    fn remove(&self, key: &str) -> PreferenceResult<()>;
}

/// Reads `key` as `T`; a missing key yields `None`.
pub fn get_as<T, S>(store: &S, key: &str) -> PreferenceResult<Option<T>>
where
    T: DeserializeOwned,
    S: PreferenceStore + ?Sized,
{
    store
        .get(key)?
        .map(serde_json::from_value)
        .transpose()
        .map_err(PreferenceError::from)
}

pub fn set_as<T, S>(store: &S, key: &str, value: &T) -> PreferenceResult<()>
where
    T: Serialize,
    S: PreferenceStore + ?Sized,
{
    store.set(key, serde_json::to_value(value)?)
}

pub fn sidebar_collapsed<S: PreferenceStore + ?Sized>(store: &S) -> PreferenceResult<bool> {
    Ok(get_as(store, SIDEBAR_COLLAPSED)?.unwrap_or(false))
}

pub fn set_sidebar_collapsed<S: PreferenceStore + ?Sized>(
    store: &S,
    collapsed: bool,
) -> PreferenceResult<()> {
    set_as(store, SIDEBAR_COLLAPSED, &collapsed)
}

/// Country remembered from the last session.
///
/// An unreadable stored value is logged and treated as absent.
pub fn selected_country<S: PreferenceStore + ?Sized>(
    store: &S,
) -> PreferenceResult<Option<LocationCode>> {
    match get_as::<LocationCode, _>(store, SELECTED_COUNTRY) {
        Ok(code) => Ok(code),
        Err(PreferenceError::Decode(err)) => {
            log::warn!("Ignoring stored country: {err}");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

pub fn set_selected_country<S: PreferenceStore + ?Sized>(
    store: &S,
    country: Option<&LocationCode>,
) -> PreferenceResult<()> {
    match country {
        Some(code) => set_as(store, SELECTED_COUNTRY, code),
        None => store.remove(SELECTED_COUNTRY),
    }
}

#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: RwLock<BTreeMap<String, Value>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> PreferenceResult<Option<Value>> {
        let values = self.values.read().map_err(|_| PreferenceError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> PreferenceResult<()> {
        let mut values = self.values.write().map_err(|_| PreferenceError::Poisoned)?;
        values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> PreferenceResult<()> {
        let mut values = self.values.write().map_err(|_| PreferenceError::Poisoned)?;
        values.remove(key);
        Ok(())
    }
}

/// Preferences kept in a JSON object on disk, rewritten on every change.
#[derive(Debug)]
pub struct JsonFilePreferences {
    path: PathBuf,
    values: RwLock<BTreeMap<String, Value>>,
}

impl JsonFilePreferences {
    /// Loads `path`, starting empty when the file does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> PreferenceResult<Self> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, Value>) -> PreferenceResult<()> {
        let bytes = serde_json::to_vec_pretty(values)?;
        fs::write(&self.path, bytes)?;
        Ok(())
    }
}

impl PreferenceStore for JsonFilePreferences {
    fn get(&self, key: &str) -> PreferenceResult<Option<Value>> {
        let values = self.values.read().map_err(|_| PreferenceError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> PreferenceResult<()> {
        let mut values = self.values.write().map_err(|_| PreferenceError::Poisoned)?;
        values.insert(key.to_string(), value);
        self.persist(&values)
    }

    fn remove(&self, key: &str) -> PreferenceResult<()> {
        let mut values = self.values.write().map_err(|_| PreferenceError::Poisoned)?;
        if values.remove(key).is_some() {
            self.persist(&values)?;
        }
        Ok(())
    }
}
