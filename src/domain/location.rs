//! Geographic reference data: the country → village hierarchy.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::types::{LocationCode, LocationId};

/// One level of the location hierarchy, ordered from the root down.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LocationLevel {
    Country,
    State,
    District,
    Block,
    Village,
}

impl LocationLevel {
    /// All levels from the root down.
    pub const ALL: [LocationLevel; 5] = [
        LocationLevel::Country,
        LocationLevel::State,
        LocationLevel::District,
        LocationLevel::Block,
        LocationLevel::Village,
    ];

    /// Position of the level in [`LocationLevel::ALL`].
    pub const fn depth(self) -> usize {
        match self {
            LocationLevel::Country => 0,
            LocationLevel::State => 1,
            LocationLevel::District => 2,
            LocationLevel::Block => 3,
            LocationLevel::Village => 4,
        }
    }

    pub fn parent(self) -> Option<LocationLevel> {
        self.depth().checked_sub(1).map(|d| Self::ALL[d])
    }

    pub fn child(self) -> Option<LocationLevel> {
        Self::ALL.get(self.depth() + 1).copied()
    }

    /// Path segment used by `GET /locations/{level}`.
    pub const fn as_str(self) -> &'static str {
        match self {
            LocationLevel::Country => "country",
            LocationLevel::State => "state",
            LocationLevel::District => "district",
            LocationLevel::Block => "block",
            LocationLevel::Village => "village",
        }
    }
}

impl Display for LocationLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which attribute of a node identifies it to the level below.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyField {
    Id,
    Code,
}

/// Identifier of a selected node, either its numeric id or its code.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum NodeKey {
    Id(LocationId),
    Code(LocationCode),
}

impl NodeKey {
    pub fn field(&self) -> KeyField {
        match self {
            NodeKey::Id(_) => KeyField::Id,
            NodeKey::Code(_) => KeyField::Code,
        }
    }
}

impl Display for NodeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKey::Id(id) => write!(f, "{id}"),
            NodeKey::Code(code) => write!(f, "{code}"),
        }
    }
}

impl From<LocationId> for NodeKey {
    fn from(value: LocationId) -> Self {
        NodeKey::Id(value)
    }
}

impl From<LocationCode> for NodeKey {
    fn from(value: LocationCode) -> Self {
        NodeKey::Code(value)
    }
}

/// Country, state, district, block or village as offered by the API.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocationNode {
    pub id: LocationId,
    pub code: Option<LocationCode>,
    pub name: String,
    pub name_local: Option<String>,
}

impl LocationNode {
    /// Key of this node for the given key field, if the node carries it.
    pub fn key(&self, field: KeyField) -> Option<NodeKey> {
        match field {
            KeyField::Id => Some(NodeKey::Id(self.id)),
            KeyField::Code => self.code.clone().map(NodeKey::Code),
        }
    }

    /// Whether `key` identifies this node.
    pub fn matches_key(&self, key: &NodeKey) -> bool {
        match key {
            NodeKey::Id(id) => self.id == *id,
            NodeKey::Code(code) => self.code.as_ref() == Some(code),
        }
    }

    /// Case-insensitive substring match on the name or the local name.
    pub fn matches_search(&self, needle_lowercase: &str) -> bool {
        self.name.to_lowercase().contains(needle_lowercase)
            || self
                .name_local
                .as_ref()
                .is_some_and(|local| local.to_lowercase().contains(needle_lowercase))
    }

    /// `name (nameLocal)` when a distinct local name exists.
    pub fn display_name(&self) -> String {
        match self.name_local.as_deref().map(str::trim) {
            Some(local) if !local.is_empty() && local != self.name => {
                format!("{} ({local})", self.name)
            }
            _ => self.name.clone(),
        }
    }
}
