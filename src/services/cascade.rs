//! Cascading location selector.
//!
//! One parameterized controller serves every dependent-dropdown widget
//! (coverage areas, record locations): a [`SelectorConfig`] lists the levels it
//! spans, which node attribute keys each level, and which levels accept an
//! explicit "entire region" choice.
//!
//! Selecting at level L resets every level below L synchronously, before the
//! load for L+1 is issued, so options of a stale parent are never visible.
//! Each load carries a ticket; [`CascadingSelector::apply`] ignores responses
//! whose ticket or parent key no longer match the level.

use thiserror::Error;

use crate::domain::location::{KeyField, LocationLevel, LocationNode, NodeKey};
use crate::domain::selection::SelectionValue;
use crate::dto::options::OptionsView;
use crate::repository::LocationReader;
use crate::repository::errors::RepositoryResult;
use crate::services::options::visible_options;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("{0} is not part of this selector")]
    UnknownLevel(LocationLevel),

    #[error("{0} cannot be chosen before its parent")]
    ParentNotSelected(LocationLevel),

    #[error("{0} does not accept an entire-region choice")]
    EntireNotAllowed(LocationLevel),

    #[error("{key} is not an option for {level}")]
    UnknownOption { level: LocationLevel, key: String },

    #[error("invalid selector configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelConfig {
    pub level: LocationLevel,
    /// Node attribute passed to the level below as its parent key.
    pub key: KeyField,
    /// Whether the level may be left as "entire region".
    pub optional: bool,
}

impl LevelConfig {
    pub const fn required(level: LocationLevel, key: KeyField) -> Self {
        Self {
            level,
            key,
            optional: false,
        }
    }

    pub const fn optional(level: LocationLevel, key: KeyField) -> Self {
        Self {
            level,
            key,
            optional: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorConfig {
    levels: Vec<LevelConfig>,
    root_parent: Option<NodeKey>,
}

impl SelectorConfig {
    /// Validates that `levels` is a non-empty, contiguous run of the hierarchy.
    pub fn new(levels: Vec<LevelConfig>) -> Result<Self, SelectionError> {
        let first = levels
            .first()
            .ok_or_else(|| SelectionError::InvalidConfig("no levels".to_string()))?;
        let contiguous = levels
            .windows(2)
            .all(|pair| pair[0].level.child() == Some(pair[1].level));
        if !contiguous {
            return Err(SelectionError::InvalidConfig(format!(
                "levels must descend one step at a time from {}",
                first.level
            )));
        }
        Ok(Self {
            levels,
            root_parent: None,
        })
    }

    /// State → district → block → village, keyed by id; only the state is required.
    pub fn coverage() -> Self {
        Self {
            levels: vec![
                LevelConfig::required(LocationLevel::State, KeyField::Id),
                LevelConfig::optional(LocationLevel::District, KeyField::Id),
                LevelConfig::optional(LocationLevel::Block, KeyField::Id),
                LevelConfig::optional(LocationLevel::Village, KeyField::Id),
            ],
            root_parent: None,
        }
    }

    /// Country → village; country and state keyed by code, the rest by id.
    pub fn location() -> Self {
        Self {
            levels: vec![
                LevelConfig::required(LocationLevel::Country, KeyField::Code),
                LevelConfig::optional(LocationLevel::State, KeyField::Code),
                LevelConfig::optional(LocationLevel::District, KeyField::Id),
                LevelConfig::optional(LocationLevel::Block, KeyField::Id),
                LevelConfig::optional(LocationLevel::Village, KeyField::Id),
            ],
            root_parent: None,
        }
    }

    /// Restricts the top level to children of `parent`, e.g. states of one country.
    pub fn scoped_to(mut self, parent: NodeKey) -> Self {
        self.root_parent = Some(parent);
        self
    }

    pub fn levels(&self) -> &[LevelConfig] {
        &self.levels
    }
}

/// Loading state of one level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelStatus {
    Empty,
    Loading,
    Loaded,
    Error,
}

/// A user's choice at one level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Choice {
    /// The whole region of the parent, with nothing chosen below.
    Entire,
    Node(NodeKey),
}

#[derive(Debug)]
struct Slot {
    config: LevelConfig,
    parent: Option<NodeKey>,
    status: LevelStatus,
    options: Vec<LocationNode>,
    choice: Option<Choice>,
    search: String,
    ticket: u64,
}

impl Slot {
    fn new(config: LevelConfig) -> Self {
        Self {
            config,
            parent: None,
            status: LevelStatus::Empty,
            options: Vec::new(),
            choice: None,
            search: String::new(),
            ticket: 0,
        }
    }

    fn selected_key(&self) -> Option<&NodeKey> {
        match &self.choice {
            Some(Choice::Node(key)) => Some(key),
            _ => None,
        }
    }
}

/// Load of one level's options under a given parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionsRequest {
    pub level: LocationLevel,
    pub parent: Option<NodeKey>,
    ticket: u64,
}

impl OptionsRequest {
    pub async fn send<R>(self, reader: &R) -> OptionsResponse
    where
        R: LocationReader + ?Sized,
    {
        let result = reader.list_locations(self.level, self.parent.clone()).await;
        OptionsResponse {
            request: self,
            result,
        }
    }
}

#[derive(Debug)]
pub struct OptionsResponse {
    pub request: OptionsRequest,
    pub result: RepositoryResult<Vec<LocationNode>>,
}

#[derive(Debug)]
pub struct CascadingSelector {
    root_parent: Option<NodeKey>,
    slots: Vec<Slot>,
    tickets: u64,
}

impl CascadingSelector {
    pub fn new(config: SelectorConfig) -> Self {
        Self {
            root_parent: config.root_parent,
            slots: config.levels.into_iter().map(Slot::new).collect(),
            tickets: 0,
        }
    }

    /// Starts loading the top level.
    pub fn mount(&mut self) -> OptionsRequest {
        let parent = self.root_parent.clone();
        self.begin_load(0, parent)
    }

    /// Chooses at `level` (`None` clears it), resets every level below and
    /// returns the load for the next level when a concrete node was chosen.
    pub fn select(
        &mut self,
        level: LocationLevel,
        choice: Option<Choice>,
    ) -> Result<Option<OptionsRequest>, SelectionError> {
        let index = self.index_of(level)?;
        if !self.is_enabled_at(index) {
            return Err(SelectionError::ParentNotSelected(level));
        }

        let slot = &self.slots[index];
        match &choice {
            Some(Choice::Entire) if !slot.config.optional => {
                return Err(SelectionError::EntireNotAllowed(level));
            }
            Some(Choice::Node(key)) if !slot.options.iter().any(|o| o.matches_key(key)) => {
                return Err(SelectionError::UnknownOption {
                    level,
                    key: key.to_string(),
                });
            }
            _ => {}
        }

        self.slots[index].choice = choice;
        self.reset_below(index);

        let next = index + 1;
        match self.slots[index].selected_key().cloned() {
            Some(key) if next < self.slots.len() => Ok(Some(self.begin_load(next, Some(key)))),
            _ => Ok(None),
        }
    }

    /// Chooses the option at `level` whose key field matches `node`.
    pub fn select_node(
        &mut self,
        level: LocationLevel,
        node: &LocationNode,
    ) -> Result<Option<OptionsRequest>, SelectionError> {
        let index = self.index_of(level)?;
        let key = node
            .key(self.slots[index].config.key)
            .ok_or_else(|| SelectionError::UnknownOption {
                level,
                key: node.name.clone(),
            })?;
        self.select(level, Some(Choice::Node(key)))
    }

    /// Re-issues the load for `level` under its current parent.
    pub fn retry(&mut self, level: LocationLevel) -> Result<OptionsRequest, SelectionError> {
        let index = self.index_of(level)?;
        let parent = if index == 0 {
            self.root_parent.clone()
        } else {
            Some(
                self.slots[index - 1]
                    .selected_key()
                    .cloned()
                    .ok_or(SelectionError::ParentNotSelected(level))?,
            )
        };
        Ok(self.begin_load(index, parent))
    }

    /// Seeds the selector with an existing value and returns the loads needed
    /// to display it. Seeded choices missing from their loaded options are
    /// dropped together with everything below them.
    pub fn restore(&mut self, value: &SelectionValue) -> Vec<OptionsRequest> {
        self.reset_below(0);
        self.slots[0].choice = None;

        let mut requests = vec![self.mount()];
        for index in 0..self.slots.len() {
            let level = self.slots[index].config.level;
            let Some(key) = value.get(level).cloned() else {
                break;
            };
            self.slots[index].choice = Some(Choice::Node(key.clone()));
            if index + 1 < self.slots.len() {
                requests.push(self.begin_load(index + 1, Some(key)));
            }
        }
        requests
    }

    /// Commits a load result if it still belongs to the level's current parent.
    ///
    /// Returns whether the response was committed. Failures are logged and
    /// leave the level empty.
    pub fn apply(&mut self, response: OptionsResponse) -> bool {
        let OptionsResponse { request, result } = response;
        let Ok(index) = self.index_of(request.level) else {
            return false;
        };

        let slot = &mut self.slots[index];
        if slot.ticket != request.ticket
            || slot.parent != request.parent
            || slot.status != LevelStatus::Loading
        {
            log::debug!(
                "Discarding superseded {} options for parent {:?}",
                request.level,
                request.parent
            );
            return false;
        }

        match result {
            Ok(options) => {
                slot.options = options;
                slot.status = LevelStatus::Loaded;

                let orphaned = slot
                    .selected_key()
                    .is_some_and(|key| !slot.options.iter().any(|o| o.matches_key(key)));
                if orphaned {
                    log::warn!(
                        "Dropping {} selection {:?}: not offered under parent {:?}",
                        request.level,
                        slot.choice,
                        slot.parent
                    );
                    slot.choice = None;
                    self.reset_below(index);
                }
            }
            Err(err) => {
                log::error!("Failed to load {} options: {err}", request.level);
                slot.options.clear();
                slot.status = LevelStatus::Error;
            }
        }
        true
    }

    /// Sends `request` and applies its response.
    pub async fn load<R>(&mut self, reader: &R, request: OptionsRequest) -> bool
    where
        R: LocationReader + ?Sized,
    {
        let response = request.send(reader).await;
        self.apply(response)
    }

    pub fn set_search(
        &mut self,
        level: LocationLevel,
        text: impl Into<String>,
    ) -> Result<(), SelectionError> {
        let index = self.index_of(level)?;
        self.slots[index].search = text.into();
        Ok(())
    }

    pub fn search(&self, level: LocationLevel) -> Result<&str, SelectionError> {
        Ok(&self.slot(level)?.search)
    }

    /// Options to render at `level` after search and truncation.
    pub fn view(&self, level: LocationLevel) -> Result<OptionsView<'_>, SelectionError> {
        let slot = self.slot(level)?;
        Ok(visible_options(&slot.options, &slot.search))
    }

    pub fn status(&self, level: LocationLevel) -> Result<LevelStatus, SelectionError> {
        Ok(self.slot(level)?.status)
    }

    pub fn options(&self, level: LocationLevel) -> Result<&[LocationNode], SelectionError> {
        Ok(&self.slot(level)?.options)
    }

    pub fn choice(&self, level: LocationLevel) -> Result<Option<&Choice>, SelectionError> {
        Ok(self.slot(level)?.choice.as_ref())
    }

    /// Parent key the level's options were (or are being) loaded for.
    pub fn parent_key(&self, level: LocationLevel) -> Result<Option<&NodeKey>, SelectionError> {
        Ok(self.slot(level)?.parent.as_ref())
    }

    /// Whether a choice can be made at `level`: its parent has a concrete node.
    pub fn is_enabled(&self, level: LocationLevel) -> Result<bool, SelectionError> {
        let index = self.index_of(level)?;
        Ok(self.is_enabled_at(index))
    }

    /// Whether every required level has a concrete node selected.
    pub fn is_complete(&self) -> bool {
        self.slots
            .iter()
            .filter(|slot| !slot.config.optional)
            .all(|slot| slot.selected_key().is_some())
    }

    /// Current selection, from the top level down to the deepest chosen node.
    pub fn value(&self) -> SelectionValue {
        let root = self.slots[0].config.level;
        let path = self
            .slots
            .iter()
            .map_while(|slot| slot.selected_key().cloned())
            .collect();
        SelectionValue::from_path(root, path)
    }

    fn slot(&self, level: LocationLevel) -> Result<&Slot, SelectionError> {
        let index = self.index_of(level)?;
        Ok(&self.slots[index])
    }

    fn index_of(&self, level: LocationLevel) -> Result<usize, SelectionError> {
        self.slots
            .iter()
            .position(|slot| slot.config.level == level)
            .ok_or(SelectionError::UnknownLevel(level))
    }

    fn is_enabled_at(&self, index: usize) -> bool {
        index == 0 || self.slots[index - 1].selected_key().is_some()
    }

    fn next_ticket(&mut self) -> u64 {
        self.tickets += 1;
        self.tickets
    }

    fn begin_load(&mut self, index: usize, parent: Option<NodeKey>) -> OptionsRequest {
        let ticket = self.next_ticket();
        let slot = &mut self.slots[index];
        if slot.parent != parent {
            slot.search.clear();
        }
        slot.parent = parent.clone();
        slot.options.clear();
        slot.status = LevelStatus::Loading;
        slot.ticket = ticket;

        OptionsRequest {
            level: slot.config.level,
            parent,
            ticket,
        }
    }

    fn reset_below(&mut self, index: usize) {
        let ticket = self.next_ticket();
        for slot in self.slots.iter_mut().skip(index + 1) {
            slot.parent = None;
            slot.status = LevelStatus::Empty;
            slot.options.clear();
            slot.choice = None;
            slot.search.clear();
            slot.ticket = ticket;
        }
    }
}
