//! Filter state owned by list screens.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::selection::SelectionValue;

/// Tri-state filter on whether a record has a geographic assignment.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HasLocation {
    /// No filtering.
    #[default]
    All,
    /// Only records with a location.
    Yes,
    /// Only records without a location.
    No,
}

impl HasLocation {
    /// Query value, `None` when the filter is inactive.
    pub fn as_query(self) -> Option<&'static str> {
        match self {
            HasLocation::All => None,
            HasLocation::Yes => Some("yes"),
            HasLocation::No => Some("no"),
        }
    }
}

/// Complete filter state of a list screen.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListFilters {
    pub search: String,
    /// Domain-specific filters such as `role` or `category`.
    pub fields: BTreeMap<String, String>,
    pub location: Option<SelectionValue>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub has_location: HasLocation,
}

impl ListFilters {
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Applies a shallow patch: every field present in `patch` replaces the current one.
    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(search) = patch.search {
            self.search = search;
        }
        for (name, value) in patch.fields {
            match value {
                Some(value) => {
                    self.fields.insert(name, value);
                }
                None => {
                    self.fields.remove(&name);
                }
            }
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(date_from) = patch.date_from {
            self.date_from = date_from;
        }
        if let Some(date_to) = patch.date_to {
            self.date_to = date_to;
        }
        if let Some(has_location) = patch.has_location {
            self.has_location = has_location;
        }
    }
}

/// Partial update for [`ListFilters`]; `None` leaves a field untouched.
///
/// Nested options clear a field: `location: Some(None)` removes the location filter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub search: Option<String>,
    pub fields: BTreeMap<String, Option<String>>,
    pub location: Option<Option<SelectionValue>>,
    pub date_from: Option<Option<NaiveDate>>,
    pub date_to: Option<Option<NaiveDate>>,
    pub has_location: Option<HasLocation>,
}

impl FilterPatch {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn field(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            fields: BTreeMap::from([(name.into(), value)]),
            ..Self::default()
        }
    }

    pub fn location(value: Option<SelectionValue>) -> Self {
        Self {
            location: Some(value),
            ..Self::default()
        }
    }

    pub fn date_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self {
            date_from: Some(from),
            date_to: Some(to),
            ..Self::default()
        }
    }

    pub fn has_location(value: HasLocation) -> Self {
        Self {
            has_location: Some(value),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
