use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::domain::location::LocationNode;

/// Why the visible option list is shorter than what it was cut from.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub enum Truncation {
    /// The unfiltered list exceeded the cap.
    OfTotal { shown: usize, total: usize },
    /// The search matched more options than the cap.
    OfMatches { shown: usize, matches: usize },
}

impl Display for Truncation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Truncation::OfTotal { shown, total } => write!(f, "Showing {shown} of {total} total"),
            Truncation::OfMatches { shown, matches } => {
                write!(f, "Showing {shown} of {matches} matches")
            }
        }
    }
}

/// What one selector level renders.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct OptionsView<'a> {
    /// Options to render, in server order.
    pub visible: Vec<&'a LocationNode>,
    /// Options loaded for the level before filtering.
    pub total: usize,
    /// Options matching the current search, equal to `total` without a search.
    pub matches: usize,
    pub truncation: Option<Truncation>,
    /// Whether the search input should be shown.
    pub search_enabled: bool,
}
