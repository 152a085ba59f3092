use serde::Serialize;

use crate::domain::filters::ListFilters;
use crate::domain::pagination::PageState;
use crate::pagination::PageLinks;

/// Snapshot of a list screen handed to the table.
#[derive(Debug, Serialize)]
pub struct ListView<'a, T> {
    pub items: &'a [T],
    pub filters: &'a ListFilters,
    pub pagination: PageState,
    pub page_links: PageLinks,
    pub loading: bool,
    /// Message of the last failed load, cleared by the next successful one.
    pub error: Option<&'a str>,
}
