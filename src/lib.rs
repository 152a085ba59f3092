//! State-management core of the FPO marketplace admin console: cascading
//! location selectors, debounced paginated lists and the race-guarded FPO
//! detail panel, talking to the REST API through the [`repository`] traits.

pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod services;

/// Rows per page until the user picks another size.
pub const DEFAULT_PAGE_SIZE: usize = 20;
/// Options rendered per selector level before the list is truncated.
pub const VISIBLE_OPTION_LIMIT: usize = 50;
/// Levels with more options than this get a search box.
pub const SEARCH_THRESHOLD: usize = 10;
