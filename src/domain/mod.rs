//! Domain records and value objects shared by the console controllers.

pub mod catalog;
pub mod filters;
pub mod fpo;
pub mod location;
pub mod pagination;
pub mod selection;
pub mod types;
pub mod user;
