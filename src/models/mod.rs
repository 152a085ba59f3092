//! Wire models exchanged with the marketplace REST API, plus configuration.

pub mod api;
pub mod catalog;
#[cfg(feature = "http")]
pub mod config;
pub mod fpo;
pub mod location;
pub mod user;
