//! Read-only snapshots handed from controllers to presentation code.

pub mod detail;
pub mod list;
pub mod notice;
pub mod options;
