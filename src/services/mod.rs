//! Client-side controllers behind the console screens.
//!
//! Every controller is a synchronous state machine: an intent mutates state and
//! returns a request ticket, the ticket performs the I/O without borrowing the
//! controller, and `apply` commits the response only if the ticket still owns
//! the state it targets.

use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod cascade;
pub mod debounce;
pub mod detail;
pub mod list;
pub mod options;
pub mod preferences;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("type constraint: {0}")]
    TypeConstraint(String),

    #[error(transparent)]
    Selection(#[from] cascade::SelectionError),

    #[error(transparent)]
    Preferences(#[from] preferences::PreferenceError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
