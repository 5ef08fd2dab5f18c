//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session not found")]
    SessionNotFound,

    #[error("Field not found: {0}")]
    FieldNotFound(String),

    #[error("Store error: {0}")]
    StoreError(String),
}

impl SessionError {
    /// True for the not-found family: the record expired, was removed, or
    /// never existed. Transport failures are not not-found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SessionError::SessionNotFound)
    }
}
