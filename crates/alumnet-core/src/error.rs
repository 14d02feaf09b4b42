//! # Error Types
//!
//! Fallible core operations return [`AlumnetError`].
//!
//! Eligibility failures and duplicate requests are *outcomes*
//! ([`crate::OutcomeKind`]), never errors.

use thiserror::Error;

/// Errors raised by the core.
#[derive(Debug, Error)]
pub enum AlumnetError {
    /// The backing store failed (database open, transaction, commit).
    #[error("storage error: {0}")]
    Storage(String),

    /// Encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Input bytes or text do not have the expected shape.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// A directory was built with the same listing id twice.
    #[error("duplicate target id: {0}")]
    DuplicateTarget(String),

    /// A shared ledger's lock was poisoned by a panicking holder.
    #[error("ledger lock poisoned")]
    LockPoisoned,
}

impl From<redb::Error> for AlumnetError {
    fn from(err: redb::Error) -> Self {
        AlumnetError::Storage(err.to_string())
    }
}

impl From<postcard::Error> for AlumnetError {
    fn from(err: postcard::Error) -> Self {
        AlumnetError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for AlumnetError {
    fn from(err: serde_json::Error) -> Self {
        AlumnetError::InvalidFormat(err.to_string())
    }
}
