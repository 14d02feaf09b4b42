//! # App Errors

use alumnet_core::AlumnetError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] AlumnetError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown backend '{0}' (expected 'file' or 'redb')")]
    UnknownBackend(String),

    #[error("no listing with id '{0}'")]
    UnknownTarget(String),

    #[error("ledger already exists at {0} (use --force to overwrite)")]
    LedgerExists(PathBuf),
}

pub type CliResult<T> = Result<T, CliError>;
