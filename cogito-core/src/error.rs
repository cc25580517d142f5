//! Error types for cogito-core.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to read the `users` table from a database file that exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// The file could not be opened as a SQLite database.
    #[error("cannot open {path}: {message}")]
    Open { path: PathBuf, message: String },

    /// The database opened but the users query failed (missing table, bad column type).
    #[error("query failed on {path}: {message}")]
    Query { path: PathBuf, message: String },
}

impl ReadError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ReadError::Open { path, .. } | ReadError::Query { path, .. } => path,
        }
    }
}
