//! Error types for cogito-reconcile.

use std::path::PathBuf;

use thiserror::Error;

/// The one fatal condition: there is nothing to reconcile.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("neither database file found (local: {local}, server: {server})")]
    NoDatabases { local: PathBuf, server: PathBuf },
}

/// A failed whole-file copy. Recoverable: the run reports it and carries on.
#[derive(Debug, Error)]
pub enum CopyError {
    /// Creating the destination's parent directory failed.
    #[error("cannot create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The copy itself failed.
    #[error("cannot copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
