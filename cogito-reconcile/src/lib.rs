//! # cogito-reconcile
//!
//! Compares the users of the local and server databases and copies one whole
//! database over the other on request.
//!
//! Build a [`Reconciler`] from a [`cogito_core::ReconcileConfig`], a
//! [`cogito_core::FileSystem`] and a [`cogito_core::UserStore`], then call
//! [`Reconciler::run`].

pub mod compare;
pub mod copy;
pub mod error;
pub mod reconciler;

pub use compare::{compare, Comparison};
pub use copy::copy_database;
pub use error::{CopyError, ReconcileError};
pub use reconciler::{
    Action, LoadOutcome, Located, Reconciler, RunReport, SideReport, SyncStatus,
};
