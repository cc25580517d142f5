//! Cogito core library: domain types, configuration, errors, and the two
//! capabilities the reconciler is built on.
//!
//! - [`types`]: usernames, user records, sides and copy directions
//! - [`config`]: [`ReconcileConfig`] with defaults and environment overrides
//! - [`error`]: [`ReadError`]
//! - [`fs`]: the [`FileSystem`] capability
//! - [`store`]: the [`UserStore`] capability
//! - `testing`: in-memory fakes of both capabilities (tests and the
//!   `test-support` feature only)

pub mod config;
pub mod error;
pub mod fs;
pub mod store;
pub mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use config::ReconcileConfig;
pub use error::ReadError;
pub use fs::{FileSystem, StdFileSystem};
pub use store::UserStore;
pub use types::{Direction, Side, UserRecord, Username};

#[cfg(any(test, feature = "test-support"))]
pub use testing::{MemoryFileSystem, MemoryUserStore};
