//! The run: locate, load, compare, and (maybe) copy.
//!
//! ## Decision policy
//!
//! Evaluated in order, first match wins:
//!
//! 1. Neither file exists → [`ReconcileError::NoDatabases`].
//! 2. Both sides produced a list and the lists differ → out of sync. The
//!    requested direction is performed when its source has users; otherwise
//!    the offered directions are suggested.
//! 3. Local empty, server not → only `copy-to-local` is offered.
//! 4. Server empty, local not → only `copy-to-server` is offered.
//! 5. Anything else → nothing to do.
//!
//! A direction is offered only when its source file exists and holds users
//! the destination lacks. Because an empty side never holds exclusive users,
//! cases 3 and 4 resolve inside case 2 with exactly one offered direction;
//! the `empty_side` field of [`SyncStatus::OutOfSync`] records which side
//! loaded an empty table.
//!
//! A requested direction does not have to be offered to run. It is refused
//! only when its source is missing or has no users, so an empty database
//! never replaces a populated one.
//!
//! Inside a run a missing file compares as an empty list. A read failure
//! never does.

use std::path::{Path, PathBuf};

use cogito_core::{
    Direction, FileSystem, ReadError, ReconcileConfig, Side, UserRecord, UserStore,
};

use crate::compare::{compare, Comparison};
use crate::copy::copy_database;
use crate::error::{CopyError, ReconcileError};

// ---------------------------------------------------------------------------
// Load outcome
// ---------------------------------------------------------------------------

/// What reading one database produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No file at the path.
    Missing,
    /// The file exists but could not be read.
    Failed(ReadError),
    /// Users, newest first. May be empty.
    Loaded(Vec<UserRecord>),
}

impl LoadOutcome {
    /// Records that were read, if any.
    pub fn users(&self) -> &[UserRecord] {
        match self {
            LoadOutcome::Loaded(users) => users,
            LoadOutcome::Missing | LoadOutcome::Failed(_) => &[],
        }
    }

    /// The list used for comparison: missing counts as empty, failed as nothing.
    fn comparable(&self) -> Option<&[UserRecord]> {
        match self {
            LoadOutcome::Loaded(users) => Some(users),
            LoadOutcome::Missing => Some(&[]),
            LoadOutcome::Failed(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// One side of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideReport {
    pub side: Side,
    pub path: PathBuf,
    pub exists: bool,
    pub load: LoadOutcome,
}

/// What the run did once it knew the databases differ.
#[derive(Debug)]
pub enum Action {
    /// No direction requested; these are the offered ones.
    Suggested(Vec<Direction>),
    /// The source of the requested direction is missing or has no users;
    /// nothing was copied.
    Refused {
        requested: Direction,
        suggestions: Vec<Direction>,
    },
    /// The copy ran.
    Copied {
        direction: Direction,
        from: PathBuf,
        to: PathBuf,
        bytes: u64,
    },
    /// The copy was attempted and failed.
    CopyFailed {
        direction: Direction,
        from: PathBuf,
        to: PathBuf,
        error: CopyError,
    },
}

/// Overall verdict of a run.
#[derive(Debug)]
pub enum SyncStatus {
    /// Same username set on both sides.
    InSync,
    /// The username sets differ.
    OutOfSync {
        comparison: Comparison,
        /// Set when one side loaded an empty table and the other has users.
        /// A missing file is not an empty table.
        empty_side: Option<Side>,
        action: Action,
    },
    /// At least one side produced no list; no comparison was made.
    NothingToCompare,
}

/// Everything a run observed and did, in report order.
#[derive(Debug)]
pub struct RunReport {
    pub local: SideReport,
    pub server: SideReport,
    pub requested: Option<Direction>,
    pub status: SyncStatus,
}

/// Existence of both files, as found by [`Reconciler::locate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Located {
    pub local_exists: bool,
    pub server_exists: bool,
}

impl Located {
    pub fn exists(&self, side: Side) -> bool {
        match side {
            Side::Local => self.local_exists,
            Side::Server => self.server_exists,
        }
    }
}

// ---------------------------------------------------------------------------
// Reconciler
// ---------------------------------------------------------------------------

/// Reconciles the users of the local and server databases.
pub struct Reconciler<F, S> {
    config: ReconcileConfig,
    fs: F,
    store: S,
}

impl<F: FileSystem, S: UserStore> Reconciler<F, S> {
    pub fn new(config: ReconcileConfig, fs: F, store: S) -> Self {
        Self { config, fs, store }
    }

    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// Check both paths. Fails only when neither exists.
    pub fn locate(&self) -> Result<Located, ReconcileError> {
        let located = Located {
            local_exists: self.fs.exists(&self.config.local_path),
            server_exists: self.fs.exists(&self.config.server_path),
        };
        if !located.local_exists && !located.server_exists {
            return Err(ReconcileError::NoDatabases {
                local: self.config.local_path.clone(),
                server: self.config.server_path.clone(),
            });
        }
        Ok(located)
    }

    /// Read the users at `path`. A read error is logged and folded into the outcome.
    pub fn load_users(&self, path: &Path) -> LoadOutcome {
        if !self.fs.exists(path) {
            return LoadOutcome::Missing;
        }
        match self.store.list_users(path) {
            Ok(users) => LoadOutcome::Loaded(users),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "reading users failed");
                LoadOutcome::Failed(err)
            }
        }
    }

    /// Copy the source side of `direction` over its destination side.
    pub fn copy(&self, direction: Direction) -> Result<u64, CopyError> {
        copy_database(
            &self.fs,
            self.config.path(direction.source()),
            self.config.path(direction.destination()),
        )
    }

    /// One full pass. `mode` is the requested copy direction, if any.
    pub fn run(&self, mode: Option<Direction>) -> Result<RunReport, ReconcileError> {
        let located = self.locate()?;

        let local = self.side_report(Side::Local, located);
        let server = self.side_report(Side::Server, located);

        let status = match (local.load.comparable(), server.load.comparable()) {
            (Some(local_users), Some(server_users)) => {
                let comparison = compare(local_users, server_users);
                if comparison.is_in_sync() {
                    SyncStatus::InSync
                } else {
                    let empty_side = empty_side(&local.load, &server.load);
                    let offered = offered_directions(&comparison, located);
                    let action = self.act(mode, offered, |side| match side {
                        Side::Local => !local_users.is_empty(),
                        Side::Server => !server_users.is_empty(),
                    });
                    SyncStatus::OutOfSync {
                        comparison,
                        empty_side,
                        action,
                    }
                }
            }
            _ => SyncStatus::NothingToCompare,
        };

        Ok(RunReport {
            local,
            server,
            requested: mode,
            status,
        })
    }

    fn side_report(&self, side: Side, located: Located) -> SideReport {
        let path = self.config.path(side).to_path_buf();
        let exists = located.exists(side);
        let load = if exists {
            self.load_users(&path)
        } else {
            LoadOutcome::Missing
        };
        SideReport {
            side,
            path,
            exists,
            load,
        }
    }

    /// `has_users` reports whether a side produced at least one user.
    fn act(
        &self,
        mode: Option<Direction>,
        offered: Vec<Direction>,
        has_users: impl Fn(Side) -> bool,
    ) -> Action {
        let Some(requested) = mode else {
            return Action::Suggested(offered);
        };
        if !has_users(requested.source()) {
            tracing::warn!(direction = %requested, "copy source has no users");
            return Action::Refused {
                requested,
                suggestions: offered,
            };
        }

        let from = self.config.path(requested.source()).to_path_buf();
        let to = self.config.path(requested.destination()).to_path_buf();
        match self.copy(requested) {
            Ok(bytes) => Action::Copied {
                direction: requested,
                from,
                to,
                bytes,
            },
            Err(error) => {
                tracing::error!(error = %error, "database copy failed");
                Action::CopyFailed {
                    direction: requested,
                    from,
                    to,
                    error,
                }
            }
        }
    }
}

/// Directions whose source exists and has users the destination lacks.
fn offered_directions(comparison: &Comparison, located: Located) -> Vec<Direction> {
    Direction::all()
        .iter()
        .copied()
        .filter(|d| located.exists(d.source()))
        .filter(|d| match d.source() {
            Side::Local => !comparison.only_local.is_empty(),
            Side::Server => !comparison.only_server.is_empty(),
        })
        .collect()
}

/// The side that loaded an empty table while the other side has users.
fn empty_side(local: &LoadOutcome, server: &LoadOutcome) -> Option<Side> {
    let is_empty_table =
        |load: &LoadOutcome| matches!(load, LoadOutcome::Loaded(users) if users.is_empty());
    match (is_empty_table(local), is_empty_table(server)) {
        (true, false) if !server.users().is_empty() => Some(Side::Local),
        (false, true) if !local.users().is_empty() => Some(Side::Server),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
