//! Reconciler configuration: where the two database files live.
//!
//! # API pattern
//!
//! - [`ReconcileConfig::from_env`] reads `DB_PATH` / `SERVER_DB_PATH` from the
//!   process environment.
//! - [`ReconcileConfig::from_lookup`] takes the lookup as a closure; tests use
//!   it instead of mutating the real environment.

use std::path::{Path, PathBuf};

use crate::types::Side;

/// Environment value overriding the local database path.
pub const LOCAL_PATH_ENV: &str = "DB_PATH";
/// Environment value overriding the server database path.
pub const SERVER_PATH_ENV: &str = "SERVER_DB_PATH";

/// Default local database, relative to the working directory.
pub const DEFAULT_LOCAL_PATH: &str = "data/cogito.db";
/// Default server database on the production host.
pub const DEFAULT_SERVER_PATH: &str = "/opt/cogito/data/cogito.db";

/// Resolved locations of the local and server databases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileConfig {
    pub local_path: PathBuf,
    pub server_path: PathBuf,
}

impl Default for ReconcileConfig {
    /// `data/cogito.db` and `/opt/cogito/data/cogito.db`.
    fn default() -> Self {
        Self {
            local_path: PathBuf::from(DEFAULT_LOCAL_PATH),
            server_path: PathBuf::from(DEFAULT_SERVER_PATH),
        }
    }
}

impl ReconcileConfig {
    pub fn new(local_path: impl Into<PathBuf>, server_path: impl Into<PathBuf>) -> Self {
        Self {
            local_path: local_path.into(),
            server_path: server_path.into(),
        }
    }

    /// Defaults overridden by `DB_PATH` and `SERVER_DB_PATH`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key).map(PathBuf::from))
    }

    /// Defaults overridden by whatever `lookup` returns for the two keys.
    ///
    /// Empty values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<PathBuf>,
    {
        let defaults = Self::default();
        let pick = |key: &str, fallback: PathBuf| {
            lookup(key)
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(fallback)
        };
        Self {
            local_path: pick(LOCAL_PATH_ENV, defaults.local_path),
            server_path: pick(SERVER_PATH_ENV, defaults.server_path),
        }
    }

    /// Replace either path when an explicit value is given.
    pub fn with_overrides(mut self, local: Option<PathBuf>, server: Option<PathBuf>) -> Self {
        if let Some(local) = local {
            self.local_path = local;
        }
        if let Some(server) = server {
            self.server_path = server;
        }
        self
    }

    pub fn path(&self, side: Side) -> &Path {
        match side {
            Side::Local => &self.local_path,
            Side::Server => &self.server_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_paths() {
        let cfg = ReconcileConfig::default();
        assert_eq!(cfg.local_path, PathBuf::from("data/cogito.db"));
        assert_eq!(cfg.server_path, PathBuf::from("/opt/cogito/data/cogito.db"));
    }

    #[test]
    fn lookup_overrides_each_path_independently() {
        let cfg = ReconcileConfig::from_lookup(|key| match key {
            "SERVER_DB_PATH" => Some(PathBuf::from("/srv/cogito.db")),
            _ => None,
        });
        assert_eq!(cfg.local_path, PathBuf::from(DEFAULT_LOCAL_PATH));
        assert_eq!(cfg.server_path, PathBuf::from("/srv/cogito.db"));
    }

    #[test]
    fn empty_lookup_value_falls_back_to_default() {
        let cfg = ReconcileConfig::from_lookup(|key| match key {
            "DB_PATH" => Some(PathBuf::new()),
            _ => None,
        });
        assert_eq!(cfg.local_path, PathBuf::from(DEFAULT_LOCAL_PATH));
    }

    #[test]
    fn explicit_overrides_win() {
        let cfg = ReconcileConfig::new("a.db", "b.db")
            .with_overrides(Some(PathBuf::from("c.db")), None);
        assert_eq!(cfg.path(Side::Local), Path::new("c.db"));
        assert_eq!(cfg.path(Side::Server), Path::new("b.db"));
    }
}
