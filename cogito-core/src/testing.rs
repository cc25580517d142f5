//! In-memory fakes of the [`FileSystem`] and [`UserStore`] capabilities.
//!
//! Built for this crate's tests and, with the `test-support` feature, for
//! downstream crates' tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use crate::error::ReadError;
use crate::fs::FileSystem;
use crate::store::UserStore;
use crate::types::UserRecord;

// ---------------------------------------------------------------------------
// Filesystem
// ---------------------------------------------------------------------------

/// Single-threaded in-memory [`FileSystem`].
///
/// Copies require the destination's parent directory to exist, like the real
/// thing. Paths registered with [`MemoryFileSystem::deny_writes`] fail with
/// `PermissionDenied`.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: RefCell<BTreeMap<PathBuf, Vec<u8>>>,
    dirs: RefCell<BTreeSet<PathBuf>>,
    denied: RefCell<BTreeSet<PathBuf>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `contents` at `path`, creating its parent directories.
    pub fn insert_file(&self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.add_dirs(parent);
        }
        self.files.borrow_mut().insert(path, contents.into());
    }

    pub fn read(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.borrow().get(path).cloned()
    }

    pub fn is_dir(&self, path: &Path) -> bool {
        self.dirs.borrow().contains(path)
    }

    /// Make every write (copy destination or directory creation) at `path` fail.
    pub fn deny_writes(&self, path: impl Into<PathBuf>) {
        self.denied.borrow_mut().insert(path.into());
    }

    /// Number of files and directories currently stored.
    pub fn entry_count(&self) -> usize {
        self.files.borrow().len() + self.dirs.borrow().len()
    }

    fn add_dirs(&self, path: &Path) {
        let mut dirs = self.dirs.borrow_mut();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            dirs.insert(ancestor.to_path_buf());
        }
    }

    fn check_writable(&self, path: &Path) -> io::Result<()> {
        if self.denied.borrow().contains(path) {
            return Err(io::Error::new(
                ErrorKind::PermissionDenied,
                format!("write denied: {}", path.display()),
            ));
        }
        Ok(())
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path) || self.dirs.borrow().contains(path)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64> {
        self.check_writable(to)?;
        let contents = self.read(from).ok_or_else(|| {
            io::Error::new(ErrorKind::NotFound, format!("no such file: {}", from.display()))
        })?;
        let parent_ok = match to.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.is_dir(parent),
            _ => true,
        };
        if !parent_ok {
            return Err(io::Error::new(
                ErrorKind::NotFound,
                format!("no such directory for {}", to.display()),
            ));
        }
        let len = contents.len() as u64;
        self.files.borrow_mut().insert(to.to_path_buf(), contents);
        Ok(len)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.check_writable(path)?;
        self.add_dirs(path);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// User store
// ---------------------------------------------------------------------------

/// Canned answers keyed by path.
///
/// Paths without an entry fail with [`ReadError::Open`].
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    answers: BTreeMap<PathBuf, Result<Vec<UserRecord>, ReadError>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(mut self, path: impl Into<PathBuf>, users: Vec<UserRecord>) -> Self {
        self.answers.insert(path.into(), Ok(users));
        self
    }

    pub fn with_error(mut self, path: impl Into<PathBuf>, err: ReadError) -> Self {
        self.answers.insert(path.into(), Err(err));
        self
    }
}

impl UserStore for MemoryUserStore {
    fn list_users(&self, path: &Path) -> Result<Vec<UserRecord>, ReadError> {
        self.answers
            .get(path)
            .cloned()
            .unwrap_or_else(|| {
                Err(ReadError::Open {
                    path: path.to_path_buf(),
                    message: "no canned answer".to_string(),
                })
            })
    }
}
