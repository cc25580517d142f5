//! Filesystem capability used by the reconciler.
//!
//! [`StdFileSystem`] talks to the real disk.

use std::io;
use std::path::{Path, PathBuf};

/// The three filesystem operations the reconciler needs.
pub trait FileSystem {
    /// Whether anything (file or directory) exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Copy `from` over `to`, replacing any existing file. Returns bytes copied.
    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64>;

    /// Create `path` and all missing ancestors.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64> {
        (**self).copy_file(from, to)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        (**self).create_dir_all(path)
    }
}

// ---------------------------------------------------------------------------
// Real disk
// ---------------------------------------------------------------------------

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64> {
        std::fs::copy(from, to)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}
