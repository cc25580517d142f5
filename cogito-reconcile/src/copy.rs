//! Whole-file database copy.
//!
//! The destination is replaced, not merged: whatever it held before is gone
//! once the copy succeeds. The copy is not atomic; a concurrent reader of the
//! destination may see a partial file.

use std::path::Path;

use cogito_core::FileSystem;

use crate::error::CopyError;

/// Copy `source` over `destination`, creating the destination's parent
/// directory first when it is missing. Returns the number of bytes copied.
pub fn copy_database<F: FileSystem>(
    fs: &F,
    source: &Path,
    destination: &Path,
) -> Result<u64, CopyError> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() && !fs.exists(parent) {
            fs.create_dir_all(parent).map_err(|source| CopyError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
            tracing::debug!(path = %parent.display(), "created directory");
        }
    }

    let bytes = fs
        .copy_file(source, destination)
        .map_err(|e| CopyError::Copy {
            from: source.to_path_buf(),
            to: destination.to_path_buf(),
            source: e,
        })?;

    tracing::info!(
        from = %source.display(),
        to = %destination.display(),
        bytes,
        "copied database"
    );
    Ok(bytes)
}
