//! User-store reader capability.

use std::path::Path;

use crate::error::ReadError;
use crate::types::UserRecord;

/// Reads the `users` table of the database at a path.
///
/// Implementations return records ordered by `created_at`, newest first.
/// Callers check existence before calling; an implementation is free to fail
/// on a missing file.
pub trait UserStore {
    fn list_users(&self, path: &Path) -> Result<Vec<UserRecord>, ReadError>;
}

impl<T: UserStore + ?Sized> UserStore for &T {
    fn list_users(&self, path: &Path) -> Result<Vec<UserRecord>, ReadError> {
        (**self).list_users(path)
    }
}
