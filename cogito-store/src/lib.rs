//! # cogito-store
//!
//! SQLite-backed [`UserStore`]. Each call opens the file read-only, runs one
//! query, and closes the connection before returning.

use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Row};

use cogito_core::{ReadError, UserRecord, UserStore, Username};

const LIST_USERS_SQL: &str =
    "SELECT id, username, email, role, created_at FROM users ORDER BY created_at DESC";

/// Reads users straight out of a SQLite database file.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteUserStore;

impl SqliteUserStore {
    pub fn new() -> Self {
        Self
    }
}

impl UserStore for SqliteUserStore {
    fn list_users(&self, path: &Path) -> Result<Vec<UserRecord>, ReadError> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|e| ReadError::Open {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        tracing::debug!(path = %path.display(), "opened database");

        let query_err = |e: rusqlite::Error| ReadError::Query {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let users = {
            let mut stmt = conn.prepare(LIST_USERS_SQL).map_err(query_err)?;
            let rows = stmt.query_map([], user_from_row).map_err(query_err)?;
            rows.collect::<Result<Vec<_>, _>>().map_err(query_err)?
        };

        // Closing explicitly keeps one handle open at a time.
        conn.close().map_err(|(_, e)| query_err(e))?;

        tracing::debug!(path = %path.display(), count = users.len(), "loaded users");
        Ok(users)
    }
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<UserRecord> {
    Ok(UserRecord {
        id: row.get(0)?,
        username: Username::from(value_text(row.get_ref(1)?)),
        email: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        role: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        created_at: value_text(row.get_ref(4)?),
    })
}

/// SQLite columns are dynamically typed: `created_at` may hold ISO text or a
/// unix integer, and `username` may hold a number. NULL becomes "".
fn value_text(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) | ValueRef::Blob(t) => String::from_utf8_lossy(t).into_owned(),
    }
}
