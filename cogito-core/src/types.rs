//! Domain types for the database reconciler.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed username; the comparison key between the two databases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(pub String);

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Username {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Username {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// One of the two database endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Local,
    Server,
}

impl Side {
    /// The endpoint on the other end of a sync.
    pub fn other(self) -> Side {
        match self {
            Side::Local => Side::Server,
            Side::Server => Side::Local,
        }
    }

    /// Capitalised form used at the start of report lines.
    pub fn title(self) -> &'static str {
        match self {
            Side::Local => "Local",
            Side::Server => "Server",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Local => write!(f, "local"),
            Side::Server => write!(f, "server"),
        }
    }
}

/// Direction of a whole-file copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Server database replaces the local one.
    CopyToLocal,
    /// Local database replaces the server one.
    CopyToServer,
}

impl Direction {
    pub fn all() -> &'static [Direction] {
        &[Direction::CopyToLocal, Direction::CopyToServer]
    }

    /// The side whose file is read.
    pub fn source(self) -> Side {
        match self {
            Direction::CopyToLocal => Side::Server,
            Direction::CopyToServer => Side::Local,
        }
    }

    /// The side whose file is overwritten.
    pub fn destination(self) -> Side {
        self.source().other()
    }

    /// Command-line spelling, e.g. `copy-to-local`.
    pub fn as_arg(self) -> &'static str {
        match self {
            Direction::CopyToLocal => "copy-to-local",
            Direction::CopyToServer => "copy-to-server",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "copy-to-local" => Ok(Direction::CopyToLocal),
            "copy-to-server" => Ok(Direction::CopyToServer),
            other => Err(format!(
                "unknown mode '{other}'; expected: copy-to-local, copy-to-server"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub username: Username,
    pub email: String,
    pub role: String,
    /// Stored as SQLite gives it back; ordering is done by the query.
    pub created_at: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_parses_cli_spelling() {
        assert_eq!(
            "copy-to-local".parse::<Direction>(),
            Ok(Direction::CopyToLocal)
        );
        assert_eq!(
            "copy-to-server".parse::<Direction>(),
            Ok(Direction::CopyToServer)
        );
        let err = "copy-everywhere".parse::<Direction>().unwrap_err();
        assert!(err.contains("copy-everywhere"));
    }

    #[test]
    fn direction_sides() {
        assert_eq!(Direction::CopyToLocal.source(), Side::Server);
        assert_eq!(Direction::CopyToLocal.destination(), Side::Local);
        assert_eq!(Direction::CopyToServer.source(), Side::Local);
        assert_eq!(Direction::CopyToServer.destination(), Side::Server);
    }

    #[test]
    fn username_display() {
        assert_eq!(Username::from("ada").to_string(), "ada");
        assert_eq!(Username::from(String::from("ada")), Username::from("ada"));
    }

    #[test]
    fn direction_serializes_as_cli_spelling() {
        let json = serde_json::to_string(&Direction::CopyToServer).expect("serialize");
        assert_eq!(json, "\"copy-to-server\"");
    }
}
