use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use cogito_core::{Direction, ReconcileConfig, StdFileSystem, UserStore};
use cogito_reconcile::{Action, Reconciler, SyncStatus};
use cogito_store::SqliteUserStore;
use rusqlite::{params, Connection};
use tempfile::TempDir;

fn create_users_db(path: &Path, usernames: &[&str]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    let conn = Connection::open(path).expect("open");
    conn.execute_batch(
        "CREATE TABLE users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL,
            role TEXT NOT NULL,
            created_at TEXT NOT NULL
        );",
    )
    .expect("schema");
    for (i, name) in usernames.iter().enumerate() {
        conn.execute(
            "INSERT INTO users (username, email, role, created_at) VALUES (?1, ?2, 'user', ?3)",
            params![name, format!("{name}@example.com"), format!("2024-01-{:02} 00:00:00", i + 1)],
        )
        .expect("insert");
    }
}

fn username_set(path: &Path) -> BTreeSet<String> {
    SqliteUserStore
        .list_users(path)
        .expect("list")
        .into_iter()
        .map(|u| u.username.0)
        .collect()
}

#[test]
fn copy_to_local_makes_local_match_server() {
    let tmp = TempDir::new().expect("tmp");
    let local = tmp.path().join("app").join("data").join("cogito.db");
    let server = tmp.path().join("opt").join("cogito.db");
    create_users_db(&server, &["ada", "grace", "linus"]);

    let reconciler = Reconciler::new(
        ReconcileConfig::new(&local, &server),
        StdFileSystem,
        SqliteUserStore,
    );
    let report = reconciler.run(Some(Direction::CopyToLocal)).expect("run");

    assert!(!report.local.exists);
    assert_eq!(report.server.load.users().len(), 3);
    assert!(
        matches!(
            report.status,
            SyncStatus::OutOfSync {
                action: Action::Copied { .. },
                ..
            }
        ),
        "got {:?}",
        report.status
    );
    assert_eq!(username_set(&local), username_set(&server));
    assert_eq!(fs::read(&local).unwrap(), fs::read(&server).unwrap());

    let again = reconciler.run(None).expect("second run");
    assert!(matches!(again.status, SyncStatus::InSync));
}

#[test]
fn empty_local_cannot_overwrite_server() {
    let tmp = TempDir::new().expect("tmp");
    let local = tmp.path().join("local.db");
    let server = tmp.path().join("server.db");
    create_users_db(&local, &[]);
    create_users_db(&server, &["ada"]);
    let server_before = fs::read(&server).unwrap();

    let report = Reconciler::new(
        ReconcileConfig::new(&local, &server),
        StdFileSystem,
        SqliteUserStore,
    )
    .run(Some(Direction::CopyToServer))
    .expect("run");

    assert!(matches!(
        report.status,
        SyncStatus::OutOfSync {
            action: Action::Refused { .. },
            ..
        }
    ));
    assert_eq!(fs::read(&server).unwrap(), server_before);
}

#[test]
fn corrupt_local_is_reported_and_left_alone() {
    let tmp = TempDir::new().expect("tmp");
    let local = tmp.path().join("local.db");
    let server = tmp.path().join("server.db");
    fs::write(&local, b"definitely not sqlite, but long enough to have a header").unwrap();
    create_users_db(&server, &["ada"]);

    let report = Reconciler::new(
        ReconcileConfig::new(&local, &server),
        StdFileSystem,
        SqliteUserStore,
    )
    .run(Some(Direction::CopyToLocal))
    .expect("run");

    assert!(matches!(report.status, SyncStatus::NothingToCompare));
    assert_eq!(
        fs::read(&local).unwrap(),
        b"definitely not sqlite, but long enough to have a header"
    );
}
