//! `StdFileSystem` behaviour against a real temporary directory.

use assert_fs::prelude::*;
use cogito_core::{FileSystem, StdFileSystem};
use predicates::prelude::predicate;
use rstest::rstest;
use std::io::ErrorKind;

// ---------------------------------------------------------------------------
// 1. exists
// ---------------------------------------------------------------------------

#[rstest]
#[case::file("cogito.db", true)]
#[case::missing("absent.db", false)]
fn exists_reports_file_presence(#[case] name: &str, #[case] expected: bool) {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("cogito.db").write_binary(b"SQLite format 3\0").expect("write");

    assert_eq!(StdFileSystem.exists(dir.child(name).path()), expected);
}

// ---------------------------------------------------------------------------
// 2. create_dir_all + copy_file
// ---------------------------------------------------------------------------

#[test]
fn create_dir_all_builds_nested_directories() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let nested = dir.child("opt").child("cogito").child("data");

    StdFileSystem.create_dir_all(nested.path()).expect("mkdir");
    nested.assert(predicate::path::is_dir());
}

#[test]
fn copy_file_overwrites_destination_byte_for_byte() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let src = dir.child("src.db");
    let dst = dir.child("dst.db");
    src.write_binary(&[0u8, 1, 2, 3, 255]).expect("write src");
    dst.write_str("much longer previous content").expect("write dst");

    let copied = StdFileSystem.copy_file(src.path(), dst.path()).expect("copy");

    assert_eq!(copied, 5);
    dst.assert(predicate::path::eq_file(src.path()));
}

#[test]
fn copy_file_from_missing_source_fails_without_creating_destination() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let dst = dir.child("dst.db");

    let err = StdFileSystem
        .copy_file(dir.child("nope.db").path(), dst.path())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    dst.assert(predicate::path::missing());
}
