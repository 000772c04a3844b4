//! Directory listing tests for parsec
//!
//! These tests run [list_directory] against temporary trees and check the ordering and
//! exclusion rules the file list relies on.

use parsec_tui::core::fm::{Entry, PARENT_ENTRY, list_directory};

use std::fs::{self, File};
use tempfile::tempdir;

fn names(entries: &[Entry]) -> Vec<String> {
    entries.iter().map(|e| e.name_str().into_owned()).collect()
}

#[test]
fn test_subdirectory_lists_parent_first() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    let sub = root.path().join("src");
    fs::create_dir(&sub)?;
    for name in ["main.rs", "lib.rs", "util.rs"] {
        File::create(sub.join(name))?;
    }

    let entries = list_directory(&sub, root.path())?;
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0].name_str(), PARENT_ENTRY);
    assert!(entries[0].is_parent());
    assert!(entries[1..].iter().all(|e| !e.is_parent()));
    Ok(())
}

#[test]
fn test_root_has_no_parent_entry() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    File::create(root.path().join("a.txt"))?;

    let entries = list_directory(root.path(), root.path())?;
    assert_eq!(names(&entries), vec!["a.txt"]);
    Ok(())
}

#[test]
fn test_hidden_and_denied_entries_are_skipped() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    for dir in ["node_modules", "vendor", "target", "build", "dist", ".git", "docs"] {
        fs::create_dir(root.path().join(dir))?;
    }
    File::create(root.path().join(".env"))?;
    File::create(root.path().join("README.md"))?;

    let entries = list_directory(root.path(), root.path())?;
    assert_eq!(names(&entries), vec!["README.md", "docs"]);
    Ok(())
}

#[test]
fn test_listing_is_stable_across_calls() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    for name in ["b.go", "a.go", "C.md"] {
        File::create(root.path().join(name))?;
    }
    fs::create_dir(root.path().join("pkg"))?;

    let first = list_directory(root.path(), root.path())?;
    let second = list_directory(root.path(), root.path())?;
    assert_eq!(first, second);
    assert_eq!(names(&first), vec!["C.md", "a.go", "b.go", "pkg"]);
    assert!(first[3].is_dir());
    Ok(())
}

#[test]
fn test_missing_directory_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    assert!(list_directory(&root.path().join("gone"), root.path()).is_err());
    Ok(())
}
