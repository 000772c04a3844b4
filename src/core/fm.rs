//! Directory listing for parsec.
//!
//! Provides the [Entry] struct which is used throughout parsec, and [list_directory],
//! which reads the immediate children of one directory and applies the listing rules:
//! a synthetic `..` entry first (unless the directory is the browsing root), no dotfiles,
//! and no build or vendor directories.

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::Path;

/// Name of the synthetic entry which navigates to the parent directory.
pub const PARENT_ENTRY: &str = "..";

/// Names starting with this marker are never listed.
const HIDDEN_MARKER: char = '.';

/// Directories that are never listed, no matter where they appear.
#[rustfmt::skip]
const DENY_DIRS: &[&str] = &[
    "node_modules", "vendor", "target", "build", "dist", ".git",
];

/// A single child of a listed directory.
///
/// The name is relative to the directory it was listed from. Entries are rebuilt on
/// every listing and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: Box<OsStr>,
    extension: Box<str>,
    flags: u8,
}

impl Entry {
    // Flag bit definitions
    const IS_DIR: u8 = 1 << 0;
    const IS_SYMLINK: u8 = 1 << 1;
    const IS_EXECUTABLE: u8 = 1 << 2;

    #[cfg(unix)]
    const EXEC_FLAG: u32 = 0o111;

    fn new(name: OsString, flags: u8) -> Self {
        let extension = if flags & Self::IS_DIR != 0 {
            Box::from("")
        } else {
            extension_of(&name.to_string_lossy()).into_boxed_str()
        };
        Entry {
            name: name.into_boxed_os_str(),
            extension,
            flags,
        }
    }

    /// The synthetic `..` entry.
    pub fn parent() -> Self {
        Entry {
            name: OsString::from(PARENT_ENTRY).into_boxed_os_str(),
            extension: Box::from(""),
            flags: Self::IS_DIR,
        }
    }

    /// Builds an entry for a name without touching the filesystem.
    pub fn synthetic(name: &str, is_dir: bool) -> Self {
        Self::new(
            OsString::from(name),
            if is_dir { Self::IS_DIR } else { 0 },
        )
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    #[inline]
    pub fn name_str(&self) -> Cow<'_, str> {
        self.name.to_string_lossy()
    }

    /// Lower-cased extension including the leading dot, or empty.
    #[inline]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.flags & Self::IS_DIR != 0
    }

    #[inline]
    pub fn is_symlink(&self) -> bool {
        self.flags & Self::IS_SYMLINK != 0
    }

    #[inline]
    pub fn is_executable(&self) -> bool {
        self.flags & Self::IS_EXECUTABLE != 0
    }

    #[inline]
    pub fn is_parent(&self) -> bool {
        self.name.as_ref() == OsStr::new(PARENT_ENTRY)
    }
}

/// Returns the lower-cased extension of a file name, including the dot.
///
/// Mirrors how most tools see extensions: `archive.tar.gz` is `.gz`, `.bashrc` is `.bashrc`
/// and `Makefile` has none.
pub fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) => name[idx..].to_ascii_lowercase(),
        None => String::new(),
    }
}

fn is_denied_dir(name: &OsStr) -> bool {
    name.to_str().is_some_and(|n| DENY_DIRS.contains(&n))
}

/// Reads the immediate children of `dir` and returns them as entries, sorted by name.
///
/// The listing starts with the `..` entry unless `dir` is the browsing `root` or has no parent.
/// Only a failure to read `dir` itself is reported; unreadable children are skipped.
pub fn list_directory(dir: &Path, root: &Path) -> io::Result<Vec<Entry>> {
    let mut entries = Vec::with_capacity(64);

    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        let name = entry.file_name();
        if name.to_string_lossy().starts_with(HIDDEN_MARKER) {
            continue;
        }

        let ft = match entry.file_type() {
            Ok(ft) => ft,
            Err(_) => continue,
        };

        let mut flags = 0u8;
        if ft.is_symlink() {
            flags |= Entry::IS_SYMLINK;
        }

        let md = if ft.is_symlink() {
            fs::metadata(entry.path()).ok()
        } else {
            entry.metadata().ok()
        };

        if md.as_ref().is_some_and(|md| md.is_dir()) {
            flags |= Entry::IS_DIR;
        }

        if flags & Entry::IS_DIR != 0 {
            if is_denied_dir(&name) {
                continue;
            }
        } else {
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if md
                    .as_ref()
                    .is_some_and(|md| md.permissions().mode() & Entry::EXEC_FLAG != 0)
                {
                    flags |= Entry::IS_EXECUTABLE;
                }
            }

            #[cfg(windows)]
            {
                if crate::core::classify::is_windows_executable_ext(&extension_of(
                    &name.to_string_lossy(),
                )) {
                    flags |= Entry::IS_EXECUTABLE;
                }
            }
        }

        entries.push(Entry::new(name, flags));
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));

    if dir != root && dir.parent().is_some() {
        entries.insert(0, Entry::parent());
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn extension_is_lowercased_with_dot() {
        assert_eq!(extension_of("Main.RS"), ".rs");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("Makefile"), "");
    }

    #[test]
    fn root_listing_has_no_parent_entry() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("a.txt"))?;

        let entries = list_directory(dir.path(), dir.path())?;
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].is_parent());
        Ok(())
    }

    #[test]
    fn skips_hidden_and_denied_directories() -> Result<(), Box<dyn std::error::Error>> {
        let root = tempdir()?;
        let dir = root.path().join("project");
        fs::create_dir(&dir)?;
        for denied in DENY_DIRS {
            fs::create_dir(dir.join(denied))?;
        }
        fs::create_dir(dir.join("src"))?;
        File::create(dir.join(".env"))?;
        File::create(dir.join("build.rs"))?;
        File::create(dir.join("data.bin"))?;

        let entries = list_directory(&dir, root.path())?;
        let names: Vec<_> = entries.iter().map(|e| e.name_str().into_owned()).collect();

        assert_eq!(names, vec!["..", "build.rs", "data.bin", "src"]);
        assert!(entries[0].is_dir());
        assert!(entries[3].is_dir());
        assert_eq!(entries[1].extension(), ".rs");
        Ok(())
    }

    #[test]
    fn denied_names_are_kept_for_files() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("vendor"))?;

        let entries = list_directory(dir.path(), dir.path())?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name(), OsStr::new("vendor"));
        Ok(())
    }

    #[test]
    fn missing_directory_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let missing = dir.path().join("nope");
        assert!(list_directory(&missing, dir.path()).is_err());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn executable_bit_sets_flag() -> Result<(), Box<dyn std::error::Error>> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir()?;
        let script = dir.path().join("run");
        File::create(&script)?;
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755))?;
        File::create(dir.path().join("plain"))?;

        let entries = list_directory(dir.path(), dir.path())?;
        assert!(!entries[0].is_executable());
        assert!(entries[1].is_executable());
        Ok(())
    }
}
