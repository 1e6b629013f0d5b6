//! Filesystem-backed view of the version-history store.

use restitch_core::{BackupStore, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A backup store rooted at a directory whose layout mirrors the original
/// tree, e.g. Syncthing's `.stversions`.
pub struct FsBackupStore {
    root: PathBuf,
}

impl FsBackupStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl BackupStore for FsBackupStore {
    fn revision_dir_exists(&self, rel_dir: &Path) -> bool {
        self.root.join(rel_dir).is_dir()
    }

    fn list_entries(&self, rel_dir: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in fs::read_dir(self.root.join(rel_dir))? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            // Revision names must be valid UTF-8 to carry a parsable
            // timestamp; anything else cannot match an original file.
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    fn revision_path(&self, rel_dir: &Path, file_name: &str) -> PathBuf {
        self.root.join(rel_dir).join(file_name)
    }
}
