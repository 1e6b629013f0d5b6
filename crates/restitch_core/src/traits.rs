//! Ports connecting the recovery domain to its filesystem collaborators.
//!
//! Tree walking, backup-store listing and the raw copy primitive live
//! behind these traits so the selection logic stays pure and testable.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Enumerates the files that should exist in the recovered tree.
pub trait FileEnumerator {
    /// Yields every file under `root` as a path relative to `root`.
    fn enumerate(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

/// Read-only view of the timestamped version-history store.
///
/// The store's internal layout mirrors the original tree: revisions of
/// `docs/notes.txt` live in the store's `docs/` subdirectory.
pub trait BackupStore {
    /// True if the store holds a revision directory mirroring `rel_dir`.
    ///
    /// A missing directory proves no revisions exist for any file in it,
    /// so callers may classify without listing anything.
    fn revision_dir_exists(&self, rel_dir: &Path) -> bool;

    /// Raw entry names in the revision directory mirroring `rel_dir`.
    fn list_entries(&self, rel_dir: &Path) -> Result<Vec<String>>;

    /// Full path of one revision file inside the store.
    fn revision_path(&self, rel_dir: &Path, file_name: &str) -> PathBuf;
}

/// The atomic copy-with-metadata primitive.
pub trait RevisionCopier {
    /// Copies `source` to `dest_rel` under the recovery tree, preserving
    /// file metadata. Parent directories are created as needed (an already
    /// existing directory is success). Returns the path actually written.
    fn copy_revision(&self, source: &Path, dest_rel: &Path) -> Result<PathBuf>;
}
