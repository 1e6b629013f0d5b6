//! Recursive enumeration of the damaged tree.

use restitch_core::{FileEnumerator, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Walks a directory tree and yields relative file paths.
///
/// Output is sorted so enumeration order, and with it log ordering, is
/// stable across runs regardless of directory iteration order.
pub struct FsEnumerator;

impl FileEnumerator for FsEnumerator {
    fn enumerate(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root).follow_links(false) {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }

            let rel = entry
                .path()
                .strip_prefix(root)
                .expect("walked path is rooted at the walk root")
                .to_path_buf();
            files.push(rel);
        }

        files.sort();
        Ok(files)
    }
}
