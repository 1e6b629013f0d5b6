//! Metadata-preserving copy into the recovery tree.

use filetime::FileTime;
use restitch_core::{Result, RevisionCopier};
use std::fs;
use std::path::{Path, PathBuf};

/// Copies chosen revisions under a recovery root, mirroring the original
/// tree's directory structure.
pub struct FsCopier {
    recovery_root: PathBuf,
}

impl FsCopier {
    pub fn new(recovery_root: impl Into<PathBuf>) -> Self {
        Self {
            recovery_root: recovery_root.into(),
        }
    }
}

impl RevisionCopier for FsCopier {
    fn copy_revision(&self, source: &Path, dest_rel: &Path) -> Result<PathBuf> {
        let dest = self.recovery_root.join(dest_rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        // fs::copy carries contents and permissions; the modification time
        // must be restored separately.
        fs::copy(source, &dest)?;
        let metadata = fs::metadata(source)?;
        filetime::set_file_mtime(&dest, FileTime::from_last_modification_time(&metadata))?;

        Ok(dest)
    }
}
