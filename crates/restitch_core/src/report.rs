//! Append-only accumulator for per-file recovery outcomes.
//!
//! Every original file lands in exactly one of three partitions: missing,
//! recovered, or copy-failed. "Possibly corrupted" is an overlay on
//! recovered entries, never a partition of its own.

use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// One successfully restored file, with everything the recovered-files
/// table needs to render it.
#[derive(Debug, Clone)]
pub struct RecoveredFile {
    pub original: PathBuf,
    pub backup_file: String,
    pub backup_time: NaiveDateTime,
    pub candidate_count: usize,

    /// A revision newer than the cutoff also exists; the restored copy is
    /// older and safe, but the file warrants manual review.
    pub latest_exceeds_cutoff: bool,

    pub latest_file: String,
    pub latest_time: NaiveDateTime,
    pub recovered_path: PathBuf,
}

/// A chosen revision whose copy into the recovery tree failed. Kept apart
/// from both missing and recovered so the failure is never hidden.
#[derive(Debug, Clone)]
pub struct CopyFailure {
    pub original: PathBuf,
    pub source: PathBuf,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct RecoveryReport {
    total_original: usize,
    missing: Vec<PathBuf>,
    recovered: Vec<RecoveredFile>,
    copy_failures: Vec<CopyFailure>,
}

impl RecoveryReport {
    #[must_use]
    pub fn new(total_original: usize) -> Self {
        Self {
            total_original,
            ..Default::default()
        }
    }

    pub fn push_missing(&mut self, original: PathBuf) {
        self.missing.push(original);
    }

    pub fn push_recovered(&mut self, entry: RecoveredFile) {
        self.recovered.push(entry);
    }

    pub fn push_copy_failure(&mut self, failure: CopyFailure) {
        self.copy_failures.push(failure);
    }

    #[must_use]
    pub fn total_original(&self) -> usize {
        self.total_original
    }

    #[must_use]
    pub fn missing(&self) -> &[PathBuf] {
        &self.missing
    }

    #[must_use]
    pub fn recovered(&self) -> &[RecoveredFile] {
        &self.recovered
    }

    #[must_use]
    pub fn copy_failures(&self) -> &[CopyFailure] {
        &self.copy_failures
    }

    /// Recovered entries for which a newer-than-cutoff revision also exists.
    pub fn possibly_corrupted(&self) -> impl Iterator<Item = &Path> {
        self.recovered
            .iter()
            .filter(|entry| entry.latest_exceeds_cutoff)
            .map(|entry| entry.original.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn recovered(original: &str, flagged: bool) -> RecoveredFile {
        let stamp = NaiveDate::from_ymd_opt(2024, 7, 14)
            .unwrap()
            .and_hms_opt(19, 0, 0)
            .unwrap();
        RecoveredFile {
            original: PathBuf::from(original),
            backup_file: format!("{original}~20240714-190000"),
            backup_time: stamp,
            candidate_count: 1,
            latest_exceeds_cutoff: flagged,
            latest_file: format!("{original}~20240714-190000"),
            latest_time: stamp,
            recovered_path: PathBuf::from("recovery").join(original),
        }
    }

    #[test]
    fn test_possibly_corrupted_is_flagged_subset_of_recovered() {
        let mut report = RecoveryReport::new(3);
        report.push_missing(PathBuf::from("gone.txt"));
        report.push_recovered(recovered("clean.txt", false));
        report.push_recovered(recovered("suspect.txt", true));

        let flagged: Vec<_> = report.possibly_corrupted().collect();
        assert_eq!(flagged, vec![Path::new("suspect.txt")]);
        assert_eq!(report.missing().len(), 1);
        assert_eq!(report.recovered().len(), 2);
    }

    #[test]
    fn test_copy_failures_stay_out_of_other_partitions() {
        let mut report = RecoveryReport::new(1);
        report.push_copy_failure(CopyFailure {
            original: PathBuf::from("locked.txt"),
            source: PathBuf::from("backup/locked~20240714-190000.txt"),
            error: "permission denied".to_string(),
        });

        assert_eq!(report.copy_failures().len(), 1);
        assert!(report.missing().is_empty());
        assert!(report.recovered().is_empty());
        assert_eq!(report.possibly_corrupted().count(), 0);
    }
}
