//! Per-file recovery loop: query the store, pick a revision, copy it.

use indicatif::{ProgressBar, ProgressStyle};
use restitch_core::{
    filename, select, BackupStore, CopyFailure, Cutoff, RecoveredFile, RecoveryReport,
    RevisionCandidate, RevisionCopier,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// How per-file progress is rendered. Purely cosmetic: classification does
/// not depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// Single progress line, overwritten in place.
    Inline,
    /// One log line per file.
    PerFile,
}

pub struct RecoveryRun<S, C> {
    store: S,
    copier: C,
    cutoff: Cutoff,
}

impl<S: BackupStore, C: RevisionCopier> RecoveryRun<S, C> {
    pub fn new(store: S, copier: C, cutoff: Cutoff) -> Self {
        Self {
            store,
            copier,
            cutoff,
        }
    }

    /// Classifies and restores every original file, in enumeration order.
    /// Per-file failures are captured in the report; nothing here aborts
    /// the run.
    pub fn recover(&self, originals: &[PathBuf], progress: ProgressMode) -> RecoveryReport {
        let mut report = RecoveryReport::new(originals.len());

        let bar = match progress {
            ProgressMode::Inline => {
                let pb = ProgressBar::new(originals.len() as u64);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("[{elapsed_precise}] {pos}/{len} {wide_msg}")
                        .expect("invalid progress bar template - this is a bug"),
                );
                Some(pb)
            }
            ProgressMode::PerFile => None,
        };

        for (index, original) in originals.iter().enumerate() {
            match &bar {
                Some(pb) => {
                    pb.set_message(original.display().to_string());
                    pb.inc(1);
                }
                None => info!("({}/{}) {}", index + 1, originals.len(), original.display()),
            }

            self.recover_one(original, &mut report);
        }

        if let Some(pb) = bar {
            pb.finish_and_clear();
        }

        report
    }

    fn recover_one(&self, original: &Path, report: &mut RecoveryReport) {
        let rel_dir = original.parent().unwrap_or(Path::new(""));
        let Some(file_name) = original.file_name().and_then(|name| name.to_str()) else {
            // A non-UTF-8 name can never match a revision filename.
            report.push_missing(original.to_path_buf());
            return;
        };
        let (base, ext) = filename::split_base_ext(file_name);

        // Fast path: no mirrored directory means no revisions for anything
        // inside it.
        if !self.store.revision_dir_exists(rel_dir) {
            report.push_missing(original.to_path_buf());
            return;
        }

        let entries = match self.store.list_entries(rel_dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(
                    "could not list revisions for {}: {err}",
                    original.display()
                );
                report.push_missing(original.to_path_buf());
                return;
            }
        };

        let mut candidates = Vec::new();
        for entry in entries {
            if !filename::is_revision_of(base, ext, &entry) {
                continue;
            }
            match filename::parse_revision_timestamp(&entry) {
                Ok(timestamp) => candidates.push(RevisionCandidate {
                    file_name: entry,
                    timestamp,
                }),
                // One bad filename must not halt the run.
                Err(err) => warn!("skipping revision: {err}"),
            }
        }

        let outcome = select(&candidates, self.cutoff);
        let Some(chosen) = outcome.chosen else {
            report.push_missing(original.to_path_buf());
            return;
        };
        let latest = outcome
            .latest
            .expect("chosen implies at least one candidate");

        let source = self.store.revision_path(rel_dir, &chosen.file_name);
        match self.copier.copy_revision(&source, original) {
            Ok(recovered_path) => report.push_recovered(RecoveredFile {
                original: original.to_path_buf(),
                backup_file: chosen.file_name,
                backup_time: chosen.timestamp,
                candidate_count: outcome.candidate_count,
                latest_exceeds_cutoff: outcome.latest_exceeds_cutoff,
                latest_file: latest.file_name,
                latest_time: latest.timestamp,
                recovered_path,
            }),
            Err(err) => {
                warn!(
                    "error copying {} to the recovery tree: {err}",
                    source.display()
                );
                report.push_copy_failure(CopyFailure {
                    original: original.to_path_buf(),
                    source,
                    error: err.to_string(),
                });
            }
        }
    }
}
