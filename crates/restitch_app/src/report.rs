//! Writers for the three recovery logs and the run summary.

use anyhow::Result;
use chrono::Utc;
use restitch_core::filename::DISPLAY_FORMAT;
use restitch_core::RecoveryReport;
use serde::Serialize;
use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const MISSING_LOG: &str = "missing-files.txt";
pub const RECOVERED_CSV: &str = "recovered-files.csv";
pub const POSSIBLY_CORRUPTED_LOG: &str = "possibly-corrupted-file-backups.txt";
pub const SUMMARY_JSON: &str = "summary.json";

const CSV_HEADER: [&str; 7] = [
    "Original File",
    "Backup File",
    "Timestamp of Backup File",
    "Number of Backup Files Present",
    "Is Last Backup Outside Limit",
    "Last Backup Found",
    "Last Backup Timestamp",
];

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub total_original: usize,
    pub missing: usize,
    pub recovered: usize,
    pub possibly_corrupted: usize,
    pub copy_failed: usize,
    pub completed_at: String,
}

impl RunSummary {
    #[must_use]
    pub fn from_report(report: &RecoveryReport) -> Self {
        Self {
            total_original: report.total_original(),
            missing: report.missing().len(),
            recovered: report.recovered().len(),
            possibly_corrupted: report.possibly_corrupted().count(),
            copy_failed: report.copy_failures().len(),
            completed_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Writes all four artifacts into `logs_dir` and returns their paths in
/// the order missing / recovered / possibly-corrupted / summary.
pub fn write_all(report: &RecoveryReport, logs_dir: &Path) -> Result<[PathBuf; 4]> {
    fs::create_dir_all(logs_dir)?;

    let paths = [
        logs_dir.join(MISSING_LOG),
        logs_dir.join(RECOVERED_CSV),
        logs_dir.join(POSSIBLY_CORRUPTED_LOG),
        logs_dir.join(SUMMARY_JSON),
    ];

    write_path_list(report.missing().iter().map(PathBuf::as_path), &paths[0])?;
    write_recovered_csv(report, &paths[1])?;
    write_path_list(report.possibly_corrupted(), &paths[2])?;
    write_summary(&RunSummary::from_report(report), &paths[3])?;

    Ok(paths)
}

fn write_path_list<'a>(paths: impl Iterator<Item = &'a Path>, dest: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(dest)?);
    for path in paths {
        writeln!(writer, "{}", path.display())?;
    }
    writer.flush()?;
    Ok(())
}

fn write_recovered_csv(report: &RecoveryReport, dest: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(dest)?);
    writeln!(writer, "{}", CSV_HEADER.join(","))?;

    for entry in report.recovered() {
        let row = [
            csv_field(&entry.original.display().to_string()).into_owned(),
            csv_field(&entry.backup_file).into_owned(),
            entry.backup_time.format(DISPLAY_FORMAT).to_string(),
            entry.candidate_count.to_string(),
            entry.latest_exceeds_cutoff.to_string(),
            csv_field(&entry.latest_file).into_owned(),
            entry.latest_time.format(DISPLAY_FORMAT).to_string(),
        ];
        writeln!(writer, "{}", row.join(","))?;
    }

    writer.flush()?;
    Ok(())
}

fn write_summary(summary: &RunSummary, dest: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(dest, json)?;
    Ok(())
}

// RFC-4180 style quoting for fields carrying a comma, quote or newline.
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use restitch_core::RecoveredFile;
    use tempfile::TempDir;

    fn sample_report() -> RecoveryReport {
        let stamp = |h| {
            NaiveDate::from_ymd_opt(2024, 7, 14)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap()
        };

        let mut report = RecoveryReport::new(3);
        report.push_missing(PathBuf::from("docs/gone.txt"));
        report.push_recovered(RecoveredFile {
            original: PathBuf::from("docs/notes.txt"),
            backup_file: "notes~20240714-190000.txt".to_string(),
            backup_time: stamp(19),
            candidate_count: 3,
            latest_exceeds_cutoff: true,
            latest_file: "notes~20240714-230000.txt".to_string(),
            latest_time: stamp(23),
            recovered_path: PathBuf::from("recovery/docs/notes.txt"),
        });
        report
    }

    #[test]
    fn test_write_all_produces_four_artifacts() {
        let logs = TempDir::new().unwrap();
        let paths = write_all(&sample_report(), logs.path()).unwrap();

        for path in &paths {
            assert!(path.exists(), "{} should exist", path.display());
        }
    }

    #[test]
    fn test_missing_log_one_path_per_line() {
        let logs = TempDir::new().unwrap();
        write_all(&sample_report(), logs.path()).unwrap();

        let content = fs::read_to_string(logs.path().join(MISSING_LOG)).unwrap();
        assert_eq!(content, "docs/gone.txt\n");
    }

    #[test]
    fn test_recovered_csv_layout() {
        let logs = TempDir::new().unwrap();
        write_all(&sample_report(), logs.path()).unwrap();

        let content = fs::read_to_string(logs.path().join(RECOVERED_CSV)).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next().unwrap(), CSV_HEADER.join(","));
        assert_eq!(
            lines.next().unwrap(),
            "docs/notes.txt,notes~20240714-190000.txt,2024-07-14 19:00:00,3,true,\
             notes~20240714-230000.txt,2024-07-14 23:00:00"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_possibly_corrupted_log_lists_flagged_entries() {
        let logs = TempDir::new().unwrap();
        write_all(&sample_report(), logs.path()).unwrap();

        let content =
            fs::read_to_string(logs.path().join(POSSIBLY_CORRUPTED_LOG)).unwrap();
        assert_eq!(content, "docs/notes.txt\n");
    }

    #[test]
    fn test_summary_counts() {
        let summary = RunSummary::from_report(&sample_report());
        assert_eq!(summary.total_original, 3);
        assert_eq!(summary.missing, 1);
        assert_eq!(summary.recovered, 1);
        assert_eq!(summary.possibly_corrupted, 1);
        assert_eq!(summary.copy_failed, 0);
    }

    #[test]
    fn test_csv_field_escaping() {
        assert_eq!(csv_field("plain.txt"), "plain.txt");
        assert_eq!(csv_field("with,comma.txt"), "\"with,comma.txt\"");
        assert_eq!(csv_field("say \"hi\".txt"), "\"say \"\"hi\"\".txt\"");
    }
}
