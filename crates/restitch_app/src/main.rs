//! Restitch - rebuild a damaged file tree from timestamped backup revisions.
//!
//! Continuous-sync tools keep prior revisions of every file they overwrite,
//! named `<base>~<YYYYMMDD-HHMMSS><ext>`. Given the damaged tree and the
//! version store, this tool restores the newest revision of each file that
//! predates a cutoff, and reports what it could not restore.

mod recovery;
mod report;

use anyhow::{bail, Context, Result};
use chrono::{Duration, NaiveDateTime};
use clap::Parser;
use restitch_core::filename::TIMESTAMP_FORMAT;
use restitch_core::{Cutoff, FileEnumerator};
use restitch_io::{FsBackupStore, FsCopier, FsEnumerator};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use recovery::{ProgressMode, RecoveryRun};

#[derive(Parser, Debug)]
#[command(name = "restitch")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Root of the damaged tree; used to know which files should exist.
    #[arg(long)]
    corrupted_dir: PathBuf,

    /// Root of the version-history store mirroring the damaged tree.
    #[arg(long)]
    backup_dir: PathBuf,

    /// Where restored files are written.
    #[arg(long, default_value = "recovery")]
    recovery_dir: PathBuf,

    /// Where the recovery logs are written.
    #[arg(long, default_value = "logs")]
    logs_dir: PathBuf,

    /// Hours past the reference time a revision may carry and still be
    /// used. Revisions stamped later may themselves be corrupted.
    #[arg(long, default_value_t = 3)]
    time_limit: i64,

    /// Moment the corruption is believed to have occurred (YYYYMMDD-HHMMSS).
    #[arg(long, value_parser = parse_reference_time)]
    reference_time: NaiveDateTime,

    /// Overwrite a single progress line instead of logging one per file.
    #[arg(long, default_value_t = false)]
    log_inline: bool,
}

fn parse_reference_time(value: &str) -> std::result::Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map_err(|err| format!("expected YYYYMMDD-HHMMSS: {err}"))
}

fn main() -> Result<()> {
    let args = Args::parse();

    if !args.corrupted_dir.is_dir() {
        bail!(
            "corrupted directory not found: {}",
            args.corrupted_dir.display()
        );
    }
    if !args.backup_dir.is_dir() {
        bail!("backup directory not found: {}", args.backup_dir.display());
    }

    std::fs::create_dir_all(&args.logs_dir)
        .with_context(|| format!("failed to create logs directory {}", args.logs_dir.display()))?;
    init_logging(&args.logs_dir)?;

    let cutoff = Cutoff::new(args.reference_time, Duration::hours(args.time_limit));

    info!("Starting recovery with the following options:");
    info!("  Corrupted Directory: {}", args.corrupted_dir.display());
    info!("  Backup Directory:    {}", args.backup_dir.display());
    info!("  Recovery Directory:  {}", args.recovery_dir.display());
    info!("  Logs Directory:      {}", args.logs_dir.display());
    info!("  Time Limit:          {}h", args.time_limit);
    info!("  Reference Time:      {}", args.reference_time);
    info!("  Cutoff:              {}", cutoff.instant());

    let start_time = Instant::now();

    let originals = FsEnumerator
        .enumerate(&args.corrupted_dir)
        .context("failed to enumerate the corrupted tree")?;
    info!("Found {} original files", originals.len());

    let progress = if args.log_inline {
        ProgressMode::Inline
    } else {
        ProgressMode::PerFile
    };

    let run = RecoveryRun::new(
        FsBackupStore::new(&args.backup_dir),
        FsCopier::new(&args.recovery_dir),
        cutoff,
    );
    let result = run.recover(&originals, progress);

    let log_paths = report::write_all(&result, &args.logs_dir)
        .context("failed to write recovery logs")?;

    let elapsed = start_time.elapsed();
    print_summary(&result, elapsed.as_secs_f64());

    info!("Recovery complete.");
    info!("Missing files log: {}", log_paths[0].display());
    info!("Recovered files log: {}", log_paths[1].display());
    info!("Possibly corrupted files log: {}", log_paths[2].display());

    Ok(())
}

/// Events go to stdout and to `<logs-dir>/recovery.log`.
fn init_logging(logs_dir: &Path) -> Result<()> {
    let log_file = std::fs::File::create(logs_dir.join("recovery.log"))
        .context("failed to create recovery.log")?;

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .without_time();
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .init();

    Ok(())
}

fn print_summary(result: &restitch_core::RecoveryReport, elapsed_secs: f64) {
    let possibly_corrupted = result.possibly_corrupted().count();

    println!("\n╔════════════════════════════════════════╗");
    println!("║       === Recovery Finished ===        ║");
    println!("╠════════════════════════════════════════╣");
    println!(
        "║ Elapsed Time:       {:>18} ║",
        format!("{elapsed_secs:.1}s")
    );
    println!("║ Original Files:     {:>18} ║", result.total_original());
    println!("║ Recovered:          {:>18} ║", result.recovered().len());
    println!("║ Missing:            {:>18} ║", result.missing().len());
    println!("║ Possibly Corrupted: {:>18} ║", possibly_corrupted);
    println!(
        "║ Copy Failures:      {:>18} ║",
        result.copy_failures().len()
    );
    println!("╚════════════════════════════════════════╝");
}
