//! CLI command handlers for GhostSaver
//!
//! The binary parses arguments and builds the [`BackupManager`]; the
//! handlers here do the work and print the results.

use std::io::{self, IsTerminal};
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;

use crate::backup::{BackupManager, RestoreOutcome, TickOutcome};
use crate::config::{GhostSaverPaths, Settings};
use crate::driver::{CommandDriver, LineCommands, TerminalKeys};
use crate::error::GhostSaverResult;
use crate::scheduler::{CancellationToken, SnapshotScheduler};

/// Run the scheduler in the background and the command loop in the foreground
pub fn handle_watch(manager: Arc<BackupManager>, interval: Duration) -> GhostSaverResult<()> {
    println!("GhostSaver {}", env!("CARGO_PKG_VERSION"));
    println!(
        "Automatically backing up saves from {}. Press 'R' to restore a backup. Press 'X' to exit.",
        manager.watched_dir().display()
    );

    let scheduler = SnapshotScheduler::spawn(manager.clone(), interval, CancellationToken::new())?;

    let mut driver = CommandDriver::new(manager, io::stdout());
    let result = if io::stdin().is_terminal() {
        driver.run(&mut TerminalKeys::new())
    } else {
        driver.run(&mut LineCommands::new(io::stdin().lock()))
    };

    scheduler.shutdown();
    result
}

/// Take a single snapshot
pub fn handle_snapshot(manager: &BackupManager) -> GhostSaverResult<()> {
    let outcome = manager.run_tick()?;

    if let TickOutcome::Created(report) = &outcome {
        for failure in &report.failures {
            println!("Failed to backup {}: {}", failure.path.display(), failure.cause);
        }
        for failure in &report.eviction_failures {
            println!("Failed to remove {}: {}", failure.path.display(), failure.cause);
        }
    }
    println!("{}", outcome.summary());

    Ok(())
}

/// Restore a snapshot once
pub fn handle_restore(manager: &BackupManager) -> GhostSaverResult<()> {
    let outcome = manager.restore_latest()?;

    if let RestoreOutcome::Restored(report) = &outcome {
        for failure in &report.failures {
            println!("Failed to restore {}: {}", failure.path.display(), failure.cause);
        }
    }
    println!("{}", outcome.summary());

    Ok(())
}

/// List snapshot folders
pub fn handle_list(manager: &BackupManager, verbose: bool) -> GhostSaverResult<()> {
    let snapshots = manager.list_snapshots()?;

    if snapshots.is_empty() {
        println!("No backups found in {}", manager.backup_root().display());
        return Ok(());
    }

    println!("Available Backups");
    println!("=================");

    let now = Local::now().naive_local();
    for (i, snapshot) in snapshots.iter().enumerate() {
        let age = snapshot
            .taken_at
            .map(|taken| format!("{} ago", format_duration(now.signed_duration_since(taken))))
            .unwrap_or_else(|| "unknown age".to_string());

        if verbose {
            println!(
                "{}. {}\n   Path: {}\n   Files: {}\n   Size: {}\n   Age: {}\n",
                i + 1,
                snapshot.name,
                snapshot.path.display(),
                snapshot.file_count,
                format_size(snapshot.size_bytes),
                age,
            );
        } else {
            println!(
                "  {}. {} ({}, {} file(s), {})",
                i + 1,
                snapshot.name,
                age,
                snapshot.file_count,
                format_size(snapshot.size_bytes),
            );
        }
    }

    println!();
    println!("Total: {} backup(s)", snapshots.len());
    Ok(())
}

/// Show resolved paths and settings
pub fn handle_config(paths: &GhostSaverPaths, settings: &Settings) {
    println!("GhostSaver Configuration");
    println!("========================");
    println!(
        "Save game location: {}",
        settings
            .save_game_location
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<not set>".to_string())
    );
    println!("Backup directory:   {}", paths.backup_root().display());
    println!("Backup interval:    {}s", settings.backup_interval_seconds);
    println!("Retention count:    {}", settings.retention_count);
    println!("Restore selection:  {:?}", settings.restore_selection);
}

/// Format a duration in human-readable form
fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    format!("{}d", hours / 24)
}

/// Format a file size in human-readable form
fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}
