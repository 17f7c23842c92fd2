//! Backup restoration for GhostSaver
//!
//! Copies the files of one snapshot folder back into the watched save
//! directory, overwriting whatever is there.
//!
//! Which folder gets restored follows [`RestoreSelection`]. The default,
//! `Oldest`, takes the first folder in ascending name order. Since names are
//! timestamps that is the oldest retained snapshot, not the latest one.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::settings::RestoreSelection;
use crate::error::{GhostSaverError, GhostSaverResult};

use super::fs_ops::{copy_file, display_name, list_files, list_subdirectories};
use super::manager::{BackupManager, FileFailure};

/// What a restore copied back
#[derive(Debug, Clone)]
pub struct RestoreReport {
    /// Snapshot folder name that was restored
    pub snapshot: String,
    /// Snapshot folder path
    pub path: PathBuf,
    /// Files written into the watched directory
    pub restored: Vec<PathBuf>,
    /// Files that failed to restore
    pub failures: Vec<FileFailure>,
}

impl RestoreReport {
    /// Whether every file was restored
    pub fn all_restored(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Result of a restore request
#[derive(Debug, Clone)]
pub enum RestoreOutcome {
    /// The backup root holds no snapshot folders
    NothingToRestore,
    /// A snapshot was copied back
    Restored(RestoreReport),
}

impl RestoreOutcome {
    /// One-line summary for the console
    pub fn summary(&self) -> String {
        match self {
            RestoreOutcome::NothingToRestore => "No backup to restore".to_string(),
            RestoreOutcome::Restored(report) => {
                let mut summary = format!(
                    "Restored backup {} ({} file(s))",
                    report.path.display(),
                    report.restored.len()
                );
                if !report.failures.is_empty() {
                    summary.push_str(&format!(", {} failed", report.failures.len()));
                }
                summary
            }
        }
    }
}

/// Pick the snapshot folder to restore from a set of folder names
pub fn select_snapshot<I, S>(names: I, selection: RestoreSelection) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names = names.into_iter().map(Into::into);
    match selection {
        RestoreSelection::Oldest => names.min(),
        RestoreSelection::Newest => names.max(),
    }
}

impl BackupManager {
    /// Restore a snapshot into the watched directory
    ///
    /// An empty or missing backup root is not an error and yields
    /// [`RestoreOutcome::NothingToRestore`]. Files that fail to copy are
    /// reported in the [`RestoreReport`] and the rest are still restored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backup root or the chosen snapshot folder
    /// can't be read.
    pub fn restore_latest(&self) -> GhostSaverResult<RestoreOutcome> {
        let _guard = self.lock_root();

        let names = list_subdirectories(self.backup_root()).map_err(|e| {
            GhostSaverError::Restore(format!(
                "Failed to read backup directory {}: {}",
                self.backup_root().display(),
                e
            ))
        })?;

        let Some(snapshot) = select_snapshot(names, self.restore_selection()) else {
            info!(dir = %self.backup_root().display(), "No backup to restore");
            return Ok(RestoreOutcome::NothingToRestore);
        };

        let source = self.backup_root().join(&snapshot);
        let report = restore_folder(&source, self.watched_dir(), snapshot)?;

        info!(
            snapshot = %report.snapshot,
            restored = report.restored.len(),
            failed = report.failures.len(),
            "Restore complete"
        );

        Ok(RestoreOutcome::Restored(report))
    }
}

/// Copy every file of `source` into `target`, overwriting existing files
fn restore_folder(source: &Path, target: &Path, snapshot: String) -> GhostSaverResult<RestoreReport> {
    let files = list_files(source).map_err(|e| {
        GhostSaverError::Restore(format!(
            "Failed to read backup folder {}: {}",
            source.display(),
            e
        ))
    })?;

    let mut report = RestoreReport {
        snapshot,
        path: source.to_path_buf(),
        restored: Vec::new(),
        failures: Vec::new(),
    };

    for file in files {
        let name = display_name(&file);
        let destination = target.join(&name);
        match copy_file(&file, &destination, true) {
            Ok(_) => report.restored.push(destination),
            Err(e) => {
                warn!(file = %name, error = %e, "Failed to restore file");
                report.failures.push(FileFailure::new(file, e));
            }
        }
    }

    Ok(report)
}
