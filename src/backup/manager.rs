//! Backup manager for GhostSaver
//!
//! Owns the backup root and the lock that serializes every operation on it.
//! A snapshot tick copies the watched save directory into a new folder named
//! after the current minute, then trims the root down to the retention count.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::config::paths::GhostSaverPaths;
use crate::config::settings::{RestoreSelection, Settings};
use crate::error::{GhostSaverError, GhostSaverResult};

use super::clock::{parse_snapshot_name, snapshot_name, Clock, SystemClock};
use super::fs_ops::{copy_file, display_name, list_files, list_subdirectories};
use super::retention::folders_to_evict;

/// A single file or folder that could not be processed
#[derive(Debug, Clone)]
pub struct FileFailure {
    /// The file or folder affected
    pub path: PathBuf,
    /// Human-readable cause
    pub cause: String,
}

impl FileFailure {
    pub(crate) fn new(path: impl Into<PathBuf>, cause: impl ToString) -> Self {
        Self {
            path: path.into(),
            cause: cause.to_string(),
        }
    }
}

/// What a new snapshot ended up containing
#[derive(Debug, Clone)]
pub struct SnapshotReport {
    /// Snapshot folder name
    pub snapshot: String,
    /// Snapshot folder path
    pub path: PathBuf,
    /// Files copied into the snapshot
    pub copied: Vec<PathBuf>,
    /// Files that failed to copy
    pub failures: Vec<FileFailure>,
    /// Old snapshot folders deleted by retention
    pub evicted: Vec<String>,
    /// Old snapshot folders that could not be deleted
    pub eviction_failures: Vec<FileFailure>,
    /// Retention was skipped because some files failed to copy
    pub retention_deferred: bool,
}

impl SnapshotReport {
    /// Whether every file and every eviction succeeded
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.eviction_failures.is_empty()
    }

    /// One-line summary for the console
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Backed up {} file(s) to {}",
            self.copied.len(),
            self.snapshot
        );
        if !self.failures.is_empty() {
            summary.push_str(&format!(", {} failed", self.failures.len()));
        }
        if !self.evicted.is_empty() {
            summary.push_str(&format!(", removed {} old backup(s)", self.evicted.len()));
        }
        if self.retention_deferred {
            summary.push_str(", old backups kept");
        }
        summary
    }
}

/// Result of one scheduler tick
#[derive(Debug, Clone)]
pub enum TickOutcome {
    /// A snapshot for this minute already existed
    Skipped {
        /// The existing snapshot folder name
        snapshot: String,
    },
    /// A new snapshot was taken
    Created(SnapshotReport),
}

impl TickOutcome {
    /// One-line summary for the console
    pub fn summary(&self) -> String {
        match self {
            TickOutcome::Skipped { snapshot } => {
                format!("Backup {} already exists, skipped", snapshot)
            }
            TickOutcome::Created(report) => report.summary(),
        }
    }
}

/// Metadata about a snapshot folder
#[derive(Debug, Clone)]
pub struct SnapshotInfo {
    /// Folder name
    pub name: String,
    /// Full path to the folder
    pub path: PathBuf,
    /// Time encoded in the name, if it is a GhostSaver timestamp
    pub taken_at: Option<NaiveDateTime>,
    /// Number of files in the folder
    pub file_count: usize,
    /// Total size of those files in bytes
    pub size_bytes: u64,
}

/// Manages snapshot creation, retention and restore
///
/// Both [`BackupManager::run_tick`] and [`BackupManager::restore_latest`]
/// hold the same lock for their whole duration, so their effects on the
/// backup root never interleave.
pub struct BackupManager {
    /// Backup root paths
    paths: GhostSaverPaths,
    /// The live save-game directory
    watched_dir: PathBuf,
    /// Number of snapshots kept after each tick
    retention_count: usize,
    /// Which snapshot a restore picks
    restore_selection: RestoreSelection,
    /// Source of snapshot timestamps
    clock: Arc<dyn Clock>,
    /// Serializes access to the backup root
    lock: Mutex<()>,
}

impl BackupManager {
    /// Create a new BackupManager using the system clock
    pub fn new(paths: GhostSaverPaths, watched_dir: impl Into<PathBuf>, retention_count: usize) -> Self {
        Self {
            paths,
            watched_dir: watched_dir.into(),
            retention_count,
            restore_selection: RestoreSelection::default(),
            clock: Arc::new(SystemClock),
            lock: Mutex::new(()),
        }
    }

    /// Create a BackupManager from validated settings
    pub fn from_settings(paths: GhostSaverPaths, settings: &Settings) -> GhostSaverResult<Self> {
        settings.validate()?;
        let watched_dir = settings.save_game_location()?.to_path_buf();
        Ok(Self::new(paths, watched_dir, settings.retention_count)
            .with_restore_selection(settings.restore_selection))
    }

    /// Use a different clock for snapshot names
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Choose which snapshot a restore picks
    pub fn with_restore_selection(mut self, selection: RestoreSelection) -> Self {
        self.restore_selection = selection;
        self
    }

    /// Get the backup root
    pub fn backup_root(&self) -> &Path {
        self.paths.backup_root()
    }

    /// Get the watched save-game directory
    pub fn watched_dir(&self) -> &Path {
        &self.watched_dir
    }

    /// Get the retention count
    pub fn retention_count(&self) -> usize {
        self.retention_count
    }

    /// Get the restore selection
    pub fn restore_selection(&self) -> RestoreSelection {
        self.restore_selection
    }

    /// Acquire exclusive access to the backup root
    ///
    /// A poisoned lock is recovered: the guarded state is the filesystem, not
    /// the unit value inside the mutex.
    pub(crate) fn lock_root(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Take a snapshot of the watched directory and apply retention
    ///
    /// Files that fail to copy are reported in the returned
    /// [`SnapshotReport`] and don't stop the tick.
    ///
    /// # Errors
    ///
    /// Returns an error if the watched directory is missing or unreadable, or
    /// the snapshot folder can't be created.
    pub fn run_tick(&self) -> GhostSaverResult<TickOutcome> {
        let _guard = self.lock_root();

        let snapshot = snapshot_name(self.clock.now());
        let target = self.paths.snapshot_dir(&snapshot);

        if target.exists() {
            debug!(snapshot = %snapshot, "Backup for this minute already exists");
            return Ok(TickOutcome::Skipped { snapshot });
        }

        if !self.watched_dir.is_dir() {
            return Err(GhostSaverError::directory_not_found(
                self.watched_dir.display().to_string(),
            ));
        }

        let files = list_files(&self.watched_dir).map_err(|e| {
            GhostSaverError::Snapshot(format!(
                "Failed to read save directory {}: {}",
                self.watched_dir.display(),
                e
            ))
        })?;

        self.paths.ensure_backup_root()?;
        fs::create_dir(&target).map_err(|e| {
            GhostSaverError::Snapshot(format!(
                "Failed to create backup folder {}: {}",
                target.display(),
                e
            ))
        })?;

        let mut report = SnapshotReport {
            snapshot: snapshot.clone(),
            path: target.clone(),
            copied: Vec::new(),
            failures: Vec::new(),
            evicted: Vec::new(),
            eviction_failures: Vec::new(),
            retention_deferred: false,
        };

        for file in files {
            let destination = target.join(display_name(&file));
            match copy_file(&file, &destination, false) {
                Ok(_) => report.copied.push(file),
                Err(e) => {
                    warn!(file = %file.display(), error = %e, "Failed to back up file");
                    report.failures.push(FileFailure::new(file, e));
                }
            }
        }

        // An incomplete snapshot must not push complete ones out
        if report.failures.is_empty() {
            self.enforce_retention(&mut report);
        } else {
            report.retention_deferred = true;
            warn!(
                snapshot = %snapshot,
                failed = report.failures.len(),
                "Backup incomplete, keeping old backups until a complete one is taken"
            );
        }

        info!(
            snapshot = %snapshot,
            copied = report.copied.len(),
            failed = report.failures.len(),
            evicted = report.evicted.len(),
            "Backup complete"
        );

        Ok(TickOutcome::Created(report))
    }

    /// Delete snapshot folders beyond the retention count
    fn enforce_retention(&self, report: &mut SnapshotReport) {
        let names = match list_subdirectories(self.paths.backup_root()) {
            Ok(names) => names,
            Err(e) => {
                warn!(
                    dir = %self.paths.backup_root().display(),
                    error = %e,
                    "Failed to list backups for retention"
                );
                report
                    .eviction_failures
                    .push(FileFailure::new(self.paths.backup_root(), e));
                return;
            }
        };

        for name in folders_to_evict(names, self.retention_count) {
            let path = self.paths.snapshot_dir(&name);
            match fs::remove_dir_all(&path) {
                Ok(()) => {
                    debug!(snapshot = %name, "Removed old backup");
                    report.evicted.push(name);
                }
                Err(e) => {
                    warn!(folder = %path.display(), error = %e, "Failed to remove old backup");
                    report.eviction_failures.push(FileFailure::new(path, e));
                }
            }
        }
    }

    /// List snapshot folders, newest first
    pub fn list_snapshots(&self) -> GhostSaverResult<Vec<SnapshotInfo>> {
        let _guard = self.lock_root();

        let mut names = list_subdirectories(self.paths.backup_root()).map_err(|e| {
            GhostSaverError::Io(format!("Failed to read backup directory: {}", e))
        })?;
        names.sort_by(|a, b| b.cmp(a));

        let mut snapshots = Vec::with_capacity(names.len());
        for name in names {
            let path = self.paths.snapshot_dir(&name);
            let files = list_files(&path).unwrap_or_default();
            let size_bytes = files
                .iter()
                .filter_map(|f| fs::metadata(f).ok())
                .map(|m| m.len())
                .sum();

            snapshots.push(SnapshotInfo {
                taken_at: parse_snapshot_name(&name),
                file_count: files.len(),
                size_bytes,
                name,
                path,
            });
        }

        Ok(snapshots)
    }
}
