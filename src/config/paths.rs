//! Path management for GhostSaver
//!
//! Resolves the backup root, the directory under which every snapshot folder
//! lives.
//!
//! ## Path Resolution Order
//!
//! 1. `GHOSTSAVER_BACKUP_DIR` environment variable (if set)
//! 2. The per-user local application-data directory, subfolder `GhostSaver`
//!    - Linux: `$XDG_DATA_HOME/GhostSaver` or `~/.local/share/GhostSaver`
//!    - macOS: `~/Library/Application Support/GhostSaver`
//!    - Windows: `%LOCALAPPDATA%\GhostSaver`

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::GhostSaverError;

/// Environment variable overriding the backup root
pub const BACKUP_DIR_ENV: &str = "GHOSTSAVER_BACKUP_DIR";

/// Name of the application folder inside the local data directory
pub const APP_DIR_NAME: &str = "GhostSaver";

/// Manages all paths used by GhostSaver
#[derive(Debug, Clone)]
pub struct GhostSaverPaths {
    /// Directory holding the snapshot folders
    backup_root: PathBuf,
}

impl GhostSaverPaths {
    /// Create a new GhostSaverPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and no
    /// override is set.
    pub fn new() -> Result<Self, GhostSaverError> {
        let backup_root = match std::env::var_os(BACKUP_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { backup_root })
    }

    /// Create GhostSaverPaths with an explicit backup root (useful for testing)
    pub fn with_backup_root(backup_root: impl Into<PathBuf>) -> Self {
        Self {
            backup_root: backup_root.into(),
        }
    }

    /// Get the backup root
    pub fn backup_root(&self) -> &Path {
        &self.backup_root
    }

    /// Get the path of the snapshot folder with the given name
    pub fn snapshot_dir(&self, name: &str) -> PathBuf {
        self.backup_root.join(name)
    }

    /// Create the backup root if it doesn't exist yet
    pub fn ensure_backup_root(&self) -> Result<(), GhostSaverError> {
        std::fs::create_dir_all(&self.backup_root).map_err(|e| {
            GhostSaverError::Io(format!(
                "Failed to create backup directory {}: {}",
                self.backup_root.display(),
                e
            ))
        })
    }
}

/// Resolve the default backup root from the platform's local data directory
fn resolve_default_path() -> Result<PathBuf, GhostSaverError> {
    let dirs = BaseDirs::new().ok_or_else(|| {
        GhostSaverError::Config("Could not determine the local application data directory".into())
    })?;
    Ok(dirs.data_local_dir().join(APP_DIR_NAME))
}
