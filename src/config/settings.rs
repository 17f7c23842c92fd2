//! User settings for GhostSaver
//!
//! Settings are read once at startup from a JSON file (`appsettings.json` by
//! default). Keys use PascalCase:
//!
//! ```json
//! {
//!   "SaveGameLocation": "/home/me/.local/share/SomeGame/saves",
//!   "BackupIntervalSeconds": 60,
//!   "RetentionCount": 5,
//!   "RestoreSelection": "Oldest"
//! }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::GhostSaverError;

/// Default settings file name, looked up in the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "appsettings.json";

/// Which snapshot folder a restore picks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RestoreSelection {
    /// First folder in ascending name order, i.e. the oldest retained snapshot
    #[default]
    Oldest,
    /// Last folder in ascending name order, i.e. the most recent snapshot
    Newest,
}

/// User settings for GhostSaver
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Settings {
    /// Directory the game writes its saves to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_game_location: Option<PathBuf>,

    /// Delay between the end of one snapshot and the start of the next
    #[serde(default = "default_interval_secs")]
    pub backup_interval_seconds: u64,

    /// Number of snapshot folders kept after each tick
    #[serde(default = "default_retention_count")]
    pub retention_count: usize,

    /// Snapshot picked by a restore
    #[serde(default)]
    pub restore_selection: RestoreSelection,
}

fn default_interval_secs() -> u64 {
    60
}

fn default_retention_count() -> usize {
    5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            save_game_location: None,
            backup_interval_seconds: default_interval_secs(),
            retention_count: default_retention_count(),
            restore_selection: RestoreSelection::default(),
        }
    }
}

impl Settings {
    /// Load settings from a file, falling back to defaults if it doesn't exist
    pub fn load(path: &Path) -> Result<Self, GhostSaverError> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            GhostSaverError::Io(format!(
                "Failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            GhostSaverError::Config(format!(
                "Failed to parse settings file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Save settings to disk
    ///
    /// Serialization failures surface as [`GhostSaverError::Json`].
    pub fn save(&self, path: &Path) -> Result<(), GhostSaverError> {
        let contents = serde_json::to_string_pretty(self)?;

        std::fs::write(path, contents).map_err(|e| {
            GhostSaverError::Io(format!(
                "Failed to write settings file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Interval between snapshot ticks
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.backup_interval_seconds)
    }

    /// Check the numeric settings
    pub fn validate(&self) -> Result<(), GhostSaverError> {
        if self.backup_interval_seconds == 0 {
            return Err(GhostSaverError::Config(
                "BackupIntervalSeconds must be greater than zero".into(),
            ));
        }
        if self.retention_count == 0 {
            return Err(GhostSaverError::Config(
                "RetentionCount must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// The watched save-game directory
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the location is missing, relative, or
    /// not an existing directory.
    pub fn save_game_location(&self) -> Result<&Path, GhostSaverError> {
        let path = match self.save_game_location.as_deref() {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => {
                return Err(GhostSaverError::Config(
                    "SaveGameLocation is not set".into(),
                ))
            }
        };

        if !path.is_absolute() {
            return Err(GhostSaverError::Config(format!(
                "SaveGameLocation must be an absolute path: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(GhostSaverError::Config(format!(
                "SaveGameLocation is not a directory: {}",
                path.display()
            )));
        }

        Ok(path)
    }
}
