//! GhostSaver - periodic save-game snapshots
//!
//! This library snapshots a save-game directory into timestamped folders on
//! a fixed interval, keeps only the most recent few, and copies a snapshot
//! back into the save directory on request.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Backup root resolution and settings
//! - `error`: Custom error types
//! - `backup`: Snapshot, retention and restore, serialized by one lock
//! - `scheduler`: Cancellable background loop running snapshot ticks
//! - `driver`: Interactive command loop (restore / exit)
//! - `cli`: Handlers behind the `ghostsaver` subcommands
//! - `logging`: tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ghost_saver::backup::BackupManager;
//! use ghost_saver::config::{GhostSaverPaths, Settings};
//! use ghost_saver::scheduler::{CancellationToken, SnapshotScheduler};
//!
//! let settings = Settings::load("appsettings.json".as_ref())?;
//! let manager = Arc::new(BackupManager::from_settings(GhostSaverPaths::new()?, &settings)?);
//! let scheduler = SnapshotScheduler::spawn(manager.clone(), settings.interval(), CancellationToken::new())?;
//! // ...
//! scheduler.shutdown();
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod logging;
pub mod scheduler;

pub use error::GhostSaverError;
