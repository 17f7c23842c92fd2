//! Backup system for GhostSaver
//!
//! Snapshots the watched save-game directory into timestamped folders under
//! the backup root, keeps only the most recent few, and restores one on
//! request.
//!
//! # Architecture
//!
//! - `BackupManager`: owns the backup root lock; runs snapshot ticks and
//!   restores, which never overlap
//! - `retention`: decides which snapshot folders to evict
//! - `clock`: timestamp source and snapshot folder naming
//!
//! # Backup Layout
//!
//! ```text
//! <backup root>/
//!   202401011530/
//!     save1.dat
//!     save2.dat
//!   202401011531/
//!     ...
//! ```
//!
//! Folder names are `yyyyMMddHHmm`, so name order is chronological order.
//!
//! # Example
//!
//! ```rust,ignore
//! use ghost_saver::backup::BackupManager;
//! use ghost_saver::config::GhostSaverPaths;
//!
//! let paths = GhostSaverPaths::new()?;
//! let manager = BackupManager::new(paths, "/path/to/saves", 5);
//!
//! let outcome = manager.run_tick()?;
//! println!("{}", outcome.summary());
//!
//! let restored = manager.restore_latest()?;
//! println!("{}", restored.summary());
//! ```

pub mod clock;
mod fs_ops;
mod manager;
mod restore;
pub mod retention;

pub use clock::{Clock, ManualClock, SystemClock};
pub use manager::{BackupManager, FileFailure, SnapshotInfo, SnapshotReport, TickOutcome};
pub use restore::{select_snapshot, RestoreOutcome, RestoreReport};
