//! Configuration module for GhostSaver
//!
//! This module provides configuration management including:
//! - Backup root resolution
//! - Settings file loading and validation

pub mod paths;
pub mod settings;

pub use paths::GhostSaverPaths;
pub use settings::{RestoreSelection, Settings};
