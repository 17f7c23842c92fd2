use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};

use ghost_saver::backup::BackupManager;
use ghost_saver::cli::{handle_config, handle_list, handle_restore, handle_snapshot, handle_watch};
use ghost_saver::config::settings::DEFAULT_SETTINGS_FILE;
use ghost_saver::config::{GhostSaverPaths, Settings};
use ghost_saver::logging::init_logging;

#[derive(Parser)]
#[command(
    name = "ghostsaver",
    version,
    about = "Periodic save-game backups with one-key restore",
    long_about = "GhostSaver copies your save-game directory into a timestamped backup \
                  folder every interval, keeps only the most recent few, and restores \
                  a backup into the save directory when you press 'R'."
)]
struct Cli {
    /// Settings file
    #[arg(short, long, global = true, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,

    /// Save-game directory (overrides SaveGameLocation)
    #[arg(long, global = true, env = "GHOSTSAVER_SAVE_DIR")]
    save_dir: Option<PathBuf>,

    /// Backup directory (overrides the default location)
    #[arg(long, global = true)]
    backup_dir: Option<PathBuf>,

    /// Seconds between backups (overrides BackupIntervalSeconds)
    #[arg(long, global = true)]
    interval: Option<u64>,

    /// Number of backups to keep (overrides RetentionCount)
    #[arg(long, global = true)]
    retention: Option<usize>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Back up periodically and wait for restore/exit keys (default)
    Watch,

    /// Take a single backup now
    Snapshot,

    /// Restore a backup into the save directory
    Restore,

    /// List available backups
    List {
        /// Show detailed information
        #[arg(short = 'l', long)]
        long: bool,
    },

    /// Show current configuration and paths
    Config {
        /// Write the effective settings back to the settings file
        #[arg(long)]
        save: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut settings = Settings::load(&cli.config)?;
    if let Some(save_dir) = cli.save_dir {
        settings.save_game_location = Some(save_dir);
    }
    if let Some(interval) = cli.interval {
        settings.backup_interval_seconds = interval;
    }
    if let Some(retention) = cli.retention {
        settings.retention_count = retention;
    }

    let paths = match cli.backup_dir {
        Some(dir) => GhostSaverPaths::with_backup_root(dir),
        None => GhostSaverPaths::new()?,
    };

    let build_manager = || {
        BackupManager::from_settings(paths.clone(), &settings)
            .context("Cannot start without a valid save game location")
    };

    match cli.command.unwrap_or(Commands::Watch) {
        Commands::Watch => handle_watch(Arc::new(build_manager()?), settings.interval())?,
        Commands::Snapshot => handle_snapshot(&build_manager()?)?,
        Commands::Restore => handle_restore(&build_manager()?)?,
        Commands::List { long } => handle_list(&build_manager()?, long)?,
        Commands::Config { save } => {
            handle_config(&paths, &settings);
            if save {
                settings.validate()?;
                settings.save(&cli.config)?;
                println!();
                println!("Settings saved to {}", cli.config.display());
            }
        }
    }

    Ok(())
}
