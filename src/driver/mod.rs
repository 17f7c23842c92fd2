//! Interactive command loop
//!
//! Turns operator commands into restore requests while the scheduler keeps
//! snapshotting in the background. The loop knows nothing about where
//! commands come from; see [`CommandSource`].

mod command;
mod input;

pub use command::Command;
pub use input::{CommandSource, LineCommands, TerminalKeys};

use std::io::Write;
use std::ops::ControlFlow;
use std::sync::Arc;

use tracing::error;

use crate::backup::{BackupManager, RestoreOutcome};
use crate::error::GhostSaverResult;

/// Dispatches commands against a [`BackupManager`]
pub struct CommandDriver<W> {
    manager: Arc<BackupManager>,
    out: W,
}

impl<W: Write> CommandDriver<W> {
    /// Create a driver that reports to `out`
    pub fn new(manager: Arc<BackupManager>, out: W) -> Self {
        Self { manager, out }
    }

    /// Process commands until `Exit` or the end of input
    pub fn run(&mut self, source: &mut dyn CommandSource) -> GhostSaverResult<()> {
        loop {
            let command = source.next_command()?.unwrap_or(Command::Exit);
            if self.handle(command)?.is_break() {
                return Ok(());
            }
        }
    }

    /// Handle a single command
    ///
    /// Restore failures are reported and never end the loop.
    pub fn handle(&mut self, command: Command) -> GhostSaverResult<ControlFlow<()>> {
        match command {
            Command::Restore => {
                writeln!(self.out, "Restoring most recent saves")?;
                match self.manager.restore_latest() {
                    Ok(outcome) => {
                        if let RestoreOutcome::Restored(report) = &outcome {
                            for failure in &report.failures {
                                writeln!(
                                    self.out,
                                    "Failed to restore {}: {}",
                                    failure.path.display(),
                                    failure.cause
                                )?;
                            }
                        }
                        writeln!(self.out, "{}", outcome.summary())?;
                    }
                    Err(e) => {
                        error!(error = %e, "Restore failed");
                        writeln!(self.out, "Failed to restore saves: {}", e)?;
                    }
                }
            }
            Command::Exit => {
                writeln!(self.out, "Exiting...")?;
                self.out.flush()?;
                return Ok(ControlFlow::Break(()));
            }
            Command::Unknown(_) => {
                writeln!(self.out, "Invalid key")?;
            }
        }

        self.out.flush()?;
        Ok(ControlFlow::Continue(()))
    }

    /// Consume the driver, returning its output
    pub fn into_output(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GhostSaverPaths;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn create_driver(temp: &TempDir) -> CommandDriver<Vec<u8>> {
        let watched = temp.path().join("saves");
        fs::create_dir_all(&watched).unwrap();
        let manager = BackupManager::new(
            GhostSaverPaths::with_backup_root(temp.path().join("GhostSaver")),
            watched,
            5,
        );
        CommandDriver::new(Arc::new(manager), Vec::new())
    }

    fn output(driver: CommandDriver<Vec<u8>>) -> String {
        String::from_utf8(driver.into_output()).unwrap()
    }

    #[test]
    fn test_exit_stops_loop() {
        let temp = TempDir::new().unwrap();
        let mut driver = create_driver(&temp);

        let mut source = LineCommands::new(Cursor::new("x\nr\n"));
        driver.run(&mut source).unwrap();

        let out = output(driver);
        assert_eq!(out, "Exiting...\n");
    }

    #[test]
    fn test_unknown_key_is_reported_and_ignored() {
        let temp = TempDir::new().unwrap();
        let mut driver = create_driver(&temp);

        let flow = driver.handle(Command::Unknown("q".into())).unwrap();
        assert!(flow.is_continue());
        assert_eq!(output(driver), "Invalid key\n");
    }

    #[test]
    fn test_restore_with_no_backups() {
        let temp = TempDir::new().unwrap();
        let mut driver = create_driver(&temp);

        let mut source = LineCommands::new(Cursor::new("r\n"));
        driver.run(&mut source).unwrap();

        let out = output(driver);
        assert!(out.contains("Restoring most recent saves"));
        assert!(out.contains("No backup to restore"));
        assert!(out.ends_with("Exiting...\n"));
    }

    #[test]
    fn test_restore_after_snapshot() {
        let temp = TempDir::new().unwrap();
        let mut driver = create_driver(&temp);
        let watched = temp.path().join("saves");
        fs::write(watched.join("save.dat"), b"original").unwrap();
        driver.manager.run_tick().unwrap();
        fs::write(watched.join("save.dat"), b"corrupted").unwrap();

        let flow = driver.handle(Command::Restore).unwrap();
        assert!(flow.is_continue());
        assert_eq!(fs::read(watched.join("save.dat")).unwrap(), b"original");
        assert!(output(driver).contains("Restored backup"));
    }
}
