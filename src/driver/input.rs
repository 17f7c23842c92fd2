//! Command sources
//!
//! An interactive terminal delivers single keypresses through crossterm;
//! anything else (pipes, tests) is read line by line.

use std::io::BufRead;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use crate::error::{GhostSaverError, GhostSaverResult};

use super::command::Command;

/// Something that yields operator commands
pub trait CommandSource {
    /// Block until the next command arrives
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    fn next_command(&mut self) -> GhostSaverResult<Option<Command>>;
}

/// Single keypresses from the terminal, without waiting for Enter
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl TerminalKeys {
    /// Create a terminal key source
    pub fn new() -> Self {
        Self
    }
}

impl CommandSource for TerminalKeys {
    fn next_command(&mut self) -> GhostSaverResult<Option<Command>> {
        let _raw = RawModeGuard::enable()?;

        loop {
            let event = event::read()
                .map_err(|e| GhostSaverError::Input(format!("Failed to read key: {}", e)))?;

            let Event::Key(key) = event else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            // Raw mode swallows SIGINT, so treat Ctrl+C as exit
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Ok(Some(Command::Exit));
            }

            let command = match key.code {
                KeyCode::Char(c) => Command::from_key(c),
                other => Command::Unknown(format!("{:?}", other)),
            };
            return Ok(Some(command));
        }
    }
}

/// Keeps the terminal in raw mode while alive
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> GhostSaverResult<Self> {
        terminal::enable_raw_mode()
            .map_err(|e| GhostSaverError::Input(format!("Failed to enable raw mode: {}", e)))?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// One command per line from any buffered reader
#[derive(Debug)]
pub struct LineCommands<R> {
    reader: R,
}

impl<R: BufRead> LineCommands<R> {
    /// Wrap a reader
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> CommandSource for LineCommands<R> {
    fn next_command(&mut self) -> GhostSaverResult<Option<Command>> {
        let mut line = String::new();
        loop {
            line.clear();
            let read = self
                .reader
                .read_line(&mut line)
                .map_err(|e| GhostSaverError::Input(format!("Failed to read command: {}", e)))?;

            if read == 0 {
                return Ok(None);
            }
            if !line.trim().is_empty() {
                return Ok(Some(Command::from_line(&line)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_line_commands_skip_blank_lines() {
        let mut source = LineCommands::new(Cursor::new("\n  \nr\nfoo\nx\n"));

        assert_eq!(source.next_command().unwrap(), Some(Command::Restore));
        assert_eq!(
            source.next_command().unwrap(),
            Some(Command::Unknown("foo".into()))
        );
        assert_eq!(source.next_command().unwrap(), Some(Command::Exit));
        assert_eq!(source.next_command().unwrap(), None);
    }

    #[test]
    fn test_line_commands_without_trailing_newline() {
        let mut source = LineCommands::new(Cursor::new("X"));
        assert_eq!(source.next_command().unwrap(), Some(Command::Exit));
        assert_eq!(source.next_command().unwrap(), None);
    }
}
