//! Commands accepted by the interactive loop

/// A discrete command from the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Restore a snapshot into the save directory
    Restore,
    /// Stop the scheduler and quit
    Exit,
    /// Anything else, kept for the error message
    Unknown(String),
}

impl Command {
    /// Map a single keypress (`R` restores, `X` exits, case-insensitive)
    pub fn from_key(key: char) -> Self {
        match key.to_ascii_lowercase() {
            'r' => Command::Restore,
            'x' => Command::Exit,
            other => Command::Unknown(other.to_string()),
        }
    }

    /// Map a line of text: a single key or the full command name
    pub fn from_line(line: &str) -> Self {
        let line = line.trim();
        match line.to_ascii_lowercase().as_str() {
            "r" | "restore" => Command::Restore,
            "x" | "exit" => Command::Exit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key() {
        assert_eq!(Command::from_key('r'), Command::Restore);
        assert_eq!(Command::from_key('R'), Command::Restore);
        assert_eq!(Command::from_key('x'), Command::Exit);
        assert_eq!(Command::from_key('X'), Command::Exit);
        assert_eq!(Command::from_key('q'), Command::Unknown("q".into()));
    }

    #[test]
    fn test_from_line() {
        assert_eq!(Command::from_line(" R \n"), Command::Restore);
        assert_eq!(Command::from_line("restore"), Command::Restore);
        assert_eq!(Command::from_line("EXIT"), Command::Exit);
        assert_eq!(Command::from_line("rx"), Command::Unknown("rx".into()));
        // Whole line is matched, not its first character
        assert_eq!(Command::from_line("  xylophone "), Command::Unknown("xylophone".into()));
        assert_eq!(Command::from_line("Restore"), Command::Restore);
    }
}
