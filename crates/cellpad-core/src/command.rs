//! Key → command dispatch table.
//!
//! Every [`Key`] maps to exactly one [`Command`]. The session executes the
//! command; keeping the table separate makes the mapping one exhaustive
//! `match` that the compiler checks.

use std::fmt;

use crate::key::Key;

/// An action the session can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Quit,
    Save,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Insert(char),
    DeleteBackward,
    SplitLine,
}

impl Command {
    /// The command bound to `key`.
    #[must_use]
    pub const fn for_key(key: Key) -> Self {
        match key {
            Key::Quit => Self::Quit,
            Key::Save => Self::Save,
            Key::Left => Self::MoveLeft,
            Key::Right => Self::MoveRight,
            Key::Up => Self::MoveUp,
            Key::Down => Self::MoveDown,
            Key::Space => Self::Insert(' '),
            Key::Char(ch) => Self::Insert(ch),
            Key::Backspace => Self::DeleteBackward,
            Key::Enter => Self::SplitLine,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quit => f.write_str("quit"),
            Self::Save => f.write_str("save"),
            Self::MoveLeft => f.write_str("move-left"),
            Self::MoveRight => f.write_str("move-right"),
            Self::MoveUp => f.write_str("move-up"),
            Self::MoveDown => f.write_str("move-down"),
            Self::Insert(ch) => write!(f, "insert {ch:?}"),
            Self::DeleteBackward => f.write_str("delete-backward"),
            Self::SplitLine => f.write_str("split-line"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_every_key() {
        let table = [
            (Key::Quit, Command::Quit),
            (Key::Save, Command::Save),
            (Key::Left, Command::MoveLeft),
            (Key::Right, Command::MoveRight),
            (Key::Up, Command::MoveUp),
            (Key::Down, Command::MoveDown),
            (Key::Space, Command::Insert(' ')),
            (Key::Backspace, Command::DeleteBackward),
            (Key::Enter, Command::SplitLine),
            (Key::Char('x'), Command::Insert('x')),
            (Key::Char('ß'), Command::Insert('ß')),
        ];
        for (key, cmd) in table {
            assert_eq!(Command::for_key(key), cmd, "{key:?}");
        }
    }

    #[test]
    fn display_names() {
        assert_eq!(Command::MoveLeft.to_string(), "move-left");
        assert_eq!(Command::Insert('a').to_string(), "insert 'a'");
    }
}
