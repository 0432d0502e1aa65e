//! Logical keys.
//!
//! The terminal layer reports every key it can decode. The editor only
//! reacts to a handful, so [`Key::from_event`] narrows a
//! [`KeyEvent`](cellpad_term::input::KeyEvent) down to the closed set the
//! session dispatches on. Anything outside the set maps to `None` and is
//! dropped without a redraw.

use cellpad_term::input::{KeyCode, KeyEvent, Modifiers};

/// A key the editor acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Ctrl-Q.
    Quit,
    /// Ctrl-S.
    Save,
    Left,
    Right,
    Up,
    Down,
    Space,
    Backspace,
    Enter,
    /// A printable character other than space.
    Char(char),
}

impl Key {
    /// Map a terminal key event to a logical key.
    ///
    /// Ctrl-Q and Ctrl-S are the only chords. Alt-anything, other Ctrl
    /// chords, control characters, Tab, Escape and the editing/paging keys
    /// are not editor keys.
    #[must_use]
    pub fn from_event(event: &KeyEvent) -> Option<Self> {
        let mods = event.modifiers;

        if mods.contains(Modifiers::CTRL) {
            return match event.code {
                KeyCode::Char('q' | 'Q') => Some(Self::Quit),
                KeyCode::Char('s' | 'S') => Some(Self::Save),
                _ => None,
            };
        }
        if mods.contains(Modifiers::ALT) {
            return None;
        }

        match event.code {
            KeyCode::Left => Some(Self::Left),
            KeyCode::Right => Some(Self::Right),
            KeyCode::Up => Some(Self::Up),
            KeyCode::Down => Some(Self::Down),
            KeyCode::Enter => Some(Self::Enter),
            KeyCode::Backspace => Some(Self::Backspace),
            KeyCode::Char(' ') => Some(Self::Space),
            KeyCode::Char(ch) if !ch.is_control() => Some(Self::Char(ch)),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use cellpad_term::input::Parser;

    fn plain(code: KeyCode) -> Option<Key> {
        Key::from_event(&KeyEvent::plain(code))
    }

    /// Decode raw terminal bytes all the way to logical keys.
    fn from_bytes(bytes: &[u8]) -> Vec<Option<Key>> {
        let mut parser = Parser::new();
        let mut events = parser.advance(bytes);
        events.extend(parser.flush());
        events.iter().map(Key::from_event).collect()
    }

    // -- Chords -------------------------------------------------------------

    #[test]
    fn ctrl_q_and_ctrl_s() {
        assert_eq!(Key::from_event(&KeyEvent::ctrl('q')), Some(Key::Quit));
        assert_eq!(Key::from_event(&KeyEvent::ctrl('s')), Some(Key::Save));
    }

    #[test]
    fn other_ctrl_chords_are_ignored() {
        assert_eq!(Key::from_event(&KeyEvent::ctrl('a')), None);
        assert_eq!(Key::from_event(&KeyEvent::ctrl('c')), None);
    }

    #[test]
    fn alt_chars_are_ignored() {
        let ev = KeyEvent::with(KeyCode::Char('x'), Modifiers::ALT);
        assert_eq!(Key::from_event(&ev), None);
    }

    // -- Plain keys ---------------------------------------------------------

    #[test]
    fn navigation_and_editing_keys() {
        assert_eq!(plain(KeyCode::Left), Some(Key::Left));
        assert_eq!(plain(KeyCode::Right), Some(Key::Right));
        assert_eq!(plain(KeyCode::Up), Some(Key::Up));
        assert_eq!(plain(KeyCode::Down), Some(Key::Down));
        assert_eq!(plain(KeyCode::Enter), Some(Key::Enter));
        assert_eq!(plain(KeyCode::Backspace), Some(Key::Backspace));
    }

    #[test]
    fn space_is_its_own_key() {
        assert_eq!(plain(KeyCode::Char(' ')), Some(Key::Space));
    }

    #[test]
    fn printable_chars() {
        assert_eq!(plain(KeyCode::Char('a')), Some(Key::Char('a')));
        assert_eq!(plain(KeyCode::Char('é')), Some(Key::Char('é')));
        let shifted = KeyEvent::with(KeyCode::Char('A'), Modifiers::SHIFT);
        assert_eq!(Key::from_event(&shifted), Some(Key::Char('A')));
    }

    #[test]
    fn unhandled_keys_map_to_none() {
        for code in [
            KeyCode::Tab,
            KeyCode::Escape,
            KeyCode::Delete,
            KeyCode::Insert,
            KeyCode::Home,
            KeyCode::End,
            KeyCode::PageUp,
            KeyCode::PageDown,
            KeyCode::Char('\u{7}'),
        ] {
            assert_eq!(plain(code), None, "{code:?}");
        }
    }

    // -- From raw bytes -----------------------------------------------------

    #[test]
    fn both_backspace_bytes() {
        assert_eq!(from_bytes(b"\x7f\x08"), [Some(Key::Backspace), Some(Key::Backspace)]);
    }

    #[test]
    fn control_bytes_for_quit_and_save() {
        assert_eq!(from_bytes(b"\x11\x13"), [Some(Key::Quit), Some(Key::Save)]);
    }

    #[test]
    fn arrows_and_enter() {
        assert_eq!(
            from_bytes(b"\x1b[A\x1b[B\x1b[C\x1b[D\r"),
            [
                Some(Key::Up),
                Some(Key::Down),
                Some(Key::Right),
                Some(Key::Left),
                Some(Key::Enter),
            ]
        );
    }
}
