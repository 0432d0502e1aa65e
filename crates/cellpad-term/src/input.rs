// SPDX-License-Identifier: MIT
//
// Terminal input parser.
//
// Turns raw stdin bytes into key events. Only legacy encodings are
// handled, because `terminal.rs` enables nothing beyond raw mode:
//
// - Control bytes (Ctrl+letter, Enter, Tab, both Backspace bytes)
// - CSI sequences for arrows and editing keys, with xterm modifiers
// - SS3 arrows (application cursor mode)
// - Alt+key (ESC followed by a printable byte)
// - UTF-8 multi-byte characters
//
// Escape sequences can straddle two `read()` calls, so the parser keeps
// unconsumed bytes between calls. A lone ESC stays pending until the
// reader reports a quiet period and calls [`Parser::flush`].

use bitflags::bitflags;

// ─── Event Types ────────────────────────────────────────────────────────────

/// A keyboard event: key identity plus active modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key with no modifiers.
    #[must_use]
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
        }
    }

    /// A key with the given modifiers.
    #[must_use]
    pub const fn with(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// Ctrl+`ch`.
    #[must_use]
    pub const fn ctrl(ch: char) -> Self {
        Self::with(KeyCode::Char(ch), Modifiers::CTRL)
    }
}

/// Identity of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// A Unicode character. Ctrl+letter arrives as the lowercase letter
    /// with [`Modifiers::CTRL`].
    Char(char),
    Enter,
    Tab,
    /// Both the DEL byte (0x7F) and the BS byte (0x08) map here.
    Backspace,
    Escape,
    Delete,
    Insert,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

bitflags! {
    /// Keyboard modifier flags (xterm encoding: `param = 1 + bitmask`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
    }
}

// ─── Parser ─────────────────────────────────────────────────────────────────

/// Incremental byte → [`KeyEvent`] parser.
pub struct Parser {
    buf: Vec<u8>,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(64),
        }
    }

    /// Feed raw bytes and return every event that is complete.
    ///
    /// Incomplete sequences stay buffered and are combined with the next
    /// call.
    pub fn advance(&mut self, data: &[u8]) -> Vec<KeyEvent> {
        self.buf.extend_from_slice(data);
        let mut events = Vec::new();
        let mut pos = 0;

        while pos < self.buf.len() {
            match try_parse(&self.buf[pos..]) {
                Parsed::Key(event, consumed) => {
                    events.push(event);
                    pos += consumed;
                }
                Parsed::Incomplete => break,
                Parsed::Skip(n) => pos += n,
            }
        }

        if pos > 0 {
            self.buf.drain(..pos);
        }

        events
    }

    /// Are there buffered bytes that might complete with more input?
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Resolve pending bytes after a quiet period.
    ///
    /// A lone ESC becomes Escape, printable ASCII becomes `Char`, control
    /// bytes become Ctrl+letter. Stray UTF-8 fragments are dropped.
    pub fn flush(&mut self) -> Vec<KeyEvent> {
        let events = self
            .buf
            .iter()
            .filter_map(|&byte| match byte {
                0x1B => Some(KeyEvent::plain(KeyCode::Escape)),
                0x7F => Some(KeyEvent::plain(KeyCode::Backspace)),
                b @ 0x01..=0x1A => Some(KeyEvent::ctrl(char::from(b + b'a' - 1))),
                b @ 0x20..=0x7E => Some(KeyEvent::plain(KeyCode::Char(char::from(b)))),
                _ => None,
            })
            .collect();
        self.buf.clear();
        events
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Stateless Parsing ──────────────────────────────────────────────────────

enum Parsed {
    /// A complete event and the number of bytes it consumed.
    Key(KeyEvent, usize),
    /// Need more bytes.
    Incomplete,
    /// Unrecognized bytes to discard.
    Skip(usize),
}

fn try_parse(buf: &[u8]) -> Parsed {
    let Some(&lead) = buf.first() else {
        return Parsed::Skip(0);
    };

    match lead {
        0x1B => parse_escape(buf),
        0x00 => Parsed::Key(KeyEvent::ctrl('@'), 1),
        0x08 | 0x7F => Parsed::Key(KeyEvent::plain(KeyCode::Backspace), 1),
        0x09 => Parsed::Key(KeyEvent::plain(KeyCode::Tab), 1),
        0x0A | 0x0D => Parsed::Key(KeyEvent::plain(KeyCode::Enter), 1),
        b @ 0x01..=0x1A => Parsed::Key(KeyEvent::ctrl(char::from(b + b'a' - 1)), 1),
        b @ 0x20..=0x7E => Parsed::Key(KeyEvent::plain(KeyCode::Char(char::from(b))), 1),
        0xC0..=0xFF => parse_utf8(buf),
        // 0x1C..=0x1F and bare continuation bytes.
        _ => Parsed::Skip(1),
    }
}

fn parse_escape(buf: &[u8]) -> Parsed {
    let Some(&next) = buf.get(1) else {
        return Parsed::Incomplete;
    };

    match next {
        b'[' => parse_csi(buf),
        b'O' => parse_ss3(buf),
        0x1B => Parsed::Key(KeyEvent::with(KeyCode::Escape, Modifiers::ALT), 2),
        b @ 0x20..=0x7E => Parsed::Key(
            KeyEvent::with(KeyCode::Char(char::from(b)), Modifiers::ALT),
            2,
        ),
        // Anything else: the ESC stands alone, reparse the next byte.
        _ => Parsed::Key(KeyEvent::plain(KeyCode::Escape), 1),
    }
}

// ── CSI ─────────────────────────────────────────────────────────────────────

fn parse_csi(buf: &[u8]) -> Parsed {
    // Parameter bytes 0x30..=0x3F, intermediates 0x20..=0x2F, final 0x40..=0x7E.
    let mut end = 2;
    while end < buf.len() {
        let b = buf[end];
        if (0x40..=0x7E).contains(&b) {
            break;
        }
        if !(0x20..=0x3F).contains(&b) {
            return Parsed::Skip(end + 1);
        }
        end += 1;
    }

    if end >= buf.len() {
        return Parsed::Incomplete;
    }

    let final_byte = buf[end];
    let params = parse_params(&buf[2..end]);
    let consumed = end + 1;
    let modifiers = params.get(1).map_or(Modifiers::empty(), |&p| decode_modifiers(p));

    let code = if final_byte == b'~' {
        match params.first().copied().unwrap_or(0) {
            1 | 7 => KeyCode::Home,
            2 => KeyCode::Insert,
            3 => KeyCode::Delete,
            4 | 8 => KeyCode::End,
            5 => KeyCode::PageUp,
            6 => KeyCode::PageDown,
            _ => return Parsed::Skip(consumed),
        }
    } else {
        match final_byte {
            b'A' => KeyCode::Up,
            b'B' => KeyCode::Down,
            b'C' => KeyCode::Right,
            b'D' => KeyCode::Left,
            b'H' => KeyCode::Home,
            b'F' => KeyCode::End,
            _ => return Parsed::Skip(consumed),
        }
    };

    Parsed::Key(KeyEvent::with(code, modifiers), consumed)
}

// ── SS3 ─────────────────────────────────────────────────────────────────────

fn parse_ss3(buf: &[u8]) -> Parsed {
    let Some(&b) = buf.get(2) else {
        return Parsed::Incomplete;
    };

    let code = match b {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        _ => return Parsed::Skip(3),
    };

    Parsed::Key(KeyEvent::plain(code), 3)
}

// ── UTF-8 ───────────────────────────────────────────────────────────────────

fn parse_utf8(buf: &[u8]) -> Parsed {
    let expected = utf8_char_len(buf[0]);

    if expected == 0 {
        return Parsed::Skip(1);
    }
    if buf.len() < expected {
        return Parsed::Incomplete;
    }

    std::str::from_utf8(&buf[..expected])
        .ok()
        .and_then(|s| s.chars().next())
        .map_or(Parsed::Skip(1), |ch| {
            Parsed::Key(KeyEvent::plain(KeyCode::Char(ch)), expected)
        })
}

// ─── Helpers ────────────────────────────────────────────────────────────────

/// Semicolon-separated decimal parameters. Colon sub-parameters are
/// ignored; we never enable a protocol that sends them.
fn parse_params(raw: &[u8]) -> Vec<u16> {
    if raw.is_empty() {
        return Vec::new();
    }

    raw.split(|&b| b == b';')
        .map(|field| {
            field
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .fold(0u16, |acc, &b| {
                    acc.saturating_mul(10).saturating_add(u16::from(b - b'0'))
                })
        })
        .collect()
}

/// xterm modifier parameter: `1 + bitmask`. 0 and 1 mean none.
#[allow(clippy::cast_possible_truncation)]
fn decode_modifiers(param: u16) -> Modifiers {
    Modifiers::from_bits_truncate(param.saturating_sub(1) as u8)
}

const fn utf8_char_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 0,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(data: &[u8]) -> Vec<KeyEvent> {
        Parser::new().advance(data)
    }

    fn parse_one(data: &[u8]) -> KeyEvent {
        let events = parse(data);
        assert_eq!(events.len(), 1, "expected 1 event, got {events:?}");
        events[0]
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::plain(code)
    }

    // ── Printable ───────────────────────────────────────────────────────

    #[test]
    fn ascii_chars_in_order() {
        assert_eq!(
            parse(b"ab "),
            vec![
                key(KeyCode::Char('a')),
                key(KeyCode::Char('b')),
                key(KeyCode::Char(' ')),
            ]
        );
    }

    #[test]
    fn utf8_multibyte() {
        assert_eq!(parse_one("é".as_bytes()), key(KeyCode::Char('é')));
        assert_eq!(parse_one("中".as_bytes()), key(KeyCode::Char('中')));
        assert_eq!(parse_one("🦀".as_bytes()), key(KeyCode::Char('🦀')));
    }

    #[test]
    fn utf8_split_across_reads() {
        let bytes = "中".as_bytes();
        let mut parser = Parser::new();
        assert!(parser.advance(&bytes[..1]).is_empty());
        assert!(parser.has_pending());
        assert_eq!(parser.advance(&bytes[1..]), vec![key(KeyCode::Char('中'))]);
        assert!(!parser.has_pending());
    }

    #[test]
    fn stray_continuation_byte_is_skipped() {
        assert_eq!(parse(b"\x80a"), vec![key(KeyCode::Char('a'))]);
    }

    // ── Control bytes ───────────────────────────────────────────────────

    #[test]
    fn ctrl_q_and_ctrl_s() {
        assert_eq!(parse_one(b"\x11"), KeyEvent::ctrl('q'));
        assert_eq!(parse_one(b"\x13"), KeyEvent::ctrl('s'));
    }

    #[test]
    fn both_backspace_bytes() {
        assert_eq!(parse_one(b"\x7f"), key(KeyCode::Backspace));
        assert_eq!(parse_one(b"\x08"), key(KeyCode::Backspace));
    }

    #[test]
    fn enter_from_cr_and_lf() {
        assert_eq!(parse_one(b"\r"), key(KeyCode::Enter));
        assert_eq!(parse_one(b"\n"), key(KeyCode::Enter));
    }

    #[test]
    fn tab() {
        assert_eq!(parse_one(b"\t"), key(KeyCode::Tab));
    }

    // ── CSI / SS3 ───────────────────────────────────────────────────────

    #[test]
    fn csi_arrows() {
        assert_eq!(
            parse(b"\x1b[A\x1b[B\x1b[C\x1b[D"),
            vec![
                key(KeyCode::Up),
                key(KeyCode::Down),
                key(KeyCode::Right),
                key(KeyCode::Left),
            ]
        );
    }

    #[test]
    fn ss3_arrows() {
        assert_eq!(parse_one(b"\x1bOA"), key(KeyCode::Up));
        assert_eq!(parse_one(b"\x1bOD"), key(KeyCode::Left));
    }

    #[test]
    fn csi_arrow_with_modifiers() {
        assert_eq!(
            parse_one(b"\x1b[1;5C"),
            KeyEvent::with(KeyCode::Right, Modifiers::CTRL)
        );
        assert_eq!(
            parse_one(b"\x1b[1;2A"),
            KeyEvent::with(KeyCode::Up, Modifiers::SHIFT)
        );
    }

    #[test]
    fn csi_tilde_keys() {
        assert_eq!(parse_one(b"\x1b[3~"), key(KeyCode::Delete));
        assert_eq!(parse_one(b"\x1b[1~"), key(KeyCode::Home));
        assert_eq!(parse_one(b"\x1b[4~"), key(KeyCode::End));
        assert_eq!(parse_one(b"\x1b[6~"), key(KeyCode::PageDown));
    }

    #[test]
    fn unknown_csi_is_skipped() {
        assert_eq!(parse(b"\x1b[15~x"), vec![key(KeyCode::Char('x'))]);
    }

    #[test]
    fn csi_split_across_reads() {
        let mut parser = Parser::new();
        assert!(parser.advance(b"\x1b[").is_empty());
        assert_eq!(parser.advance(b"D"), vec![key(KeyCode::Left)]);
    }

    // ── Escape ambiguity ────────────────────────────────────────────────

    #[test]
    fn lone_escape_waits_then_flushes() {
        let mut parser = Parser::new();
        assert!(parser.advance(b"\x1b").is_empty());
        assert!(parser.has_pending());
        assert_eq!(parser.flush(), vec![key(KeyCode::Escape)]);
        assert!(!parser.has_pending());
    }

    #[test]
    fn alt_char() {
        assert_eq!(
            parse_one(b"\x1bx"),
            KeyEvent::with(KeyCode::Char('x'), Modifiers::ALT)
        );
    }

    #[test]
    fn decode_modifiers_table() {
        assert_eq!(decode_modifiers(0), Modifiers::empty());
        assert_eq!(decode_modifiers(1), Modifiers::empty());
        assert_eq!(decode_modifiers(3), Modifiers::ALT);
        assert_eq!(decode_modifiers(8), Modifiers::all());
    }

    #[test]
    fn parse_params_handles_empty_fields() {
        assert_eq!(parse_params(b""), Vec::<u16>::new());
        assert_eq!(parse_params(b"1;5"), vec![1, 5]);
        assert_eq!(parse_params(b";5"), vec![0, 5]);
    }
}
