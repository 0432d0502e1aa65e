//! Text buffer: the lines of one file plus the cursor.
//!
//! A `TextBuffer` is an ordered, never-empty list of lines with a single
//! cursor. Every operation is total: it either applies or is a no-op, and
//! on exit the cursor always satisfies
//!
//! ```text
//! cursor.line < line_count()
//! cursor.col  <= line_len(cursor.line)
//! ```
//!
//! # Design choices
//!
//! - **Lines are owned `String`s** without their `\n`. A file is split once
//!   on load and joined once on save, so nothing in between ever sees a line
//!   separator. `\r` is ordinary content.
//!
//! - **Columns are char offsets**, not byte offsets. Column 3 of `"café"` is
//!   `'é'`. Byte offsets are computed at the edit site and never leak out.
//!
//! - **Any bytes load and save unchanged.** A byte that isn't part of valid
//!   UTF-8 is held as one char in U+10FF80..=U+10FFFF (see [`raw_byte`])
//!   and written back as that same byte. It moves and deletes like any
//!   other char. Valid text that already uses that range is escaped byte by
//!   byte the same way, so the mapping stays reversible.
//!
//! - **No undo, no selections.** The cursor is a single point and every edit
//!   happens there.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::position::Position;

// ---------------------------------------------------------------------------
// TextBuffer
// ---------------------------------------------------------------------------

/// The editable text of one file.
pub struct TextBuffer {
    lines: Vec<String>,
    cursor: Position,
    modified: bool,
}

impl TextBuffer {
    // -- Construction -------------------------------------------------------

    /// One empty line, cursor at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Position::ZERO,
            modified: false,
        }
    }

    /// A buffer holding `text`, split on `\n`.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut buf = Self::new();
        buf.load_from(text.as_bytes());
        buf
    }

    /// Load the file at `path`.
    ///
    /// Never fails: a missing or unreadable file gives one empty line, so
    /// the user can start typing and create it with the first save.
    #[must_use]
    pub fn open(path: &Path) -> Self {
        match fs::read(path) {
            Ok(bytes) => {
                let mut buf = Self::new();
                buf.load_from(&bytes);
                if let Err(e) = std::str::from_utf8(&bytes) {
                    tracing::info!(path = %path.display(), at = e.valid_up_to(), "not valid UTF-8, keeping raw bytes");
                }
                tracing::debug!(
                    path = %path.display(),
                    bytes = bytes.len(),
                    lines = buf.line_count(),
                    "loaded file"
                );
                buf
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "new file");
                Self::new()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read file, starting empty");
                Self::new()
            }
        }
    }

    /// Replace the whole content with `bytes`.
    ///
    /// Any byte content is accepted and [`serialize`](Self::serialize) gives
    /// it back unchanged. Lines split on `\n` only; a trailing `\n` yields a
    /// final empty line and empty input yields one empty line. The cursor
    /// goes back to (0, 0) and the buffer counts as unmodified.
    pub fn load_from(&mut self, bytes: &[u8]) {
        self.lines = bytes.split(|&b| b == b'\n').map(decode_line).collect();
        self.cursor = Position::ZERO;
        self.modified = false;
    }

    /// The content as file bytes: lines joined with `\n`, no trailing
    /// separator.
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len_bytes());
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push(b'\n');
            }
            encode_line(line, &mut out);
        }
        out
    }

    // -- Access -------------------------------------------------------------

    /// All lines, in order. Never empty.
    #[inline]
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Line `idx`, or `None` past the end.
    #[inline]
    #[must_use]
    pub fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(String::as_str)
    }

    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Length of line `idx` in chars. 0 past the end.
    #[must_use]
    pub fn line_len(&self, idx: usize) -> usize {
        self.lines.get(idx).map_or(0, |l| l.chars().count())
    }

    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> Position {
        self.cursor
    }

    /// Has anything changed since load or the last [`mark_saved`](Self::mark_saved)?
    #[inline]
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    /// Record that the current content is what's on disk.
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Size of [`serialize`](Self::serialize)'s output, without building it.
    #[must_use]
    pub fn len_bytes(&self) -> usize {
        let text: usize = self
            .lines
            .iter()
            .flat_map(|l| l.chars())
            .map(|ch| raw_byte(ch).map_or(ch.len_utf8(), |_| 1))
            .sum();
        text + self.lines.len() - 1
    }

    fn current_len(&self) -> usize {
        self.line_len(self.cursor.line)
    }

    // -- Movement -----------------------------------------------------------

    /// One char left. Stops at column 0; never wraps to the previous line.
    pub fn move_left(&mut self) {
        self.cursor.col = self.cursor.col.saturating_sub(1);
    }

    /// One char right. Stops just past the last char; never wraps.
    pub fn move_right(&mut self) {
        if self.cursor.col < self.current_len() {
            self.cursor.col += 1;
        }
    }

    /// One line up, clamping the column to the new line.
    pub fn move_up(&mut self) {
        if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.clamp_col();
        }
    }

    /// One line down, clamping the column to the new line.
    pub fn move_down(&mut self) {
        if self.cursor.line + 1 < self.lines.len() {
            self.cursor.line += 1;
            self.clamp_col();
        }
    }

    fn clamp_col(&mut self) {
        self.cursor.col = self.cursor.col.min(self.current_len());
    }

    // -- Editing ------------------------------------------------------------

    /// Insert `ch` at the cursor and step past it.
    ///
    /// `'\n'` is never stored inside a line; it splits the line instead.
    /// Typed chars in the raw-byte range are stored as U+FFFD.
    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.split_line();
            return;
        }
        let ch = if raw_byte(ch).is_some() { '\u{FFFD}' } else { ch };
        let Position { line, col } = self.cursor;
        let text = &mut self.lines[line];
        let at = byte_offset(text, col);
        text.insert(at, ch);
        self.cursor.col += 1;
        self.modified = true;
    }

    /// Backspace.
    ///
    /// Mid-line it removes the char before the cursor. At column 0 it joins
    /// this line onto the previous one and leaves the cursor at the join
    /// point. At (0, 0) it does nothing.
    pub fn delete_backward(&mut self) {
        let Position { line, col } = self.cursor;

        if col > 0 {
            let text = &mut self.lines[line];
            let at = byte_offset(text, col - 1);
            text.remove(at);
            self.cursor.col -= 1;
            self.modified = true;
        } else if line > 0 {
            let tail = self.lines.remove(line);
            let prev = &mut self.lines[line - 1];
            let join = prev.chars().count();
            prev.push_str(&tail);
            self.cursor = Position::new(line - 1, join);
            self.modified = true;
        }
    }

    /// Break the line at the cursor. The text after the cursor moves to a
    /// new line below and the cursor goes to its start.
    pub fn split_line(&mut self) {
        let Position { line, col } = self.cursor;
        let text = &mut self.lines[line];
        let at = byte_offset(text, col);
        let tail = text.split_off(at);
        self.lines.insert(line + 1, tail);
        self.cursor = Position::new(line + 1, 0);
        self.modified = true;
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuffer")
            .field("lines", &self.line_count())
            .field("cursor", &self.cursor)
            .field("modified", &self.modified)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Raw bytes
// ---------------------------------------------------------------------------

/// Byte `b` is held as `RAW_BASE + b`. Only bytes >= 0x80 can be invalid or
/// escaped, so the chars used are U+10FF80..=U+10FFFF (Plane 16 private use).
const RAW_BASE: u32 = 0x10_FF00;

/// The file byte `ch` stands for, if it is a raw-byte char.
#[must_use]
pub fn raw_byte(ch: char) -> Option<u8> {
    let b = u32::from(ch).checked_sub(RAW_BASE)?;
    u8::try_from(b).ok().filter(|b| *b >= 0x80)
}

fn raw_char(b: u8) -> char {
    char::from_u32(RAW_BASE + u32::from(b)).unwrap_or('\u{FFFD}')
}

/// One line of file bytes to a `String`, escaping what isn't plain UTF-8.
fn decode_line(bytes: &[u8]) -> String {
    let mut line = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        for ch in chunk.valid().chars() {
            if raw_byte(ch).is_some() {
                let mut buf = [0; 4];
                line.extend(ch.encode_utf8(&mut buf).bytes().map(raw_char));
            } else {
                line.push(ch);
            }
        }
        line.extend(chunk.invalid().iter().copied().map(raw_char));
    }
    line
}

fn encode_line(line: &str, out: &mut Vec<u8>) {
    for ch in line.chars() {
        match raw_byte(ch) {
            Some(b) => out.push(b),
            None => out.extend_from_slice(ch.encode_utf8(&mut [0; 4]).as_bytes()),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Byte offset of char `col` in `text`, or `text.len()` when `col` is at or
/// past the end.
fn byte_offset(text: &str, col: usize) -> usize {
    text.char_indices().nth(col).map_or(text.len(), |(i, _)| i)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
