//! View: paints a session into a framebuffer.
//!
//! The mapping is direct: buffer line `i` goes to screen row `i`, char `j`
//! to column `j`, one code point per cell. There is no scrolling, gutter or
//! tab expansion. Whatever falls outside the frame is clipped.
//!
//! ```text
//! TextBuffer            FrameBuffer
//! ┌──────────┐        ┌──────────────────────┐
//! │ line 0   │──────▶ │ line 0               │
//! │ line 1   │        │ line 1               │
//! └──────────┘        │                      │
//!   Status ─────────▶ │ "notes.txt" written  │  (inverse, last row)
//!                     └──────────────────────┘
//! ```

use cellpad_term::frame::{Cell, FrameBuffer, Style, char_width};

use crate::buffer::raw_byte;
use crate::session::EditSession;

/// Shown in place of any char that doesn't occupy exactly one column, and
/// of raw file bytes that aren't UTF-8.
pub const REPLACEMENT: char = '\u{FFFD}';

/// Paint `session` into `frame` and return the cursor's screen cell.
///
/// The frame is expected to be blank. Returns `None` when the cursor lies
/// outside the visible text area.
pub fn paint(session: &EditSession, frame: &mut FrameBuffer) -> Option<(u16, u16)> {
    let status = session.status();
    let text_rows = match status {
        Some(_) => frame.height().saturating_sub(1),
        None => frame.height(),
    };

    let buffer = session.buffer();
    for (y, line) in (0..text_rows).zip(buffer.lines()) {
        for (x, ch) in (0..frame.width()).zip(line.chars()) {
            frame.set(x, y, Cell::new(cell_char(ch)));
        }
    }

    if let (Some(status), Some(y)) = (status, frame.height().checked_sub(1)) {
        let style = Style::Inverse;
        frame.fill_row(0, y, Cell { ch: ' ', style });
        let text: String = status.text.chars().map(cell_char).collect();
        frame.put_str(0, y, &text, style);
    }

    let cursor = buffer.cursor();
    let x = u16::try_from(cursor.col).ok()?;
    let y = u16::try_from(cursor.line).ok()?;
    (x < frame.width() && y < text_rows).then_some((x, y))
}

/// The char to put in a cell: `ch` itself if it is one column wide text.
#[inline]
fn cell_char(ch: char) -> char {
    if char_width(ch) == 1 && raw_byte(ch).is_none() { ch } else { REPLACEMENT }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
