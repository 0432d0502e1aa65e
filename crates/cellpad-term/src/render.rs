// SPDX-License-Identifier: MIT
//
// Full-frame renderer.
//
// Every accepted event repaints the entire grid. Each row is addressed
// with CUP and written cell by cell; style changes emit SGR only when the
// style actually changes. The frame is assembled in a reusable byte buffer
// wrapped in synchronized-output markers and handed to the writer in a
// single `write_all`, so the terminal never shows a half-drawn frame.

use std::io::{self, Write};

use crate::ansi;
use crate::frame::{FrameBuffer, Style};

/// Turns a [`FrameBuffer`] plus a cursor position into terminal bytes.
#[derive(Debug, Default)]
pub struct Renderer {
    out: Vec<u8>,
}

impl Renderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            out: Vec::with_capacity(16 * 1024),
        }
    }

    /// Encode `frame` and the cursor into the internal buffer and return
    /// the bytes. `cursor == None` leaves the hardware cursor hidden.
    ///
    /// # Errors
    ///
    /// Only if formatting into the buffer fails, which a `Vec` never does.
    pub fn encode(&mut self, frame: &FrameBuffer, cursor: Option<(u16, u16)>) -> io::Result<&[u8]> {
        self.out.clear();
        let out = &mut self.out;

        ansi::begin_sync(out)?;
        ansi::cursor_hide(out)?;
        ansi::reset(out)?;

        let mut style = Style::Normal;
        let mut utf8 = [0u8; 4];

        for y in 0..frame.height() {
            let Some(row) = frame.row(y) else { break };
            ansi::cursor_to(out, 0, y)?;

            for cell in row {
                if cell.style != style {
                    match cell.style {
                        Style::Normal => ansi::reset(out)?,
                        Style::Inverse => ansi::inverse(out)?,
                    }
                    style = cell.style;
                }
                out.extend_from_slice(cell.ch.encode_utf8(&mut utf8).as_bytes());
            }
        }

        if style != Style::Normal {
            ansi::reset(out)?;
        }

        if let Some((x, y)) = cursor {
            ansi::cursor_to(out, x, y)?;
            ansi::cursor_show(out)?;
        }
        ansi::end_sync(out)?;

        Ok(&self.out)
    }

    /// Encode and write one frame, then flush.
    ///
    /// # Errors
    ///
    /// Propagates write and flush failures from `w`.
    pub fn draw(
        &mut self,
        w: &mut impl Write,
        frame: &FrameBuffer,
        cursor: Option<(u16, u16)>,
    ) -> io::Result<()> {
        let bytes = self.encode(frame, cursor)?;
        w.write_all(bytes)?;
        w.flush()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Cell;

    fn render(frame: &FrameBuffer, cursor: Option<(u16, u16)>) -> String {
        let mut out = Vec::new();
        Renderer::new().draw(&mut out, frame, cursor).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn frame_is_wrapped_in_sync_markers() {
        let s = render(&FrameBuffer::new(2, 1), None);
        assert!(s.starts_with("\x1b[?2026h"));
        assert!(s.ends_with("\x1b[?2026l"));
    }

    #[test]
    fn every_row_is_addressed_and_written() {
        let mut frame = FrameBuffer::new(3, 2);
        frame.put_str(0, 0, "ab", Style::Normal);
        frame.put_str(0, 1, "cde", Style::Normal);
        let s = render(&frame, None);
        assert!(s.contains("\x1b[1;1Hab "));
        assert!(s.contains("\x1b[2;1Hcde"));
    }

    #[test]
    fn cursor_is_positioned_and_shown_last() {
        let s = render(&FrameBuffer::new(4, 2), Some((3, 1)));
        assert!(s.ends_with("\x1b[2;4H\x1b[?25h\x1b[?2026l"));
    }

    #[test]
    fn no_cursor_keeps_it_hidden() {
        let s = render(&FrameBuffer::new(4, 2), None);
        assert!(!s.contains("\x1b[?25h"));
    }

    #[test]
    fn style_changes_emit_sgr_once() {
        let mut frame = FrameBuffer::new(3, 1);
        frame.fill_row(0, 0, Cell { ch: 'x', style: Style::Inverse });
        let s = render(&frame, None);
        assert_eq!(s.matches("\x1b[7m").count(), 1);
        assert!(s.contains("\x1b[7mxxx\x1b[0m"));
    }

    #[test]
    fn multibyte_chars_are_utf8_encoded() {
        let mut frame = FrameBuffer::new(2, 1);
        frame.put_str(0, 0, "é", Style::Normal);
        assert!(render(&frame, None).contains("é "));
    }

    #[test]
    fn buffer_is_reused_between_frames() {
        let mut renderer = Renderer::new();
        let frame = FrameBuffer::new(2, 1);
        let first = renderer.encode(&frame, None).unwrap().len();
        let second = renderer.encode(&frame, None).unwrap().len();
        assert_eq!(first, second);
    }
}
