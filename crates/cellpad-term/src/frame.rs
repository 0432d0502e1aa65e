// SPDX-License-Identifier: MIT
//
// FrameBuffer: the 2D cell grid the editor paints into.
//
// One cell per screen position, one code point per cell. The renderer
// turns the whole grid into bytes after every accepted event.
//
// Flat `Vec<Cell>` with row-major indexing (`y * width + x`) so a row is
// a contiguous slice, which is exactly how the renderer walks it.

use unicode_width::UnicodeWidthChar;

// ─── Cell ───────────────────────────────────────────────────────────────────

/// How a cell is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Normal,
    /// Reverse video, for the status line.
    Inverse,
}

/// A single character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Cell {
    /// A blank cell.
    pub const EMPTY: Self = Self {
        ch: ' ',
        style: Style::Normal,
    };

    #[must_use]
    pub const fn new(ch: char) -> Self {
        Self {
            ch,
            style: Style::Normal,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

// ─── FrameBuffer ────────────────────────────────────────────────────────────

/// A `width × height` grid of [`Cell`]s.
///
/// ```
/// use cellpad_term::frame::{Cell, FrameBuffer};
///
/// let mut frame = FrameBuffer::new(80, 24);
/// frame.set(5, 3, Cell::new('X'));
/// assert_eq!(frame.get(5, 3).map(|c| c.ch), Some('X'));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// A grid of blank cells.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; usize::from(width) * usize::from(height)],
        }
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    const fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// The cell at `(x, y)`, or `None` if out of bounds.
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.in_bounds(x, y).then(|| &self.cells[self.index(x, y)])
    }

    /// Overwrite one cell. Returns `false` (and does nothing) when out of
    /// bounds, so callers can paint past the edge and let the grid clip.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        self.cells[idx] = cell;
        true
    }

    /// One row as a slice, or `None` if `y` is out of bounds.
    #[must_use]
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        (y < self.height).then(|| {
            let start = self.index(0, y);
            &self.cells[start..start + usize::from(self.width)]
        })
    }

    /// The characters of row `y` with trailing blanks trimmed. Mostly for
    /// tests and debugging.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        self.row(y)
            .map(|cells| cells.iter().map(|c| c.ch).collect::<String>())
            .unwrap_or_default()
            .trim_end()
            .to_string()
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Resize, discarding content.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize(usize::from(width) * usize::from(height), Cell::EMPTY);
    }

    /// Paint `text` starting at `(x, y)`, one char per cell, clipped at the
    /// right edge. Returns the number of cells written.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, style: Style) -> u16 {
        let mut written = 0;
        for (col, ch) in (x..self.width).zip(text.chars()) {
            if self.set(col, y, Cell { ch, style }) {
                written += 1;
            }
        }
        written
    }

    /// Fill row `y` from column `x` to the right edge.
    pub fn fill_row(&mut self, x: u16, y: u16, cell: Cell) {
        for col in x..self.width {
            self.set(col, y, cell);
        }
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FrameBuffer({}x{})", self.width, self.height)
    }
}

// ─── Text Width ─────────────────────────────────────────────────────────────

/// Display width of a character in terminal columns.
///
/// 0 for control characters, 1 for most characters, 2 for wide ones (CJK,
/// some emoji), per Unicode Standard Annex #11.
#[inline]
#[must_use]
pub fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

// ─── Tests ──────────────────────────────────────────────────────────────────
