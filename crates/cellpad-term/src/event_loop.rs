// SPDX-License-Identifier: MIT
//
// Event loop: one blocking read, one batch of keys, one frame.
//
//   stdin ──read──▶ Parser ──KeyEvent──▶ App::on_key ──Action──┐
//                                                               │
//   terminal ◀──Renderer◀── FrameBuffer ◀── App::paint ◀────────┘
//
// The loop blocks in `read(2)` until the user types. Every key in the
// chunk goes to the application in order; if any of them asked for a
// redraw, the frame is repainted once. There are no timers and no
// background threads. The only wait with a timeout is the short quiet
// period that decides whether a lone ESC is the Escape key or the start
// of an escape sequence whose tail hasn't arrived yet.
//
// The terminal is entered at the top of `run` and left before `run`
// returns, whatever the outcome: Quit, end of input, or an error.

use std::io;

use crate::error::{Error, Result};
use crate::frame::FrameBuffer;
use crate::input::{KeyEvent, Parser};
use crate::reader::InputReader;
use crate::render::Renderer;
use crate::terminal::Terminal;

// ─── App Trait ───────────────────────────────────────────────────────────────

/// What the application wants after handling a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing changed; don't repaint.
    Ignore,
    /// State changed; repaint the frame.
    Redraw,
    /// Leave the loop. No repaint.
    Quit,
}

/// Application interface for [`EventLoop`].
pub trait App {
    /// Handle one key.
    fn on_key(&mut self, key: &KeyEvent) -> Action;

    /// Paint the current state. The frame has been cleared.
    fn paint(&mut self, frame: &mut FrameBuffer);

    /// Where to put the hardware cursor after painting. `None` hides it.
    fn cursor(&self) -> Option<(u16, u16)> {
        None
    }
}

// ─── Config ──────────────────────────────────────────────────────────────────

/// Event loop timing.
#[derive(Debug, Clone, Copy)]
pub struct LoopConfig {
    /// How long a pending ESC waits for the rest of its sequence before
    /// it is taken as a bare Escape key.
    pub escape_timeout_ms: i32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            escape_timeout_ms: 25,
        }
    }
}

// ─── Dispatch ────────────────────────────────────────────────────────────────

/// Outcome of feeding one batch of keys to the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dispatch {
    Quit,
    Continue { dirty: bool },
}

/// Feed `keys` to `app` in order. Stops at the first Quit; keys after it
/// are dropped.
fn dispatch(app: &mut impl App, keys: &[KeyEvent]) -> Dispatch {
    let mut dirty = false;
    for key in keys {
        match app.on_key(key) {
            Action::Quit => return Dispatch::Quit,
            Action::Redraw => dirty = true,
            Action::Ignore => {}
        }
    }
    Dispatch::Continue { dirty }
}

// ─── EventLoop ───────────────────────────────────────────────────────────────

/// Owns the terminal, the input side, and the renderer.
pub struct EventLoop {
    terminal: Terminal,
    reader: InputReader,
    parser: Parser,
    renderer: Renderer,
    config: LoopConfig,
}

impl EventLoop {
    /// An event loop with default timing. Doesn't touch terminal modes yet.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LoopConfig::default())
    }

    #[must_use]
    pub fn with_config(config: LoopConfig) -> Self {
        Self {
            terminal: Terminal::new(),
            reader: InputReader::new(),
            parser: Parser::new(),
            renderer: Renderer::new(),
            config,
        }
    }

    /// Run until the app quits or input ends.
    ///
    /// # Errors
    ///
    /// [`Error::Terminal`] if entering, leaving, or drawing fails;
    /// [`Error::Input`] if stdin fails. The terminal has been restored by
    /// the time either is returned.
    pub fn run(&mut self, app: &mut impl App) -> Result<()> {
        self.terminal.enter().map_err(Error::Terminal)?;

        let result = self.run_inner(app);

        let left = self.terminal.leave().map_err(Error::Terminal);
        match (result, left) {
            (Err(e), Err(leave_err)) => {
                tracing::error!(error = %leave_err, "terminal restore failed after error");
                Err(e)
            }
            (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
            (Ok(()), Ok(())) => Ok(()),
        }
    }

    fn run_inner(&mut self, app: &mut impl App) -> Result<()> {
        let size = self.terminal.size();
        let mut frame = FrameBuffer::new(size.cols, size.rows);
        self.repaint(app, &mut frame)?;

        loop {
            let Some(bytes) = self.reader.read_chunk().map_err(Error::Input)? else {
                tracing::info!("input closed, leaving event loop");
                return Ok(());
            };
            let mut keys = self.parser.advance(bytes);

            if self.parser.has_pending()
                && !self
                    .reader
                    .wait_readable(self.config.escape_timeout_ms)
                    .map_err(Error::Input)?
            {
                keys.extend(self.parser.flush());
            }

            match dispatch(app, &keys) {
                Dispatch::Quit => return Ok(()),
                Dispatch::Continue { dirty: true } => self.repaint(app, &mut frame)?,
                Dispatch::Continue { dirty: false } => {}
            }
        }
    }

    fn repaint(&mut self, app: &mut impl App, frame: &mut FrameBuffer) -> Result<()> {
        let size = self.terminal.refresh_size();
        if size.cols != frame.width() || size.rows != frame.height() {
            frame.resize(size.cols, size.rows);
        }

        frame.clear();
        app.paint(frame);
        let cursor = app.cursor();

        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.renderer
            .draw(&mut lock, frame, cursor)
            .map_err(Error::Terminal)
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
