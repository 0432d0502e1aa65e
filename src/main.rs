// SPDX-License-Identifier: MIT
//
// cellpad: a minimal terminal text editor.
//
// This is the main binary that wires the crates together:
//
//   cellpad-term → raw mode, input parsing, framebuffer, event loop
//   cellpad-core → text buffer, key dispatch, edit session, view
//
// The Editor struct implements cellpad-term's App trait around one
// EditSession. Each keypress flows through:
//
//   stdin → parser → on_key → Key::from_event → EditSession::handle
//   paint → view::paint → framebuffer → renderer → terminal
//
// Layout:
//
//   ┌──────────────────────────────┐
//   │ line i on row i              │  ← every row, no gutter
//   │                              │
//   ├──────────────────────────────┤
//   │ status (INVERSE, after save) │  ← last row, only while set
//   └──────────────────────────────┘

mod config;
mod logging;

use std::env;
use std::process::ExitCode;

use cellpad_core::view;
use cellpad_core::{EditSession, Key, Outcome};
use cellpad_term::event_loop::{Action, App, EventLoop};
use cellpad_term::frame::FrameBuffer;
use cellpad_term::input::KeyEvent;
use cellpad_term::terminal;

use crate::config::{Config, Invocation, USAGE};

// ─── Editor ─────────────────────────────────────────────────────────────────

/// The event loop's view of the editor.
struct Editor {
    session: EditSession,
    cursor: Option<(u16, u16)>,
}

impl Editor {
    const fn new(session: EditSession) -> Self {
        Self {
            session,
            cursor: None,
        }
    }
}

impl App for Editor {
    fn on_key(&mut self, key: &KeyEvent) -> Action {
        let Some(key) = Key::from_event(key) else {
            tracing::trace!(?key, "unbound key");
            return Action::Ignore;
        };
        match self.session.handle(key) {
            Outcome::Quit => Action::Quit,
            Outcome::Redraw => Action::Redraw,
        }
    }

    fn paint(&mut self, frame: &mut FrameBuffer) {
        self.cursor = view::paint(&self.session, frame);
    }

    fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let invocation = match config::parse(env::args().skip(1), |key| env::var(key).ok()) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("cellpad: {e}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match invocation {
        Invocation::Usage => {
            println!("{USAGE}");
            ExitCode::SUCCESS
        }
        Invocation::Version => {
            println!("cellpad {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Invocation::Edit(config) => run(&config),
    }
}

fn run(config: &Config) -> ExitCode {
    if !terminal::is_tty() {
        eprintln!("cellpad: stdin is not a terminal");
        return ExitCode::FAILURE;
    }

    let logging = logging::init(config);

    let mut editor = Editor::new(EditSession::new(config.path.clone()));
    tracing::info!(path = %config.path.display(), "editing");

    let result = EventLoop::new().run(&mut editor);

    match result {
        Ok(()) => {
            tracing::info!("exit");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "fatal");
            eprintln!("cellpad: {e}");
            if let Some(guard) = &logging {
                eprintln!("cellpad: logs are in {}", guard.log_dir().display());
            }
            ExitCode::FAILURE
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use cellpad_core::TextBuffer;
    use cellpad_term::input::{KeyCode, Modifiers};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    // ── Helpers ─────────────────────────────────────────────────────

    fn editor_with(text: &str) -> Editor {
        Editor::new(EditSession::with_buffer(
            PathBuf::from("unused.txt"),
            TextBuffer::from_text(text),
        ))
    }

    fn press(ch: char) -> KeyEvent {
        KeyEvent::plain(KeyCode::Char(ch))
    }

    fn feed(editor: &mut Editor, keys: &[KeyEvent]) -> Vec<Action> {
        keys.iter().map(|key| editor.on_key(key)).collect()
    }

    // ── on_key ──────────────────────────────────────────────────────

    #[test]
    fn typing_redraws() {
        let mut e = editor_with("");
        let actions = feed(&mut e, &[press('h'), press('i')]);
        assert_eq!(actions, [Action::Redraw, Action::Redraw]);
        assert_eq!(e.session.buffer().lines(), ["hi"]);
    }

    #[test]
    fn ctrl_q_quits() {
        let mut e = editor_with("abc");
        assert_eq!(e.on_key(&KeyEvent::ctrl('q')), Action::Quit);
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let mut e = editor_with("abc");
        let actions = feed(
            &mut e,
            &[
                KeyEvent::plain(KeyCode::Tab),
                KeyEvent::plain(KeyCode::Escape),
                KeyEvent::ctrl('x'),
                KeyEvent::with(KeyCode::Char('a'), Modifiers::ALT),
            ],
        );
        assert!(actions.iter().all(|&a| a == Action::Ignore));
        assert_eq!(e.session.buffer().lines(), ["abc"]);
    }

    // ── paint ───────────────────────────────────────────────────────

    #[test]
    fn paint_records_cursor() {
        let mut e = editor_with("abc\nde");
        feed(
            &mut e,
            &[KeyEvent::plain(KeyCode::Down), KeyEvent::plain(KeyCode::Right)],
        );
        let mut frame = FrameBuffer::new(10, 4);
        e.paint(&mut frame);
        assert_eq!(frame.row_text(0), "abc");
        assert_eq!(frame.row_text(1), "de");
        assert_eq!(e.cursor(), Some((1, 1)));
    }

    #[test]
    fn cursor_is_none_before_first_paint() {
        assert_eq!(editor_with("x").cursor(), None);
    }
}
