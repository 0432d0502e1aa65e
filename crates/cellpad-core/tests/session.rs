// End-to-end: raw terminal bytes in, file bytes out.

use std::fs;
use std::path::Path;

use cellpad_core::view;
use cellpad_core::{EditSession, Key, Outcome, Position};
use cellpad_term::frame::FrameBuffer;
use cellpad_term::input::Parser;
use pretty_assertions::assert_eq;

/// Feed `bytes` through the terminal parser and the session, the way the
/// event loop does. Returns `true` if the session asked to quit.
fn type_bytes(session: &mut EditSession, bytes: &[u8]) -> bool {
    let mut parser = Parser::new();
    let mut events = parser.advance(bytes);
    events.extend(parser.flush());
    events
        .iter()
        .filter_map(Key::from_event)
        .any(|key| session.handle(key) == Outcome::Quit)
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

// ── Editing a file ──────────────────────────────────────────────────────────

#[test]
fn latin1_file_keeps_its_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.txt");
    fs::write(&path, b"caf\xe9\nna\xefve").unwrap();

    let mut session = EditSession::new(&path);
    type_bytes(&mut session, b"\x13");
    assert_eq!(fs::read(&path).unwrap(), b"caf\xe9\nna\xefve");

    type_bytes(&mut session, b"\x1b[C\x1b[C\x1b[C\x1b[C!\x13");
    assert_eq!(session.buffer().cursor(), Position::new(0, 5));
    assert_eq!(fs::read(&path).unwrap(), b"caf\xe9!\nna\xefve");
}

#[test]
fn edit_and_save_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.txt");
    fs::write(&path, "milk\neggs").unwrap();

    let mut session = EditSession::new(&path);
    // End of line 0, add " x2", new line, "bread", save.
    assert!(!type_bytes(&mut session, b"\x1b[C\x1b[C\x1b[C\x1b[C x2\rbread\x13"));

    assert_eq!(read(&path), "milk x2\nbread\neggs");
    assert_eq!(session.buffer().cursor(), Position::new(1, 5));
    assert!(!session.buffer().is_modified());
}

#[test]
fn new_file_is_created_on_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.txt");

    let mut session = EditSession::new(&path);
    assert_eq!(session.buffer().lines(), [""]);
    type_bytes(&mut session, b"hi\x13");

    assert_eq!(read(&path), "hi");
}

#[test]
fn crlf_file_round_trips_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dos.txt");
    fs::write(&path, "a\r\nb\r\n").unwrap();

    let mut session = EditSession::new(&path);
    assert_eq!(session.buffer().lines(), ["a\r", "b\r", ""]);
    type_bytes(&mut session, b"\x13");

    assert_eq!(read(&path), "a\r\nb\r\n");
}

#[test]
fn backspace_joins_lines_before_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("join.txt");
    fs::write(&path, "ab\ncd").unwrap();

    let mut session = EditSession::new(&path);
    type_bytes(&mut session, b"\x1b[B\x7f\x13");

    assert_eq!(read(&path), "abcd");
    assert_eq!(session.buffer().cursor(), Position::new(0, 2));
}

// ── Quitting ────────────────────────────────────────────────────────────────

#[test]
fn quit_discards_unsaved_edits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keep.txt");
    fs::write(&path, "original").unwrap();

    let mut session = EditSession::new(&path);
    assert!(type_bytes(&mut session, b"junk\x11more"));

    assert_eq!(read(&path), "original");
    // Keys after Quit were never handled.
    assert_eq!(session.buffer().lines(), ["junkoriginal"]);
}

// ── Screen ──────────────────────────────────────────────────────────────────

#[test]
fn screen_after_save_shows_text_status_and_cursor() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("screen.txt");

    let mut session = EditSession::new(&path);
    type_bytes(&mut session, b"one\rtwo\x13");

    let mut frame = FrameBuffer::new(40, 5);
    let cursor = view::paint(&session, &mut frame);
    assert_eq!(frame.row_text(0), "one");
    assert_eq!(frame.row_text(1), "two");
    assert_eq!(frame.row_text(4), "\"screen.txt\" written, 7B");
    assert_eq!(cursor, Some((3, 1)));

    // The next key clears the status.
    type_bytes(&mut session, b"\x1b[D");
    frame.clear();
    let cursor = view::paint(&session, &mut frame);
    assert_eq!(frame.row_text(4), "");
    assert_eq!(cursor, Some((2, 1)));
}

#[test]
fn failed_save_is_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("f.txt");

    let mut session = EditSession::new(&path);
    assert!(!type_bytes(&mut session, b"x\x13y"));

    assert_eq!(session.buffer().lines(), ["xy"]);
    assert!(session.buffer().is_modified());
    assert!(!path.exists());
}
