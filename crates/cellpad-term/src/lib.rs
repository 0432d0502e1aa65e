// SPDX-License-Identifier: MIT
//
// cellpad-term: the terminal side of cellpad.
//
// Raw mode and the alternate screen with guaranteed restore, a blocking
// stdin reader, a byte-to-key parser, a character cell grid, and a
// full-frame renderer, tied together by a single-threaded event loop.
//
// No TUI framework underneath: termios via libc and hand-written ANSI
// sequences, so every byte sent to the terminal is accounted for.

pub mod ansi;
pub mod error;
pub mod event_loop;
pub mod frame;
pub mod input;
pub mod reader;
pub mod render;
pub mod terminal;

pub use error::Error;
