//! # cellpad-core: Editor core for cellpad
//!
//! - **[`position`]**: `Position` (line, col), 0-indexed
//! - **[`buffer`]**: `TextBuffer`: the lines, the cursor, and every edit
//! - **[`key`]**: logical keys decoded from terminal events
//! - **[`command`]**: the key → command dispatch table
//! - **[`session`]**: `EditSession`: one buffer, one file, save and quit
//! - **[`view`]**: paints a session into a `cellpad-term` frame
//!
//! Nothing here touches the terminal directly. The binary wires an
//! `EditSession` to `cellpad_term::event_loop::EventLoop`.

pub mod buffer;
pub mod command;
pub mod error;
pub mod key;
pub mod position;
pub mod session;
pub mod view;

pub use buffer::TextBuffer;
pub use command::Command;
pub use error::Error;
pub use key::Key;
pub use position::Position;
pub use session::{EditSession, Outcome, Status};
