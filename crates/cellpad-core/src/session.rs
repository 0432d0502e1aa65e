//! Edit session: one buffer bound to one file.
//!
//! The session is the whole editor state: the [`TextBuffer`], the path it
//! was loaded from and is saved back to, and the one-line status shown
//! after a save. It takes logical [`Key`]s one at a time and tells the
//! caller whether to repaint or quit.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::buffer::TextBuffer;
use crate::command::Command;
use crate::error::Error;
use crate::key::Key;

// ---------------------------------------------------------------------------
// Outcome & Status
// ---------------------------------------------------------------------------

/// What the caller should do after [`EditSession::handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Leave the editor. Unsaved changes are discarded.
    Quit,
    /// State may have changed; repaint.
    Redraw,
}

/// A one-line message for the bottom row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub is_error: bool,
}

impl Status {
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

// ---------------------------------------------------------------------------
// EditSession
// ---------------------------------------------------------------------------

pub struct EditSession {
    buffer: TextBuffer,
    path: PathBuf,
    status: Option<Status>,
}

impl EditSession {
    /// Open `path` for editing. A missing or unreadable file starts empty.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let buffer = TextBuffer::open(&path);
        Self::with_buffer(path, buffer)
    }

    /// A session over an existing buffer. Nothing is read from `path`.
    #[must_use]
    pub const fn with_buffer(path: PathBuf, buffer: TextBuffer) -> Self {
        Self {
            buffer,
            path,
            status: None,
        }
    }

    // -- Access -------------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    #[must_use]
    pub const fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// The file name for messages, or the whole path if it has none.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.path.file_name().map_or_else(
            || self.path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    }

    // -- Dispatch -----------------------------------------------------------

    /// Handle one key.
    ///
    /// Any previous status is cleared first. Every key except Quit asks
    /// for a redraw, including keys whose edit turned out to be a no-op.
    pub fn handle(&mut self, key: Key) -> Outcome {
        self.status = None;
        let command = Command::for_key(key);
        tracing::trace!(%command, cursor = %self.buffer.cursor(), "dispatch");

        match command {
            Command::Quit => {
                if self.buffer.is_modified() {
                    tracing::info!(path = %self.path.display(), "quit with unsaved changes");
                }
                return Outcome::Quit;
            }
            Command::Save => self.save_with_status(),
            Command::MoveLeft => self.buffer.move_left(),
            Command::MoveRight => self.buffer.move_right(),
            Command::MoveUp => self.buffer.move_up(),
            Command::MoveDown => self.buffer.move_down(),
            Command::Insert(ch) => self.buffer.insert_char(ch),
            Command::DeleteBackward => self.buffer.delete_backward(),
            Command::SplitLine => self.buffer.split_line(),
        }

        Outcome::Redraw
    }

    // -- Save ---------------------------------------------------------------

    /// Write the buffer back to its file, overwriting it in place.
    ///
    /// Returns the number of bytes written. On success the buffer counts as
    /// unmodified.
    ///
    /// # Errors
    ///
    /// [`Error::Save`] if the file can't be created or written. The buffer
    /// is left untouched and still marked modified.
    pub fn save(&mut self) -> Result<usize, Error> {
        let bytes = self.buffer.serialize();
        write_file(&self.path, &bytes).map_err(|source| Error::Save {
            path: self.path.clone(),
            source,
        })?;
        self.buffer.mark_saved();
        tracing::info!(path = %self.path.display(), bytes = bytes.len(), "saved");
        Ok(bytes.len())
    }

    fn save_with_status(&mut self) {
        self.status = Some(match self.save() {
            Ok(bytes) => Status::info(format!("\"{}\" written, {bytes}B", self.display_name())),
            Err(e) => {
                tracing::warn!(error = %e, "save failed");
                Status::error(e.to_string())
            }
        });
    }
}

impl std::fmt::Debug for EditSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditSession")
            .field("path", &self.path)
            .field("buffer", &self.buffer)
            .field("status", &self.status)
            .finish()
    }
}

/// Truncate-and-write. New files get mode 0644 on unix.
fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.flush()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
