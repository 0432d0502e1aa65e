//! Errors surfaced by the editor core.
//!
//! Loading never fails (an unreadable file becomes an empty buffer), so the
//! only fallible core operation is writing the buffer back out.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Writing the buffer to disk failed.
    #[error("cannot write {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
