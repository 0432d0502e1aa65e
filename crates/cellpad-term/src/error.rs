// SPDX-License-Identifier: MIT
//
// Fatal errors of the terminal layer.
//
// Both variants end the session. They are kept apart so the binary can
// say whether the terminal itself or the input stream went away.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Entering/leaving raw mode or writing a frame failed.
    #[error("terminal error: {0}")]
    Terminal(#[source] io::Error),

    /// Reading from stdin failed.
    #[error("input error: {0}")]
    Input(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
