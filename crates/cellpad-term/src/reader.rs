// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Blocking stdin reader.
//
// The editor is single-threaded: the event loop blocks here until the
// user types, processes the resulting keys, and comes back. Reads go
// straight to fd 0 with `read(2)` rather than through `io::stdin()`,
// whose internal buffer would hide bytes from `poll(2)` and break the
// escape-sequence quiet-period check.

use std::io;

/// Chunk size for one `read()`. A keypress is 1-6 bytes; a fast typist
/// or a terminal paste can deliver more in one go.
const READ_BUF_SIZE: usize = 4096;

/// Blocking reader over the process's stdin.
pub struct InputReader {
    buf: Box<[u8; READ_BUF_SIZE]>,
}

impl InputReader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Box::new([0u8; READ_BUF_SIZE]),
        }
    }

    /// Block until stdin has bytes and return them.
    ///
    /// Returns `Ok(None)` at end of input. `EINTR` is retried.
    ///
    /// # Errors
    ///
    /// Any other read failure. The caller treats it as fatal.
    #[cfg(unix)]
    pub fn read_chunk(&mut self) -> io::Result<Option<&[u8]>> {
        loop {
            let n = unsafe {
                libc::read(
                    libc::STDIN_FILENO,
                    self.buf.as_mut_ptr().cast::<libc::c_void>(),
                    READ_BUF_SIZE,
                )
            };

            if n < 0 {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::Interrupted {
                    continue;
                }
                return Err(err);
            }
            if n == 0 {
                return Ok(None);
            }

            #[allow(clippy::cast_sign_loss)] // n > 0 checked above.
            return Ok(Some(&self.buf[..n as usize]));
        }
    }

    #[cfg(not(unix))]
    pub fn read_chunk(&mut self) -> io::Result<Option<&[u8]>> {
        use std::io::Read;

        match io::stdin().lock().read(&mut self.buf[..])? {
            0 => Ok(None),
            n => Ok(Some(&self.buf[..n])),
        }
    }

    /// Wait up to `timeout_ms` for stdin to become readable.
    ///
    /// # Errors
    ///
    /// Returns the `poll(2)` failure, except `EINTR`, which counts as "not
    /// readable yet".
    #[cfg(unix)]
    pub fn wait_readable(&self, timeout_ms: i32) -> io::Result<bool> {
        let mut pfd = libc::pollfd {
            fd: libc::STDIN_FILENO,
            events: libc::POLLIN,
            revents: 0,
        };
        let ready = unsafe { libc::poll(&raw mut pfd, 1, timeout_ms) };

        if ready < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                return Ok(false);
            }
            return Err(err);
        }
        Ok(ready > 0)
    }

    #[cfg(not(unix))]
    pub fn wait_readable(&self, _timeout_ms: i32) -> io::Result<bool> {
        Ok(false)
    }
}

impl Default for InputReader {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
