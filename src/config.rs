// SPDX-License-Identifier: MIT
//
// Startup configuration: the command line plus two environment variables.
//
//   cellpad <file>          edit <file>
//   cellpad                 print usage
//   cellpad -h | --help     print usage
//   cellpad -V | --version  print version
//
//   CELLPAD_LOG      tracing filter directives (default: cellpad=info,cellpad_core=info)
//   CELLPAD_LOG_DIR  where log files go (default: <tmp>/cellpad/logs)
//
// Parsing is a pure function of its inputs so tests never touch the real
// process environment.

use std::path::PathBuf;

use thiserror::Error;

pub const USAGE: &str = "Usage: cellpad <filename>";
pub const DEFAULT_LOG_FILTER: &str = "cellpad=info,cellpad_core=info";
pub const LOG_FILTER_VAR: &str = "CELLPAD_LOG";
pub const LOG_DIR_VAR: &str = "CELLPAD_LOG_DIR";

/// What the process was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Edit(Config),
    Usage,
    Version,
}

/// Everything an editing run needs, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The file to edit. It need not exist yet.
    pub path: PathBuf,
    pub log_dir: PathBuf,
    pub log_filter: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("unexpected argument '{0}'")]
    ExtraArgument(String),
}

/// Parse the arguments after the program name.
///
/// `env` looks up an environment variable; pass `|k| std::env::var(k).ok()`
/// in production.
///
/// # Errors
///
/// An option that isn't recognized, or more than one file name.
pub fn parse<I, F>(args: I, env: F) -> Result<Invocation, ArgError>
where
    I: IntoIterator<Item = String>,
    F: Fn(&str) -> Option<String>,
{
    let mut path: Option<String> = None;
    let mut options_done = false;

    for arg in args {
        if !options_done && arg.starts_with('-') && arg.len() > 1 {
            match arg.as_str() {
                "-h" | "--help" => return Ok(Invocation::Usage),
                "-V" | "--version" => return Ok(Invocation::Version),
                "--" => options_done = true,
                _ => return Err(ArgError::UnknownOption(arg)),
            }
            continue;
        }
        if path.is_some() {
            return Err(ArgError::ExtraArgument(arg));
        }
        path = Some(arg);
    }

    let Some(path) = path else {
        return Ok(Invocation::Usage);
    };

    let log_dir = env(LOG_DIR_VAR)
        .filter(|v| !v.is_empty())
        .map_or_else(default_log_dir, PathBuf::from);
    let log_filter = env(LOG_FILTER_VAR)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    Ok(Invocation::Edit(Config {
        path: PathBuf::from(path),
        log_dir,
        log_filter,
    }))
}

#[must_use]
pub fn default_log_dir() -> PathBuf {
    std::env::temp_dir().join("cellpad").join("logs")
}

// ─── Tests ──────────────────────────────────────────────────────────────────
