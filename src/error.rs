//! Error types for `template-updater`.
//!
//! Every fallible step in the pipeline returns [`UpdaterError`]. The binary
//! prints the message and exits with [`UpdaterError::exit_code`].

use std::{io, path::PathBuf};
use thiserror::Error;

/// Exit code for a successful run (also used after an interrupt).
pub const SUCCESS: i32 = 0;
/// Exit code for bad user input: invalid menu choice or malformed statement.
pub const USER_ERROR: i32 = 1;
/// Exit code for filesystem failures.
pub const IO_ERROR: i32 = 2;
/// Exit code for a failing `git` or `gh` invocation.
pub const COMMAND_ERROR: i32 = 3;

#[derive(Error, Debug)]
pub enum UpdaterError {
    /// The menu answer was not a number in `1..=len`.
    #[error("Invalid choice: {0}. Exiting.")]
    InvalidChoice(String),

    /// The SQL statement file does not hold a single `SET @html_content` line.
    #[error("Invalid HTML content format. Must be a valid SQL SET statement. {pattern}")]
    InvalidStatement { pattern: String },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An external tool ran and exited non-zero.
    #[error("`{command}` failed (exit code {code}): {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    /// An external tool could not be started at all.
    #[error("failed to execute `{command}`: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{0}` not found in PATH")]
    ToolMissing(String),

    #[error("prompt failed: {0}")]
    Prompt(String),

    /// The user pressed Ctrl-C at a prompt.
    #[error("interrupted")]
    Interrupted,
}

impl UpdaterError {
    /// Wraps an I/O error together with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        UpdaterError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            UpdaterError::InvalidChoice(_)
            | UpdaterError::InvalidStatement { .. }
            | UpdaterError::ToolMissing(_)
            | UpdaterError::Prompt(_) => USER_ERROR,
            UpdaterError::Io { .. } => IO_ERROR,
            UpdaterError::CommandFailed { .. } | UpdaterError::CommandSpawn { .. } => {
                COMMAND_ERROR
            }
            UpdaterError::Interrupted => SUCCESS,
        }
    }
}

pub type Result<T> = std::result::Result<T, UpdaterError>;
