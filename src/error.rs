//! Error types for sevenz-cmd
//!
//! Every operation settles with a single [`Error`] on failure. The variants
//! separate problems detected before a process is started from failures of
//! the process itself, which matters for the fallback binary logic in
//! [`crate::retry`].

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sevenz-cmd operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for sevenz-cmd
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed command, binary name, path or switch configuration
    ///
    /// Detected before anything is spawned.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The external tool could not be started (missing binary, permission denied)
    #[error("failed to execute {}: {source}", binary.display())]
    SpawnFailure {
        /// The program that was handed to the OS
        binary: PathBuf,
        /// The underlying system error
        #[source]
        source: std::io::Error,
    },

    /// The external tool ran and exited unsuccessfully
    ///
    /// `message` is the text captured after an `Error:` marker on stderr when
    /// one was seen, otherwise a generic description of the exit status.
    #[error("{binary} failed: {message}")]
    ToolFailure {
        /// Binary name the failing attempt was issued against
        binary: String,
        /// Most specific failure reason available
        message: String,
        /// Exit code, absent when the process was terminated by a signal
        exit_code: Option<i32>,
    },

    /// I/O error while talking to a running process
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a [`Error::ToolFailure`] from an exit code and an optional stderr message
    pub(crate) fn tool_failure(
        binary: impl Into<String>,
        exit_code: Option<i32>,
        extracted: Option<String>,
    ) -> Self {
        let message = extracted.unwrap_or_else(|| match exit_code {
            Some(code) => format!("exited with code {}", code),
            None => "terminated by signal".to_string(),
        });
        Error::ToolFailure {
            binary: binary.into(),
            message,
            exit_code,
        }
    }

    /// The tool-reported (or generic) failure message of a [`Error::ToolFailure`]
    pub fn tool_message(&self) -> Option<&str> {
        match self {
            Error::ToolFailure { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Exit code carried by a [`Error::ToolFailure`]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Error::ToolFailure { exit_code, .. } => *exit_code,
            _ => None,
        }
    }

    /// Machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidArgument(_) => "invalid_argument",
            Error::SpawnFailure { .. } => "spawn_failure",
            Error::ToolFailure { .. } => "tool_failure",
            Error::Io(_) => "io_error",
        }
    }
}
