//! Error types for the tcoder-core library.
//!
//! Every failure in the workflow surfaces as a `CoreError`. Nothing is
//! retried or rolled back; the CLI maps the error to a process exit code
//! with [`CoreError::exit_code`].

use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for tcoder
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to start '{0}': {1}")]
    CommandStart(String, #[source] std::io::Error),

    /// An external command ran but exited unsuccessfully.
    ///
    /// `code` is `None` when the process was terminated by a signal.
    #[error("Command '{program}' failed with {}", describe_code(.code))]
    CommandFailed { program: String, code: Option<i32> },

    #[error("Required dependency '{0}' not found")]
    DependencyNotFound(String),

    #[error("Pulled video directory not found: {}", .0.display())]
    StagingMissing(PathBuf),

    #[error("Input closed before a directory policy was chosen")]
    PromptClosed,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    OperationFailed(String),
}

/// Result type for tcoder operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Process exit status this error should terminate the run with.
    ///
    /// A failed external command propagates its own exit code; everything
    /// else (including a missing staging directory) exits with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            CoreError::CommandFailed {
                code: Some(code), ..
            } => u8::try_from(*code).ok().filter(|c| *c != 0).unwrap_or(1),
            _ => 1,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
