// ============================================================================
// tcoder-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Error types and utilities for the CLI
//
// The CLI reuses `CoreError` so every failure maps to a process exit code in
// one place (`CoreError::exit_code`). Context is attached by wrapping the
// message in `CoreError::OperationFailed`.

use tcoder_core::{CoreError, CoreResult};

use std::fmt;

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Extension trait for adding context to errors in the CLI.
pub trait CliErrorContext<T> {
    /// Add context using a closure (for lazy evaluation).
    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E> CliErrorContext<T> for Result<T, E>
where
    E: Into<CoreError>,
{
    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| {
            let core_error: CoreError = e.into();
            CoreError::OperationFailed(format!("{}: {}", f(), core_error))
        })
    }
}

/// Suggestion shown next to an error in the terminal report, if any.
pub fn suggestion_for(error: &CoreError) -> Option<String> {
    match error {
        CoreError::DependencyNotFound(program) => Some(format!(
            "Install '{}' or point tcoder at it with --adb / --ffmpeg",
            program
        )),
        CoreError::CommandFailed { program, .. } if program.contains("adb") => Some(
            "Check that the device is connected and authorised (adb devices)".to_string(),
        ),
        CoreError::StagingMissing(_) => {
            Some("Check that the remote directory exists on the device".to_string())
        }
        CoreError::PromptClosed => {
            Some("Run tcoder interactively or empty the staging directory first".to_string())
        }
        _ => None,
    }
}
