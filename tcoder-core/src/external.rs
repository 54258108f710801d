// ============================================================================
// tcoder-core/src/external.rs
// ============================================================================
//
// EXTERNAL TOOLS: Running adb and ffmpeg as blocking subprocesses
//
// Every external invocation goes through `run_command`, which logs the full
// command line, lets the tool's own output reach the operator (stdout can be
// diverted to stderr with `ChildStdout`), waits for completion, and turns a
// non-zero exit into `CoreError::CommandFailed` carrying the exit code.

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Renders a command as `program arg1 arg2 ...` for logs and diagnostics.
pub fn describe_command(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(OsStr::to_string_lossy)
        .collect::<Vec<_>>()
        .join(" ")
}

fn program_name(cmd: &Command) -> String {
    Path::new(cmd.get_program())
        .file_name()
        .unwrap_or_else(|| cmd.get_program())
        .to_string_lossy()
        .into_owned()
}

/// Where a child process's standard output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChildStdout {
    /// Shared with our own stdout.
    #[default]
    Inherit,
    /// Sent to our stderr so stdout carries only progress events.
    Stderr,
}

impl ChildStdout {
    fn apply(self, cmd: &mut Command) {
        if self == ChildStdout::Stderr {
            cmd.stdout(Stdio::from(io::stderr()));
        }
    }
}

/// Runs a command to completion and fails unless it exits successfully.
///
/// # Errors
///
/// * `CoreError::CommandStart` - the program could not be started
/// * `CoreError::CommandFailed` - the program exited non-zero or was killed
pub fn run_command(cmd: &mut Command, stdout: ChildStdout) -> CoreResult<()> {
    stdout.apply(cmd);
    let rendered = describe_command(cmd);
    let program = program_name(cmd);
    log::info!("[CMD] {}", rendered);

    let status = cmd
        .status()
        .map_err(|e| CoreError::CommandStart(program.clone(), e))?;

    if status.success() {
        log::debug!("'{}' finished successfully", program);
        Ok(())
    } else {
        log::error!("Command failed ({}): {}", status, rendered);
        Err(CoreError::CommandFailed {
            program,
            code: status.code(),
        })
    }
}

/// Checks that an external program can be started.
///
/// The program is run once with `version_arg` and its output discarded; the
/// exit status is ignored because only startability matters.
///
/// # Errors
///
/// * `CoreError::DependencyNotFound` - the program is not on the PATH
/// * `CoreError::CommandStart` - the program exists but could not be started
pub fn check_dependency(program: &Path, version_arg: &str) -> CoreResult<()> {
    let result = Command::new(program)
        .arg(version_arg)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", program.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", program.display());
            Err(CoreError::DependencyNotFound(
                program.display().to_string(),
            ))
        }
        Err(e) => {
            log::error!(
                "Failed to start dependency check command '{}': {}",
                program.display(),
                e
            );
            Err(CoreError::CommandStart(program.display().to_string(), e))
        }
    }
}
