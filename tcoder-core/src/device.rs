//! Device file transfer.
//!
//! [`DeviceTransfer`] is the seam between the workflow and the device;
//! [`AdbTransfer`] implements it with `adb pull`, `adb shell rm` and
//! `adb push`. Any failing invocation aborts the run.

use crate::config::CoreConfig;
use crate::error::CoreResult;
use crate::external::{ChildStdout, run_command};

use std::path::{Path, PathBuf};
use std::process::Command;

/// Transfers files between the local machine and a device directory.
pub trait DeviceTransfer {
    /// Copies the contents of `remote_dir` into `local_dir`.
    fn pull(&self, remote_dir: &str, local_dir: &Path) -> CoreResult<()>;

    /// Recursively deletes the contents of `remote_dir`, keeping the directory.
    fn clear_remote(&self, remote_dir: &str) -> CoreResult<()>;

    /// Copies the contents of `local_dir` into `remote_dir`.
    fn push(&self, local_dir: &Path, remote_dir: &str) -> CoreResult<()>;
}

/// `adb`-backed transfer.
#[derive(Debug, Clone)]
pub struct AdbTransfer {
    program: PathBuf,
    serial: Option<String>,
    stdout: ChildStdout,
}

impl AdbTransfer {
    pub fn new(program: impl Into<PathBuf>, serial: Option<String>) -> Self {
        Self {
            program: program.into(),
            serial,
            stdout: ChildStdout::Inherit,
        }
    }

    /// Routes adb's own progress output.
    pub fn with_child_stdout(mut self, stdout: ChildStdout) -> Self {
        self.stdout = stdout;
        self
    }

    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(&config.adb_program, config.device_serial.clone())
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        if let Some(serial) = &self.serial {
            cmd.args(["-s", serial]);
        }
        cmd
    }

    /// Builds the pull invocation without running it.
    pub fn pull_command(&self, remote_dir: &str, local_dir: &Path) -> Command {
        let mut cmd = self.command();
        cmd.arg("pull").arg(contents_of(remote_dir)).arg(local_dir);
        cmd
    }

    /// Builds the remote delete invocation without running it.
    pub fn clear_command(&self, remote_dir: &str) -> Command {
        let mut cmd = self.command();
        // `*` misses dotfiles like `.nomedia`; the other two globs never match `.` or `..`.
        let dir = shell_quote(remote_dir.trim_end_matches('/'));
        cmd.arg("shell")
            .arg(format!("rm -rf {dir}/* {dir}/.[!.]* {dir}/..?*"));
        cmd
    }

    /// Builds the push invocation without running it.
    pub fn push_command(&self, local_dir: &Path, remote_dir: &str) -> Command {
        let mut cmd = self.command();
        cmd.arg("push").arg(local_dir.join(".")).arg(remote_dir);
        cmd
    }
}

impl DeviceTransfer for AdbTransfer {
    fn pull(&self, remote_dir: &str, local_dir: &Path) -> CoreResult<()> {
        run_command(&mut self.pull_command(remote_dir, local_dir), self.stdout)
    }

    fn clear_remote(&self, remote_dir: &str) -> CoreResult<()> {
        run_command(&mut self.clear_command(remote_dir), self.stdout)
    }

    fn push(&self, local_dir: &Path, remote_dir: &str) -> CoreResult<()> {
        run_command(&mut self.push_command(local_dir, remote_dir), self.stdout)
    }
}

/// `dir/.` so adb copies the directory's contents rather than the directory.
fn contents_of(remote_dir: &str) -> String {
    format!("{}/.", remote_dir.trim_end_matches('/'))
}

/// Single-quotes a path for the device shell.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
