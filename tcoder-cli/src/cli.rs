// tcoder-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::Parser;
use std::path::PathBuf;
use tcoder_core::ChildStdout;
use tcoder_core::config::{
    ClearTiming, DEFAULT_ADB_PROGRAM, DEFAULT_FFMPEG_PROGRAM, DEFAULT_REMOTE_DIR, DEFAULT_WORK_DIR,
};

// --- CLI Argument Definition ---

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "tcoder: pull videos from an Android device, re-encode them, push them back",
    long_about = "Pulls a device directory over adb, transcodes every video with a fixed \
                  ffmpeg h264_nvenc profile, renames episodes to their two-digit number, \
                  replaces the device directory contents and pushes the results back."
)]
pub struct Cli {
    /// Directory on the device to pull from and push back to
    #[arg(long, value_name = "DEVICE_PATH", env = "TCODER_REMOTE_DIR", default_value = DEFAULT_REMOTE_DIR)]
    pub remote_dir: String,

    /// Local work directory holding the pull/ and out/ subdirectories
    #[arg(long, value_name = "DIR", env = "TCODER_WORK_DIR", default_value = DEFAULT_WORK_DIR)]
    pub work_dir: PathBuf,

    /// adb executable to use
    #[arg(long, value_name = "PATH", env = "TCODER_ADB", default_value = DEFAULT_ADB_PROGRAM)]
    pub adb: PathBuf,

    /// ffmpeg executable to use
    #[arg(long, value_name = "PATH", env = "TCODER_FFMPEG", default_value = DEFAULT_FFMPEG_PROGRAM)]
    pub ffmpeg: PathBuf,

    /// Target a specific device (passed to adb as -s SERIAL)
    #[arg(short, long, value_name = "SERIAL")]
    pub serial: Option<String>,

    /// Clear the device directory only after every file transcoded successfully
    #[arg(long, default_value_t = false)]
    pub defer_clear: bool,

    /// Emit newline-delimited JSON progress events instead of terminal output
    #[arg(long, default_value_t = false)]
    pub progress_json: bool,

    /// Enable debug-level logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Do not write a run log file
    #[arg(long, default_value_t = false)]
    pub no_log: bool,

    /// Optional: Directory for log files (defaults to WORK_DIR/logs)
    #[arg(short, long, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// Point in the workflow at which the device directory is cleared.
    pub fn clear_timing(&self) -> ClearTiming {
        if self.defer_clear {
            ClearTiming::AfterTranscode
        } else {
            ClearTiming::BeforeTranscode
        }
    }

    /// Where adb and ffmpeg write their stdout. JSON mode keeps stdout for events.
    pub fn child_stdout(&self) -> ChildStdout {
        if self.progress_json {
            ChildStdout::Stderr
        } else {
            ChildStdout::Inherit
        }
    }

    /// Log directory, defaulting to `<work-dir>/logs`.
    pub fn effective_log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| self.work_dir.join("logs"))
    }
}

/// Parses the process arguments, exiting with a usage error (code 2) on failure.
pub fn parse_cli() -> Cli {
    Cli::parse()
}
