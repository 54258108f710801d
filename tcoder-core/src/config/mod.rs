//! Configuration structures and constants for the tcoder-core library.
//!
//! The workflow never reads process-wide constants directly. Everything it
//! needs (paths, recognised extensions, tool locations, the encoder profile)
//! travels in an immutable [`CoreConfig`] handed to each component, which
//! lets tests substitute scratch directories and mocked collaborators.

mod builder;

use crate::error::{CoreError, CoreResult};
use crate::transcode::EncodeProfile;
use std::path::PathBuf;

pub use builder::CoreConfigBuilder;

// Default constants

/// Directory on the device whose contents are pulled, cleared and replaced.
pub const DEFAULT_REMOTE_DIR: &str = "/sdcard/AliYunPan/备份文件/来自分享/yitianchenyuqi";

/// Local working root holding the staging and output directories.
pub const DEFAULT_WORK_DIR: &str = "./work";

/// Name of the staging directory below the work root.
pub const PULL_DIR_NAME: &str = "pull";

/// Name of the output directory below the work root.
pub const OUT_DIR_NAME: &str = "out";

/// Extensions (case-insensitive, without the dot) treated as video input.
pub const DEFAULT_VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "mkv", "avi", "mov"];

/// Default program used for device transfers.
pub const DEFAULT_ADB_PROGRAM: &str = "adb";

/// Default program used for encoding.
pub const DEFAULT_FFMPEG_PROGRAM: &str = "ffmpeg";

/// When the remote source directory is emptied relative to the transcode loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearTiming {
    /// Clear right after local videos are enumerated. A transcode failure
    /// leaves the remote directory empty.
    #[default]
    BeforeTranscode,
    /// Clear only once every transcode has succeeded, just before the push.
    AfterTranscode,
}

impl ClearTiming {
    pub const fn as_str(self) -> &'static str {
        match self {
            ClearTiming::BeforeTranscode => "before-transcode",
            ClearTiming::AfterTranscode => "after-transcode",
        }
    }
}

/// Main configuration structure for the tcoder workflow.
///
/// Created by the consumer of the library (e.g. tcoder-cli) and passed to
/// [`crate::workflow::run`]. Use [`CoreConfigBuilder`] to override the
/// defaults.
///
/// # Examples
///
/// ```rust
/// use tcoder_core::config::{ClearTiming, CoreConfigBuilder};
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .remote_dir("/sdcard/Movies")
///     .work_dir(PathBuf::from("/tmp/tcoder"))
///     .clear_timing(ClearTiming::AfterTranscode)
///     .build();
///
/// assert_eq!(config.pull_dir, PathBuf::from("/tmp/tcoder/pull"));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Directory on the device (POSIX path, no trailing slash)
    pub remote_dir: String,

    /// Local working root
    pub work_dir: PathBuf,

    /// Staging directory receiving pulled files
    pub pull_dir: PathBuf,

    /// Output directory receiving transcoded files
    pub out_dir: PathBuf,

    /// Recognised video extensions, lowercase, without the leading dot
    pub video_extensions: Vec<String>,

    /// Program invoked for device transfers
    pub adb_program: PathBuf,

    /// Optional device serial passed as `adb -s <serial>`
    pub device_serial: Option<String>,

    /// Program invoked for encoding
    pub ffmpeg_program: PathBuf,

    /// Fixed encoder profile
    pub encode_profile: EncodeProfile,

    /// When to empty the remote directory
    pub clear_timing: ClearTiming,
}

impl Default for CoreConfig {
    fn default() -> Self {
        CoreConfigBuilder::new().build()
    }
}

impl CoreConfig {
    /// Checks the invariants the workflow relies on.
    pub fn validate(&self) -> CoreResult<()> {
        let remote = self.remote_dir.trim_end_matches('/');
        if remote.is_empty() {
            return Err(CoreError::Config(
                "Remote directory must not be empty or the device root".to_string(),
            ));
        }

        if self.video_extensions.is_empty() {
            return Err(CoreError::Config(
                "At least one video extension is required".to_string(),
            ));
        }

        if self.pull_dir == self.out_dir {
            return Err(CoreError::Config(format!(
                "Staging and output directories must differ (both are {})",
                self.pull_dir.display()
            )));
        }

        Ok(())
    }

    /// Extension given to every transcoded file.
    pub fn output_extension(&self) -> &str {
        self.encode_profile.output_extension()
    }
}
