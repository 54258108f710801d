// ============================================================================
// tcoder-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// Staging and output directories follow the work root unless they are set
// explicitly. The encoder profile has no setter; it is fixed.

// ---- Standard library imports ----
use std::path::PathBuf;

// ---- Internal crate imports ----
use super::{
    ClearTiming, CoreConfig, DEFAULT_ADB_PROGRAM, DEFAULT_FFMPEG_PROGRAM, DEFAULT_REMOTE_DIR,
    DEFAULT_VIDEO_EXTENSIONS, DEFAULT_WORK_DIR, OUT_DIR_NAME, PULL_DIR_NAME,
};
use crate::transcode::EncodeProfile;

/// Builder for creating CoreConfig instances.
///
/// # Examples
///
/// ```rust
/// use tcoder_core::config::CoreConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .work_dir(PathBuf::from("scratch"))
///     .out_dir(PathBuf::from("elsewhere"))
///     .device_serial(Some("emulator-5554".to_string()))
///     .build();
///
/// assert_eq!(config.pull_dir, PathBuf::from("scratch/pull"));
/// assert_eq!(config.out_dir, PathBuf::from("elsewhere"));
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfigBuilder {
    remote_dir: String,
    work_dir: PathBuf,
    pull_dir: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    video_extensions: Vec<String>,
    adb_program: PathBuf,
    device_serial: Option<String>,
    ffmpeg_program: PathBuf,
    clear_timing: ClearTiming,
}

impl Default for CoreConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CoreConfigBuilder {
    /// Creates a new CoreConfigBuilder with default values.
    pub fn new() -> Self {
        Self {
            remote_dir: DEFAULT_REMOTE_DIR.to_string(),
            work_dir: PathBuf::from(DEFAULT_WORK_DIR),
            pull_dir: None,
            out_dir: None,
            video_extensions: DEFAULT_VIDEO_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            adb_program: PathBuf::from(DEFAULT_ADB_PROGRAM),
            device_serial: None,
            ffmpeg_program: PathBuf::from(DEFAULT_FFMPEG_PROGRAM),
            clear_timing: ClearTiming::default(),
        }
    }

    /// Sets the remote directory. Trailing slashes are dropped.
    pub fn remote_dir(mut self, remote_dir: impl Into<String>) -> Self {
        let remote_dir = remote_dir.into();
        let trimmed = remote_dir.trim_end_matches('/');
        self.remote_dir = if trimmed.is_empty() {
            remote_dir
        } else {
            trimmed.to_string()
        };
        self
    }

    /// Sets the work root. Staging and output default to `pull/` and `out/` below it.
    pub fn work_dir(mut self, work_dir: PathBuf) -> Self {
        self.work_dir = work_dir;
        self
    }

    /// Overrides the staging directory.
    pub fn pull_dir(mut self, pull_dir: PathBuf) -> Self {
        self.pull_dir = Some(pull_dir);
        self
    }

    /// Overrides the output directory.
    pub fn out_dir(mut self, out_dir: PathBuf) -> Self {
        self.out_dir = Some(out_dir);
        self
    }

    /// Replaces the recognised extensions. Leading dots and case are normalised.
    pub fn video_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.video_extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        self
    }

    pub fn adb_program(mut self, program: PathBuf) -> Self {
        self.adb_program = program;
        self
    }

    pub fn device_serial(mut self, serial: Option<String>) -> Self {
        self.device_serial = serial.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn ffmpeg_program(mut self, program: PathBuf) -> Self {
        self.ffmpeg_program = program;
        self
    }

    pub fn clear_timing(mut self, clear_timing: ClearTiming) -> Self {
        self.clear_timing = clear_timing;
        self
    }

    /// Builds the CoreConfig instance. Call [`CoreConfig::validate`] afterwards.
    pub fn build(self) -> CoreConfig {
        let pull_dir = self
            .pull_dir
            .unwrap_or_else(|| self.work_dir.join(PULL_DIR_NAME));
        let out_dir = self
            .out_dir
            .unwrap_or_else(|| self.work_dir.join(OUT_DIR_NAME));

        CoreConfig {
            remote_dir: self.remote_dir,
            work_dir: self.work_dir,
            pull_dir,
            out_dir,
            video_extensions: self.video_extensions,
            adb_program: self.adb_program,
            device_serial: self.device_serial,
            ffmpeg_program: self.ffmpeg_program,
            encode_profile: EncodeProfile::default(),
            clear_timing: self.clear_timing,
        }
    }
}
