//! Transcoder invocation.
//!
//! Every input is re-encoded with the same fixed ffmpeg profile: H.264 via
//! NVENC, main profile at level 4.0, slow preset, CRF 20, audio copied
//! verbatim and the moov atom moved to the front for streaming. The output
//! container is always MP4, whatever the input container was.

use crate::config::CoreConfig;
use crate::error::CoreResult;
use crate::external::{ChildStdout, run_command};

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// The fixed encoder argument list and output container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeProfile {
    args: Vec<String>,
    output_extension: String,
}

impl Default for EncodeProfile {
    fn default() -> Self {
        let args = [
            "-c:v", "h264_nvenc",
            "-profile:v", "main",
            "-level", "4.0",
            "-preset", "slow",
            "-crf", "20",
            "-c:a", "copy",
            "-movflags", "+faststart",
        ];
        Self {
            args: args.iter().map(|arg| arg.to_string()).collect(),
            output_extension: "mp4".to_string(),
        }
    }
}

impl EncodeProfile {
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn output_extension(&self) -> &str {
        &self.output_extension
    }

    /// Full argument list for one file: `-y -i <input> <profile...> <output>`.
    pub fn command_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-y".into(), "-i".into(), input.into()];
        args.extend(self.args.iter().map(OsString::from));
        args.push(output.into());
        args
    }
}

/// Produces one transcoded file from one input file.
pub trait Encoder {
    /// Encodes `input` into `output`, overwriting any existing file.
    fn transcode(&self, input: &Path, output: &Path) -> CoreResult<()>;
}

/// ffmpeg-backed encoder.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    program: PathBuf,
    profile: EncodeProfile,
    stdout: ChildStdout,
}

impl FfmpegEncoder {
    pub fn new(program: impl Into<PathBuf>, profile: EncodeProfile) -> Self {
        Self {
            program: program.into(),
            profile,
            stdout: ChildStdout::Inherit,
        }
    }

    /// Routes ffmpeg's stdout; its progress lines already go to stderr.
    pub fn with_child_stdout(mut self, stdout: ChildStdout) -> Self {
        self.stdout = stdout;
        self
    }

    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(&config.ffmpeg_program, config.encode_profile.clone())
    }

    /// Builds the encode invocation without running it.
    pub fn command(&self, input: &Path, output: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.profile.command_args(input, output));
        cmd
    }
}

impl Encoder for FfmpegEncoder {
    fn transcode(&self, input: &Path, output: &Path) -> CoreResult<()> {
        run_command(&mut self.command(input, output), self.stdout)
    }
}
