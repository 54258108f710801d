//! Core library for the tcoder device transcoding workflow.
//!
//! Pulls a directory of videos from an Android device with `adb`, re-encodes
//! each file with a fixed ffmpeg profile, names the outputs after their
//! episode number, and pushes the results back to the same device directory.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use tcoder_core::config::CoreConfigBuilder;
//! use tcoder_core::device::AdbTransfer;
//! use tcoder_core::reporting::TerminalReporter;
//! use tcoder_core::transcode::FfmpegEncoder;
//! use tcoder_core::workdir::LinePrompt;
//! use tcoder_core::{RunOutcome, run};
//!
//! let config = CoreConfigBuilder::new().remote_dir("/sdcard/Movies").build();
//! let device = AdbTransfer::from_config(&config);
//! let encoder = FfmpegEncoder::from_config(&config);
//! let mut prompt = LinePrompt::stdio();
//!
//! match run(&config, &device, &encoder, &mut prompt, &TerminalReporter::new()) {
//!     Ok(RunOutcome::Completed(summary)) => println!("{} files", summary.results.len()),
//!     Ok(_) => {}
//!     Err(e) => std::process::exit(e.exit_code().into()),
//! }
//! ```

pub mod config;
pub mod device;
pub mod discovery;
pub mod error;
pub mod external;
pub mod rename;
pub mod reporting;
pub mod transcode;
pub mod utils;
pub mod workdir;
pub mod workflow;

// Re-exports for public API
pub use config::{ClearTiming, CoreConfig, CoreConfigBuilder};
pub use device::{AdbTransfer, DeviceTransfer};
pub use discovery::find_videos;
pub use error::{CoreError, CoreResult};
pub use external::ChildStdout;
pub use rename::derive_label;
pub use transcode::{EncodeProfile, Encoder, FfmpegEncoder};
pub use workdir::{StagingChoice, StagingDecision, StagingPrompt};
pub use workflow::{EncodeResult, RunOutcome, RunSummary, run};
