//! The pull → transcode → push workflow.
//!
//! ```text
//! START → ensure work dir → resolve staging ─(quit)→ Quit
//!       → reset output → [pull | skip] → enumerate ─(none)→ NoVideos
//!       → clear remote* → transcode each → clear remote* → push → Completed
//! ```
//!
//! `*` the remote is cleared exactly once, at the point selected by
//! [`ClearTiming`]. It always happens after local enumeration found videos
//! and before the push. Any failure aborts the run immediately and leaves
//! local and remote directories as they are.

use crate::config::{ClearTiming, CoreConfig};
use crate::device::DeviceTransfer;
use crate::discovery::find_videos;
use crate::error::CoreResult;
use crate::rename::{derive_label, output_file_name};
use crate::reporting::{FileProgressContext, Reporter, RunStartInfo};
use crate::transcode::Encoder;
use crate::utils::{display_name, file_size};
use crate::workdir::{StagingDecision, StagingPrompt, ensure_work_dir, reset_output, resolve_staging};

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Result of transcoding one file.
#[derive(Debug, Clone)]
pub struct EncodeResult {
    pub source: PathBuf,
    pub output: PathBuf,
    pub label: String,
    pub duration: Duration,
    pub input_size: u64,
    pub output_size: u64,
}

/// Everything a completed run did.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub results: Vec<EncodeResult>,
    /// False when the operator kept the existing staging content.
    pub pulled: bool,
    pub total_duration: Duration,
}

impl RunSummary {
    pub fn total_input_size(&self) -> u64 {
        self.results.iter().map(|r| r.input_size).sum()
    }

    pub fn total_output_size(&self) -> u64 {
        self.results.iter().map(|r| r.output_size).sum()
    }
}

/// How a run that did not fail ended.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// The operator chose to quit at the staging prompt.
    Quit,
    /// No video files were found locally; the remote was not touched.
    NoVideos,
    /// Every video was transcoded and pushed.
    Completed(RunSummary),
}

/// One planned transcode.
#[derive(Debug, Clone)]
struct Job {
    source: PathBuf,
    label: String,
    output: PathBuf,
}

fn plan_jobs(config: &CoreConfig, videos: Vec<PathBuf>) -> Vec<Job> {
    let mut seen = HashSet::new();
    videos
        .into_iter()
        .map(|source| {
            let stem = source
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let label = derive_label(&stem);
            let output = config
                .out_dir
                .join(output_file_name(&label, config.output_extension()));
            if !seen.insert(output.clone()) {
                log::warn!(
                    "{} maps to {} which an earlier file already uses; it will be overwritten",
                    source.display(),
                    output.display()
                );
            }
            Job {
                source,
                label,
                output,
            }
        })
        .collect()
}

/// Runs the whole workflow once.
///
/// # Errors
///
/// Returns the first failure: invalid configuration, filesystem errors,
/// a closed prompt, a missing staging directory after the pull step, or a
/// failed external command. Nothing is cleaned up or retried.
pub fn run<D, E, P>(
    config: &CoreConfig,
    device: &D,
    encoder: &E,
    prompt: &mut P,
    reporter: &dyn Reporter,
) -> CoreResult<RunOutcome>
where
    D: DeviceTransfer + ?Sized,
    E: Encoder + ?Sized,
    P: StagingPrompt + ?Sized,
{
    config.validate()?;
    let started = Instant::now();

    reporter.run_started(&RunStartInfo {
        remote_dir: config.remote_dir.clone(),
        pull_dir: config.pull_dir.display().to_string(),
        out_dir: config.out_dir.display().to_string(),
        clear_timing: config.clear_timing.as_str().to_string(),
    });

    ensure_work_dir(&config.work_dir)?;
    let decision = resolve_staging(&config.pull_dir, prompt)?;
    if decision == StagingDecision::Quit {
        reporter.operation_complete("Quit without changes");
        return Ok(RunOutcome::Quit);
    }

    reset_output(&config.out_dir)?;

    let pulled = decision == StagingDecision::PullNeeded;
    if pulled {
        reporter.stage("pull", "Pulling videos from device");
        device.pull(&config.remote_dir, &config.pull_dir)?;
    } else {
        reporter.stage("pull", "Skipping adb pull, using existing staging content");
    }

    let videos = find_videos(&config.pull_dir, &config.video_extensions)?;
    if videos.is_empty() {
        reporter.warning("No video files found");
        return Ok(RunOutcome::NoVideos);
    }

    let jobs = plan_jobs(config, videos);

    if config.clear_timing == ClearTiming::BeforeTranscode {
        reporter.warning(
            "Clearing the device directory before transcoding; a failed transcode leaves it empty",
        );
        reporter.stage("clear", &format!("Clearing {}", config.remote_dir));
        device.clear_remote(&config.remote_dir)?;
    }

    reporter.stage("transcode", &format!("Transcoding {} video(s)", jobs.len()));
    let total_files = jobs.len();
    let mut results = Vec::with_capacity(total_files);
    for (index, job) in jobs.into_iter().enumerate() {
        reporter.file_started(&FileProgressContext {
            current_file: index + 1,
            total_files,
            input_file: display_name(&job.source),
            output_file: display_name(&job.output),
        });

        let file_started = Instant::now();
        encoder.transcode(&job.source, &job.output)?;

        let result = EncodeResult {
            input_size: file_size(&job.source),
            output_size: file_size(&job.output),
            duration: file_started.elapsed(),
            source: job.source,
            output: job.output,
            label: job.label,
        };
        reporter.file_complete(&result);
        results.push(result);
    }

    if config.clear_timing == ClearTiming::AfterTranscode {
        reporter.stage("clear", &format!("Clearing {}", config.remote_dir));
        device.clear_remote(&config.remote_dir)?;
    }

    reporter.stage("push", "Pushing transcoded videos back to device");
    device.push(&config.out_dir, &config.remote_dir)?;

    let summary = RunSummary {
        results,
        pulled,
        total_duration: started.elapsed(),
    };
    reporter.run_complete(&summary);
    reporter.operation_complete("Done");

    Ok(RunOutcome::Completed(summary))
}
