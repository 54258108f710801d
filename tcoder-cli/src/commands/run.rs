//! Implementation of the single tcoder run.
//!
//! Builds the core configuration from the parsed arguments, verifies that
//! adb and ffmpeg can be started, and hands over to `tcoder_core::run` with
//! the real adb/ffmpeg adapters and a stdin prompt.

use crate::cli::Cli;
use crate::error::CliResult;

use tcoder_core::config::{CoreConfig, CoreConfigBuilder};
use tcoder_core::external::check_dependency;
use tcoder_core::reporting::Reporter;
use tcoder_core::workdir::LinePrompt;
use tcoder_core::{AdbTransfer, FfmpegEncoder, RunOutcome, StagingPrompt};

use log::{debug, info};
use std::io;

/// Creates the core configuration from CLI arguments.
pub fn create_core_config(args: &Cli) -> CliResult<CoreConfig> {
    let config = CoreConfigBuilder::new()
        .remote_dir(args.remote_dir.clone())
        .work_dir(args.work_dir.clone())
        .adb_program(args.adb.clone())
        .device_serial(args.serial.clone())
        .ffmpeg_program(args.ffmpeg.clone())
        .clear_timing(args.clear_timing())
        .build();

    config.validate()?;
    debug!("Configuration: {:?}", config);
    Ok(config)
}

/// Fails with `DependencyNotFound` when adb or ffmpeg cannot be started.
pub fn check_dependencies(config: &CoreConfig) -> CliResult<()> {
    check_dependency(&config.adb_program, "version")?;
    check_dependency(&config.ffmpeg_program, "-version")?;
    Ok(())
}

/// Runs the workflow once with the real device, encoder and operator prompt.
pub fn run_transcode(args: &Cli, reporter: &dyn Reporter) -> CliResult<RunOutcome> {
    let config = create_core_config(args)?;
    check_dependencies(&config)?;

    info!(
        "Starting run: {} <-> {}",
        config.remote_dir,
        config.work_dir.display()
    );

    let device = AdbTransfer::from_config(&config).with_child_stdout(args.child_stdout());
    let encoder = FfmpegEncoder::from_config(&config).with_child_stdout(args.child_stdout());
    // With JSON progress on stdout, the menu and tool chatter move to stderr.
    let mut prompt: Box<dyn StagingPrompt> = if args.progress_json {
        Box::new(LinePrompt::new(io::stdin().lock(), io::stderr()))
    } else {
        Box::new(LinePrompt::stdio())
    };

    let outcome = tcoder_core::run(&config, &device, &encoder, prompt.as_mut(), reporter);

    match &outcome {
        Ok(RunOutcome::Completed(summary)) => {
            info!("Run finished: {} file(s) pushed", summary.results.len())
        }
        Ok(RunOutcome::NoVideos) => info!("Run finished: no video files found"),
        Ok(RunOutcome::Quit) => info!("Run finished: quit at staging prompt"),
        Err(e) => debug!("Run failed: {}", e),
    }

    outcome
}
