// tcoder-core/tests/workflow_success_tests.rs

mod common;

use common::{
    DeviceCall, MockDevice, MockEncoder, ScriptedPrompt, create_dummy_file, file_names,
    test_config,
};
use std::fs;
use tcoder_core::config::ClearTiming;
use tcoder_core::reporting::NullReporter;
use tcoder_core::{RunOutcome, StagingChoice, run};
use tempfile::tempdir;

#[test]
fn test_full_run_renames_and_replaces_remote() -> Result<(), Box<dyn std::error::Error>> {
    let work = tempdir()?;
    let config = test_config(work.path(), ClearTiming::BeforeTranscode);
    let device = MockDevice::with_files(&["movie.mp4", "第2集.mkv"]);
    let encoder = MockEncoder::new();
    let mut prompt = ScriptedPrompt::silent();

    let outcome = run(&config, &device, &encoder, &mut prompt, &NullReporter)?;

    let summary = match outcome {
        RunOutcome::Completed(summary) => summary,
        other => panic!("expected a completed run, got {other:?}"),
    };
    assert!(summary.pulled);
    assert_eq!(summary.results.len(), 2);

    assert_eq!(file_names(&config.out_dir), vec!["02.mp4", "movie.mp4"]);
    assert_eq!(
        device.calls(),
        vec![
            DeviceCall::Pull,
            DeviceCall::Clear,
            DeviceCall::Push { remote_before: 0 }
        ]
    );
    assert_eq!(device.remote_files(), vec!["02.mp4", "movie.mp4"]);
    assert_eq!(
        device.remote_contents("02.mp4").as_deref(),
        Some(&b"encoded:original content"[..])
    );
    assert_eq!(prompt.times_asked(), 0);
    Ok(())
}

#[test]
fn test_keep_reuses_staging_without_pull() -> Result<(), Box<dyn std::error::Error>> {
    let work = tempdir()?;
    let config = test_config(work.path(), ClearTiming::BeforeTranscode);
    create_dummy_file(&config.pull_dir, "movie.mp4");
    create_dummy_file(&config.pull_dir, "第2集.mkv");
    let device = MockDevice::with_files(&["stale.mp4"]);
    let encoder = MockEncoder::new();
    let mut prompt = ScriptedPrompt::new(&[StagingChoice::Keep]);

    let outcome = run(&config, &device, &encoder, &mut prompt, &NullReporter)?;

    match outcome {
        RunOutcome::Completed(summary) => assert!(!summary.pulled),
        other => panic!("expected a completed run, got {other:?}"),
    }
    assert_eq!(prompt.times_asked(), 1);
    assert_eq!(
        device.calls(),
        vec![DeviceCall::Clear, DeviceCall::Push { remote_before: 0 }]
    );
    assert_eq!(device.remote_files(), vec!["02.mp4", "movie.mp4"]);
    // Kept staging content is left in place.
    assert_eq!(file_names(&config.pull_dir), vec!["movie.mp4", "第2集.mkv"]);
    Ok(())
}

#[test]
fn test_clear_discards_stale_staging() -> Result<(), Box<dyn std::error::Error>> {
    let work = tempdir()?;
    let config = test_config(work.path(), ClearTiming::BeforeTranscode);
    create_dummy_file(&config.pull_dir, "leftover 第9集.mkv");
    let device = MockDevice::with_files(&["第1集.mp4"]);
    let encoder = MockEncoder::new();
    let mut prompt = ScriptedPrompt::new(&[StagingChoice::Clear]);

    run(&config, &device, &encoder, &mut prompt, &NullReporter)?;

    assert_eq!(file_names(&config.pull_dir), vec!["第1集.mp4"]);
    assert_eq!(file_names(&config.out_dir), vec!["01.mp4"]);
    assert_eq!(encoder.calls().len(), 1);
    Ok(())
}

#[test]
fn test_quit_leaves_everything_untouched() -> Result<(), Box<dyn std::error::Error>> {
    let work = tempdir()?;
    let config = test_config(work.path(), ClearTiming::BeforeTranscode);
    create_dummy_file(&config.pull_dir, "movie.mp4");
    create_dummy_file(&config.out_dir, "previous.mp4");
    let device = MockDevice::with_files(&["remote.mp4"]);
    let encoder = MockEncoder::new();
    let mut prompt = ScriptedPrompt::new(&[StagingChoice::Quit]);

    let outcome = run(&config, &device, &encoder, &mut prompt, &NullReporter)?;

    assert!(matches!(outcome, RunOutcome::Quit));
    assert!(device.calls().is_empty());
    assert!(encoder.calls().is_empty());
    assert_eq!(file_names(&config.pull_dir), vec!["movie.mp4"]);
    assert_eq!(file_names(&config.out_dir), vec!["previous.mp4"]);
    assert_eq!(device.remote_files(), vec!["remote.mp4"]);
    Ok(())
}

#[test]
fn test_no_videos_never_clears_remote() -> Result<(), Box<dyn std::error::Error>> {
    let work = tempdir()?;
    let config = test_config(work.path(), ClearTiming::BeforeTranscode);
    let device = MockDevice::with_files(&["notes.txt", "cover.jpg"]);
    let encoder = MockEncoder::new();
    let mut prompt = ScriptedPrompt::silent();

    let outcome = run(&config, &device, &encoder, &mut prompt, &NullReporter)?;

    assert!(matches!(outcome, RunOutcome::NoVideos));
    assert_eq!(device.calls(), vec![DeviceCall::Pull]);
    assert_eq!(device.remote_files(), vec!["cover.jpg", "notes.txt"]);
    assert!(encoder.calls().is_empty());
    // The output directory is still reset for the run.
    assert!(config.out_dir.is_dir());
    Ok(())
}

#[test]
fn test_output_directory_is_recreated_empty() -> Result<(), Box<dyn std::error::Error>> {
    let work = tempdir()?;
    let config = test_config(work.path(), ClearTiming::BeforeTranscode);
    create_dummy_file(&config.out_dir, "from-last-run.mp4");
    let device = MockDevice::with_files(&["第3集.avi", "readme.txt"]);
    let encoder = MockEncoder::new();
    let mut prompt = ScriptedPrompt::silent();

    run(&config, &device, &encoder, &mut prompt, &NullReporter)?;

    assert_eq!(file_names(&config.out_dir), vec!["03.mp4"]);
    // Non-video files are neither transcoded nor pushed back.
    assert_eq!(device.remote_files(), vec!["03.mp4"]);
    Ok(())
}

#[test]
fn test_deferred_clear_happens_after_transcoding() -> Result<(), Box<dyn std::error::Error>> {
    let work = tempdir()?;
    let config = test_config(work.path(), ClearTiming::AfterTranscode);
    let device = MockDevice::with_files(&["movie.mp4", "第2集.mkv"]);
    let encoder = MockEncoder::new();
    let mut prompt = ScriptedPrompt::silent();

    run(&config, &device, &encoder, &mut prompt, &NullReporter)?;

    assert_eq!(
        device.calls(),
        vec![
            DeviceCall::Pull,
            DeviceCall::Clear,
            DeviceCall::Push { remote_before: 0 }
        ]
    );
    assert_eq!(device.remote_files(), vec!["02.mp4", "movie.mp4"]);
    Ok(())
}

#[test]
fn test_inputs_are_transcoded_in_name_order() -> Result<(), Box<dyn std::error::Error>> {
    let work = tempdir()?;
    let config = test_config(work.path(), ClearTiming::BeforeTranscode);
    let device = MockDevice::with_files(&["b.mkv", "a.MOV", "c.mp4"]);
    let encoder = MockEncoder::new();
    let mut prompt = ScriptedPrompt::silent();

    run(&config, &device, &encoder, &mut prompt, &NullReporter)?;

    let outputs: Vec<_> = encoder
        .calls()
        .into_iter()
        .map(|(_, output)| output.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(outputs, vec!["a.mp4", "b.mp4", "c.mp4"]);
    assert!(fs::metadata(config.out_dir.join("a.mp4"))?.len() > 0);
    Ok(())
}
