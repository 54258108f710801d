// tcoder-core/tests/common/mod.rs
//
// In-memory stand-ins for the device, the encoder and the operator.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tcoder_core::config::{ClearTiming, CoreConfig, CoreConfigBuilder};
use tcoder_core::error::{CoreError, CoreResult};
use tcoder_core::{DeviceTransfer, Encoder, StagingChoice, StagingPrompt};

/// Remote directory used by every workflow test.
pub const REMOTE_DIR: &str = "/sdcard/shows";

/// A device call as observed by [`MockDevice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCall {
    Pull,
    Clear,
    /// Number of files the remote held when the push started.
    Push { remote_before: usize },
}

/// Device whose remote directory is a map of file name to contents.
#[derive(Default)]
pub struct MockDevice {
    remote: RefCell<BTreeMap<String, Vec<u8>>>,
    calls: RefCell<Vec<DeviceCall>>,
}

impl MockDevice {
    pub fn with_files(names: &[&str]) -> Self {
        let device = Self::default();
        for name in names {
            device
                .remote
                .borrow_mut()
                .insert(name.to_string(), b"original content".to_vec());
        }
        device
    }

    pub fn remote_files(&self) -> Vec<String> {
        self.remote.borrow().keys().cloned().collect()
    }

    pub fn remote_contents(&self, name: &str) -> Option<Vec<u8>> {
        self.remote.borrow().get(name).cloned()
    }

    pub fn calls(&self) -> Vec<DeviceCall> {
        self.calls.borrow().clone()
    }
}

impl DeviceTransfer for MockDevice {
    fn pull(&self, remote_dir: &str, local_dir: &Path) -> CoreResult<()> {
        assert_eq!(remote_dir, REMOTE_DIR);
        self.calls.borrow_mut().push(DeviceCall::Pull);
        for (name, contents) in self.remote.borrow().iter() {
            fs::write(local_dir.join(name), contents)?;
        }
        Ok(())
    }

    fn clear_remote(&self, remote_dir: &str) -> CoreResult<()> {
        assert_eq!(remote_dir, REMOTE_DIR);
        self.calls.borrow_mut().push(DeviceCall::Clear);
        self.remote.borrow_mut().clear();
        Ok(())
    }

    fn push(&self, local_dir: &Path, remote_dir: &str) -> CoreResult<()> {
        assert_eq!(remote_dir, REMOTE_DIR);
        let remote_before = self.remote.borrow().len();
        self.calls.borrow_mut().push(DeviceCall::Push { remote_before });
        for entry in fs::read_dir(local_dir)? {
            let path = entry?.path();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            self.remote.borrow_mut().insert(name, fs::read(&path)?);
        }
        Ok(())
    }
}

/// Device whose pull fails like a disconnected phone would.
pub struct UnpluggedDevice;

impl DeviceTransfer for UnpluggedDevice {
    fn pull(&self, _remote_dir: &str, _local_dir: &Path) -> CoreResult<()> {
        Err(CoreError::CommandFailed {
            program: "adb".to_string(),
            code: Some(1),
        })
    }

    fn clear_remote(&self, _remote_dir: &str) -> CoreResult<()> {
        panic!("clear_remote must not run after a failed pull");
    }

    fn push(&self, _local_dir: &Path, _remote_dir: &str) -> CoreResult<()> {
        panic!("push must not run after a failed pull");
    }
}

/// Encoder that writes a marker file, optionally failing on the n-th call.
#[derive(Default)]
pub struct MockEncoder {
    fail_on_call: Option<usize>,
    exit_code: i32,
    calls: RefCell<Vec<(PathBuf, PathBuf)>>,
}

impl MockEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the `index`-th call (0-based) with the given exit code.
    pub fn failing_on(index: usize, exit_code: i32) -> Self {
        Self {
            fail_on_call: Some(index),
            exit_code,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(PathBuf, PathBuf)> {
        self.calls.borrow().clone()
    }
}

impl Encoder for MockEncoder {
    fn transcode(&self, input: &Path, output: &Path) -> CoreResult<()> {
        let index = self.calls.borrow().len();
        self.calls
            .borrow_mut()
            .push((input.to_path_buf(), output.to_path_buf()));

        if self.fail_on_call == Some(index) {
            return Err(CoreError::CommandFailed {
                program: "ffmpeg".to_string(),
                code: Some(self.exit_code),
            });
        }

        let source = fs::read(input)?;
        let mut encoded = b"encoded:".to_vec();
        encoded.extend_from_slice(&source);
        fs::write(output, encoded)?;
        Ok(())
    }
}

/// Operator answering from a fixed script.
pub struct ScriptedPrompt {
    answers: VecDeque<StagingChoice>,
    asked: Cell<usize>,
}

impl ScriptedPrompt {
    pub fn new(answers: &[StagingChoice]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            asked: Cell::new(0),
        }
    }

    /// Prompt that must never be consulted.
    pub fn silent() -> Self {
        Self::new(&[])
    }

    pub fn times_asked(&self) -> usize {
        self.asked.get()
    }
}

impl StagingPrompt for ScriptedPrompt {
    fn choose(&mut self, dir: &Path) -> CoreResult<StagingChoice> {
        self.asked.set(self.asked.get() + 1);
        match self.answers.pop_front() {
            Some(choice) => Ok(choice),
            None => panic!("unexpected prompt for {}", dir.display()),
        }
    }
}

/// Config rooted in `work_dir` with the test remote directory.
pub fn test_config(work_dir: &Path, clear_timing: ClearTiming) -> CoreConfig {
    CoreConfigBuilder::new()
        .remote_dir(REMOTE_DIR)
        .work_dir(work_dir.to_path_buf())
        .clear_timing(clear_timing)
        .build()
}

/// Creates a file with some content and returns its path.
pub fn create_dummy_file(dir: &Path, filename: &str) -> PathBuf {
    fs::create_dir_all(dir).expect("Failed to create directory");
    let file_path = dir.join(filename);
    let mut file = File::create(&file_path).expect("Failed to create dummy file");
    file.write_all(b"dummy content")
        .expect("Failed to write dummy content");
    file_path
}

/// Sorted file names in `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read directory")
        .map(|entry| {
            entry
                .expect("Failed to read entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}
