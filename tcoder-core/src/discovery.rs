//! File discovery module for finding video files to process.
//!
//! Searches the top level of the staging directory for files whose
//! extension (case-insensitive) is one of the configured video extensions.

use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};

/// Returns true when `path` is a regular file with a recognised extension.
#[must_use]
pub fn is_video_file(path: &Path, extensions: &[String]) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|known| known.eq_ignore_ascii_case(ext)))
}

/// Finds video files in the top level of `input_dir`, sorted by file name.
///
/// An empty result is not an error; the workflow treats it as "nothing to do".
///
/// # Errors
///
/// * `CoreError::StagingMissing` - `input_dir` does not exist
/// * `CoreError::Io` - the directory could not be read
pub fn find_videos(input_dir: &Path, extensions: &[String]) -> CoreResult<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        return Err(CoreError::StagingMissing(input_dir.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = Vec::new();
    let mut skipped_count = 0;

    for entry in std::fs::read_dir(input_dir)? {
        let path = entry?.path();
        if is_video_file(&path, extensions) {
            files.push(path);
        } else {
            skipped_count += 1;
        }
    }

    if skipped_count > 0 {
        log::debug!(
            "Skipped {} non-video entries in {}",
            skipped_count,
            input_dir.display()
        );
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    log::info!("Found {} video files in {}", files.len(), input_dir.display());
    for file in &files {
        log::debug!("  {}", file.display());
    }

    Ok(files)
}
