//! Episode renaming.
//!
//! Output files are named after the episode number found in the source file
//! name (`第12集` → `12`). Names without a recognisable marker are kept as-is
//! so unrelated files are not collapsed onto a single generic name.

use regex::Regex;
use std::sync::LazyLock;

/// Episode marker: 第, an integer, 集, with optional whitespace around the integer.
static EPISODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"第\s*(\d+)\s*集").expect("episode pattern is valid"));

/// Derives the output base name for a source file stem.
///
/// The episode integer is zero-padded to two digits; wider numbers keep all
/// their digits. Without a match, or when the digit run does not fit a `u64`,
/// the input is returned unchanged.
///
/// ```rust
/// use tcoder_core::rename::derive_label;
///
/// assert_eq!(derive_label("某剧 第1集 1080p"), "01");
/// assert_eq!(derive_label("第 7 集"), "07");
/// assert_eq!(derive_label("第100集"), "100");
/// assert_eq!(derive_label("movie"), "movie");
/// ```
#[must_use]
pub fn derive_label(original_base_name: &str) -> String {
    let episode = EPISODE_RE
        .captures(original_base_name)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse::<u64>().ok());

    match episode {
        Some(number) => format!("{number:02}"),
        None => {
            log::debug!("No episode marker in '{}', keeping name", original_base_name);
            original_base_name.to_string()
        }
    }
}

/// File name for a transcoded output: `<label>.<extension>`.
#[must_use]
pub fn output_file_name(label: &str, extension: &str) -> String {
    format!("{}.{}", label, extension)
}
