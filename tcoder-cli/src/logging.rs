// ============================================================================
// tcoder-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: console and run-log dispatch
//
// Console records go to stderr so stdout stays free for the reporter (and
// for JSON progress events). The run log file gets every record at the same
// level with a timestamp prefix.

use crate::error::{CliErrorContext, CliResult};

use console::style;
use log::LevelFilter;
use tcoder_core::CoreError;
use std::path::{Path, PathBuf};

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
///
/// # Example
/// ```
/// let log_filename = format!("tcoder_run_{}.log", tcoder_cli::logging::get_timestamp());
/// assert!(log_filename.starts_with("tcoder_run_"));
/// ```
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Log level for the run: Debug with `--verbose`, otherwise Info.
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// File name of the run log for a given timestamp.
pub fn run_log_file_name(timestamp: &str) -> String {
    format!("tcoder_run_{}.log", timestamp)
}

fn styled_level(level: log::Level) -> String {
    match level {
        log::Level::Error => style("ERROR").red().bold().to_string(),
        log::Level::Warn => style("WARN").yellow().bold().to_string(),
        log::Level::Info => style("INFO").cyan().to_string(),
        log::Level::Debug => style("DEBUG").magenta().to_string(),
        log::Level::Trace => style("TRACE").dim().to_string(),
    }
}

/// Installs the global logger.
///
/// When `log_dir` is given, the directory is created and a timestamped run
/// log is written there; its path is returned.
pub fn setup_logging(level: LevelFilter, log_dir: Option<&Path>) -> CliResult<Option<PathBuf>> {
    let console = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", styled_level(record.level()), message))
        })
        .chain(std::io::stderr());

    let mut dispatch = fern::Dispatch::new().level(level).chain(console);

    let mut log_path = None;
    if let Some(dir) = log_dir {
        std::fs::create_dir_all(dir)
            .cli_with_context(|| format!("Failed to create log directory {}", dir.display()))?;

        let path = dir.join(run_log_file_name(&get_timestamp()));
        let file = fern::log_file(&path)
            .cli_with_context(|| format!("Failed to open log file {}", path.display()))?;

        let file_dispatch = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "{} [{}] {}",
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                    record.level(),
                    message
                ))
            })
            .chain(file);
        dispatch = dispatch.chain(file_dispatch);
        log_path = Some(path);
    }

    dispatch
        .apply()
        .map_err(|e| CoreError::OperationFailed(format!("Failed to set up logging: {}", e)))?;

    Ok(log_path)
}
