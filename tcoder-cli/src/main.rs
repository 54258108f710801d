//! Main entry point for the tcoder CLI application.
//!
//! Parses arguments, sets up logging, picks a reporter and runs the workflow
//! once. The process exit code comes from `CoreError::exit_code`; quitting at
//! the staging prompt and finding no videos both exit successfully.

use tcoder_cli::error::suggestion_for;
use tcoder_cli::logging::{level_for, setup_logging};
use tcoder_cli::{parse_cli, run_transcode};
use tcoder_core::CoreError;
use tcoder_core::reporting::{JsonReporter, Reporter, ReporterError, TerminalReporter};

use std::process::ExitCode;

fn report_failure(reporter: &dyn Reporter, error: &CoreError) -> ExitCode {
    log::error!("{}", error);
    reporter.error(&ReporterError {
        title: "Run failed".to_string(),
        message: error.to_string(),
        suggestion: suggestion_for(error),
    });
    ExitCode::from(error.exit_code())
}

fn main() -> ExitCode {
    let cli_args = parse_cli();

    let reporter: Box<dyn Reporter> = if cli_args.progress_json {
        Box::new(JsonReporter::new())
    } else {
        Box::new(TerminalReporter::new())
    };

    let log_dir = (!cli_args.no_log).then(|| cli_args.effective_log_dir());
    match setup_logging(level_for(cli_args.verbose), log_dir.as_deref()) {
        Ok(Some(path)) => log::debug!("Writing run log to {}", path.display()),
        Ok(None) => {}
        Err(e) => return report_failure(reporter.as_ref(), &e),
    }

    match run_transcode(&cli_args, reporter.as_ref()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => report_failure(reporter.as_ref(), &e),
    }
}
