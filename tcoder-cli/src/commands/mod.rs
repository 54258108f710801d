//! Command implementations for the CLI.

/// The pull → transcode → push run.
pub mod run;
