//! Run reporting.
//!
//! The workflow describes what it is doing through a [`Reporter`]. The CLI
//! picks [`TerminalReporter`] for people and [`JsonReporter`] for scripts
//! (one JSON object per line on stdout).

use crate::utils::{display_name, format_bytes, format_duration};
use crate::workflow::{EncodeResult, RunSummary};

use console::style;
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Paths and settings the run starts with.
#[derive(Clone, Debug)]
pub struct RunStartInfo {
    pub remote_dir: String,
    pub pull_dir: String,
    pub out_dir: String,
    pub clear_timing: String,
}

/// Position of the current file within the run.
#[derive(Clone, Debug)]
pub struct FileProgressContext {
    pub current_file: usize,
    pub total_files: usize,
    pub input_file: String,
    pub output_file: String,
}

/// High-level warning/error message.
#[derive(Clone, Debug)]
pub struct ReporterError {
    pub title: String,
    pub message: String,
    pub suggestion: Option<String>,
}

/// Reporter interface implemented by both human-readable and JSON reporters.
pub trait Reporter {
    fn run_started(&self, _info: &RunStartInfo) {}
    fn stage(&self, _stage: &str, _message: &str) {}
    fn file_started(&self, _context: &FileProgressContext) {}
    fn file_complete(&self, _result: &EncodeResult) {}
    fn warning(&self, _message: &str) {}
    fn error(&self, _error: &ReporterError) {}
    fn operation_complete(&self, _message: &str) {}
    fn run_complete(&self, _summary: &RunSummary) {}
}

/// No-op reporter that discards all updates.
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Human-friendly reporter that prints concise text output.
pub struct TerminalReporter {
    last_stage: Mutex<Option<String>>,
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self {
            last_stage: Mutex::new(None),
        }
    }
}

impl Reporter for TerminalReporter {
    fn run_started(&self, info: &RunStartInfo) {
        println!("\n{}", style("TCODER").bold().cyan());
        println!("  {:<8} {}", style("Device:").bold(), info.remote_dir);
        println!("  {:<8} {}", style("Pull:").bold(), info.pull_dir);
        println!("  {:<8} {}", style("Output:").bold(), info.out_dir);
        println!("  {:<8} {}", style("Clear:").bold(), info.clear_timing);
    }

    fn stage(&self, stage: &str, message: &str) {
        if let Ok(mut last) = self.last_stage.lock() {
            if last.as_deref() != Some(stage) {
                println!("\n{}", style(stage.to_uppercase()).bold().cyan());
                *last = Some(stage.to_string());
            }
        }
        println!("  {}{}", style("› ").magenta(), message);
    }

    fn file_started(&self, context: &FileProgressContext) {
        println!(
            "\nFile {} of {}: {} {} {}",
            style(context.current_file.to_string()).bold(),
            context.total_files,
            context.input_file,
            style("→").dim(),
            style(&context.output_file).bold()
        );
    }

    fn file_complete(&self, result: &EncodeResult) {
        println!(
            "  {} {} ({} -> {}, {})",
            style("✓").green(),
            display_name(&result.output),
            format_bytes(result.input_size),
            format_bytes(result.output_size),
            format_duration(result.duration.as_secs_f64())
        );
    }

    fn warning(&self, message: &str) {
        println!("\n{}", style(format!("WARN: {}", message)).yellow().bold());
    }

    fn error(&self, error: &ReporterError) {
        eprintln!(
            "\n{} {}",
            style("ERROR").red().bold(),
            style(&error.title).red().bold()
        );
        eprintln!("  {}", error.message);
        if let Some(suggestion) = &error.suggestion {
            eprintln!("  Suggestion: {}", suggestion);
        }
    }

    fn operation_complete(&self, message: &str) {
        println!("\n{} {}", style("✓").green().bold(), style(message).bold());
    }

    fn run_complete(&self, summary: &RunSummary) {
        println!("\n{}", style("SUMMARY").bold().cyan());
        println!(
            "  {}",
            style(format!(
                "{} file(s) transcoded{}",
                summary.results.len(),
                if summary.pulled { "" } else { " (pull skipped)" }
            ))
            .bold()
        );
        println!(
            "  Size: {} -> {}",
            format_bytes(summary.total_input_size()),
            format_bytes(summary.total_output_size())
        );
        println!(
            "  Time: {}",
            format_duration(summary.total_duration.as_secs_f64())
        );
        for result in &summary.results {
            println!(
                "  - {} -> {}",
                display_name(&result.source),
                display_name(&result.output)
            );
        }
    }
}

/// Newline-delimited JSON event.
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum JsonEvent<'a> {
    RunStarted {
        remote_dir: &'a str,
        pull_dir: &'a str,
        out_dir: &'a str,
        clear_timing: &'a str,
    },
    Stage {
        stage: &'a str,
        message: &'a str,
    },
    FileStarted {
        current_file: usize,
        total_files: usize,
        input_file: &'a str,
        output_file: &'a str,
    },
    FileComplete {
        input_file: String,
        output_file: String,
        label: &'a str,
        input_size: u64,
        output_size: u64,
        duration_seconds: f64,
    },
    Warning {
        message: &'a str,
    },
    Error {
        title: &'a str,
        message: &'a str,
        suggestion: Option<&'a str>,
    },
    OperationComplete {
        message: &'a str,
    },
    RunComplete {
        files: usize,
        pulled: bool,
        total_input_size: u64,
        total_output_size: u64,
        duration_seconds: f64,
    },
}

/// Machine-readable reporter writing one JSON object per line.
pub struct JsonReporter {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReporter {
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    fn timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }

    fn write_event(&self, event: JsonEvent<'_>) {
        let mut value = match serde_json::to_value(&event) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Failed to serialize progress event: {}", e);
                return;
            }
        };
        if let Some(object) = value.as_object_mut() {
            object.insert("timestamp".to_string(), Self::timestamp().into());
        }
        if let Ok(mut writer) = self.writer.lock() {
            if let Err(e) = writeln!(writer, "{}", value).and_then(|()| writer.flush()) {
                log::warn!("Failed to write progress event: {}", e);
            }
        }
    }
}

impl Reporter for JsonReporter {
    fn run_started(&self, info: &RunStartInfo) {
        self.write_event(JsonEvent::RunStarted {
            remote_dir: &info.remote_dir,
            pull_dir: &info.pull_dir,
            out_dir: &info.out_dir,
            clear_timing: &info.clear_timing,
        });
    }

    fn stage(&self, stage: &str, message: &str) {
        self.write_event(JsonEvent::Stage { stage, message });
    }

    fn file_started(&self, context: &FileProgressContext) {
        self.write_event(JsonEvent::FileStarted {
            current_file: context.current_file,
            total_files: context.total_files,
            input_file: &context.input_file,
            output_file: &context.output_file,
        });
    }

    fn file_complete(&self, result: &EncodeResult) {
        self.write_event(JsonEvent::FileComplete {
            input_file: result.source.display().to_string(),
            output_file: result.output.display().to_string(),
            label: &result.label,
            input_size: result.input_size,
            output_size: result.output_size,
            duration_seconds: result.duration.as_secs_f64(),
        });
    }

    fn warning(&self, message: &str) {
        self.write_event(JsonEvent::Warning { message });
    }

    fn error(&self, error: &ReporterError) {
        self.write_event(JsonEvent::Error {
            title: &error.title,
            message: &error.message,
            suggestion: error.suggestion.as_deref(),
        });
    }

    fn operation_complete(&self, message: &str) {
        self.write_event(JsonEvent::OperationComplete { message });
    }

    fn run_complete(&self, summary: &RunSummary) {
        self.write_event(JsonEvent::RunComplete {
            files: summary.results.len(),
            pulled: summary.pulled,
            total_input_size: summary.total_input_size(),
            total_output_size: summary.total_output_size(),
            duration_seconds: summary.total_duration.as_secs_f64(),
        });
    }
}
