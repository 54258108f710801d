//! Staging and output directory management.
//!
//! The staging directory (`pull`) may survive between runs; when it is not
//! empty the operator decides whether to clear it, reuse it, or stop. The
//! output directory (`out`) belongs to the current run and is always
//! recreated empty.

use crate::error::{CoreError, CoreResult};

use console::style;
use std::fmt;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::str::FromStr;

/// What the workflow should do after the staging directory is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagingDecision {
    /// Staging is empty; fetch from the device.
    PullNeeded,
    /// Staging content is reused; skip the device pull.
    PullNotNeeded,
    /// The operator chose to stop. The run ends successfully without side effects.
    Quit,
}

/// Operator answer for a non-empty staging directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagingChoice {
    Clear,
    Keep,
    Quit,
}

impl FromStr for StagingChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" => Ok(StagingChoice::Clear),
            "k" => Ok(StagingChoice::Keep),
            "q" => Ok(StagingChoice::Quit),
            other => Err(format!("unrecognised choice '{other}'")),
        }
    }
}

impl fmt::Display for StagingChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            StagingChoice::Clear => "c",
            StagingChoice::Keep => "k",
            StagingChoice::Quit => "q",
        };
        f.write_str(key)
    }
}

/// Asks the operator what to do with a non-empty staging directory.
pub trait StagingPrompt {
    /// Blocks until a valid choice is made.
    fn choose(&mut self, dir: &Path) -> CoreResult<StagingChoice>;
}

/// Line-based prompt over any reader/writer pair.
///
/// Invalid answers re-prompt. End of input is an error, since no answer can
/// ever arrive.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn print_menu(&mut self, dir: &Path) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(
            self.output,
            "{}",
            style(format!("Directory {} already exists and is not empty:", dir.display())).bold()
        )?;
        writeln!(self.output, "  c = clear it and pull again")?;
        writeln!(self.output, "  k = keep existing content (skip adb pull)")?;
        writeln!(self.output, "  q = quit")
    }
}

impl LinePrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> StagingPrompt for LinePrompt<R, W> {
    fn choose(&mut self, dir: &Path) -> CoreResult<StagingChoice> {
        self.print_menu(dir)?;

        loop {
            write!(self.output, "Choose [c/k/q]: ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(CoreError::PromptClosed);
            }

            match line.parse::<StagingChoice>() {
                Ok(choice) => {
                    log::debug!("Operator chose '{}' for {}", choice, dir.display());
                    return Ok(choice);
                }
                Err(reason) => log::debug!("Re-prompting: {}", reason),
            }
        }
    }
}

/// Returns true when `path` is a directory without entries.
pub fn is_dir_empty(path: &Path) -> CoreResult<bool> {
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Creates the work root (and parents) if missing.
pub fn ensure_work_dir(path: &Path) -> CoreResult<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Ensures the staging directory exists and decides whether a pull is needed.
///
/// The prompt is consulted only when the directory already holds entries.
pub fn resolve_staging<P>(path: &Path, prompt: &mut P) -> CoreResult<StagingDecision>
where
    P: StagingPrompt + ?Sized,
{
    if !path.exists() {
        log::debug!("Creating staging directory {}", path.display());
        fs::create_dir_all(path)?;
        return Ok(StagingDecision::PullNeeded);
    }

    if is_dir_empty(path)? {
        return Ok(StagingDecision::PullNeeded);
    }

    match prompt.choose(path)? {
        StagingChoice::Clear => {
            log::info!("Clearing staging directory {}", path.display());
            fs::remove_dir_all(path)?;
            fs::create_dir_all(path)?;
            Ok(StagingDecision::PullNeeded)
        }
        StagingChoice::Keep => {
            log::info!("Using existing content of {}, skipping adb pull", path.display());
            Ok(StagingDecision::PullNotNeeded)
        }
        StagingChoice::Quit => {
            log::info!("Quit requested");
            Ok(StagingDecision::Quit)
        }
    }
}

/// Deletes `path` if present and recreates it empty.
pub fn reset_output(path: &Path) -> CoreResult<()> {
    if path.exists() {
        log::debug!("Removing previous output directory {}", path.display());
        fs::remove_dir_all(path)?;
    }
    fs::create_dir_all(path)?;
    Ok(())
}
