//! Display recent log entries from the application.
//!
//! wtview logs to files only (the TUI owns the terminal), so this is the
//! troubleshooting window into what the tool did.

use crate::cli::OptionValue;
use crate::logging;
use anyhow::{anyhow, bail};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_LINES: usize = 50;

/// The `logs` command. Takes no arguments.
#[derive(Debug)]
pub struct Logs;

impl Logs {
    /// Constructs the command from positional arguments.
    ///
    /// # Errors
    /// - If any positional arguments are given
    pub fn from_positionals(positionals: &[String]) -> Result<Self, anyhow::Error> {
        if !positionals.is_empty() {
            bail!("'logs' takes no arguments (got {})", positionals.len());
        }
        Ok(Logs)
    }

    /// Shows the most recent log entries from the latest log file.
    ///
    /// # Errors
    /// - If the log directory cannot be determined
    /// - If log files cannot be read
    pub fn execute(self, _options: &HashMap<String, OptionValue>) -> Result<(), anyhow::Error> {
        let log_dir = logging::log_dir()?;

        let Some(log_file) = find_latest_log(&log_dir)? else {
            println!("No log files found in: {}", log_dir.display());
            println!("Run 'wtview view <file> <n_frames>' to generate logs.");
            return Ok(());
        };

        let content = fs::read_to_string(&log_file)
            .map_err(|e| anyhow!("Failed to read log file: {e}"))?;

        if content.is_empty() {
            println!("Log file is empty: {}", log_file.display());
            return Ok(());
        }

        let lines: Vec<&str> = content.lines().collect();
        let start_index = lines.len().saturating_sub(DEFAULT_LINES);

        if start_index > 0 {
            println!("Showing last {} of {} lines:", DEFAULT_LINES, lines.len());
        } else {
            println!("Showing all {} lines:", lines.len());
        }
        println!("Full log file at: {}", log_file.display());
        println!();

        for line in &lines[start_index..] {
            println!("{line}");
        }

        Ok(())
    }
}

/// Finds the most recently modified log file in the directory, if any.
fn find_latest_log(log_dir: &Path) -> Result<Option<PathBuf>, anyhow::Error> {
    let entries = fs::read_dir(log_dir)
        .map_err(|e| anyhow!("Failed to read log directory: {e}"))?;

    let mut latest: Option<(PathBuf, std::time::SystemTime)> = None;

    for entry in entries {
        let entry = entry.map_err(|e| anyhow!("Failed to read directory entry: {e}"))?;
        let path = entry.path();

        if !path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(logging::LOG_FILE_PREFIX))
        {
            continue;
        }

        if let Ok(metadata) = fs::metadata(&path) {
            if let Ok(modified) = metadata.modified() {
                let newer = latest
                    .as_ref()
                    .map_or(true, |(_, latest_time)| modified > *latest_time);
                if newer {
                    latest = Some((path, modified));
                }
            }
        }
    }

    Ok(latest.map(|(path, _)| path))
}
