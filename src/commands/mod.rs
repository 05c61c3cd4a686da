//! Application commands for wtview.
//!
//! Commands form a closed union keyed by command name. Each variant owns its
//! fixed-arity construction from positional arguments and its execution
//! against the parsed option map, so new commands slot in without touching
//! dispatch logic.
//!
//! # Commands
//! - `view`: open the interactive wavetable viewer for an audio file
//! - `logs`: display recent log entries

pub mod logs;
pub mod view;

pub use logs::Logs;
pub use view::View;

use crate::cli::OptionValue;
use anyhow::bail;
use std::collections::HashMap;

/// Names of all known commands, in display order.
pub const KNOWN_COMMANDS: &[&str] = &["view", "logs"];

/// The closed set of application commands.
#[derive(Debug)]
pub enum Command {
    View(View),
    Logs(Logs),
}

impl Command {
    /// Resolves a command name and positional arguments to a command variant.
    ///
    /// # Errors
    /// - If the command name is not known
    /// - If the positional arguments do not match the variant's arity
    pub fn from_args(name: &str, positionals: &[String]) -> Result<Self, anyhow::Error> {
        match name {
            "view" => Ok(Command::View(View::from_positionals(positionals)?)),
            "logs" => Ok(Command::Logs(Logs::from_positionals(positionals)?)),
            _ => bail!(
                "Unknown command '{name}' (known commands: {})",
                KNOWN_COMMANDS.join(", ")
            ),
        }
    }

    /// Executes the command with the parsed options as named configuration.
    ///
    /// # Errors
    /// - If the command fails; all command errors are fatal
    pub fn execute(self, options: &HashMap<String, OptionValue>) -> Result<(), anyhow::Error> {
        match self {
            Command::View(view) => view.execute(options),
            Command::Logs(logs) => logs.execute(options),
        }
    }
}
