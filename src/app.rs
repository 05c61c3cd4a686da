//! Application orchestration and command routing.
//!
//! Peels the command name off the command line, tokenizes the remaining
//! arguments, and dispatches to the matching command variant.

use crate::cli;
use crate::commands::{Command, KNOWN_COMMANDS};
use crate::logging;
use anyhow::bail;
use std::env;

/// Runs the application based on command-line arguments.
///
/// The first argument is the command name; everything after it goes through
/// the argument tokenizer and then to the command's constructor.
///
/// # Errors
/// - If no command is given or the command name is unknown
/// - If the remaining arguments cannot be parsed
/// - If logging initialization fails
/// - If command execution fails
pub fn run() -> Result<(), anyhow::Error> {
    let mut args = env::args().skip(1);

    let Some(command_name) = args.next() else {
        bail!(
            "Usage: wtview <command> [args...] (commands: {})",
            KNOWN_COMMANDS.join(", ")
        );
    };

    let parsed = cli::parse_args(args)?;
    let command = Command::from_args(&command_name, &parsed.positionals)?;

    // `logs` reads the log files themselves and skips logging setup
    match &command {
        Command::Logs(_) => {}
        _ => logging::init()?,
    }

    tracing::debug!("Dispatching command '{command_name}'");
    command.execute(&parsed.options)
}
