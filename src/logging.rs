//! File-backed logging.
//!
//! The viewer owns the terminal while it runs, so nothing may be printed to
//! stdout or stderr; log lines go to daily-rotated files under the XDG state
//! directory instead. `RUST_LOG` selects the level (default "info"). Log
//! files untouched for a week are pruned at startup.

use anyhow::anyhow;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;

/// Prefix of every log file; the rolling appender adds the date suffix.
pub const LOG_FILE_PREFIX: &str = "wtview.log";

/// How long a log file may go untouched before startup pruning removes it.
const RETENTION: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Initializes logging to a daily-rotated file.
///
/// wtview is single-threaded and short-lived, so the rolling appender is
/// used as the writer directly; there is no background worker to flush or
/// keep alive.
///
/// # Errors
/// - If the log directory cannot be determined or created
/// - If a global subscriber is already set
pub fn init() -> Result<(), anyhow::Error> {
    let dir = log_dir()?;
    prune_old_logs(&dir);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(rolling::daily(&dir, LOG_FILE_PREFIX))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))?;

    tracing::debug!("Logging to {}", dir.display());
    Ok(())
}

/// Returns the log directory, creating it if needed.
///
/// `$XDG_STATE_HOME/wtview` when the variable is set, `~/.local/state/wtview`
/// otherwise.
///
/// # Errors
/// - If the home directory cannot be determined
/// - If the directory cannot be created
pub fn log_dir() -> Result<PathBuf, anyhow::Error> {
    let base = match std::env::var_os("XDG_STATE_HOME") {
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir()
            .ok_or_else(|| anyhow!("Could not determine home directory"))?
            .join(".local/state"),
    };

    let dir = base.join("wtview");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Removes log files whose modification time is older than [`RETENTION`].
///
/// Pruning is best-effort: a file that cannot be inspected or removed is
/// left alone, and a missing directory is not an error.
fn prune_old_logs(dir: &Path) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        let is_log_file = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(LOG_FILE_PREFIX));
        if !is_log_file {
            continue;
        }

        let stale = fs::metadata(&path)
            .and_then(|m| m.modified())
            .ok()
            .and_then(|t| t.elapsed().ok())
            .is_some_and(|age| age > RETENTION);
        if stale {
            let _ = fs::remove_file(&path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prune_keeps_fresh_files() {
        let dir = std::env::temp_dir().join("wtview_test_prune");
        fs::create_dir_all(&dir).unwrap();
        let fresh = dir.join(format!("{LOG_FILE_PREFIX}.2026-08-23"));
        let unrelated = dir.join("notes.txt");
        fs::write(&fresh, "entry").unwrap();
        fs::write(&unrelated, "keep").unwrap();

        prune_old_logs(&dir);

        assert!(fresh.exists());
        assert!(unrelated.exists());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_prune_missing_directory_is_a_no_op() {
        prune_old_logs(Path::new("/nonexistent/wtview_logs"));
    }
}
