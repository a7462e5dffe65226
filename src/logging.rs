//! tracing subscriber setup
//!
//! Filter comes from `EVENTEASE_LOG` (default `warn`). CLI commands log to
//! stderr; the TUI logs to `~/.eventease-admin/admin.log` so records never
//! land on the alternate screen.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::app_dir;
use crate::types::Result;

pub const LOG_ENV: &str = "EVENTEASE_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";
const LOG_FILENAME: &str = "admin.log";

/// Where log records go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(target: LogTarget) -> Result<()> {
    match target {
        LogTarget::Stderr => {
            let _ = fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init();
        }
        LogTarget::File => init_file(&app_dir()?.join(LOG_FILENAME))?,
    }
    Ok(())
}

fn init_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_file_creates_log() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs").join(LOG_FILENAME);
        init_file(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_repeated_init_is_harmless() {
        init(LogTarget::Stderr).unwrap();
        init(LogTarget::Stderr).unwrap();
    }
}
