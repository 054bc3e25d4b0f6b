//! Logging initialization for deskboard.
//!
//! Configures the `tracing` subscriber with level filtering via the
//! `DESKBOARD_LOG` environment variable. Falls back to the configured
//! `[log] level` when the variable is unset or invalid.
//!
//! # Usage
//!
//! ```bash
//! # Default (level from config, `info` out of the box)
//! deskboard todo list
//!
//! # Debug level
//! DESKBOARD_LOG=debug deskboard layout move memo left
//!
//! # Module-specific filtering
//! DESKBOARD_LOG=deskboard::layout=debug,warn deskboard tui
//! ```

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::LogLevel;
use crate::config::xdg;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "DESKBOARD_LOG";

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    /// Standard error. Used by one-shot CLI commands.
    Stderr,
    /// Append to a file. Used by the TUI so the alternate screen stays clean.
    File(&'a Path),
}

/// Builds the filter from `DESKBOARD_LOG`, falling back to `fallback`.
pub fn build_filter(fallback: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback.as_directive()))
}

/// Initialize the tracing subscriber.
///
/// Installing a second global subscriber is a no-op, so tests and repeated
/// calls are harmless. Fails only when the log file cannot be opened.
pub fn init(level: LogLevel, target: LogTarget<'_>) -> std::io::Result<()> {
    let filter = build_filter(level);
    match target {
        LogTarget::Stderr => {
            let _ = fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            let _ = fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
    }
    Ok(())
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        xdg::ensure_dir(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn env_filter_parses_valid_directives() {
        let directives = ["info", "debug", "warn", "error", "trace"];
        for d in directives {
            let filter = EnvFilter::try_new(d);
            assert!(filter.is_ok(), "failed to parse directive: {}", d);
        }
    }

    #[test]
    fn env_filter_parses_module_directive() {
        let filter = EnvFilter::try_new("deskboard::layout=debug,warn");
        assert!(filter.is_ok());
    }

    #[test]
    #[serial]
    fn build_filter_uses_fallback_without_env() {
        let original = std::env::var(LOG_ENV).ok();
        std::env::remove_var(LOG_ENV);
        let filter = build_filter(LogLevel::Warn);
        assert_eq!(filter.to_string(), "warn");
        if let Some(v) = original {
            std::env::set_var(LOG_ENV, v);
        }
    }

    #[test]
    #[serial]
    fn build_filter_prefers_env() {
        let original = std::env::var(LOG_ENV).ok();
        std::env::set_var(LOG_ENV, "debug");
        let filter = build_filter(LogLevel::Error);
        assert_eq!(filter.to_string(), "debug");
        match original {
            Some(v) => std::env::set_var(LOG_ENV, v),
            None => std::env::remove_var(LOG_ENV),
        }
    }

    #[test]
    fn open_log_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("nested/logs/deskboard.log");
        open_log_file(&path).expect("should open");
        assert!(path.exists());
    }
}
