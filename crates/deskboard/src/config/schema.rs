//! TOML configuration schema types for deskboard.
//!
//! All structs derive `Deserialize` and `Serialize` with sensible defaults via
//! `#[serde(default)]`, so a partial (or empty) file is always valid.
//!
//! Duration fields use human-readable strings (e.g. `"250ms"`, `"2s"`,
//! `"24h"`) parsed by the `humantime` crate through the accessor methods.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration encompassing all sections.
///
/// Corresponds to the full TOML file structure:
/// ```toml
/// [storage]
/// [tui]
/// [log]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where board state is persisted.
    pub storage: StorageConfig,
    /// TUI behavior settings.
    pub tui: TuiConfig,
    /// Logging settings.
    pub log: LogConfig,
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Persistence settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding `widgetsLayout.json`, `todos.json` and `memos.json`.
    /// Empty string means the platform data directory.
    pub data_dir: String,
}

impl StorageConfig {
    /// Resolves `data_dir`, expanding `~` and falling back to [`xdg::data_dir`].
    pub fn resolved_data_dir(&self) -> PathBuf {
        if self.data_dir.trim().is_empty() {
            xdg::data_dir()
        } else {
            xdg::expand_tilde(self.data_dir.trim())
        }
    }
}

// ---------------------------------------------------------------------------
// TUI
// ---------------------------------------------------------------------------

/// TUI timing configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TuiConfig {
    /// Render tick rate as a human-readable duration (e.g. `"250ms"`).
    pub tick_rate: String,
    /// How long a warning stays in the status line.
    pub toast_duration: String,
    /// Window ahead of a deadline in which an open to-do counts as due soon.
    pub due_soon: String,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate: "250ms".to_string(),
            toast_duration: "2s".to_string(),
            due_soon: "24h".to_string(),
        }
    }
}

impl TuiConfig {
    /// Parsed `tick_rate`.
    pub fn tick_rate(&self) -> Result<Duration, ConfigError> {
        parse_duration("tui.tick_rate", &self.tick_rate)
    }

    /// Parsed `toast_duration`.
    pub fn toast_duration(&self) -> Result<Duration, ConfigError> {
        parse_duration("tui.toast_duration", &self.toast_duration)
    }

    /// Parsed `due_soon`.
    pub fn due_soon(&self) -> Result<Duration, ConfigError> {
        parse_duration("tui.due_soon", &self.due_soon)
    }
}

// ---------------------------------------------------------------------------
// Log
// ---------------------------------------------------------------------------

/// Logging configuration from the `[log]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Logging verbosity. Overridden by `DESKBOARD_LOG`.
    pub level: LogLevel,
    /// Path to log file. Empty string means stderr for CLI commands and
    /// `<data dir>/deskboard.log` for the TUI.
    pub file: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            file: String::new(),
        }
    }
}

impl LogConfig {
    /// Configured log file, if any, with `~` expanded.
    pub fn file_path(&self) -> Option<PathBuf> {
        let trimmed = self.file.trim();
        (!trimmed.is_empty()).then(|| xdg::expand_tilde(trimmed))
    }
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// The `EnvFilter` directive for this level.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn parse_duration(field: &'static str, value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value.trim()).map_err(|e| ConfigError::InvalidDuration {
        field,
        value: value.to_string(),
        message: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
