//! Default configuration template and file creation utilities.
//!
//! Provides a well-commented TOML template that matches `Config::default()`
//! and functions to write it to the XDG config path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Default TOML template
// ---------------------------------------------------------------------------

/// A well-commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
/// Sections: `[storage]`, `[tui]`, `[log]`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# deskboard configuration
#
# This file was auto-generated with default values.
# All values shown below are the built-in defaults.
# Modify options to customize your board.
#
# Location: $XDG_CONFIG_HOME/deskboard/config.toml

# ==============================================================================
# Storage
# ==============================================================================

[storage]

# Directory holding the persisted board state:
#   widgetsLayout.json - widget columns and order
#   todos.json         - to-do items
#   memos.json         - memo pad entries
# Empty string means the platform data directory
# ($XDG_DATA_HOME/deskboard or ~/.local/share/deskboard).
# Tilde (~) is expanded to the user's home directory.
# The --data-dir command line flag takes precedence.
data_dir = ""

# ==============================================================================
# TUI
# ==============================================================================

[tui]

# Render tick rate as a human-readable duration.
# Controls how often the board redraws while idle.
# Examples: "250ms", "500ms", "1s"
tick_rate = "250ms"

# How long warnings (locked widget, column would become empty) stay
# visible in the status line.
# Examples: "2s", "3s"
toast_duration = "2s"

# Open to-dos whose deadline falls within this window are marked as due soon.
# Examples: "24h", "2h", "3days"
due_soon = "24h"

# ==============================================================================
# Logging
# ==============================================================================

[log]

# Logging verbosity level.
# Options: "error", "warn", "info", "debug", "trace"
# The DESKBOARD_LOG environment variable overrides this value and accepts
# full filter directives (e.g. "deskboard=debug,warn").
level = "info"

# Path to log file.
# Empty string means stderr for one-shot commands and
# <data dir>/deskboard.log for the TUI.
# Examples: "/tmp/deskboard.log", "~/.local/share/deskboard/deskboard.log"
file = ""
"#;

// ---------------------------------------------------------------------------
// File creation functions
// ---------------------------------------------------------------------------

/// Creates (or force-overwrites) the default config file.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
/// - Returns the path where the config was written.
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path();

    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists { path: path.clone() });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(&path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(&path)?;
    Ok(path)
}

/// Writes the default template to `path`, creating parent dirs and setting 0600 permissions.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_err = |e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    };

    xdg::ensure_config_dir().map_err(write_err)?;
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_err)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::Config;
    use serial_test::serial;

    /// Run closure with `XDG_CONFIG_HOME` temporarily pointed at `dir`.
    fn with_xdg_config<F: FnOnce()>(dir: &str, f: F) {
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        std::env::set_var("XDG_CONFIG_HOME", dir);
        f();
        match original {
            Some(v) => std::env::set_var("XDG_CONFIG_HOME", v),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    // -- Template validity --------------------------------------------------

    #[test]
    fn template_values_match_config_default() {
        let from_template: Config =
            toml::from_str(DEFAULT_CONFIG_TEMPLATE).expect("template should parse");
        assert_eq!(from_template, Config::default());
    }

    #[test]
    fn template_contains_all_section_headers() {
        for section in ["[storage]", "[tui]", "[log]"] {
            assert!(
                DEFAULT_CONFIG_TEMPLATE.contains(section),
                "missing {section} section"
            );
        }
    }

    #[test]
    fn template_is_heavily_commented() {
        let comment_lines = DEFAULT_CONFIG_TEMPLATE
            .lines()
            .filter(|l| l.trim_start().starts_with('#'))
            .count();
        assert!(
            comment_lines > 20,
            "expected >20 comment lines, got {comment_lines}"
        );
    }

    // -- create_default_config ----------------------------------------------

    #[test]
    #[serial]
    fn create_returns_correct_path() {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let expected = tmp.path().join("deskboard/config.toml");
        with_xdg_config(tmp.path().to_str().expect("non-utf8 tmpdir"), || {
            let path = create_default_config(false).expect("should succeed");
            assert_eq!(path, expected);
            let content = fs::read_to_string(&path).expect("should read");
            assert_eq!(content, DEFAULT_CONFIG_TEMPLATE);
        });
    }

    #[test]
    #[serial]
    fn create_without_force_returns_already_exists() {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        with_xdg_config(tmp.path().to_str().expect("non-utf8 tmpdir"), || {
            create_default_config(false).expect("first call should succeed");
            let err = create_default_config(false).expect_err("should fail with AlreadyExists");
            match err {
                ConfigError::AlreadyExists { .. } => {}
                other => panic!("expected AlreadyExists, got: {other:?}"),
            }
        });
    }

    #[test]
    #[serial]
    fn create_with_force_creates_backup() {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        with_xdg_config(tmp.path().to_str().expect("non-utf8 tmpdir"), || {
            let path = create_default_config(false).expect("first call should succeed");
            fs::write(&path, "# custom content\n").expect("overwrite for test");

            let new_path = create_default_config(true).expect("force should succeed");
            assert_eq!(new_path, path);

            let backup = path.with_extension("toml.backup");
            let backup_content = fs::read_to_string(&backup).expect("read backup");
            assert_eq!(backup_content, "# custom content\n");

            let content = fs::read_to_string(&path).expect("read new");
            assert_eq!(content, DEFAULT_CONFIG_TEMPLATE);
        });
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn file_permissions_are_0600() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        with_xdg_config(tmp.path().to_str().expect("non-utf8 tmpdir"), || {
            let path = create_default_config(false).expect("should succeed");
            let mode = fs::metadata(&path).expect("metadata").permissions().mode();
            assert_eq!(mode & 0o777, 0o600, "file should be owner-only read/write");
        });
    }
}
