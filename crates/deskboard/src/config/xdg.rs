//! Platform-aware path resolution for deskboard.
//!
//! On **Linux**, follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/deskboard` or `~/.config/deskboard`
//! - Data: `$XDG_DATA_HOME/deskboard` or `~/.local/share/deskboard`
//!
//! On **macOS**, uses Apple conventions with XDG env var overrides:
//! - Config: `$XDG_CONFIG_HOME/deskboard` or `~/Library/Application Support/deskboard`
//! - Data: `$XDG_DATA_HOME/deskboard` or `~/Library/Application Support/deskboard`

use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "deskboard";

/// Returns the configuration directory for deskboard.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/deskboard` (if env var set, any platform)
/// 2. Platform default:
///    - Linux: `~/.config/deskboard`
///    - macOS: `~/Library/Application Support/deskboard`
pub fn config_dir() -> PathBuf {
    if let Some(xdg) = non_empty_env("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    platform_config_dir().join(APP_NAME)
}

/// Platform-native config base directory (without XDG override).
fn platform_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::config_dir().unwrap_or_else(|| home_dir().join("Library/Application Support"))
    }
    #[cfg(not(target_os = "macos"))]
    {
        home_dir().join(".config")
    }
}

/// Returns the path to the main configuration file.
///
/// Resolves to `config_dir()/config.toml`.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns the data directory holding the persisted board state.
///
/// Resolution order:
/// 1. `$XDG_DATA_HOME/deskboard` (if env var set, any platform)
/// 2. Platform default:
///    - Linux: `~/.local/share/deskboard`
///    - macOS: `~/Library/Application Support/deskboard`
pub fn data_dir() -> PathBuf {
    if let Some(xdg) = non_empty_env("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    platform_data_dir().join(APP_NAME)
}

/// Platform-native data base directory (without XDG override).
fn platform_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir().unwrap_or_else(|| home_dir().join("Library/Application Support"))
    }
    #[cfg(not(target_os = "macos"))]
    {
        home_dir().join(".local/share")
    }
}

/// Log file used by the TUI when `log.file` is empty: `<data_dir>/deskboard.log`.
pub fn log_path_in(data_dir: &Path) -> PathBuf {
    data_dir.join(format!("{APP_NAME}.log"))
}

/// Expands a leading `~` in a path string to the user's home directory.
///
/// If the path does not start with `~`, it is returned as-is.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else if path == "~" {
        home_dir()
    } else {
        PathBuf::from(path)
    }
}

/// Creates a directory and all parent directories with mode 0700.
///
/// Equivalent to `mkdir -p` with restricted permissions.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

/// Creates the configuration directory if it does not exist, returning its path.
pub fn ensure_config_dir() -> std::io::Result<PathBuf> {
    let dir = config_dir();
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Home directory, or the current directory when it cannot be determined.
fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
