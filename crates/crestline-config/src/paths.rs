//! Platform-specific configuration paths.
//!
//! - **User config**: `~/.config/crestline/` (Linux), `~/Library/Application Support/crestline/` (macOS), `%APPDATA%\crestline\` (Windows)
//! - **Project config**: `crestline.toml` in the working directory
//!
//! # Example
//!
//! ```rust,no_run
//! use crestline_config::paths;
//!
//! // Project file first, then the user config directory
//! if let Some(path) = paths::find_config() {
//!     println!("Using config: {:?}", path);
//! }
//! ```

use std::path::{Path, PathBuf};

/// Application name used for directory paths.
const APP_NAME: &str = "crestline";

/// File name of a configuration file.
pub const CONFIG_FILE_NAME: &str = "crestline.toml";

/// Returns the user-specific configuration directory.
///
/// # Platform Paths
///
/// - Linux: `~/.config/crestline/`
/// - macOS: `~/Library/Application Support/crestline/`
/// - Windows: `%APPDATA%\crestline\`
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Path of the configuration file in the user config directory.
pub fn default_config_file() -> PathBuf {
    user_config_dir().join(CONFIG_FILE_NAME)
}

/// Find a configuration file.
///
/// Searches in the following order:
/// 1. `crestline.toml` in the current directory
/// 2. `crestline.toml` in the user config directory
pub fn find_config() -> Option<PathBuf> {
    find_config_from(Path::new("."))
}

/// Like [`find_config`], with `dir` standing in for the current directory.
pub fn find_config_from(dir: &Path) -> Option<PathBuf> {
    let local = dir.join(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    let user = default_config_file();
    if user.is_file() {
        return Some(user);
    }

    None
}

/// Ensure the user config directory exists.
///
/// Creates the directory and any parent directories if they don't exist.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_config_dir() -> Result<PathBuf, crate::ConfigError> {
    let dir = user_config_dir();

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| crate::ConfigError::create_dir(&dir, e))?;
    }

    Ok(dir)
}
