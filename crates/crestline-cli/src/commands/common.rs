//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use crestline_config::{AnalysisConfig, find_config};
use std::path::Path;

/// Load the analysis configuration.
///
/// Searches in this order:
/// 1. The explicit `--config` path
/// 2. `crestline.toml` in the working directory
/// 3. `crestline.toml` in the user config directory
/// 4. Built-in defaults
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<AnalysisConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match find_config() {
            Some(path) => path,
            None => {
                tracing::debug!("no config file found, using defaults");
                return Ok(AnalysisConfig::default());
            }
        },
    };

    tracing::info!(path = %path.display(), "loading config");
    AnalysisConfig::load(&path).with_context(|| format!("loading config {}", path.display()))
}

/// Format an optional number for the console report.
pub fn format_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.3}"))
}
