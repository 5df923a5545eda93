//! Configuration management for crestline analysis runs.
//!
//! # Features
//!
//! - **Analysis config**: Load and save run settings from TOML files
//! - **Validation**: Reject thresholds, epochs, signal lists and crop bounds
//!   outside their domain before any data is read
//! - **Paths**: Platform-specific config directory and config file lookup
//!
//! # Example
//!
//! ```rust,no_run
//! use crestline_config::{AnalysisConfig, Crop};
//!
//! let mut config = AnalysisConfig::load("crestline.toml").unwrap();
//! config.crop = Some(Crop::new(1.0, 119.0));
//! config.validate().unwrap();
//!
//! let params = config.params();
//! assert_eq!(params.epochs, config.epochs);
//! ```

mod analysis;
mod error;

/// Platform-specific configuration paths.
pub mod paths;

pub use analysis::{AnalysisConfig, Crop};
pub use error::ConfigError;
pub use paths::{
    CONFIG_FILE_NAME, default_config_file, ensure_user_config_dir, find_config, find_config_from,
    user_config_dir,
};
