//! Analysis configuration file format and operations.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crestline_core::{AnalysisParams, DEFAULT_EPOCHS, DEFAULT_NOISE_THRESHOLD, SignalId};

use crate::error::ConfigError;

/// Time interval that extrema are restricted to after consolidation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Crop {
    /// Earliest time kept.
    pub lower: f64,
    /// Latest time kept.
    pub upper: f64,
}

impl Crop {
    /// Create a crop interval.
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Reject non-finite bounds and `lower > upper`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.lower.is_finite() || !self.upper.is_finite() {
            return Err(ConfigError::invalid("crop", "bounds must be finite"));
        }
        if self.lower > self.upper {
            return Err(ConfigError::invalid(
                "crop",
                format!("lower bound {} exceeds upper bound {}", self.lower, self.upper),
            ));
        }
        Ok(())
    }
}

impl FromStr for Crop {
    type Err = ConfigError;

    /// Parse `LOWER:UPPER`, e.g. `1.0:119.0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lower, upper) = s
            .split_once(':')
            .ok_or_else(|| ConfigError::invalid("crop", format!("expected LOWER:UPPER, got '{s}'")))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::invalid("crop", format!("'{part}' is not a number")))
        };
        let crop = Crop::new(parse(lower)?, parse(upper)?);
        crop.validate()?;
        Ok(crop)
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.lower, self.upper)
    }
}

/// Configuration of one analysis run.
///
/// # TOML Format
///
/// ```toml
/// noise_threshold = 5.0
/// epochs = 1
/// signals = [1, 2, 3]
/// output_dir = "output"
///
/// [crop]
/// lower = 1.0
/// upper = 119.0
/// ```
///
/// Every key is optional; missing keys take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    /// Largest sample-to-sample change treated as sampling jitter.
    #[serde(default = "default_noise_threshold")]
    pub noise_threshold: f64,

    /// Number of all-pairs consolidation passes.
    #[serde(default = "default_epochs")]
    pub epochs: usize,

    /// Signal ids to analyze; all signals in the table when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signals: Option<Vec<SignalId>>,

    /// Directory receiving the `.dat` result files.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Optional time interval applied after consolidation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<Crop>,
}

fn default_noise_threshold() -> f64 {
    DEFAULT_NOISE_THRESHOLD
}

fn default_epochs() -> usize {
    DEFAULT_EPOCHS
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            noise_threshold: DEFAULT_NOISE_THRESHOLD,
            epochs: DEFAULT_EPOCHS,
            signals: None,
            output_dir: default_output_dir(),
            crop: None,
        }
    }
}

impl AnalysisConfig {
    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Convert the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save the configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Check every field against its valid domain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.noise_threshold.is_finite() || self.noise_threshold <= 0.0 {
            return Err(ConfigError::invalid(
                "noise_threshold",
                format!("must be finite and positive, got {}", self.noise_threshold),
            ));
        }
        if self.epochs == 0 {
            return Err(ConfigError::invalid("epochs", "must be at least 1"));
        }
        if let Some(signals) = &self.signals {
            if signals.is_empty() {
                return Err(ConfigError::invalid("signals", "list is empty"));
            }
            if signals.contains(&0) {
                return Err(ConfigError::invalid("signals", "signal ids start at 1"));
            }
            let mut seen = HashSet::new();
            if let Some(dup) = signals.iter().find(|id| !seen.insert(**id)) {
                return Err(ConfigError::invalid("signals", format!("signal {dup} listed twice")));
            }
        }
        if let Some(crop) = &self.crop {
            crop.validate()?;
        }
        Ok(())
    }

    /// Core parameters for this configuration.
    pub fn params(&self) -> AnalysisParams {
        AnalysisParams::default()
            .with_noise_threshold(self.noise_threshold)
            .with_epochs(self.epochs)
    }
}
