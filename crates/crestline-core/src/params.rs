//! Runtime analysis parameters.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default maximum sample-to-sample delta treated as jitter.
pub const DEFAULT_NOISE_THRESHOLD: f64 = 5.0;

/// Default number of all-pairs consolidation passes.
pub const DEFAULT_EPOCHS: usize = 1;

/// Tuning values threaded through detection and consolidation.
///
/// # Example
///
/// ```rust
/// use crestline_core::AnalysisParams;
///
/// let params = AnalysisParams::default().with_noise_threshold(2.5).with_epochs(2);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisParams {
    /// Largest consecutive-sample difference still treated as sampling jitter,
    /// in the units of the signal values.
    pub noise_threshold: f64,
    /// Number of all-pairs consolidation epochs.
    pub epochs: usize,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            noise_threshold: DEFAULT_NOISE_THRESHOLD,
            epochs: DEFAULT_EPOCHS,
        }
    }
}

impl AnalysisParams {
    /// Set the noise threshold.
    pub fn with_noise_threshold(mut self, noise_threshold: f64) -> Self {
        self.noise_threshold = noise_threshold;
        self
    }

    /// Set the consolidation epoch count.
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Reject a non-positive or non-finite threshold and a zero epoch count.
    pub fn validate(&self) -> Result<()> {
        if !self.noise_threshold.is_finite() || self.noise_threshold <= 0.0 {
            return Err(Error::InvalidParams(format!(
                "noise threshold must be finite and positive, got {}",
                self.noise_threshold
            )));
        }
        if self.epochs == 0 {
            return Err(Error::InvalidParams(
                "at least one consolidation epoch is required".to_string(),
            ));
        }
        Ok(())
    }
}
