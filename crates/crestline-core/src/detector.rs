//! Noise-tolerant crest/trough detection.
//!
//! A sample is accepted as an extremum when it sits on the correct side of the
//! signal mean, its immediate neighbours are within the noise threshold, the
//! series moves away from it on the right, and a slope lookback confirms that
//! the series arrived at it from the left. The lookback walks over plateaus
//! and steps over single samples whose jump exceeds the threshold.

use crate::extremum::{ExtremumKind, ExtremumSet};
use crate::signal::Sample;

/// Locates crests and troughs in a sampled series.
///
/// # Example
///
/// ```rust
/// use crestline_core::{ExtremumDetector, ExtremumKind, Sample};
///
/// let samples: Vec<Sample> = [0.0, 1.0, 3.0, 1.0, 0.0, -1.0, -3.0, -1.0]
///     .iter()
///     .enumerate()
///     .map(|(i, &v)| Sample::new(i as f64, v))
///     .collect();
///
/// let detector = ExtremumDetector::new(5.0);
/// let crests = detector.detect(&samples, 0.0, ExtremumKind::Crest);
/// assert_eq!(crests.times(), &[2.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtremumDetector {
    noise_threshold: f64,
}

impl ExtremumDetector {
    /// Create a detector with the given noise threshold.
    pub fn new(noise_threshold: f64) -> Self {
        Self { noise_threshold }
    }

    /// Noise threshold in use.
    pub fn noise_threshold(&self) -> f64 {
        self.noise_threshold
    }

    /// Scan the interior samples and collect the accepted extrema of `kind`,
    /// in time order. `mean` is the mean of all sample values.
    pub fn detect(&self, samples: &[Sample], mean: f64, kind: ExtremumKind) -> ExtremumSet {
        let mut set = ExtremumSet::new(kind);
        if samples.len() < 3 {
            return set;
        }

        for i in 1..samples.len() - 1 {
            let value = samples[i].value;
            let prev = samples[i - 1].value;
            let next = samples[i + 1].value;

            if !kind.is_beyond(value, mean) {
                continue;
            }
            if (value - prev).abs() > self.noise_threshold
                || (value - next).abs() > self.noise_threshold
            {
                continue;
            }
            if !kind.is_beyond(value, next) {
                continue;
            }
            if self.arrives_from_left(samples, i, kind) {
                set.push(samples[i].time, value);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(kind = %kind, found = set.len(), "detect");

        set
    }

    /// Slope lookback: does the series rise into `index` (fall, for troughs)?
    ///
    /// Equal neighbours move the comparison one sample left. A correct-direction
    /// step larger than the threshold is treated as a noise spike and the
    /// comparison moves two samples left. Running out of history rejects.
    fn arrives_from_left(&self, samples: &[Sample], index: usize, kind: ExtremumKind) -> bool {
        let mut i = index;
        loop {
            if i == 0 {
                return false;
            }
            let current = samples[i].value;
            let previous = samples[i - 1].value;

            if i == 1 {
                return kind.is_beyond(current, previous);
            }

            if current == previous {
                i -= 1;
            } else if kind.is_beyond(current, previous) {
                if (current - previous).abs() < self.noise_threshold {
                    return true;
                }
                i -= 2;
            } else {
                return false;
            }
        }
    }
}
