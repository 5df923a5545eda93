//! Amplitude, offset, frequency and range from consolidated extrema.
//!
//! - offset = (mean crest + mean trough) / 2
//! - amplitude = mean crest - offset
//! - frequency = mean of 1/period over consecutive crests and consecutive troughs
//! - range = (offset + amplitude, offset - amplitude)

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::signal::{Signal, SignalId};

/// All oscillation features of one signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillationFeatures {
    /// Signal id.
    pub signal_id: SignalId,
    /// Half the crest-to-trough distance.
    pub amplitude: f64,
    /// Midline between crests and troughs.
    pub offset: f64,
    /// Mean instantaneous frequency.
    pub frequency: f64,
    /// `(offset + amplitude, offset - amplitude)`.
    pub range: (f64, f64),
}

/// Read-only estimator over a signal's current extrema.
#[derive(Debug, Clone, Copy)]
pub struct FeatureEstimator<'a> {
    signal: &'a Signal,
}

impl<'a> FeatureEstimator<'a> {
    /// Wrap a signal.
    pub fn new(signal: &'a Signal) -> Self {
        Self { signal }
    }

    fn crest_and_trough_means(&self, operation: &'static str) -> Result<(f64, f64)> {
        let crest = self.signal.crests().mean_value();
        let trough = self.signal.troughs().mean_value();
        match (crest, trough) {
            (Some(crest), Some(trough)) => Ok((crest, trough)),
            _ => Err(Error::empty(operation)),
        }
    }

    /// Mean crest value minus the offset.
    pub fn amplitude(&self) -> Result<f64> {
        let (crest, trough) = self.crest_and_trough_means("amplitude")?;
        Ok(crest - (crest + trough) / 2.0)
    }

    /// Midpoint of the mean crest and mean trough values.
    pub fn offset(&self) -> Result<f64> {
        let (crest, trough) = self.crest_and_trough_means("offset")?;
        Ok((crest + trough) / 2.0)
    }

    /// Mean of the instantaneous frequencies from crest and trough periods,
    /// pooled into one collection.
    pub fn frequency(&self) -> Result<f64> {
        let (sum, count) = self
            .signal
            .crests()
            .periods()
            .chain(self.signal.troughs().periods())
            .fold((0.0, 0usize), |(sum, count), period| {
                (sum + 1.0 / period, count + 1)
            });

        if count == 0 {
            return Err(Error::empty("frequency"));
        }
        Ok(sum / count as f64)
    }

    /// `(offset + amplitude, offset - amplitude)`.
    pub fn range(&self) -> Result<(f64, f64)> {
        let amplitude = self.amplitude()?;
        let offset = self.offset()?;
        Ok((offset + amplitude, offset - amplitude))
    }

    /// Every feature at once.
    pub fn features(&self) -> Result<OscillationFeatures> {
        let amplitude = self.amplitude()?;
        let offset = self.offset()?;
        Ok(OscillationFeatures {
            signal_id: self.signal.id(),
            amplitude,
            offset,
            frequency: self.frequency()?,
            range: (offset + amplitude, offset - amplitude),
        })
    }
}
