//! A sampled channel and its detected extrema.

use serde::{Deserialize, Serialize};

use crate::detector::ExtremumDetector;
use crate::error::{Error, Result};
use crate::extremum::{ExtremumKind, ExtremumSet};
use crate::params::AnalysisParams;

/// 1-based signal identifier (the value column in the source table).
pub type SignalId = usize;

/// One `(time, value)` sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Sample time.
    pub time: f64,
    /// Sample value.
    pub value: f64,
}

impl Sample {
    /// Create a sample.
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

/// Which extremum sets changed during a range restriction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeRestriction {
    /// Crests were removed.
    pub crest_changed: bool,
    /// Troughs were removed.
    pub trough_changed: bool,
}

impl RangeRestriction {
    /// `true` if either set changed.
    pub fn any(&self) -> bool {
        self.crest_changed || self.trough_changed
    }

    /// Whether the set of `kind` changed.
    pub fn changed(&self, kind: ExtremumKind) -> bool {
        match kind {
            ExtremumKind::Crest => self.crest_changed,
            ExtremumKind::Trough => self.trough_changed,
        }
    }
}

/// One channel of a multi-signal recording.
///
/// The samples and the mean are fixed at construction. Crests and troughs are
/// detected once, then only ever shrink through consolidation and range
/// restriction.
#[derive(Debug, Clone)]
pub struct Signal {
    id: SignalId,
    samples: Vec<Sample>,
    mean: f64,
    crests: ExtremumSet,
    troughs: ExtremumSet,
}

impl Signal {
    /// Build a signal from its samples and run crest/trough detection.
    ///
    /// Fails on invalid parameters, an id of 0 or an empty series.
    pub fn new(id: SignalId, samples: Vec<Sample>, params: &AnalysisParams) -> Result<Self> {
        params.validate()?;
        if id == 0 {
            return Err(Error::InvalidSignalId(id));
        }
        if samples.is_empty() {
            return Err(Error::empty("Signal::new"));
        }

        let mean = samples.iter().map(|s| s.value).sum::<f64>() / samples.len() as f64;
        let detector = ExtremumDetector::new(params.noise_threshold);
        let crests = detector.detect(&samples, mean, ExtremumKind::Crest);
        let troughs = detector.detect(&samples, mean, ExtremumKind::Trough);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            signal = id,
            samples = samples.len(),
            mean,
            crests = crests.len(),
            troughs = troughs.len(),
            "signal constructed"
        );

        Ok(Self {
            id,
            samples,
            mean,
            crests,
            troughs,
        })
    }

    /// Signal id.
    pub fn id(&self) -> SignalId {
        self.id
    }

    /// Raw samples, ascending by time.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Mean of all sample values.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Current crests.
    pub fn crests(&self) -> &ExtremumSet {
        &self.crests
    }

    /// Current troughs.
    pub fn troughs(&self) -> &ExtremumSet {
        &self.troughs
    }

    /// Current extrema of `kind`.
    pub fn extrema(&self, kind: ExtremumKind) -> &ExtremumSet {
        match kind {
            ExtremumKind::Crest => &self.crests,
            ExtremumKind::Trough => &self.troughs,
        }
    }

    pub(crate) fn extrema_mut(&mut self, kind: ExtremumKind) -> &mut ExtremumSet {
        match kind {
            ExtremumKind::Crest => &mut self.crests,
            ExtremumKind::Trough => &mut self.troughs,
        }
    }

    /// Drop every crest and trough outside `[lower, upper]`.
    ///
    /// Both sets must be non-empty beforehand. The returned flags tell the
    /// caller which sets need to be persisted again.
    pub fn restrict_to_range(&mut self, lower: f64, upper: f64) -> Result<RangeRestriction> {
        if self.crests.is_empty() || self.troughs.is_empty() {
            return Err(Error::empty("Signal::restrict_to_range"));
        }

        let crest_removed = self.crests.trim_outside(lower, upper)?;
        let trough_removed = self.troughs.trim_outside(lower, upper)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            signal = self.id,
            lower,
            upper,
            crest_removed,
            trough_removed,
            "restrict_to_range"
        );

        Ok(RangeRestriction {
            crest_changed: crest_removed > 0,
            trough_changed: trough_removed > 0,
        })
    }
}
