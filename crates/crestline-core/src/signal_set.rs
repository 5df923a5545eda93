//! Multi-signal orchestration: construction, all-pairs consolidation, range
//! restriction and phase aggregation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::consolidate::{ConsolidationCounts, CrossSignalConsolidator};
use crate::error::{Error, Result};
use crate::extremum::ExtremumKind;
use crate::features::{FeatureEstimator, OscillationFeatures};
use crate::params::AnalysisParams;
use crate::phase::{PhaseEstimator, PhaseSample};
use crate::signal::{RangeRestriction, Sample, Signal, SignalId};

/// Supplier of raw series, one per 1-based signal id, all on one time base.
pub trait SampleSource {
    /// Number of signals available (ids `1..=signal_count()`).
    fn signal_count(&self) -> usize;

    /// Samples of signal `id`, ascending by time.
    fn samples(&self, id: SignalId) -> Result<Vec<Sample>>;
}

/// Removal counts of one consolidation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsolidationReport {
    /// Extrema removed in each epoch.
    pub removed_per_epoch: Vec<usize>,
}

impl ConsolidationReport {
    /// Total extrema removed over all epochs.
    pub fn total_removed(&self) -> usize {
        self.removed_per_epoch.iter().sum()
    }
}

/// Crest/trough counts of one signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtremumCounts {
    /// Signal id.
    pub signal_id: SignalId,
    /// Number of crests.
    pub crests: usize,
    /// Number of troughs.
    pub troughs: usize,
}

/// Mean phase of one signal pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairPhase {
    /// Signal whose extrema were placed in the reference periods.
    pub subject: SignalId,
    /// Signal providing the periods.
    pub reference: SignalId,
    /// Mean signed phase in degrees, `None` when the pair had no sample.
    pub mean_signed: Option<f64>,
}

/// One row of a [`PhaseTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseRow {
    /// Axis time.
    pub time: f64,
    /// One entry per pair, in [`PhaseTable::pairs`] order. `None` when the
    /// pair has no sample at or after `time`.
    pub entries: Vec<Option<PhaseSample>>,
}

/// Pairwise phase merged onto one time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseTable {
    /// Extremum kind the phases were computed from.
    pub kind: ExtremumKind,
    /// `(subject, reference)` id pairs, one per column.
    pub pairs: Vec<(SignalId, SignalId)>,
    /// Rows in ascending, de-duplicated time order.
    pub rows: Vec<PhaseRow>,
}

/// Owns every signal of a run.
#[derive(Debug, Clone)]
pub struct SignalSet {
    signals: Vec<Signal>,
    params: AnalysisParams,
}

impl SignalSet {
    /// Take ownership of already constructed signals.
    ///
    /// Each id may appear once. Two copies of one signal would prune each
    /// other's genuine extrema during consolidation.
    pub fn new(signals: Vec<Signal>, params: AnalysisParams) -> Result<Self> {
        params.validate()?;
        if signals.is_empty() {
            return Err(Error::empty("SignalSet::new"));
        }
        let mut seen = BTreeSet::new();
        if let Some(dup) = signals.iter().map(Signal::id).find(|&id| !seen.insert(id)) {
            return Err(Error::DuplicateSignalId(dup));
        }
        Ok(Self { signals, params })
    }

    /// Build one signal per id from `source`. With `ids == None` every
    /// signal the source offers is loaded.
    pub fn from_source<S: SampleSource + ?Sized>(
        source: &S,
        ids: Option<&[SignalId]>,
        params: AnalysisParams,
    ) -> Result<Self> {
        params.validate()?;
        let ids: Vec<SignalId> = match ids {
            Some(ids) => ids.to_vec(),
            None => (1..=source.signal_count()).collect(),
        };
        if ids.is_empty() {
            return Err(Error::empty("SignalSet::from_source"));
        }

        let signals = ids
            .into_iter()
            .map(|id| Signal::new(id, source.samples(id)?, &params))
            .collect::<Result<Vec<_>>>()?;

        Self::new(signals, params)
    }

    /// Parameters of this run.
    pub fn params(&self) -> &AnalysisParams {
        &self.params
    }

    /// Number of signals.
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// Always `false` for a constructed set.
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Signals in load order.
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// Signal with the given id.
    pub fn get(&self, id: SignalId) -> Option<&Signal> {
        self.signals.iter().find(|s| s.id() == id)
    }

    /// Index pairs `(i, j)` with `i < j`.
    fn unordered_pairs(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let n = self.signals.len();
        (0..n).flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
    }

    /// Mutable subject and shared reference at distinct indices.
    fn pair_mut(&mut self, subject: usize, reference: usize) -> (&mut Signal, &Signal) {
        debug_assert_ne!(subject, reference);
        if subject < reference {
            let (left, right) = self.signals.split_at_mut(reference);
            (&mut left[subject], &right[0])
        } else {
            let (left, right) = self.signals.split_at_mut(subject);
            (&mut right[0], &left[reference])
        }
    }

    /// Consolidate every signal against every other signal.
    ///
    /// Epochs run outermost, then subjects `i`, then references `j != i`, each
    /// pair doing crests before troughs. Later pairs see the extrema already
    /// pruned by earlier ones, so the order is part of the result.
    pub fn consolidate_all(&mut self) -> Result<ConsolidationReport> {
        let consolidator = CrossSignalConsolidator::new();
        let n = self.signals.len();
        let mut report = ConsolidationReport::default();

        for _epoch in 0..self.params.epochs {
            let mut removed = 0;
            for i in 0..n {
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    let (subject, reference) = self.pair_mut(i, j);
                    let counts: ConsolidationCounts =
                        consolidator.consolidate_signal(subject, reference)?;
                    removed += counts.total();
                }
            }

            #[cfg(feature = "tracing")]
            tracing::debug!(epoch = _epoch, removed, "consolidation epoch finished");

            report.removed_per_epoch.push(removed);
        }

        Ok(report)
    }

    /// Restrict every signal's extrema to `[lower, upper]`.
    ///
    /// Returns the per-signal change flags so the caller can persist the
    /// updated sets.
    pub fn restrict_to_range(
        &mut self,
        lower: f64,
        upper: f64,
    ) -> Result<Vec<(SignalId, RangeRestriction)>> {
        if self.signals.is_empty() {
            return Err(Error::empty("SignalSet::restrict_to_range"));
        }
        self.signals
            .iter_mut()
            .map(|s| Ok((s.id(), s.restrict_to_range(lower, upper)?)))
            .collect()
    }

    /// Merge the phase of every unordered pair onto one time axis.
    ///
    /// The axis holds every distinct phase-sample time of every pair, sorted.
    /// At each axis time a pair contributes its first sample at or after that
    /// time.
    pub fn aggregate_phase(&self, kind: ExtremumKind) -> PhaseTable {
        let estimator = PhaseEstimator::new();
        let mut pairs = Vec::new();
        let mut series: Vec<Vec<PhaseSample>> = Vec::new();

        for (i, j) in self.unordered_pairs() {
            let (subject, reference) = (&self.signals[i], &self.signals[j]);
            pairs.push((subject.id(), reference.id()));
            series.push(estimator.phase(subject, reference, kind).collect());
        }

        let mut axis: Vec<f64> = series.iter().flatten().map(|s| s.time).collect();
        axis.sort_by(f64::total_cmp);
        axis.dedup();

        let rows = axis
            .into_iter()
            .map(|time| PhaseRow {
                time,
                entries: series
                    .iter()
                    .map(|samples| {
                        let k = samples.partition_point(|s| s.time < time);
                        samples.get(k).copied()
                    })
                    .collect(),
            })
            .collect();

        PhaseTable { kind, pairs, rows }
    }

    /// Mean signed phase of every unordered pair.
    pub fn pair_phase_means(&self, kind: ExtremumKind) -> Vec<PairPhase> {
        let estimator = PhaseEstimator::new();
        self.unordered_pairs()
            .map(|(i, j)| {
                let (subject, reference) = (&self.signals[i], &self.signals[j]);
                PairPhase {
                    subject: subject.id(),
                    reference: reference.id(),
                    mean_signed: estimator.mean_phase(subject, reference, kind),
                }
            })
            .collect()
    }

    /// Oscillation features of every signal.
    pub fn features(&self) -> Result<Vec<OscillationFeatures>> {
        self.signals
            .iter()
            .map(|s| FeatureEstimator::new(s).features())
            .collect()
    }

    /// Mean of the per-signal frequencies.
    pub fn mean_frequency(&self) -> Result<f64> {
        let frequencies = self
            .signals
            .iter()
            .map(|s| FeatureEstimator::new(s).frequency())
            .collect::<Result<Vec<_>>>()?;
        if frequencies.is_empty() {
            return Err(Error::empty("mean_frequency"));
        }
        Ok(frequencies.iter().sum::<f64>() / frequencies.len() as f64)
    }

    /// Current crest/trough counts of every signal.
    pub fn extremum_counts(&self) -> Vec<ExtremumCounts> {
        self.signals
            .iter()
            .map(|s| ExtremumCounts {
                signal_id: s.id(),
                crests: s.crests().len(),
                troughs: s.troughs().len(),
            })
            .collect()
    }
}
