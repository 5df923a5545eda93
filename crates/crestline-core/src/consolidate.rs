//! Cross-signal extremum consolidation.
//!
//! Consecutive extrema of a reference signal split the time axis into closed
//! windows `[ref[k], ref[k+1]]`. When a subject signal has several extrema of
//! the same kind inside one window, only the most extreme one is genuine; the
//! rest are sampling-noise duplicates and are removed from the subject.

use std::ops::Range;

use crate::error::{Error, Result};
use crate::extremum::{ExtremumKind, ExtremumSet};
use crate::signal::Signal;

/// Number of extrema removed from one subject in one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsolidationCounts {
    /// Crests removed.
    pub crests: usize,
    /// Troughs removed.
    pub troughs: usize,
}

impl ConsolidationCounts {
    /// Crests plus troughs.
    pub fn total(&self) -> usize {
        self.crests + self.troughs
    }
}

/// Keeps one subject extremum per reference window.
///
/// Within a window the crest with the highest value (trough with the lowest)
/// survives. On exactly equal values the earliest one survives and later ones
/// are evicted.
///
/// # Example
///
/// ```rust
/// use crestline_core::{CrossSignalConsolidator, ExtremumKind, ExtremumSet};
///
/// let reference = ExtremumSet::from_points(ExtremumKind::Crest, [(0.0, 10.0), (10.0, 10.0)])?;
/// let mut subject = ExtremumSet::from_points(ExtremumKind::Crest, [(3.0, 7.0), (6.0, 9.0)])?;
///
/// let removed = CrossSignalConsolidator::new().consolidate(&mut subject, &reference)?;
/// assert_eq!(removed, 1);
/// assert_eq!(subject.values(), &[9.0]);
/// # Ok::<(), crestline_core::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossSignalConsolidator;

impl CrossSignalConsolidator {
    /// Create a consolidator.
    pub fn new() -> Self {
        Self
    }

    /// Consolidate `subject` against `reference` (same kind). Returns the
    /// number of removed extrema. A reference with fewer than two extrema
    /// defines no window and leaves the subject untouched. This includes an
    /// empty reference, which is a no-op here rather than an
    /// `IndexOutOfRange` error.
    pub fn consolidate(&self, subject: &mut ExtremumSet, reference: &ExtremumSet) -> Result<usize> {
        if subject.kind() != reference.kind() {
            return Err(Error::inconsistent(
                "CrossSignalConsolidator::consolidate",
                format!(
                    "subject holds {} but reference holds {}",
                    subject.kind(),
                    reference.kind()
                ),
            ));
        }
        let kind = subject.kind();
        let mut removed = 0;

        for window in reference.times().windows(2) {
            let members = window_members(subject.times(), window[0], window[1]);
            if members.len() < 2 {
                continue;
            }

            let keep = strongest(subject.values(), members.clone(), kind);
            for index in members.rev() {
                if index != keep {
                    subject.remove(index)?;
                    removed += 1;
                }
            }
            subject.check_consistency("CrossSignalConsolidator::consolidate")?;
        }

        Ok(removed)
    }

    /// Consolidate crests, then troughs, of `subject` against `reference`.
    pub fn consolidate_signal(
        &self,
        subject: &mut Signal,
        reference: &Signal,
    ) -> Result<ConsolidationCounts> {
        let crests = self.consolidate(
            subject.extrema_mut(ExtremumKind::Crest),
            reference.extrema(ExtremumKind::Crest),
        )?;
        let troughs = self.consolidate(
            subject.extrema_mut(ExtremumKind::Trough),
            reference.extrema(ExtremumKind::Trough),
        )?;

        #[cfg(feature = "tracing")]
        if crests + troughs > 0 {
            tracing::debug!(
                subject = subject.id(),
                reference = reference.id(),
                crests,
                troughs,
                "consolidate: removed extrema"
            );
        }

        Ok(ConsolidationCounts { crests, troughs })
    }
}

/// Indices of the subject times inside the closed interval `[start, end]`.
/// The times are sorted, so the members form one contiguous range.
fn window_members(times: &[f64], start: f64, end: f64) -> Range<usize> {
    let lo = times.partition_point(|&t| t < start);
    let hi = lo + times[lo..].partition_point(|&t| t <= end);
    lo..hi
}

/// Index of the first most extreme value within `range`.
fn strongest(values: &[f64], range: Range<usize>, kind: ExtremumKind) -> usize {
    let mut best = range.start;
    for index in range {
        if kind.is_beyond(values[index], values[best]) {
            best = index;
        }
    }
    best
}
