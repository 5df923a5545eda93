//! Phase of one signal's extrema relative to another's.
//!
//! Consecutive reference extrema `[ref[j-1], ref[j])` form one period. A
//! subject extremum at time `t` inside that period has phase
//! `(t - ref[j-1]) / (ref[j] - ref[j-1]) * 360` degrees, reported both in
//! `[0, 360)` and folded into `(-180, 180]`.

use serde::{Deserialize, Serialize};

use crate::extremum::{ExtremumKind, ExtremumSet};
use crate::signal::Signal;

/// Phase of one subject extremum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseSample {
    /// Time of the subject extremum.
    pub time: f64,
    /// Phase in degrees, `(-180, 180]`.
    pub phase_signed: f64,
    /// Phase in degrees, `[0, 360)`.
    pub phase_unsigned: f64,
}

impl PhaseSample {
    /// Build a sample from an unsigned phase, folding values above 180°.
    pub fn from_unsigned(time: f64, phase_unsigned: f64) -> Self {
        let phase_signed = if phase_unsigned > 180.0 {
            phase_unsigned - 360.0
        } else {
            phase_unsigned
        };
        Self {
            time,
            phase_signed,
            phase_unsigned,
        }
    }
}

/// Computes phase samples for a subject/reference pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseEstimator;

impl PhaseEstimator {
    /// Create an estimator.
    pub fn new() -> Self {
        Self
    }

    /// Lazy phase samples of `subject`'s extrema of `kind` against the
    /// `reference` extrema of the same kind, in subject time order.
    pub fn phase<'a>(
        &self,
        subject: &'a Signal,
        reference: &'a Signal,
        kind: ExtremumKind,
    ) -> PhaseSamples<'a> {
        PhaseSamples::new(subject.extrema(kind), reference.extrema(kind))
    }

    /// Arithmetic mean of the signed phase over a pair, `None` if the pair
    /// produces no sample.
    pub fn mean_phase(&self, subject: &Signal, reference: &Signal, kind: ExtremumKind) -> Option<f64> {
        let (sum, count) = self
            .phase(subject, reference, kind)
            .fold((0.0, 0usize), |(sum, count), sample| {
                (sum + sample.phase_signed, count + 1)
            });
        (count > 0).then(|| sum / count as f64)
    }
}

/// Iterator over [`PhaseSample`]s.
///
/// Subject extrema before the first reference extremum, at or after the last
/// one, or paired with a reference of fewer than two extrema yield nothing.
#[derive(Debug, Clone)]
pub struct PhaseSamples<'a> {
    subject: &'a [f64],
    reference: &'a [f64],
    position: usize,
}

impl<'a> PhaseSamples<'a> {
    /// Iterate `subject`'s times against `reference`'s times.
    pub fn new(subject: &'a ExtremumSet, reference: &'a ExtremumSet) -> Self {
        Self {
            subject: subject.times(),
            reference: reference.times(),
            position: 0,
        }
    }

    /// The reference period containing `t`, if any.
    fn bracket(&self, t: f64) -> Option<(f64, f64)> {
        let j = self.reference.partition_point(|&r| r <= t);
        if j == 0 || j >= self.reference.len() {
            return None;
        }
        Some((self.reference[j - 1], self.reference[j]))
    }
}

impl Iterator for PhaseSamples<'_> {
    type Item = PhaseSample;

    fn next(&mut self) -> Option<PhaseSample> {
        while let Some(&t) = self.subject.get(self.position) {
            self.position += 1;
            if let Some((start, end)) = self.bracket(t) {
                let phase_unsigned = (t - start) / (end - start) * 360.0;
                return Some(PhaseSample::from_unsigned(t, phase_unsigned));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.subject.len() - self.position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(times: &[f64]) -> ExtremumSet {
        ExtremumSet::from_points(ExtremumKind::Crest, times.iter().map(|&t| (t, 1.0))).unwrap()
    }

    #[test]
    fn folds_above_180() {
        let s = PhaseSample::from_unsigned(0.0, 270.0);
        assert_eq!(s.phase_signed, -90.0);
        let s = PhaseSample::from_unsigned(0.0, 180.0);
        assert_eq!(s.phase_signed, 180.0);
        let s = PhaseSample::from_unsigned(0.0, 0.0);
        assert_eq!(s.phase_signed, 0.0);
    }

    #[test]
    fn maps_time_into_reference_period() {
        let subject = set(&[2.5, 14.0]);
        let reference = set(&[0.0, 10.0, 20.0]);
        let samples: Vec<_> = PhaseSamples::new(&subject, &reference).collect();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].time, 2.5);
        assert_eq!(samples[0].phase_unsigned, 90.0);
        assert_eq!(samples[0].phase_signed, 90.0);
        assert_eq!(samples[1].phase_unsigned, 144.0);
    }

    #[test]
    fn bracket_is_half_open() {
        // A subject time equal to a reference time starts the next period.
        let subject = set(&[10.0]);
        let reference = set(&[0.0, 10.0, 20.0]);
        let samples: Vec<_> = PhaseSamples::new(&subject, &reference).collect();
        assert_eq!(samples[0].phase_unsigned, 0.0);
    }

    #[test]
    fn times_outside_reference_are_skipped() {
        let subject = set(&[-1.0, 5.0, 20.0, 30.0]);
        let reference = set(&[0.0, 10.0, 20.0]);
        let samples: Vec<_> = PhaseSamples::new(&subject, &reference).collect();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].time, 5.0);
        assert_eq!(samples[0].phase_unsigned, 180.0);
    }

    #[test]
    fn short_reference_yields_nothing() {
        let subject = set(&[1.0, 2.0]);
        assert_eq!(PhaseSamples::new(&subject, &set(&[])).count(), 0);
        assert_eq!(PhaseSamples::new(&subject, &set(&[0.0])).count(), 0);
    }

    #[test]
    fn samples_are_re_derivable() {
        let subject = set(&[1.0, 6.0]);
        let reference = set(&[0.0, 4.0, 8.0]);
        let first: Vec<_> = PhaseSamples::new(&subject, &reference).collect();
        let second: Vec<_> = PhaseSamples::new(&subject, &reference).collect();
        assert_eq!(first, second);
        assert_eq!(first[1].phase_unsigned, 180.0);
    }
}
