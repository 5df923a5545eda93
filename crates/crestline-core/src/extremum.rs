//! Crest/trough containers.
//!
//! An [`ExtremumSet`] stores the accepted extrema of one kind for one signal as
//! two parallel lists (times and values), sorted ascending by time. Detection
//! appends in time order; consolidation and range restriction only remove.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Which side of the oscillation an extremum sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtremumKind {
    /// Local maximum above the signal mean.
    Crest,
    /// Local minimum below the signal mean.
    Trough,
}

impl ExtremumKind {
    /// Both kinds, crests first.
    pub const ALL: [ExtremumKind; 2] = [ExtremumKind::Crest, ExtremumKind::Trough];

    /// Lowercase name, also used in result file names.
    pub fn as_str(self) -> &'static str {
        match self {
            ExtremumKind::Crest => "crest",
            ExtremumKind::Trough => "trough",
        }
    }

    /// `true` if `a` lies strictly beyond `b` in this kind's direction
    /// (above for crests, below for troughs).
    #[inline]
    pub fn is_beyond(self, a: f64, b: f64) -> bool {
        match self {
            ExtremumKind::Crest => a > b,
            ExtremumKind::Trough => a < b,
        }
    }

    /// `true` if `a` is at least as extreme as `b` (ties count).
    #[inline]
    pub fn is_at_least(self, a: f64, b: f64) -> bool {
        match self {
            ExtremumKind::Crest => a >= b,
            ExtremumKind::Trough => a <= b,
        }
    }
}

impl fmt::Display for ExtremumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single accepted extremum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extremum {
    /// Sample time.
    pub time: f64,
    /// Sample value.
    pub value: f64,
}

/// Time-sorted extrema of one kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtremumSet {
    kind: ExtremumKind,
    times: Vec<f64>,
    values: Vec<f64>,
}

impl ExtremumSet {
    /// Create an empty set.
    pub fn new(kind: ExtremumKind) -> Self {
        Self {
            kind,
            times: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build a set from `(time, value)` points.
    ///
    /// Fails with [`Error::InternalConsistency`] unless the times are
    /// non-decreasing (NaN times are rejected).
    pub fn from_points(
        kind: ExtremumKind,
        points: impl IntoIterator<Item = (f64, f64)>,
    ) -> Result<Self> {
        let mut set = Self::new(kind);
        for (time, value) in points {
            if time.is_nan() {
                return Err(Error::inconsistent("ExtremumSet::from_points", "NaN time"));
            }
            if let Some(&last) = set.times.last()
                && last > time
            {
                return Err(Error::inconsistent(
                    "ExtremumSet::from_points",
                    format!("time {time} follows {last}"),
                ));
            }
            set.push(time, value);
        }
        Ok(set)
    }

    /// Append a point. Callers guarantee time order.
    pub(crate) fn push(&mut self, time: f64, value: f64) {
        debug_assert!(self.times.last().is_none_or(|&t| t <= time));
        self.times.push(time);
        self.values.push(value);
    }

    /// Kind of extrema stored.
    pub fn kind(&self) -> ExtremumKind {
        self.kind
    }

    /// Number of extrema.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// `true` if the set holds no extrema.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Extremum times, ascending.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Extremum values, parallel to [`times`](Self::times).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Extremum at `index`.
    pub fn get(&self, index: usize) -> Result<Extremum> {
        match (self.times.get(index), self.values.get(index)) {
            (Some(&time), Some(&value)) => Ok(Extremum { time, value }),
            _ => Err(Error::IndexOutOfRange {
                index,
                len: self.len(),
            }),
        }
    }

    /// Iterate over the extrema in time order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Extremum> + '_ {
        self.times
            .iter()
            .zip(&self.values)
            .map(|(&time, &value)| Extremum { time, value })
    }

    /// Arithmetic mean of the values, `None` when empty.
    pub fn mean_value(&self) -> Option<f64> {
        if self.values.is_empty() {
            None
        } else {
            Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
        }
    }

    /// Time differences between consecutive extrema.
    pub fn periods(&self) -> impl Iterator<Item = f64> + '_ {
        self.times.windows(2).map(|w| w[1] - w[0])
    }

    /// Remove the extremum at `index`, keeping the remaining order.
    pub fn remove(&mut self, index: usize) -> Result<Extremum> {
        if index >= self.times.len() || index >= self.values.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        let time = self.times.remove(index);
        let value = self.values.remove(index);
        self.check_consistency("ExtremumSet::remove")?;
        Ok(Extremum { time, value })
    }

    /// Drop every extremum whose time is outside `[lower, upper]`, from both
    /// ends. Returns the number of removed extrema.
    pub fn trim_outside(&mut self, lower: f64, upper: f64) -> Result<usize> {
        let head = self.times.iter().take_while(|&&t| t < lower).count();
        self.times.drain(..head);
        self.values.drain(..head);
        self.check_consistency("ExtremumSet::trim_outside")?;

        let tail = self.times.iter().rev().take_while(|&&t| t > upper).count();
        let keep = self.times.len() - tail;
        self.times.truncate(keep);
        self.values.truncate(keep);
        self.check_consistency("ExtremumSet::trim_outside")?;

        Ok(head + tail)
    }

    /// Verify the parallel lists still line up.
    pub fn check_consistency(&self, operation: &'static str) -> Result<()> {
        if self.times.len() == self.values.len() {
            Ok(())
        } else {
            Err(Error::inconsistent(
                operation,
                format!(
                    "{} {} times vs {} values",
                    self.kind,
                    self.times.len(),
                    self.values.len()
                ),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crests(points: &[(f64, f64)]) -> ExtremumSet {
        ExtremumSet::from_points(ExtremumKind::Crest, points.iter().copied()).unwrap()
    }

    #[test]
    fn kind_direction() {
        assert!(ExtremumKind::Crest.is_beyond(2.0, 1.0));
        assert!(!ExtremumKind::Crest.is_beyond(1.0, 1.0));
        assert!(ExtremumKind::Trough.is_beyond(1.0, 2.0));
        assert!(ExtremumKind::Trough.is_at_least(1.0, 1.0));
        assert!(!ExtremumKind::Trough.is_at_least(2.0, 1.0));
    }

    #[test]
    fn from_points_rejects_descending_times() {
        let err = ExtremumSet::from_points(ExtremumKind::Trough, [(2.0, -1.0), (1.0, -2.0)]);
        assert!(matches!(err, Err(Error::InternalConsistency { .. })));
    }

    #[test]
    fn from_points_rejects_nan_time() {
        let err = ExtremumSet::from_points(ExtremumKind::Crest, [(f64::NAN, 1.0)]);
        assert!(err.is_err());
    }

    #[test]
    fn get_out_of_range() {
        let set = crests(&[(1.0, 3.0)]);
        assert_eq!(set.get(0).unwrap(), Extremum { time: 1.0, value: 3.0 });
        assert_eq!(
            set.get(1),
            Err(Error::IndexOutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn remove_keeps_order_and_lengths() {
        let mut set = crests(&[(1.0, 3.0), (2.0, 4.0), (3.0, 5.0)]);
        let removed = set.remove(1).unwrap();
        assert_eq!(removed.value, 4.0);
        assert_eq!(set.times(), &[1.0, 3.0]);
        assert_eq!(set.values(), &[3.0, 5.0]);
        assert!(set.remove(5).is_err());
    }

    #[test]
    fn trim_outside_drops_both_ends() {
        let mut set = crests(&[(0.5, 1.0), (1.5, 2.0), (2.5, 3.0), (118.5, 4.0), (119.5, 5.0)]);
        let removed = set.trim_outside(1.0, 119.0).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(set.times(), &[1.5, 2.5, 118.5]);
        assert_eq!(set.values(), &[2.0, 3.0, 4.0]);
    }

    #[test]
    fn trim_outside_can_empty_the_set() {
        let mut set = crests(&[(5.0, 1.0), (6.0, 2.0)]);
        assert_eq!(set.trim_outside(10.0, 20.0).unwrap(), 2);
        assert!(set.is_empty());
    }

    #[test]
    fn mean_and_periods() {
        let set = crests(&[(0.0, 2.0), (0.5, 4.0), (1.5, 6.0)]);
        assert_eq!(set.mean_value(), Some(4.0));
        assert_eq!(set.periods().collect::<Vec<_>>(), vec![0.5, 1.0]);
        assert_eq!(ExtremumSet::new(ExtremumKind::Crest).mean_value(), None);
    }
}
