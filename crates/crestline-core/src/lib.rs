//! Crestline Core - oscillation analysis for multi-signal recordings
//!
//! This crate turns sampled, quasi-periodic signals that share one time base
//! into crest/trough series, and from those derives amplitude, offset,
//! frequency and pairwise phase.
//!
//! # Pipeline
//!
//! 1. [`Signal::new`] computes the signal mean and runs the
//!    [`ExtremumDetector`] for crests and troughs.
//! 2. [`SignalSet::consolidate_all`] prunes duplicate extrema of each signal
//!    using the extrema of every other signal as windows
//!    ([`CrossSignalConsolidator`]).
//! 3. [`SignalSet::restrict_to_range`] drops extrema outside a time interval.
//! 4. [`FeatureEstimator`] and [`PhaseEstimator`] read the final extrema.
//!
//! # Core Abstractions
//!
//! - [`ExtremumSet`] - time-sorted extrema of one [`ExtremumKind`]
//! - [`AnalysisParams`] - noise threshold and consolidation epochs
//! - [`SampleSource`] - anything that can hand out `(time, value)` series
//! - [`PhaseTable`] - pairwise phase merged onto one time axis
//!
//! # Example
//!
//! ```rust
//! use crestline_core::{AnalysisParams, ExtremumKind, Sample, Signal, SignalSet};
//!
//! let wave = [0.0, 5.0, 10.0, 5.0, 0.0, -5.0, -10.0, -5.0];
//! let series = |shift: usize| -> Vec<Sample> {
//!     (0..16)
//!         .map(|i| Sample::new(i as f64, wave[(i + shift) % 8]))
//!         .collect()
//! };
//!
//! let params = AnalysisParams::default().with_noise_threshold(10.0);
//! let signals = vec![
//!     Signal::new(1, series(0), &params)?,
//!     Signal::new(2, series(1), &params)?,
//! ];
//! let mut set = SignalSet::new(signals, params)?;
//! set.consolidate_all()?;
//!
//! let table = set.aggregate_phase(ExtremumKind::Crest);
//! assert_eq!(table.rows[0].entries[0].map(|s| s.phase_signed), Some(45.0));
//! # Ok::<(), crestline_core::Error>(())
//! ```
//!
//! # Features
//!
//! - `tracing` - emit `debug` events from detection, consolidation and range
//!   restriction through the `tracing` crate

pub mod consolidate;
pub mod detector;
pub mod error;
pub mod extremum;
pub mod features;
pub mod params;
pub mod phase;
pub mod signal;
pub mod signal_set;

// Re-export main types at crate root
pub use consolidate::{ConsolidationCounts, CrossSignalConsolidator};
pub use detector::ExtremumDetector;
pub use error::{Error, Result};
pub use extremum::{Extremum, ExtremumKind, ExtremumSet};
pub use features::{FeatureEstimator, OscillationFeatures};
pub use params::{AnalysisParams, DEFAULT_EPOCHS, DEFAULT_NOISE_THRESHOLD};
pub use phase::{PhaseEstimator, PhaseSample, PhaseSamples};
pub use signal::{RangeRestriction, Sample, Signal, SignalId};
pub use signal_set::{
    ConsolidationReport, ExtremumCounts, PairPhase, PhaseRow, PhaseTable, SampleSource, SignalSet,
};
