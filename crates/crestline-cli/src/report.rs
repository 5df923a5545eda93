//! Run summary printed to the console and optionally saved as JSON.

use crate::commands::common::format_opt;
use crestline_config::Crop;
use crestline_core::{AnalysisParams, ExtremumCounts, OscillationFeatures, PairPhase};
use serde::Serialize;
use std::path::PathBuf;

/// Mean pairwise phase for both extremum kinds.
#[derive(Debug, Serialize)]
pub struct PhaseSummary {
    /// Phase from crests.
    pub crest: Vec<PairPhase>,
    /// Phase from troughs.
    pub trough: Vec<PairPhase>,
}

/// Everything one `analyze` run produced.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    /// Input table.
    pub input: PathBuf,
    /// Directory holding the `.dat` files.
    pub output_dir: PathBuf,
    /// Parameters in effect.
    pub params: AnalysisParams,
    /// Crop interval, if any.
    pub crop: Option<Crop>,
    /// Counts straight after detection.
    pub detected: Vec<ExtremumCounts>,
    /// Extrema removed in each consolidation epoch.
    pub removed_per_epoch: Vec<usize>,
    /// Counts after consolidation and cropping.
    pub filtered: Vec<ExtremumCounts>,
    /// Per-signal oscillation features.
    pub features: Vec<OscillationFeatures>,
    /// Mean of the per-signal frequencies.
    pub mean_frequency: f64,
    /// Mean pairwise phase.
    pub phase: PhaseSummary,
}

impl AnalysisReport {
    /// Print the human-readable summary to stdout.
    pub fn print(&self) {
        println!("Input:       {}", self.input.display());
        println!("Signals:     {}", self.detected.len());
        println!(
            "Threshold:   {}   Epochs: {}",
            self.params.noise_threshold, self.params.epochs
        );
        if let Some(crop) = &self.crop {
            println!("Crop:        {crop}");
        }

        println!();
        println!("Extrema (detected -> filtered):");
        for (before, after) in self.detected.iter().zip(&self.filtered) {
            println!(
                "  S{:<3} crests {:>5} -> {:<5} troughs {:>5} -> {:<5}",
                before.signal_id, before.crests, after.crests, before.troughs, after.troughs
            );
        }
        let removed: usize = self.removed_per_epoch.iter().sum();
        println!("  removed by consolidation: {removed}");

        println!();
        println!("Features:");
        println!(
            "  {:<5} {:>12} {:>12} {:>12} {:>12} {:>12}",
            "id", "amplitude", "offset", "frequency", "max", "min"
        );
        for f in &self.features {
            println!(
                "  S{:<4} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4}",
                f.signal_id, f.amplitude, f.offset, f.frequency, f.range.0, f.range.1
            );
        }
        println!("  mean frequency: {:.4}", self.mean_frequency);

        if !self.phase.crest.is_empty() {
            println!();
            println!("Mean phase (degrees, crest / trough):");
            for (crest, trough) in self.phase.crest.iter().zip(&self.phase.trough) {
                println!(
                    "  S{} vs S{}: {:>9} / {:>9}",
                    crest.subject,
                    crest.reference,
                    format_opt(crest.mean_signed),
                    format_opt(trough.mean_signed)
                );
            }
        }

        println!();
        println!("Results written to {}", self.output_dir.display());
    }
}
