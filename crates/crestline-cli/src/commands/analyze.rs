//! Full analysis run: detection, consolidation, cropping, features and phase.

use anyhow::Context;
use clap::Args;
use crestline_config::Crop;
use crestline_core::{ExtremumKind, SignalId, SignalSet};
use crestline_io::{ExtremaStage, OutputDir, SignalTable};
use std::path::PathBuf;

use super::common::load_config;
use crate::report::{AnalysisReport, PhaseSummary};

/// Run the full analysis pipeline on a signal table.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input table: time column followed by one column per signal
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Largest sample-to-sample change treated as sampling jitter
    #[arg(short = 't', long)]
    pub noise_threshold: Option<f64>,

    /// Number of all-pairs consolidation passes
    #[arg(short, long)]
    pub epochs: Option<usize>,

    /// Keep only extrema inside LOWER:UPPER after consolidation
    #[arg(long, value_name = "LOWER:UPPER")]
    pub crop: Option<Crop>,

    /// Comma-separated signal ids to analyze (default: all)
    #[arg(short, long, value_delimiter = ',')]
    pub signals: Option<Vec<SignalId>>,

    /// Directory for the .dat result files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Also write the summary as JSON
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Analysis config file (default: crestline.toml lookup)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Run the analyze command.
pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(threshold) = args.noise_threshold {
        config.noise_threshold = threshold;
    }
    if let Some(epochs) = args.epochs {
        config.epochs = epochs;
    }
    if let Some(crop) = args.crop {
        config.crop = Some(crop);
    }
    if let Some(signals) = args.signals {
        config.signals = Some(signals);
    }
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    config.validate().context("invalid analysis settings")?;

    let table = SignalTable::read(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let mut set = SignalSet::from_source(&table, config.signals.as_deref(), config.params())
        .context("building signals")?;

    let out = OutputDir::new(&config.output_dir);
    out.prepare()
        .with_context(|| format!("preparing {}", config.output_dir.display()))?;

    for signal in set.signals() {
        for kind in ExtremumKind::ALL {
            out.write_extrema(signal.extrema(kind), signal.id(), ExtremaStage::Detected)?;
        }
    }
    let detected = set.extremum_counts();

    let consolidation = set.consolidate_all().context("consolidating extrema")?;
    for signal in set.signals() {
        for kind in ExtremumKind::ALL {
            out.write_extrema(signal.extrema(kind), signal.id(), ExtremaStage::Filtered)?;
        }
    }
    tracing::info!(
        removed = consolidation.total_removed(),
        epochs = consolidation.removed_per_epoch.len(),
        "consolidation finished"
    );

    if let Some(crop) = config.crop {
        let changes = set
            .restrict_to_range(crop.lower, crop.upper)
            .with_context(|| format!("cropping to {crop}"))?;
        for (id, change) in changes {
            let Some(signal) = set.get(id) else { continue };
            for kind in ExtremumKind::ALL.into_iter().filter(|&k| change.changed(k)) {
                out.write_extrema(signal.extrema(kind), id, ExtremaStage::Filtered)?;
            }
        }
    }

    for kind in ExtremumKind::ALL {
        out.write_phase_table(&set.aggregate_phase(kind))?;
    }

    let report = AnalysisReport {
        input: args.input,
        output_dir: config.output_dir.clone(),
        params: *set.params(),
        crop: config.crop,
        detected,
        removed_per_epoch: consolidation.removed_per_epoch,
        filtered: set.extremum_counts(),
        features: set.features().context("estimating features")?,
        mean_frequency: set.mean_frequency().context("estimating mean frequency")?,
        phase: PhaseSummary {
            crest: set.pair_phase_means(ExtremumKind::Crest),
            trough: set.pair_phase_means(ExtremumKind::Trough),
        },
    };

    report.print();

    if let Some(path) = args.report {
        std::fs::write(&path, serde_json::to_string_pretty(&report)?)
            .with_context(|| format!("writing report {}", path.display()))?;
        println!("Report saved to {}", path.display());
    }

    Ok(())
}
