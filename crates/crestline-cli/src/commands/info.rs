//! Display signal table layout and per-signal statistics.

use clap::Args;
use crestline_io::SignalTable;

/// Display signal table information.
#[derive(Args)]
pub struct InfoArgs {
    /// Path to the signal table
    pub file: std::path::PathBuf,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let table = SignalTable::read(&args.file)?;

    println!("File:        {}", args.file.display());
    println!("Rows:        {}", table.row_count());
    println!("Signals:     {}", table.signal_count());
    if let Some((start, end)) = table.time_span() {
        println!("Time span:   {start} .. {end}");
    }

    println!();
    println!("  {:<5} {:>12} {:>12} {:>12}", "id", "min", "max", "mean");
    for id in 1..=table.signal_count() {
        let Some(column) = table.column(id) else {
            continue;
        };
        let (min, max, mean) = column_stats(column);
        println!("  S{id:<4} {min:>12.4} {max:>12.4} {mean:>12.4}");
    }

    Ok(())
}

fn column_stats(values: &[f64]) -> (f64, f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = values.iter().sum::<f64>() / values.len().max(1) as f64;
    (min, max, mean)
}
