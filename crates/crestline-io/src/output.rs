//! Plottable `.dat` result files.
//!
//! Every file is plain text, one row per line, columns separated by a single
//! space:
//!
//! - `S{id}_{kind}.dat`: detected extrema, `time value`
//! - `S{id}_filtered_{kind}.dat`: extrema after consolidation or cropping
//! - `phase180_{kind}.dat`, `phase360_{kind}.dat`: `time v1 ... vk`, one value
//!   per signal pair that has a sample at or after `time`

use crate::{Error, Result};
use crestline_core::{ExtremumKind, ExtremumSet, PhaseSample, PhaseTable, SignalId};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Which processing stage a set of extrema comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtremaStage {
    /// Straight out of detection.
    Detected,
    /// After consolidation and/or range restriction.
    Filtered,
}

impl ExtremaStage {
    /// Result file name for signal `id` and `kind` at this stage.
    pub fn file_name(self, id: SignalId, kind: ExtremumKind) -> String {
        match self {
            ExtremaStage::Detected => format!("S{id}_{kind}.dat"),
            ExtremaStage::Filtered => format!("S{id}_filtered_{kind}.dat"),
        }
    }
}

/// Directory receiving the result files of one run.
#[derive(Debug, Clone)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    /// Use `root` as the output directory. Nothing is touched until
    /// [`prepare`](Self::prepare) or a write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory path.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Create the directory if needed and delete the `.dat` files of an
    /// earlier run. Other files are left alone. Returns the number of
    /// removed files.
    pub fn prepare(&self) -> Result<usize> {
        fs::create_dir_all(&self.root).map_err(|e| Error::write(&self.root, e))?;

        let entries = fs::read_dir(&self.root).map_err(|e| Error::unavailable(&self.root, e))?;
        let mut removed = 0;
        for entry in entries {
            let path = entry.map_err(|e| Error::unavailable(&self.root, e))?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "dat") {
                fs::remove_file(&path).map_err(|e| Error::write(&path, e))?;
                removed += 1;
            }
        }

        tracing::debug!(dir = %self.root.display(), removed, "output directory prepared");
        Ok(removed)
    }

    /// Write `set` as `time value` lines for signal `id`.
    pub fn write_extrema(
        &self,
        set: &ExtremumSet,
        id: SignalId,
        stage: ExtremaStage,
    ) -> Result<PathBuf> {
        let path = self.root.join(stage.file_name(id, set.kind()));
        write_rows(&path, set.iter().map(|e| format!("{} {}", e.time, e.value)))?;

        tracing::debug!(path = %path.display(), rows = set.len(), "extrema written");
        Ok(path)
    }

    /// Write the signed and unsigned phase files for `table`. Returns the
    /// paths of the signed and the unsigned file, in that order.
    pub fn write_phase_table(&self, table: &PhaseTable) -> Result<(PathBuf, PathBuf)> {
        let signed = self.root.join(format!("phase180_{}.dat", table.kind));
        let unsigned = self.root.join(format!("phase360_{}.dat", table.kind));

        write_rows(&signed, phase_rows(table, |s| s.phase_signed))?;
        write_rows(&unsigned, phase_rows(table, |s| s.phase_unsigned))?;

        tracing::debug!(
            kind = %table.kind,
            pairs = table.pairs.len(),
            rows = table.rows.len(),
            "phase table written"
        );
        Ok((signed, unsigned))
    }
}

/// Render each table row as `time v1 ... vk`, skipping pairs without a
/// sample.
fn phase_rows(
    table: &PhaseTable,
    value: impl Fn(&PhaseSample) -> f64,
) -> impl Iterator<Item = String> {
    table.rows.iter().map(move |row| {
        let mut line = row.time.to_string();
        for sample in row.entries.iter().flatten() {
            line.push(' ');
            line.push_str(&value(sample).to_string());
        }
        line
    })
}

fn write_rows(path: &Path, rows: impl Iterator<Item = String>) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::write(path, e))?;
    let mut writer = BufWriter::new(file);
    for row in rows {
        writeln!(writer, "{row}").map_err(|e| Error::write(path, e))?;
    }
    writer.flush().map_err(|e| Error::write(path, e))
}
