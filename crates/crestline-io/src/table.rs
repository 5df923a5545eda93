//! Whitespace-delimited signal tables.

use crate::{Error, Result};
use crestline_core::{Sample, SampleSource, SignalId};
use std::path::Path;

/// A fully loaded table: one time column plus one column per signal.
///
/// Blank lines and lines whose first non-blank character is `#` are skipped.
/// Every data row must have as many columns as the first one.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalTable {
    time: Vec<f64>,
    columns: Vec<Vec<f64>>,
}

impl SignalTable {
    /// Read and parse the table at `path`.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::unavailable(path, e))?;
        let table = Self::parse(&text)?;

        tracing::info!(
            path = %path.display(),
            rows = table.row_count(),
            signals = table.signal_count(),
            "signal table loaded"
        );

        Ok(table)
    }

    /// Parse a table from text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut time = Vec::new();
        let mut columns: Vec<Vec<f64>> = Vec::new();
        let mut width = None;

        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let row = trimmed
                .split_whitespace()
                .map(|token| {
                    token.parse::<f64>().map_err(|_| Error::Parse {
                        line: line_no,
                        token: token.to_string(),
                    })
                })
                .collect::<Result<Vec<f64>>>()?;

            let expected = *width.get_or_insert_with(|| {
                columns = vec![Vec::new(); row.len() - 1];
                row.len()
            });
            if row.len() != expected {
                return Err(Error::RaggedRow {
                    line: line_no,
                    expected,
                    found: row.len(),
                });
            }

            time.push(row[0]);
            for (column, &value) in columns.iter_mut().zip(&row[1..]) {
                column.push(value);
            }
        }

        if time.is_empty() {
            return Err(Error::NoData);
        }

        tracing::debug!(rows = time.len(), columns = columns.len() + 1, "parsed signal table");
        Ok(Self { time, columns })
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.time.len()
    }

    /// Number of signal columns (all columns but the time column).
    pub fn signal_count(&self) -> usize {
        self.columns.len()
    }

    /// The time column.
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Values of signal `id` (1-based).
    pub fn column(&self, id: SignalId) -> Option<&[f64]> {
        id.checked_sub(1)
            .and_then(|i| self.columns.get(i))
            .map(Vec::as_slice)
    }

    /// First and last time value.
    pub fn time_span(&self) -> Option<(f64, f64)> {
        Some((*self.time.first()?, *self.time.last()?))
    }
}

impl SampleSource for SignalTable {
    fn signal_count(&self) -> usize {
        self.columns.len()
    }

    fn samples(&self, id: SignalId) -> crestline_core::Result<Vec<Sample>> {
        let column = self.column(id).ok_or_else(|| {
            crestline_core::Error::DataSourceUnavailable(format!(
                "signal {id} not in table with {} signals",
                self.columns.len()
            ))
        })?;
        Ok(self
            .time
            .iter()
            .zip(column)
            .map(|(&time, &value)| Sample::new(time, value))
            .collect())
    }
}
