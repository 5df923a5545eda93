//! File layer for the crestline analysis pipeline.
//!
//! This crate provides:
//!
//! - **Signal tables**: [`SignalTable`] reads a whitespace-delimited text table
//!   whose first column is time and whose remaining columns are signals. It
//!   implements [`crestline_core::SampleSource`].
//! - **Result files**: [`OutputDir`] writes extrema and phase tables as
//!   plottable `.dat` files.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use crestline_core::{AnalysisParams, ExtremumKind, SignalSet};
//! use crestline_io::{ExtremaStage, OutputDir, SignalTable};
//!
//! let table = SignalTable::read("signals.txt")?;
//! let mut set = SignalSet::from_source(&table, None, AnalysisParams::default())?;
//! set.consolidate_all()?;
//!
//! let out = OutputDir::new("output");
//! out.prepare()?;
//! for signal in set.signals() {
//!     out.write_extrema(signal.crests(), signal.id(), ExtremaStage::Filtered)?;
//! }
//! out.write_phase_table(&set.aggregate_phase(ExtremumKind::Crest))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod output;
mod table;

use std::path::PathBuf;

pub use output::{ExtremaStage, OutputDir};
pub use table::SignalTable;

/// Error types for table reading and result writing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input file could not be opened or read.
    #[error("cannot read '{path}': {source}")]
    Unavailable {
        /// Path of the input file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A token is not a number.
    #[error("line {line}: cannot parse {token:?} as a number")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// A data row has a different column count than the first one.
    #[error("line {line}: expected {expected} columns, found {found}")]
    RaggedRow {
        /// 1-based line number.
        line: usize,
        /// Column count of the first data row.
        expected: usize,
        /// Column count of this row.
        found: usize,
    },

    /// The table holds no data row.
    #[error("table holds no data rows")]
    NoData,

    /// A result file or the output directory could not be written.
    #[error("cannot write '{path}': {source}")]
    Write {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an unavailable input error.
    pub fn unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Unavailable {
            path: path.into(),
            source,
        }
    }

    /// Create a write error.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Write {
            path: path.into(),
            source,
        }
    }
}

/// Convenience result type for table and result file operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn mock_io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "mock")
    }

    #[test]
    fn path_errors_name_the_path() {
        let err = Error::unavailable("/data/in.txt", mock_io_err());
        assert!(err.to_string().contains("/data/in.txt"));
        assert!(err.source().is_some());

        let err = Error::write("/out/S1_crest.dat", mock_io_err());
        assert!(err.to_string().starts_with("cannot write"));
        assert!(err.source().is_some());
    }

    #[test]
    fn ragged_row_display() {
        let err = Error::RaggedRow {
            line: 4,
            expected: 3,
            found: 2,
        };
        assert_eq!(err.to_string(), "line 4: expected 3 columns, found 2");
    }

    #[test]
    fn parse_display_quotes_token() {
        let err = Error::Parse {
            line: 2,
            token: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "line 2: cannot parse \"abc\" as a number");
        assert!(err.source().is_none());
    }
}
