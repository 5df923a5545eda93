//! Error type for the analysis core.

use thiserror::Error;

/// Errors raised by signal construction, consolidation and feature estimation.
///
/// Every variant is fatal for a batch run: the core never retries or repairs,
/// it hands the error back to the caller, which decides how to surface it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The sample source could not supply the requested signal.
    #[error("data source unavailable: {0}")]
    DataSourceUnavailable(String),

    /// A dataset that must be non-empty was empty.
    #[error("{operation}: empty dataset")]
    EmptyDataset {
        /// Operation that required the data.
        operation: &'static str,
    },

    /// Parallel time/value lists diverged, or an ordering invariant broke.
    #[error("{operation}: internal consistency violated: {detail}")]
    InternalConsistency {
        /// Operation that detected the violation.
        operation: &'static str,
        /// What was found.
        detail: String,
    },

    /// Access past the end of an extremum set.
    #[error("index {index} out of range for extremum set of length {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Length of the set.
        len: usize,
    },

    /// Signal ids are 1-based column numbers.
    #[error("invalid signal id {0}: ids start at 1")]
    InvalidSignalId(usize),

    /// The same signal id was supplied more than once.
    #[error("signal id {0} appears more than once")]
    DuplicateSignalId(usize),

    /// Analysis parameters out of their valid domain.
    #[error("invalid analysis parameters: {0}")]
    InvalidParams(String),
}

impl Error {
    /// Create an empty dataset error for `operation`.
    pub fn empty(operation: &'static str) -> Self {
        Error::EmptyDataset { operation }
    }

    /// Create an internal consistency error for `operation`.
    pub fn inconsistent(operation: &'static str, detail: impl Into<String>) -> Self {
        Error::InternalConsistency {
            operation,
            detail: detail.into(),
        }
    }
}

/// Convenience result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;
