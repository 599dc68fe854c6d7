//! Error types for lift-output.

use thiserror::Error;

/// Errors that can occur when writing simulation reports.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("usage row has {got} entries, writer was opened for {expected} actions")]
    ActionCountMismatch { expected: usize, got: usize },
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
