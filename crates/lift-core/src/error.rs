//! Framework error type.
//!
//! Sub-crates define their own error enums and either convert into
//! `CoreError` via `From` impls or wrap it as one variant.  Both patterns are
//! acceptable; prefer whichever keeps error sites clean.

use thiserror::Error;

use crate::{CarId, FloorId};

/// The top-level error type for `lift-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("car {0} not found")]
    CarNotFound(CarId),

    #[error("floor {0} not found")]
    FloorNotFound(FloorId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `lift-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
