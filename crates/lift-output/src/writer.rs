//! The `OutputWriter` trait implemented by all backend writers.

use crate::{AswtRow, OutputResult, PolicyUsageRow};

/// Trait implemented by report backends.
pub trait OutputWriter {
    /// Write a batch of per-hour policy-usage rows.
    fn write_policy_usage(&mut self, rows: &[PolicyUsageRow]) -> OutputResult<()>;

    /// Write one per-episode waiting-time row.
    fn write_aswt(&mut self, row: &AswtRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
