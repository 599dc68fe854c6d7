//! `lift-output` — report writers for the lift simulator.
//!
//! Two reports, both CSV:
//!
//! | File                | Contents                                          |
//! |---------------------|---------------------------------------------------|
//! | `policy_usage.csv`  | Per-hour count of decision intervals each action  |
//! |                     | of the meta policy was active                     |
//! | `learning_aswt.csv` | Average squared waiting time per learning episode |
//!
//! Backends implement [`OutputWriter`]; a harness folds the meta policy's
//! interval choices into rows with [`hourly_usage`] and hands them over at
//! the end of a run.

pub mod csv;
pub mod error;
pub mod report;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use report::hourly_usage;
pub use row::{AswtRow, PolicyUsageRow};
pub use writer::OutputWriter;
