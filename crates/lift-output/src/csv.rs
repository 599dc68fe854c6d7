//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `policy_usage.csv`
//! - `learning_aswt.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AswtRow, OutputError, OutputResult, PolicyUsageRow};

/// Writes the two simulator reports as CSV files.
pub struct CsvWriter {
    usage: Writer<File>,
    aswt: Writer<File>,
    num_actions: usize,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header
    /// rows.  `action_names` labels the usage columns, one per action of
    /// the meta policy, in action-index order.
    pub fn new(dir: &Path, action_names: &[&str]) -> OutputResult<Self> {
        let mut usage = Writer::from_path(dir.join("policy_usage.csv"))?;
        let mut header = vec!["hour"];
        header.extend_from_slice(action_names);
        usage.write_record(&header)?;

        let mut aswt = Writer::from_path(dir.join("learning_aswt.csv"))?;
        aswt.write_record(["episode", "average_squared_wait_secs"])?;

        Ok(Self {
            usage,
            aswt,
            num_actions: action_names.len(),
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_policy_usage(&mut self, rows: &[PolicyUsageRow]) -> OutputResult<()> {
        for row in rows {
            if row.usage.len() != self.num_actions {
                return Err(OutputError::ActionCountMismatch {
                    expected: self.num_actions,
                    got: row.usage.len(),
                });
            }
            let mut record = vec![row.hour.to_string()];
            record.extend(row.usage.iter().map(u64::to_string));
            self.usage.write_record(&record)?;
        }
        Ok(())
    }

    fn write_aswt(&mut self, row: &AswtRow) -> OutputResult<()> {
        self.aswt.write_record(&[
            row.episode.to_string(),
            row.average_squared_wait_secs.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.usage.flush()?;
        self.aswt.flush()?;
        Ok(())
    }
}
