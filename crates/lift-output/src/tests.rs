//! Tests for the report writers.

use std::fs;

use crate::{AswtRow, CsvWriter, OutputError, OutputWriter, PolicyUsageRow, hourly_usage};

// ── hourly_usage ──────────────────────────────────────────────────────────────

mod report {
    use super::*;

    #[test]
    fn folds_choices_into_hour_rows() {
        // Three actions, two intervals per hour.
        let rows = hourly_usage(&[0, 1, 1, 1, 2], 3, 2);
        assert_eq!(
            rows,
            vec![
                PolicyUsageRow {
                    hour: 0,
                    usage: vec![1, 1, 0],
                },
                PolicyUsageRow {
                    hour: 1,
                    usage: vec![0, 2, 0],
                },
                // Trailing partial hour.
                PolicyUsageRow {
                    hour: 2,
                    usage: vec![0, 0, 1],
                },
            ]
        );
    }

    #[test]
    fn ignores_out_of_range_actions() {
        let rows = hourly_usage(&[0, 9], 2, 2);
        assert_eq!(rows[0].usage, vec![1, 0]);
    }

    #[test]
    fn degenerate_inputs_yield_nothing() {
        assert!(hourly_usage(&[0, 1], 2, 0).is_empty());
        assert!(hourly_usage(&[], 2, 4).is_empty());
    }
}

// ── CsvWriter ─────────────────────────────────────────────────────────────────

mod csv_writer {
    use super::*;

    #[test]
    fn writes_both_reports_with_headers() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = CsvWriter::new(dir.path(), &["lqf", "zoning"]).unwrap();

        writer
            .write_policy_usage(&[
                PolicyUsageRow {
                    hour: 0,
                    usage: vec![5, 1],
                },
                PolicyUsageRow {
                    hour: 1,
                    usage: vec![2, 4],
                },
            ])
            .unwrap();
        writer
            .write_aswt(&AswtRow {
                episode: 0,
                average_squared_wait_secs: 123.5,
            })
            .unwrap();
        writer.finish().unwrap();
        // finish is idempotent.
        writer.finish().unwrap();

        let usage = fs::read_to_string(dir.path().join("policy_usage.csv")).unwrap();
        assert_eq!(usage, "hour,lqf,zoning\n0,5,1\n1,2,4\n");

        let aswt = fs::read_to_string(dir.path().join("learning_aswt.csv")).unwrap();
        assert_eq!(aswt, "episode,average_squared_wait_secs\n0,123.5\n");
    }

    #[test]
    fn rejects_mismatched_usage_row() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = CsvWriter::new(dir.path(), &["lqf", "zoning"]).unwrap();
        let result = writer.write_policy_usage(&[PolicyUsageRow {
            hour: 0,
            usage: vec![1],
        }]);
        assert!(matches!(
            result,
            Err(OutputError::ActionCountMismatch {
                expected: 2,
                got: 1,
            })
        ));
    }
}
