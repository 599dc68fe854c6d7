//! Aggregation from raw meta-policy choices to report rows.

use crate::PolicyUsageRow;

/// Fold the meta policy's per-interval action choices into per-hour usage
/// rows.
///
/// `action_usage` is the choice sequence, oldest first, one entry per
/// decision interval; `intervals_per_hour` is how many such intervals span
/// one hour.  The trailing partial hour, if any, becomes a final row.
/// Out-of-range action indices are ignored rather than panicking on a
/// malformed sequence.
pub fn hourly_usage(
    action_usage: &[usize],
    num_actions: usize,
    intervals_per_hour: usize,
) -> Vec<PolicyUsageRow> {
    if intervals_per_hour == 0 || num_actions == 0 {
        return Vec::new();
    }
    action_usage
        .chunks(intervals_per_hour)
        .enumerate()
        .map(|(hour, chunk)| {
            let mut usage = vec![0u64; num_actions];
            for &action in chunk {
                if action < num_actions {
                    usage[action] += 1;
                }
            }
            PolicyUsageRow {
                hour: hour as u64,
                usage,
            }
        })
        .collect()
}
