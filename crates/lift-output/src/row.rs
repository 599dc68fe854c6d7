//! Plain data row types written by output backends.

/// How often each action of the meta policy was active during one hour.
///
/// `usage[i]` counts the decision intervals action `i` was the active
/// sub-policy; the entries of one row sum to the intervals per hour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyUsageRow {
    pub hour: u64,
    pub usage: Vec<u64>,
}

/// Average squared waiting time of one learning episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AswtRow {
    pub episode: u64,
    pub average_squared_wait_secs: f64,
}
