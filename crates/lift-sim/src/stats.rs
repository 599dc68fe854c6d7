//! Trip statistics: the `StatsSink` boundary and the default collector.

/// Length of one report interval in simulated seconds.
pub const REPORT_INTERVAL_SECS: f64 = 3_600.0;

// ── StatsInterval ─────────────────────────────────────────────────────────────

/// Waiting-time accumulator over one stretch of simulated time.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct StatsInterval {
    start_secs: f64,
    num_exits: u64,
    total_wait_secs: f64,
    total_squared_wait_secs: f64,
}

impl StatsInterval {
    pub fn new(start_secs: f64) -> Self {
        Self {
            start_secs,
            ..Self::default()
        }
    }

    /// Fold in one completed trip's queue wait.
    pub fn record(&mut self, wait_secs: f64) {
        self.num_exits += 1;
        self.total_wait_secs += wait_secs;
        self.total_squared_wait_secs += wait_secs * wait_secs;
    }

    #[inline]
    pub fn start_secs(&self) -> f64 {
        self.start_secs
    }

    #[inline]
    pub fn num_exits(&self) -> u64 {
        self.num_exits
    }

    #[inline]
    pub fn total_wait_secs(&self) -> f64 {
        self.total_wait_secs
    }

    #[inline]
    pub fn total_squared_wait_secs(&self) -> f64 {
        self.total_squared_wait_secs
    }

    /// Mean wait over the interval; zero when nothing completed.
    pub fn average_wait_time(&self) -> f64 {
        if self.num_exits == 0 {
            0.0
        } else {
            self.total_wait_secs / self.num_exits as f64
        }
    }

    /// Mean squared wait over the interval; zero when nothing completed.
    /// Squaring penalises long outlier waits, which plain averages hide.
    pub fn average_squared_wait_time(&self) -> f64 {
        if self.num_exits == 0 {
            0.0
        } else {
            self.total_squared_wait_secs / self.num_exits as f64
        }
    }
}

// ── StatsSink ─────────────────────────────────────────────────────────────────

/// Where completed-trip measurements land.
///
/// The simulator reports each trip exactly once, at exit time, with the
/// passenger's queue wait (arrival to boarding).  The poll interval is a
/// rolling window an external reader — a learning harness, a progress
/// printer — can reset between reads; the simulator never resets it.
pub trait StatsSink {
    /// One trip completed at `now_secs` after waiting `wait_secs` in queue.
    fn record_trip(&mut self, wait_secs: f64, now_secs: f64);

    /// A report-interval boundary passed at `now_secs`.
    fn on_interval(&mut self, now_secs: f64);

    /// The rolling window since the last [`reset_poll_interval`][Self::reset_poll_interval].
    fn poll_interval(&self) -> &StatsInterval;

    /// Start a fresh rolling window at `now_secs`.
    fn reset_poll_interval(&mut self, now_secs: f64);

    /// Mean squared wait over the whole run so far.
    fn average_squared_wait_time(&self) -> f64;
}

// ── SimulatorStats ────────────────────────────────────────────────────────────

/// One completed trip, in completion order.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Completion {
    pub wait_secs: f64,
    pub completed_secs: f64,
}

/// The default collector: a whole-run interval, the resettable poll
/// interval, hourly snapshots, and the raw completion log (the ground truth
/// for determinism checks and post-run analysis).
#[derive(Debug, Default)]
pub struct SimulatorStats {
    global: StatsInterval,
    poll: StatsInterval,
    current_hour: StatsInterval,
    hours: Vec<StatsInterval>,
    completions: Vec<Completion>,
}

impl SimulatorStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// The whole-run accumulator.
    #[inline]
    pub fn global(&self) -> &StatsInterval {
        &self.global
    }

    /// Closed hourly intervals, oldest first.  The hour in progress is not
    /// included until its boundary passes.
    #[inline]
    pub fn hourly(&self) -> &[StatsInterval] {
        &self.hours
    }

    /// Every completed trip, in completion order.
    #[inline]
    pub fn completions(&self) -> &[Completion] {
        &self.completions
    }
}

impl StatsSink for SimulatorStats {
    fn record_trip(&mut self, wait_secs: f64, now_secs: f64) {
        self.global.record(wait_secs);
        self.poll.record(wait_secs);
        self.current_hour.record(wait_secs);
        self.completions.push(Completion {
            wait_secs,
            completed_secs: now_secs,
        });
    }

    fn on_interval(&mut self, now_secs: f64) {
        self.hours.push(self.current_hour);
        self.current_hour = StatsInterval::new(now_secs);
    }

    fn poll_interval(&self) -> &StatsInterval {
        &self.poll
    }

    fn reset_poll_interval(&mut self, now_secs: f64) {
        self.poll = StatsInterval::new(now_secs);
    }

    fn average_squared_wait_time(&self) -> f64 {
        self.global.average_squared_wait_time()
    }
}
