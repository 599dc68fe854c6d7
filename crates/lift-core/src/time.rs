//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter.  The
//! mapping to simulated seconds is held in `SimClock`:
//!
//!   sim_time_secs = tick * tick_duration_secs
//!
//! Using an integer tick as the canonical time unit means the event loop and
//! all determinism guarantees rest on exact integer arithmetic; seconds are
//! derived, never accumulated.
//!
//! The default tick duration is 0.01 s, matching the resolution elevator-car
//! physics needs to resolve door timers and floor crossings.  The rest of the
//! engine is agnostic to the value.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
///
/// Stored as `u64` to avoid overflow: at 0.01 s per tick a u64 lasts ~5.8
/// billion years, far longer than any conceivable run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and simulated seconds.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many simulated seconds one tick represents.  Default: 0.01.
    pub tick_duration_secs: f64,
    /// The current tick — advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    /// Create a clock at tick 0 with the given resolution.
    pub fn new(tick_duration_secs: f64) -> Self {
        Self {
            tick_duration_secs,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn now_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.tick_duration_secs
    }

    /// Simulated seconds elapsed since an earlier reading of `now_secs()`.
    #[inline]
    pub fn elapsed_since(&self, earlier_secs: f64) -> f64 {
        self.now_secs() - earlier_secs
    }

    /// How many ticks span `secs` seconds? (rounds up — events fire no later
    /// than requested)
    #[inline]
    pub fn secs_to_ticks(&self, secs: f64) -> u64 {
        (secs / self.tick_duration_secs).ceil() as u64
    }

    /// Break elapsed time into (hour, minute, second) components from sim
    /// start.  Useful for human-readable logging without a datetime library.
    pub fn elapsed_hms(&self) -> (u64, u32, u32) {
        let total_secs = self.now_secs().max(0.0) as u64;
        let hours = total_secs / 3_600;
        let minutes = ((total_secs % 3_600) / 60) as u32;
        let seconds = (total_secs % 60) as u32;
        (hours, minutes, seconds)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.elapsed_hms();
        write!(f, "{} ({:02}:{:02}:{:02})", self.current_tick, h, m, s)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a TOML/JSON file by the application crate and passed
/// to the simulation builder, which validates it.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Simulated seconds per tick.  Must be positive.  Default: 0.01.
    pub tick_duration_secs: f64,

    /// Simulated seconds to run before `advance()` reports completion.
    /// For one simulated day: 24 * 60 * 60.
    pub horizon_secs: f64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl SimConfig {
    /// A one-day run at 0.01 s resolution with the given seed.
    pub fn one_day(seed: u64) -> Self {
        Self {
            tick_duration_secs: 0.01,
            horizon_secs: 24.0 * 60.0 * 60.0,
            seed,
        }
    }

    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick((self.horizon_secs / self.tick_duration_secs).ceil() as u64)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_secs)
    }
}
