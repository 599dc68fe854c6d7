//! Fluent builder for constructing a [`Simulator`].

use lift_building::{Building, ControlSystem};
use lift_core::{SimConfig, SimRng};
use lift_policy::SchedulingPolicy;

use crate::{
    REPORT_INTERVAL_SECS, ScriptedTraffic, SimError, SimResult, Simulator, SimulatorStats,
    StatsSink, TrafficGenerator,
};

/// Fluent builder for [`Simulator<P, T, S>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — horizon, seed, tick duration
/// - [`Building`] — floors and car roster (validated at construction)
/// - `P: SchedulingPolicy` — the dispatch algorithm
///
/// # Optional inputs (have defaults)
///
/// | Method        | Default                          |
/// |---------------|----------------------------------|
/// | `.traffic(t)` | `ScriptedTraffic::empty()`       |
/// | `.stats(s)`   | `SimulatorStats::new()`          |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, building, LongestQueueFirst)
///     .traffic(PoissonTraffic::new(rng, 16, 0.2, 0.01, 0.5))
///     .build()?;
/// sim.run()?;
/// ```
pub struct SimBuilder<P: SchedulingPolicy, T: TrafficGenerator, S: StatsSink> {
    config: SimConfig,
    building: Building,
    policy: P,
    traffic: T,
    stats: S,
}

impl<P: SchedulingPolicy> SimBuilder<P, ScriptedTraffic, SimulatorStats> {
    /// Create a builder with all required inputs and default collaborators.
    pub fn new(config: SimConfig, building: Building, policy: P) -> Self {
        Self {
            config,
            building,
            policy,
            traffic: ScriptedTraffic::empty(),
            stats: SimulatorStats::new(),
        }
    }
}

impl<P: SchedulingPolicy, T: TrafficGenerator, S: StatsSink> SimBuilder<P, T, S> {
    /// Replace the traffic generator.
    pub fn traffic<T2: TrafficGenerator>(self, traffic: T2) -> SimBuilder<P, T2, S> {
        SimBuilder {
            config: self.config,
            building: self.building,
            policy: self.policy,
            traffic,
            stats: self.stats,
        }
    }

    /// Replace the stats sink.
    pub fn stats<S2: StatsSink>(self, stats: S2) -> SimBuilder<P, T, S2> {
        SimBuilder {
            config: self.config,
            building: self.building,
            policy: self.policy,
            traffic: self.traffic,
            stats,
        }
    }

    /// Validate the configuration and return a ready-to-run [`Simulator`].
    ///
    /// The active policy's `changed_to` fires here, before the first tick.
    pub fn build(self) -> SimResult<Simulator<P, T, S>> {
        if !self.config.tick_duration_secs.is_finite() || self.config.tick_duration_secs <= 0.0 {
            return Err(SimError::Config(format!(
                "tick duration must be positive, got {}",
                self.config.tick_duration_secs
            )));
        }
        if !self.config.horizon_secs.is_finite() || self.config.horizon_secs <= 0.0 {
            return Err(SimError::Config(format!(
                "horizon must be positive, got {}",
                self.config.horizon_secs
            )));
        }

        let mut sim = Simulator {
            clock: self.config.make_clock(),
            rng: SimRng::new(self.config.seed),
            config: self.config,
            building: self.building,
            control: ControlSystem::new(),
            policy: self.policy,
            traffic: self.traffic,
            stats: self.stats,
            next_interval_secs: REPORT_INTERVAL_SECS,
        };
        sim.activate_policy();
        Ok(sim)
    }
}
