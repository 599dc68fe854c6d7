//! `lift-sim` — tick loop orchestrator for the lift simulator.
//!
//! # Five-phase tick
//!
//! ```text
//! advance():
//!   ① Horizon   — report completion once now_secs() reaches the horizon.
//!   ② Arrivals  — traffic requests become passengers: floor queue + hall
//!                 queue, then `passenger_arrived` per passenger.
//!   ③ Update    — the active policy sees the whole system once per tick.
//!   ④ Physics   — each car integrates motion in roster order; a stop
//!                 serves exits then boards FIFO; `Turned` / `BecameIdle`
//!                 fire their callbacks; idle cars standing where
//!                 passengers wait open their doors without a command.
//!   ⑤ Interval  — roll the hourly stats window; advance the clock.
//! ```
//!
//! Commands returned by a callback are applied immediately after it,
//! through the car operations that enforce the motion-state invariants.
//!
//! # Determinism
//!
//! A fixed seed and a fixed policy produce bit-identical runs: the traffic
//! stream is seeded, the hall queue iterates in arrival order, and cars are
//! stepped in roster order.  Nothing reads wall-clock time or global RNG
//! state.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lift_building::{Building, CarConfig};
//! use lift_core::{SimConfig, SimRng};
//! use lift_policy::LongestQueueFirst;
//! use lift_sim::{PoissonTraffic, SimBuilder};
//!
//! let config = SimConfig::one_day(42);
//! let building = Building::uniform(16, 4, CarConfig::default())?;
//! let traffic = PoissonTraffic::new(SimRng::new(config.seed), 16, 0.2, 0.01, 0.5);
//! let mut sim = SimBuilder::new(config, building, LongestQueueFirst)
//!     .traffic(traffic)
//!     .build()?;
//! sim.run()?;
//! println!("ASWT: {}", sim.stats.average_squared_wait_time());
//! ```

pub mod builder;
pub mod error;
pub mod sim;
pub mod stats;
pub mod traffic;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use sim::Simulator;
pub use stats::{Completion, REPORT_INTERVAL_SECS, SimulatorStats, StatsInterval, StatsSink};
pub use traffic::{PoissonTraffic, ScriptedTraffic, TrafficGenerator, TravelRequest};
