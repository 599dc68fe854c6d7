//! `lift-core` — foundational types for the `lift` elevator-bank simulator.
//!
//! This crate is a dependency of every other `lift-*` crate.  It intentionally
//! has no `lift-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                          |
//! |-----------|---------------------------------------------------|
//! | [`ids`]   | `CarId`, `FloorId`, `PassengerId`                 |
//! | [`time`]  | `Tick`, `SimClock`, `SimConfig`                   |
//! | [`rng`]   | `SimRng` — explicitly seeded simulation RNG       |
//! | [`error`] | `CoreError`, `CoreResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{CarId, FloorId, PassengerId};
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, Tick};
