//! `lift-policy` — the scheduling-policy contract and its implementations.
//!
//! # Crate layout
//!
//! | Module                 | Contents                                                    |
//! |------------------------|-------------------------------------------------------------|
//! | [`command`]            | `Command` — the actions a policy can request                |
//! | [`context`]            | `PolicyContext<'a>` — read-only per-tick snapshot           |
//! | [`policy`]             | `SchedulingPolicy` trait, `NoopPolicy`                      |
//! | [`longest_queue_first`]| Longest-queue-first dispatch                                |
//! | [`zoning`]             | Static zoning with spillover floor partition                |
//! | [`round_robin`]        | Rotating-cursor dispatch, optional lobby parking            |
//! | [`three_passage`]      | Cost-based group dispatch by passage class                  |
//! | [`learning`]           | `ActionSelector` boundary + `LearnedMetaPolicy`             |
//! | [`error`]              | `PolicyError`, `PolicyResult<T>`                            |
//!
//! # Design notes
//!
//! Policies follow a snapshot-then-apply discipline:
//!
//! 1. **Decide** — every callback receives a read-only [`PolicyContext`]
//!    (tick, clock seconds, building, hall-call queue) and returns a
//!    `Vec<Command>`.  No mutation happens here, so a policy can scan the
//!    live queues without iterate-while-mutate hazards.
//!
//! 2. **Apply** — the simulator consumes the commands through the car
//!    operations, which enforce the motion-state invariants.  A command that
//!    is infeasible by the time it is applied is a contract violation and
//!    fails fast.
//!
//! Returning no commands is the normal "defer" outcome: hall calls simply
//! stay queued until some later tick finds a feasible car.

pub mod command;
pub mod context;
pub mod error;
pub mod learning;
pub mod longest_queue_first;
pub mod policy;
pub mod round_robin;
pub mod three_passage;
pub mod zoning;

#[cfg(test)]
mod tests;

pub use command::Command;
pub use context::PolicyContext;
pub use error::{PolicyError, PolicyResult};
pub use learning::{ActionSelector, LearnedMetaPolicy};
pub use longest_queue_first::LongestQueueFirst;
pub use policy::{NoopPolicy, SchedulingPolicy};
pub use round_robin::RoundRobin;
pub use three_passage::ThreePassageGroupElevator;
pub use zoning::Zoning;
