//! `lift-building` — the building model for the lift simulator.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`direction`] | `Direction` enum (`Up`, `Down`, `None`)                       |
//! | [`passenger`] | `Passenger` — one origin→destination travel request           |
//! | [`floor`]     | `Floor` — per-floor physical waiting queue                    |
//! | [`car`]       | `ElevatorCar` state machine, `CarConfig`, `CarEvent`          |
//! | [`building`]  | `Building` — immutable topology: floor range + car roster     |
//! | [`control`]   | `ControlSystem` — shared hall-call queue, passenger identity  |
//! | [`error`]     | `BuildingError`, `BuildingResult<T>`                          |
//!
//! # Ownership discipline
//!
//! Each queue has exactly one writer: the `Floor` owns the physical waiting
//! queue, the `ControlSystem` owns the hall-call queue, and each
//! `ElevatorCar` owns its onboard set and car-call queue.  `Passenger` is
//! `Copy`, so a record may appear in both a floor queue and the hall queue
//! without shared-ownership ceremony; the simulator keeps the copies in sync
//! through the operations on this crate, never by direct field writes.
//!
//! State transitions on `ElevatorCar` are only reachable through its
//! operations (`dispatch_to`, `stop_at_next`, `open_doors`, `step`), which
//! reject contract violations with `BuildingError::InvalidTransition` instead
//! of silently corrupting motion state.

pub mod building;
pub mod car;
pub mod control;
pub mod direction;
pub mod error;
pub mod floor;
pub mod passenger;


pub use building::Building;
pub use car::{CarConfig, CarEvent, CarState, ElevatorCar};
pub use control::ControlSystem;
pub use direction::Direction;
pub use error::{BuildingError, BuildingResult};
pub use floor::Floor;
pub use passenger::Passenger;
