//! Error types for lift-building.

use lift_core::{CarId, FloorId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildingError {
    #[error("passenger arrival and destination are both floor {0}")]
    SameFloor(FloorId),

    #[error("floor {0} is outside the building")]
    FloorOutOfRange(FloorId),

    #[error("a building needs at least 2 floors, got {0}")]
    TooFewFloors(u32),

    #[error("a building needs at least one elevator car")]
    NoCars,

    #[error("car {0} not found in the roster")]
    CarNotFound(CarId),

    #[error("car {car}: {operation} is not valid in state {state}")]
    InvalidTransition {
        car: CarId,
        operation: &'static str,
        state: &'static str,
    },

    #[error("car {car}: dispatch target {floor} equals the current floor")]
    DispatchToCurrentFloor { car: CarId, floor: FloorId },

    #[error("car {0} is at capacity")]
    CapacityExceeded(CarId),
}

pub type BuildingResult<T> = Result<T, BuildingError>;
