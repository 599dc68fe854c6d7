use lift_building::BuildingError;
use lift_core::FloorId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("traffic request names floor {0} outside the building")]
    RequestOutOfRange(FloorId),

    #[error("building error: {0}")]
    Building(#[from] BuildingError),
}

pub type SimResult<T> = Result<T, SimError>;
