//! Error types for lift-policy.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("invalid zone count {num_zones} for {num_floors} floors and {num_cars} cars")]
    InvalidZoneCount {
        num_zones: u32,
        num_floors: u32,
        num_cars: u32,
    },

    #[error("meta-policy needs at least one sub-policy")]
    EmptyActionSpace,

    #[error("re-decision interval must be positive, got {0}")]
    InvalidDecisionInterval(f64),
}

pub type PolicyResult<T> = Result<T, PolicyError>;
