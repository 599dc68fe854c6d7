//! The `Passenger` record — one origin→destination travel request.

use lift_core::{FloorId, PassengerId, Tick};

use crate::{BuildingError, BuildingResult, Direction};

/// A passenger arrival event.
///
/// Created when the traffic generator emits a request, destroyed when the
/// passenger exits a car at its destination floor.  `Copy` on purpose: the
/// record travels between the floor queue, the hall-call queue, and a car's
/// onboard set as a plain value.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Passenger {
    pub id: PassengerId,
    pub arrival_floor: FloorId,
    pub destination_floor: FloorId,
    pub arrival_tick: Tick,
    /// Set by the simulator when the passenger steps into a car.
    pub boarded_tick: Option<Tick>,
}

impl Passenger {
    /// Create a passenger, rejecting the degenerate same-floor request.
    pub fn new(
        id: PassengerId,
        arrival_floor: FloorId,
        destination_floor: FloorId,
        arrival_tick: Tick,
    ) -> BuildingResult<Self> {
        if arrival_floor == destination_floor {
            return Err(BuildingError::SameFloor(arrival_floor));
        }
        Ok(Self {
            id,
            arrival_floor,
            destination_floor,
            arrival_tick,
            boarded_tick: None,
        })
    }

    /// The direction this passenger wants to travel.  Never `Direction::None`
    /// (ruled out at construction).
    #[inline]
    pub fn direction(&self) -> Direction {
        Direction::between(self.arrival_floor, self.destination_floor)
    }

    /// Wait time in ticks from arrival until `boarded_tick`.
    #[inline]
    pub fn wait_ticks(&self, boarded_tick: Tick) -> u64 {
        boarded_tick.since(self.arrival_tick)
    }
}
