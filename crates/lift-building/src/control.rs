//! `ControlSystem` — the shared hall-call queue and passenger identity source.
//!
//! A passenger enters the hall queue on arrival and leaves it when a car
//! *commits* to serving it — not when it boards.  A committed passenger keeps
//! standing in its floor's physical queue until a car actually opens its
//! doors there; the hall queue only tracks who still needs an assignment.
//!
//! Keyed by `PassengerId` in a `BTreeMap`: IDs are allocated monotonically,
//! so iteration order is arrival order and every scan over the queue is
//! deterministic.

use std::collections::BTreeMap;

use lift_core::{FloorId, PassengerId, Tick};

use crate::{BuildingResult, Passenger};

/// Owns the hall-call queue and allocates passenger identities.
#[derive(Debug, Default)]
pub struct ControlSystem {
    hall: BTreeMap<PassengerId, Passenger>,
    next_id: u64,
}

impl ControlSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a passenger for a new travel request and register its hall
    /// call.  Rejects same-floor requests.
    pub fn admit(
        &mut self,
        arrival_floor: FloorId,
        destination_floor: FloorId,
        arrival_tick: Tick,
    ) -> BuildingResult<Passenger> {
        let passenger = Passenger::new(
            PassengerId(self.next_id),
            arrival_floor,
            destination_floor,
            arrival_tick,
        )?;
        self.next_id += 1;
        self.hall.insert(passenger.id, passenger);
        Ok(passenger)
    }

    /// A car has committed to serving this call: drop it from the queue.
    /// Returns the passenger, or `None` if the call was already taken.
    pub fn commit(&mut self, id: PassengerId) -> Option<Passenger> {
        self.hall.remove(&id)
    }

    /// Remove a call without a commitment — used when the passenger boards a
    /// car that happened to stop at its floor before any assignment.
    pub fn remove(&mut self, id: PassengerId) -> Option<Passenger> {
        self.hall.remove(&id)
    }

    #[inline]
    pub fn contains(&self, id: PassengerId) -> bool {
        self.hall.contains_key(&id)
    }

    /// Unassigned hall calls in arrival order.
    pub fn hall_calls(&self) -> impl Iterator<Item = &Passenger> {
        self.hall.values()
    }

    /// Snapshot of the queue for iterate-then-apply scans.  `Passenger` is
    /// `Copy`, so this is a flat memcpy of the live queue.
    pub fn snapshot(&self) -> Vec<Passenger> {
        self.hall.values().copied().collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hall.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hall.is_empty()
    }
}
