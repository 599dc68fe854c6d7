//! `Floor` — one floor of the building and its physical waiting queue.

use lift_core::FloorId;

use crate::Passenger;

/// A floor.  Identity is the 0-indexed floor number; the only mutable state
/// is the FIFO queue of passengers physically waiting at the floor.
#[derive(Debug, Default)]
pub struct Floor {
    id: FloorId,
    waiting: Vec<Passenger>,
}

impl Floor {
    pub fn new(id: FloorId) -> Self {
        Self {
            id,
            waiting: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> FloorId {
        self.id
    }

    /// Passengers waiting at this floor, in arrival order.
    #[inline]
    pub fn waiting(&self) -> &[Passenger] {
        &self.waiting
    }

    #[inline]
    pub fn has_waiting(&self) -> bool {
        !self.waiting.is_empty()
    }

    /// Append a newly arrived passenger to the back of the queue.
    pub fn push_waiting(&mut self, passenger: Passenger) {
        self.waiting.push(passenger);
    }

    /// Remove and return up to `limit` passengers satisfying `pred`, in queue
    /// order.  Used by the simulator when a car opens its doors: `limit` is
    /// the car's remaining capacity and `pred` the direction compatibility
    /// check.
    pub fn take_waiting_if<F>(&mut self, limit: usize, mut pred: F) -> Vec<Passenger>
    where
        F: FnMut(&Passenger) -> bool,
    {
        let mut taken = Vec::new();
        let mut i = 0;
        while i < self.waiting.len() && taken.len() < limit {
            if pred(&self.waiting[i]) {
                taken.push(self.waiting.remove(i));
            } else {
                i += 1;
            }
        }
        taken
    }
}
