//! Policy commands — the actions a policy can request for a car.

use lift_core::{CarId, FloorId, PassengerId};

/// An action requested by a scheduling policy during one callback.
///
/// Commands are produced against a read-only [`PolicyContext`][crate::PolicyContext]
/// and consumed by the simulator, which routes them through the car
/// operations so the motion-state invariants hold.
///
/// `serving` names the hall call the command commits to.  When the simulator
/// applies such a command successfully it removes that passenger from the
/// hall-call queue — assignment, not boarding, is what clears a hall call.
/// Commands with `serving: None` (zone parking, lobby returns) leave the
/// queue untouched.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Command {
    /// Commit an idle car to travel toward `floor`.
    DispatchTo {
        car: CarId,
        floor: FloorId,
        serving: Option<PassengerId>,
    },

    /// Make a moving car stop at the next floor it reaches.
    StopAtNext {
        car: CarId,
        serving: Option<PassengerId>,
    },
}

impl Command {
    /// The car this command addresses.
    #[inline]
    pub fn car(&self) -> CarId {
        match *self {
            Command::DispatchTo { car, .. } | Command::StopAtNext { car, .. } => car,
        }
    }

    /// The hall call this command commits to, if any.
    #[inline]
    pub fn serving(&self) -> Option<PassengerId> {
        match *self {
            Command::DispatchTo { serving, .. } | Command::StopAtNext { serving, .. } => serving,
        }
    }
}
