//! The `SchedulingPolicy` trait — the main extension point for dispatch code.

use lift_building::Passenger;
use lift_core::CarId;

use crate::{Command, PolicyContext};

/// Pluggable dispatch behavior.
///
/// The engine consults the active policy through a fixed capability set:
/// once per tick via [`update`][Self::update], and on specific transitions
/// via the remaining callbacks.  Variants implement the subset they care
/// about; every method defaults to "no commands" — deferring a hall call is
/// the expected steady-state outcome, not an error.
///
/// # Contract
///
/// Policies must not violate car invariants: never retarget a moving car
/// (only [`Command::StopAtNext`] touches one), and never dispatch an idle
/// car to its own floor.  Both are rejected by the car operations when the
/// simulator applies the commands, and surface as errors from `advance()`.
///
/// New policies are added by implementing this trait, never by changing
/// engine internals.  The trait is object-safe so a meta-policy can hold
/// `Box<dyn SchedulingPolicy>` sub-policies as its action space.
pub trait SchedulingPolicy {
    /// Short stable name, used in reports and logs.
    fn name(&self) -> &'static str;

    /// A new passenger registered a hall call this tick.
    fn passenger_arrived(
        &mut self,
        _ctx: &PolicyContext<'_>,
        _passenger: &Passenger,
    ) -> Vec<Command> {
        Vec::new()
    }

    /// A passenger boarded `car`.
    fn passenger_boarded(
        &mut self,
        _ctx: &PolicyContext<'_>,
        _car: CarId,
        _passenger: &Passenger,
    ) -> Vec<Command> {
        Vec::new()
    }

    /// A passenger exited `car` at its destination.
    fn passenger_exited(
        &mut self,
        _ctx: &PolicyContext<'_>,
        _car: CarId,
        _passenger: &Passenger,
    ) -> Vec<Command> {
        Vec::new()
    }

    /// Periodic whole-system view, fired exactly once per tick.
    fn update(&mut self, _ctx: &PolicyContext<'_>) -> Vec<Command> {
        Vec::new()
    }

    /// `car` exhausted its commitments and went idle.
    fn on_idle(&mut self, _ctx: &PolicyContext<'_>, _car: CarId) -> Vec<Command> {
        Vec::new()
    }

    /// `car` reversed its travel direction.
    fn on_turned(&mut self, _ctx: &PolicyContext<'_>, _car: CarId) -> Vec<Command> {
        Vec::new()
    }

    /// This policy just became the active one.  Fired exactly once per
    /// switch by the meta-policy (and once at simulation start).
    fn changed_to(&mut self, _ctx: &PolicyContext<'_>) {}
}

/// A policy that never issues a command.  Useful as a baseline and in tests:
/// cars still board co-located passengers and serve car calls, but no hall
/// call is ever assigned.
pub struct NoopPolicy;

impl SchedulingPolicy for NoopPolicy {
    fn name(&self) -> &'static str {
        "noop"
    }
}
