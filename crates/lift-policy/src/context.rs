//! Read-only simulation state passed to every policy callback.

use lift_building::{Building, ControlSystem};
use lift_core::Tick;

/// A read-only snapshot of the simulation state passed to every
/// [`SchedulingPolicy`][crate::SchedulingPolicy] callback.
///
/// Built by the simulator once per callback batch and shared immutably.
/// Policies read the building, car roster, floor queues, and hall-call queue
/// through it; all mutation goes through [`Command`][crate::Command]s applied
/// afterwards.
///
/// # Lifetimes
///
/// All borrows live for the duration of one callback.  The simulator never
/// mutates the underlying structures while a `PolicyContext` is live.
pub struct PolicyContext<'a> {
    /// Current simulation tick.
    pub tick: Tick,

    /// Elapsed simulated seconds at this tick.
    pub now_secs: f64,

    /// Simulated seconds per tick.
    pub tick_duration_secs: f64,

    /// The building: floors (with waiting queues) and the car roster.
    pub building: &'a Building,

    /// The control system: unassigned hall calls in arrival order.
    pub control: &'a ControlSystem,
}

impl<'a> PolicyContext<'a> {
    #[inline]
    pub fn new(
        tick: Tick,
        now_secs: f64,
        tick_duration_secs: f64,
        building: &'a Building,
        control: &'a ControlSystem,
    ) -> Self {
        Self {
            tick,
            now_secs,
            tick_duration_secs,
            building,
            control,
        }
    }

    /// Wait time in simulated seconds for a passenger that arrived at
    /// `arrival_tick`, as of this context's tick.
    #[inline]
    pub fn wait_secs(&self, arrival_tick: Tick) -> f64 {
        self.tick.since(arrival_tick) as f64 * self.tick_duration_secs
    }
}
