//! The `ElevatorCar` state machine.
//!
//! # States
//!
//! ```text
//!            dispatch_to / depart
//!   Idle ──────────────────────────▶ Moving
//!    ▲                                 │ reaches stop floor
//!    │ depart (no pending stops)       ▼
//!    └───────────────────────────── Stopped (doors open)
//!              open_doors ▲            │ door timer expires, pending stops
//!                 (Idle) ─┘            └──────▶ Moving  (may emit Turned)
//! ```
//!
//! Invariants enforced by the operations (never by callers):
//!
//! - `Moving` ⇒ `direction != None` and a committed target floor exists.
//! - `Idle`   ⇒ no committed target and `direction == None`.
//! - There are no instantaneous jumps: `Idle → Moving` only via the commit
//!   step in [`ElevatorCar::dispatch_to`] or a departure with pending stops;
//!   `Moving → Idle` always passes through `Stopped`.
//!
//! Policies never touch these fields.  They issue commands that land in
//! `dispatch_to` / `stop_at_next`, both of which reject anything that would
//! violate the invariants with a `BuildingError` (fail fast).

use std::collections::BTreeSet;

use lift_core::{CarId, FloorId};

use crate::{BuildingError, BuildingResult, Direction, Passenger};

/// Position tolerance for "the car is at an integer floor".
const AT_FLOOR_EPS: f64 = 1e-6;

// ── Configuration ─────────────────────────────────────────────────────────────

/// Static per-car parameters, fixed at construction.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarConfig {
    /// Maximum passengers onboard.
    pub capacity: usize,
    /// Travel speed in floors per simulated second.
    pub speed_floors_per_sec: f64,
    /// How long the doors stay open at a stop, in simulated seconds.
    pub stop_secs: f64,
}

impl Default for CarConfig {
    fn default() -> Self {
        Self {
            capacity: 8,
            speed_floors_per_sec: 0.5,
            stop_secs: 3.0,
        }
    }
}

// ── State / events ────────────────────────────────────────────────────────────

/// Motion state of a car.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum CarState {
    /// Standing still with no commitment.
    Idle,
    /// Travelling toward the committed target.
    Moving,
    /// Standing at a floor with the doors open.
    Stopped { door_secs_left: f64 },
}

impl CarState {
    /// Short label for error messages.
    pub fn label(&self) -> &'static str {
        match self {
            CarState::Idle => "idle",
            CarState::Moving => "moving",
            CarState::Stopped { .. } => "stopped",
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, CarState::Idle)
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        matches!(self, CarState::Moving)
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        matches!(self, CarState::Stopped { .. })
    }
}

/// Transition observed during one physics step, reported back to the
/// simulator so it can fire the matching policy callback.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum CarEvent {
    /// The car reached a stop floor and opened its doors.
    StoppedAt(FloorId),
    /// The car reversed direction to serve remaining stops.
    Turned,
    /// The car exhausted its stops and went idle.
    BecameIdle,
}

// ── ElevatorCar ───────────────────────────────────────────────────────────────

/// One elevator car.
///
/// Owned exclusively by the [`Building`][crate::Building]; mutated only by
/// the simulator's physics step and by the command-application path.
#[derive(Debug)]
pub struct ElevatorCar {
    id: CarId,
    config: CarConfig,
    /// Top floor of the building, for `next_floor` clamping.
    top_floor: FloorId,
    /// Continuous position in floor units; fractional while mid-transit.
    position: f64,
    state: CarState,
    direction: Direction,
    /// The committed motion target.  `Some` exactly while `Moving`.
    target: Option<FloorId>,
    /// Set by `stop_at_next`: stop at the next integer floor even if the
    /// committed target lies beyond it.
    stop_next: bool,
    onboard: Vec<Passenger>,
    /// Destination requests registered by boarded passengers.
    car_calls: BTreeSet<FloorId>,
}

impl ElevatorCar {
    pub fn new(id: CarId, top_floor: FloorId, start_floor: FloorId, config: CarConfig) -> Self {
        Self {
            id,
            config,
            top_floor,
            position: start_floor.0 as f64,
            state: CarState::Idle,
            direction: Direction::None,
            target: None,
            stop_next: false,
            onboard: Vec::new(),
            car_calls: BTreeSet::new(),
        }
    }

    // ── Read-only view ────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> CarId {
        self.id
    }

    #[inline]
    pub fn config(&self) -> &CarConfig {
        &self.config
    }

    /// Continuous position in floor units (fractional mid-transit).
    #[inline]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// The nearest integer floor to the current position.
    #[inline]
    pub fn current_floor(&self) -> FloorId {
        FloorId(self.position.round().max(0.0) as u32)
    }

    /// Whether the car is aligned with an integer floor.
    #[inline]
    pub fn at_floor(&self) -> bool {
        (self.position - self.position.round()).abs() < AT_FLOOR_EPS
    }

    #[inline]
    pub fn state(&self) -> CarState {
        self.state
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn target(&self) -> Option<FloorId> {
        self.target
    }

    #[inline]
    pub fn onboard(&self) -> &[Passenger] {
        &self.onboard
    }

    #[inline]
    pub fn car_calls(&self) -> &BTreeSet<FloorId> {
        &self.car_calls
    }

    #[inline]
    pub fn remaining_capacity(&self) -> usize {
        self.config.capacity.saturating_sub(self.onboard.len())
    }

    /// Whether this car could take `passenger` onboard right now: spare
    /// capacity, and no direction conflict with the current commitment.
    pub fn can_pickup(&self, passenger: &Passenger) -> bool {
        if self.remaining_capacity() == 0 {
            return false;
        }
        match self.direction {
            Direction::None => true,
            dir => passenger.direction() == dir,
        }
    }

    /// The next integer floor the car will reach in its travel direction.
    ///
    /// Meaningful only while `Moving`; for a stationary car it returns the
    /// current floor.
    pub fn next_floor(&self) -> FloorId {
        match self.direction {
            Direction::Up => {
                let next = (self.position + AT_FLOOR_EPS).floor() as u32 + 1;
                FloorId(next.min(self.top_floor.0))
            }
            Direction::Down => {
                let next = (self.position - AT_FLOOR_EPS).ceil() as f64 - 1.0;
                FloorId(next.max(0.0) as u32)
            }
            Direction::None => self.current_floor(),
        }
    }

    // ── Commands (policy-reachable operations) ────────────────────────────

    /// Commit an idle car to travel toward `floor` (`Idle → Moving`).
    ///
    /// Rejected when the car is not idle or when `floor` is the current
    /// floor — both are contract violations on the caller's side.
    pub fn dispatch_to(&mut self, floor: FloorId) -> BuildingResult<()> {
        if floor > self.top_floor {
            return Err(BuildingError::FloorOutOfRange(floor));
        }
        if !self.state.is_idle() {
            return Err(BuildingError::InvalidTransition {
                car: self.id,
                operation: "dispatch_to",
                state: self.state.label(),
            });
        }
        if floor == self.current_floor() {
            return Err(BuildingError::DispatchToCurrentFloor {
                car: self.id,
                floor,
            });
        }
        self.direction = Direction::between(self.current_floor(), floor);
        self.target = Some(floor);
        self.state = CarState::Moving;
        Ok(())
    }

    /// Flag a moving car to stop at the next floor it reaches, even if the
    /// committed target lies beyond it.  Returns the floor it will stop at.
    pub fn stop_at_next(&mut self) -> BuildingResult<FloorId> {
        if !self.state.is_moving() {
            return Err(BuildingError::InvalidTransition {
                car: self.id,
                operation: "stop_at_next",
                state: self.state.label(),
            });
        }
        self.stop_next = true;
        Ok(self.next_floor())
    }

    /// Open the doors of an idle car standing at a floor (`Idle → Stopped`).
    ///
    /// Used when a passenger is already waiting where the car stands — no
    /// travel is needed, only a boarding stop.
    pub fn open_doors(&mut self) -> BuildingResult<()> {
        if !self.state.is_idle() {
            return Err(BuildingError::InvalidTransition {
                car: self.id,
                operation: "open_doors",
                state: self.state.label(),
            });
        }
        self.state = CarState::Stopped {
            door_secs_left: self.config.stop_secs,
        };
        Ok(())
    }

    // ── Boarding / exiting (simulator-driven, doors open) ─────────────────

    /// Take `passenger` onboard and register its destination as a car call.
    ///
    /// Valid only while `Stopped`.  A car without a committed direction
    /// adopts the passenger's.
    pub fn board(&mut self, passenger: Passenger) -> BuildingResult<()> {
        if !self.state.is_stopped() {
            return Err(BuildingError::InvalidTransition {
                car: self.id,
                operation: "board",
                state: self.state.label(),
            });
        }
        if self.remaining_capacity() == 0 {
            return Err(BuildingError::CapacityExceeded(self.id));
        }
        if self.direction == Direction::None {
            self.direction = passenger.direction();
        }
        self.car_calls.insert(passenger.destination_floor);
        self.onboard.push(passenger);
        Ok(())
    }

    /// Remove and return every onboard passenger whose destination is the
    /// current floor.  Valid only while `Stopped`.
    pub fn disembark(&mut self) -> BuildingResult<Vec<Passenger>> {
        if !self.state.is_stopped() {
            return Err(BuildingError::InvalidTransition {
                car: self.id,
                operation: "disembark",
                state: self.state.label(),
            });
        }
        let here = self.current_floor();
        let mut exited = Vec::new();
        let mut i = 0;
        while i < self.onboard.len() {
            if self.onboard[i].destination_floor == here {
                exited.push(self.onboard.remove(i));
            } else {
                i += 1;
            }
        }
        Ok(exited)
    }

    // ── Physics ───────────────────────────────────────────────────────────

    /// Advance the car by `dt` simulated seconds.
    ///
    /// Returns the transitions that occurred, in order, so the simulator can
    /// fire the matching policy callbacks.
    pub fn step(&mut self, dt: f64) -> Vec<CarEvent> {
        match self.state {
            CarState::Idle => Vec::new(),
            CarState::Stopped { door_secs_left } => {
                let left = door_secs_left - dt;
                if left > 0.0 {
                    self.state = CarState::Stopped {
                        door_secs_left: left,
                    };
                    Vec::new()
                } else {
                    self.depart()
                }
            }
            CarState::Moving => self.integrate(dt),
        }
    }

    /// One integration step of a moving car.
    fn integrate(&mut self, dt: f64) -> Vec<CarEvent> {
        // Moving ⇒ target is set; `depart` and `dispatch_to` maintain this.
        let committed = match self.target {
            Some(t) => t,
            None => {
                debug_assert!(false, "moving car {} without target", self.id);
                return Vec::new();
            }
        };
        let stop_floor = if self.stop_next {
            self.next_floor()
        } else {
            committed
        };
        let goal = stop_floor.0 as f64;
        let next = self.position + self.direction.sign() * self.config.speed_floors_per_sec * dt;
        let reached = match self.direction {
            Direction::Up => next >= goal - AT_FLOOR_EPS,
            Direction::Down => next <= goal + AT_FLOOR_EPS,
            Direction::None => true,
        };
        if !reached {
            self.position = next;
            return Vec::new();
        }
        self.position = goal;
        self.stop_next = false;
        self.car_calls.remove(&stop_floor);
        if self.target == Some(stop_floor) {
            self.target = None;
        }
        self.state = CarState::Stopped {
            door_secs_left: self.config.stop_secs,
        };
        // A stop that exhausts every commitment frees the direction: the
        // doors are open, and the first boarder decides where the car goes.
        if self.target.is_none() && self.car_calls.is_empty() && self.onboard.is_empty() {
            self.direction = Direction::None;
        }
        vec![CarEvent::StoppedAt(stop_floor)]
    }

    /// Close the doors and pick the next commitment: the nearest pending stop
    /// in the committed direction, else reverse (`Turned`), else go idle.
    fn depart(&mut self) -> Vec<CarEvent> {
        let here = self.current_floor();

        let mut pending = self.car_calls.clone();
        if let Some(t) = self.target {
            pending.insert(t);
        }
        pending.remove(&here);

        if pending.is_empty() {
            self.state = CarState::Idle;
            self.direction = Direction::None;
            self.target = None;
            return vec![CarEvent::BecameIdle];
        }

        // A car that boarded while standing free may still have no direction;
        // head for the nearest pending stop (ties go to the lower floor).
        if self.direction == Direction::None {
            let nearest = pending
                .iter()
                .copied()
                .min_by_key(|f| (f.0.abs_diff(here.0), f.0))
                .unwrap_or(here);
            self.direction = Direction::between(here, nearest);
            self.target = Some(nearest);
            self.state = CarState::Moving;
            return Vec::new();
        }

        if let Some(next) = Self::next_in(&pending, here, self.direction) {
            self.target = Some(next);
            self.state = CarState::Moving;
            return Vec::new();
        }

        // Nothing ahead: reverse and serve the other side.
        self.direction = self.direction.reversed();
        match Self::next_in(&pending, here, self.direction) {
            Some(next) => {
                self.target = Some(next);
                self.state = CarState::Moving;
                vec![CarEvent::Turned]
            }
            None => {
                // Unreachable given pending is non-empty and excludes `here`,
                // but degrade to idle rather than violate the Moving invariant.
                self.state = CarState::Idle;
                self.direction = Direction::None;
                self.target = None;
                vec![CarEvent::BecameIdle]
            }
        }
    }

    /// Nearest floor in `pending` strictly beyond `here` in `dir`.
    fn next_in(pending: &BTreeSet<FloorId>, here: FloorId, dir: Direction) -> Option<FloorId> {
        match dir {
            Direction::Up => pending.range(FloorId(here.0 + 1)..).next().copied(),
            Direction::Down => pending.range(..here).next_back().copied(),
            Direction::None => None,
        }
    }
}
