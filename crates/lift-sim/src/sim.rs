//! The `Simulator` struct and its tick loop.

use lift_building::{Building, CarEvent, ControlSystem, Direction, Passenger};
use lift_core::{CarId, FloorId, SimClock, SimConfig, SimRng, Tick};
use lift_policy::{Command, PolicyContext, SchedulingPolicy};

use crate::{REPORT_INTERVAL_SECS, SimError, SimResult, StatsSink, TrafficGenerator, TravelRequest};

/// Tolerance for floating-point comparisons against interval boundaries.
const BOUNDARY_EPS: f64 = 1e-9;

/// The main simulation runner.
///
/// `Simulator<P, T, S>` holds all run state and drives the five-phase tick
/// described in the [crate docs][crate].  [`advance`][Self::advance] is the
/// single step primitive; [`run`][Self::run] loops it to the horizon.  The
/// loop is cooperative and single-threaded: stopping between `advance`
/// calls never leaves the building in a half-applied state, so a harness
/// can interleave its own reads (stats polls, policy inspection) freely.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Simulator<P: SchedulingPolicy, T: TrafficGenerator, S: StatsSink> {
    /// Global configuration (horizon, seed, tick duration).
    pub config: SimConfig,

    /// Simulation clock — tracks the current tick and maps to seconds.
    pub clock: SimClock,

    /// Floors (with their waiting queues) and the car roster.
    pub building: Building,

    /// Hall-call queue and passenger identity source.
    pub control: ControlSystem,

    /// The active scheduling policy.
    pub policy: P,

    /// Source of passenger arrivals, consulted once per tick.
    pub traffic: T,

    /// Destination of completed-trip measurements.
    pub stats: S,

    /// Root RNG for the run.  The built-in generators carry their own
    /// streams; this one is for stochastic policies layered on top.
    pub rng: SimRng,

    /// Next hourly report boundary, in simulated seconds.
    pub(crate) next_interval_secs: f64,
}

/// One read-only callback context.  Free function so call sites can borrow
/// `self.policy` mutably alongside it (disjoint field borrows).
fn context<'a>(
    clock: &SimClock,
    building: &'a Building,
    control: &'a ControlSystem,
) -> PolicyContext<'a> {
    PolicyContext::new(
        clock.current_tick,
        clock.now_secs(),
        clock.tick_duration_secs,
        building,
        control,
    )
}

impl<P: SchedulingPolicy, T: TrafficGenerator, S: StatsSink> Simulator<P, T, S> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to the horizon.
    pub fn run(&mut self) -> SimResult<()> {
        while self.advance()? {}
        Ok(())
    }

    /// Advance the simulation by one tick.
    ///
    /// Returns `Ok(false)` once the horizon is reached — the only
    /// termination condition.  Errors indicate a policy violating the car
    /// contract or a traffic generator emitting an out-of-range floor;
    /// both are bugs in the offending component, never recoverable state.
    pub fn advance(&mut self) -> SimResult<bool> {
        if self.clock.now_secs() >= self.config.horizon_secs {
            return Ok(false);
        }
        let now = self.clock.current_tick;

        self.process_arrivals(now)?;

        let commands = {
            let ctx = context(&self.clock, &self.building, &self.control);
            self.policy.update(&ctx)
        };
        self.apply(commands)?;

        self.step_cars()?;
        self.board_standing_cars()?;

        self.clock.advance();
        while self.clock.now_secs() + BOUNDARY_EPS >= self.next_interval_secs {
            self.stats.on_interval(self.next_interval_secs);
            self.next_interval_secs += REPORT_INTERVAL_SECS;
        }
        Ok(true)
    }

    /// Fire `changed_to` on the active policy.  Called once by the builder
    /// so the policy sees its activation before the first tick.
    pub(crate) fn activate_policy(&mut self) {
        let ctx = context(&self.clock, &self.building, &self.control);
        self.policy.changed_to(&ctx);
    }

    // ── Phase ②: arrivals ─────────────────────────────────────────────────

    fn process_arrivals(&mut self, now: Tick) -> SimResult<()> {
        for request in self.traffic.arrivals(now) {
            self.admit(request, now)?;
        }
        Ok(())
    }

    fn admit(&mut self, request: TravelRequest, now: Tick) -> SimResult<()> {
        if !self.building.contains_floor(request.arrival_floor) {
            return Err(SimError::RequestOutOfRange(request.arrival_floor));
        }
        if !self.building.contains_floor(request.destination_floor) {
            return Err(SimError::RequestOutOfRange(request.destination_floor));
        }
        let passenger =
            self.control
                .admit(request.arrival_floor, request.destination_floor, now)?;
        self.building
            .floor_mut(passenger.arrival_floor)?
            .push_waiting(passenger);

        let commands = {
            let ctx = context(&self.clock, &self.building, &self.control);
            self.policy.passenger_arrived(&ctx, &passenger)
        };
        self.apply(commands)
    }

    // ── Phase ④: physics ──────────────────────────────────────────────────

    fn step_cars(&mut self) -> SimResult<()> {
        let dt = self.clock.tick_duration_secs;
        for i in 0..self.building.num_cars() as usize {
            let car_id = CarId(i as u32);
            let events = self.building.car_mut(car_id)?.step(dt);
            for event in events {
                match event {
                    CarEvent::StoppedAt(floor) => self.serve_stop(car_id, floor)?,
                    CarEvent::Turned => {
                        let commands = {
                            let ctx = context(&self.clock, &self.building, &self.control);
                            self.policy.on_turned(&ctx, car_id)
                        };
                        self.apply(commands)?;
                    }
                    CarEvent::BecameIdle => {
                        let commands = {
                            let ctx = context(&self.clock, &self.building, &self.control);
                            self.policy.on_idle(&ctx, car_id)
                        };
                        self.apply(commands)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// A car opened its doors at `floor`: let passengers out, then in.
    fn serve_stop(&mut self, car_id: CarId, floor: FloorId) -> SimResult<()> {
        let exited = self.building.car_mut(car_id)?.disembark()?;
        for passenger in exited {
            self.record_exit(&passenger);
            let commands = {
                let ctx = context(&self.clock, &self.building, &self.control);
                self.policy.passenger_exited(&ctx, car_id, &passenger)
            };
            self.apply(commands)?;
        }
        self.board_at(car_id, floor)
    }

    fn record_exit(&mut self, passenger: &Passenger) {
        // Onboard passengers always carry a boarding tick; fall back to
        // zero wait rather than corrupt the run over a missing one.
        let boarded = passenger.boarded_tick.unwrap_or(passenger.arrival_tick);
        let wait_secs = boarded.since(passenger.arrival_tick) as f64 * self.clock.tick_duration_secs;
        self.stats.record_trip(wait_secs, self.clock.now_secs());
    }

    /// Board waiting passengers through open doors, FIFO, while capacity
    /// and direction admit.
    ///
    /// One passenger at a time: the first boarder may fix a free car's
    /// direction and change who else is eligible.
    fn board_at(&mut self, car_id: CarId, floor: FloorId) -> SimResult<()> {
        let now = self.clock.current_tick;
        loop {
            let (open, capacity, direction) = {
                let car = self.building.car_mut(car_id)?;
                (
                    car.state().is_stopped(),
                    car.remaining_capacity(),
                    car.direction(),
                )
            };
            if !open || capacity == 0 {
                return Ok(());
            }

            let taken = self
                .building
                .floor_mut(floor)?
                .take_waiting_if(1, |p| match direction {
                    Direction::None => true,
                    dir => p.direction() == dir,
                });
            let Some(mut passenger) = taken.into_iter().next() else {
                return Ok(());
            };

            passenger.boarded_tick = Some(now);
            self.building.car_mut(car_id)?.board(passenger)?;
            self.control.remove(passenger.id);

            let commands = {
                let ctx = context(&self.clock, &self.building, &self.control);
                self.policy.passenger_boarded(&ctx, car_id, &passenger)
            };
            self.apply(commands)?;
        }
    }

    /// Cars standing where passengers wait take them aboard without a
    /// policy command: idle cars open their doors (no travel is needed,
    /// only a boarding stop), stopped cars admit late arrivals while the
    /// doors are still open.
    fn board_standing_cars(&mut self) -> SimResult<()> {
        for i in 0..self.building.num_cars() as usize {
            let car_id = CarId(i as u32);
            let (state_idle, state_stopped, floor, has_capacity) = {
                let car = self.building.car_mut(car_id)?;
                (
                    car.state().is_idle(),
                    car.state().is_stopped(),
                    car.current_floor(),
                    car.remaining_capacity() > 0,
                )
            };
            if !has_capacity {
                continue;
            }
            if state_idle {
                if self.building.floor(floor)?.has_waiting() {
                    self.building.car_mut(car_id)?.open_doors()?;
                    self.board_at(car_id, floor)?;
                }
            } else if state_stopped {
                self.board_at(car_id, floor)?;
            }
        }
        Ok(())
    }

    // ── Command application ───────────────────────────────────────────────

    /// Route policy commands through the car operations.  A committed hall
    /// call (`serving`) leaves the queue on success — assignment clears a
    /// hall call, not boarding.
    fn apply(&mut self, commands: Vec<Command>) -> SimResult<()> {
        for command in commands {
            match command {
                Command::DispatchTo {
                    car,
                    floor,
                    serving,
                } => {
                    self.building.car_mut(car)?.dispatch_to(floor)?;
                    if let Some(id) = serving {
                        self.control.commit(id);
                    }
                }
                Command::StopAtNext { car, serving } => {
                    self.building.car_mut(car)?.stop_at_next()?;
                    if let Some(id) = serving {
                        self.control.commit(id);
                    }
                }
            }
        }
        Ok(())
    }
}
