//! The round-robin scheduling algorithm.

use lift_core::{CarId, FloorId};

use crate::{Command, PolicyContext, SchedulingPolicy};

/// Round robin.
///
/// Hall calls are offered to cars in rotating roster order: a cursor walks
/// the roster and each queued passenger goes to the next idle car with
/// capacity, spreading load evenly regardless of distance.  Moving cars that
/// will pass a passenger's floor in its direction still stop for it, as in
/// the other policies.
///
/// With `return_to_lobby`, a car that runs out of work parks at floor 0
/// instead of staying where it is — the classic up-peak variant.
pub struct RoundRobin {
    cursor: usize,
    return_to_lobby: bool,
}

impl RoundRobin {
    pub fn new(return_to_lobby: bool) -> Self {
        Self {
            cursor: 0,
            return_to_lobby,
        }
    }
}

impl SchedulingPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        if self.return_to_lobby {
            "round-robin-lobby"
        } else {
            "round-robin"
        }
    }

    fn update(&mut self, ctx: &PolicyContext<'_>) -> Vec<Command> {
        let cars = ctx.building.cars();
        let n = cars.len();
        let mut commands = Vec::new();
        let mut claimed = vec![false; n];

        'passengers: for passenger in ctx.control.hall_calls() {
            // A car already passing the floor takes precedence over rotation.
            for car in cars {
                if car.state().is_moving()
                    && car.direction() == passenger.direction()
                    && car.next_floor() == passenger.arrival_floor
                    && car.can_pickup(passenger)
                {
                    commands.push(Command::StopAtNext {
                        car: car.id(),
                        serving: Some(passenger.id),
                    });
                    continue 'passengers;
                }
            }

            // Walk the rotation once, starting at the cursor.
            for offset in 0..n {
                let idx = (self.cursor + offset) % n;
                let car = &cars[idx];
                if car.state().is_idle()
                    && !claimed[idx]
                    && car.can_pickup(passenger)
                    && car.current_floor() != passenger.arrival_floor
                {
                    claimed[idx] = true;
                    self.cursor = (idx + 1) % n;
                    commands.push(Command::DispatchTo {
                        car: car.id(),
                        floor: passenger.arrival_floor,
                        serving: Some(passenger.id),
                    });
                    continue 'passengers;
                }
            }
        }

        commands
    }

    fn on_idle(&mut self, ctx: &PolicyContext<'_>, car_id: CarId) -> Vec<Command> {
        if !self.return_to_lobby {
            return Vec::new();
        }
        let Some(car) = ctx.building.car(car_id) else {
            return Vec::new();
        };
        if car.current_floor() == FloorId(0) {
            return Vec::new();
        }
        vec![Command::DispatchTo {
            car: car_id,
            floor: FloorId(0),
            serving: None,
        }]
    }
}
