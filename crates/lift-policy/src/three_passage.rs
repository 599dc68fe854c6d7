//! The three-passage group-elevator scheduling algorithm.

use lift_building::{Direction, ElevatorCar, Passenger};
use lift_core::CarId;

use crate::{Command, PolicyContext, SchedulingPolicy};

/// Passage class of a hall call relative to one car.
///
/// - **P1**: servable in the car's current direction of travel (ahead of it,
///   same direction), or the car is free.
/// - **P2**: opposite-direction call — served after the car reverses once.
/// - **P3**: same-direction call behind the car — needs two reversals.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
enum Passage {
    P1,
    P2,
    P3,
}

/// Three-passage group elevator.
///
/// For each queued hall call, every car is scored by passage class plus
/// floor distance, and the cheapest feasible car gets the call.  Class
/// dominates distance (the weight step is the building height), so a P1 car
/// always beats a P2 car regardless of how far away it is.  Ties keep the
/// first car in roster order.
pub struct ThreePassageGroupElevator;

impl ThreePassageGroupElevator {
    fn classify(car: &ElevatorCar, passenger: &Passenger) -> Passage {
        if !car.state().is_moving() {
            return Passage::P1;
        }
        if car.direction() != passenger.direction() {
            return Passage::P2;
        }
        let ahead = match car.direction() {
            Direction::Up => passenger.arrival_floor.0 as f64 > car.position(),
            Direction::Down => (passenger.arrival_floor.0 as f64) < car.position(),
            Direction::None => false,
        };
        if ahead { Passage::P1 } else { Passage::P3 }
    }

    fn cost(car: &ElevatorCar, passenger: &Passenger, num_floors: u32) -> u32 {
        let class_weight = match Self::classify(car, passenger) {
            Passage::P1 => 0,
            Passage::P2 => 1,
            Passage::P3 => 2,
        };
        let delta = car.current_floor().0.abs_diff(passenger.arrival_floor.0);
        class_weight * num_floors + delta
    }
}

impl SchedulingPolicy for ThreePassageGroupElevator {
    fn name(&self) -> &'static str {
        "three-passage"
    }

    fn update(&mut self, ctx: &PolicyContext<'_>) -> Vec<Command> {
        let cars = ctx.building.cars();
        let num_floors = ctx.building.num_floors();
        let mut commands = Vec::new();
        let mut claimed = vec![false; cars.len()];

        for passenger in ctx.control.hall_calls() {
            let mut best: Option<(u32, CarId, bool)> = None; // (cost, car, is_stop)

            for car in cars {
                if !car.can_pickup(passenger) {
                    continue;
                }
                // Feasible right now: dispatch an idle car, or stop a moving
                // car that is about to pass the arrival floor.
                let action = if car.state().is_idle()
                    && !claimed[car.id().index()]
                    && car.current_floor() != passenger.arrival_floor
                {
                    Some(false)
                } else if car.state().is_moving()
                    && car.direction() == passenger.direction()
                    && car.next_floor() == passenger.arrival_floor
                {
                    Some(true)
                } else {
                    None
                };
                let Some(is_stop) = action else { continue };

                let cost = Self::cost(car, passenger, num_floors);
                // Strict `<`: first car in roster order keeps exact ties.
                if best.map(|(c, _, _)| cost < c).unwrap_or(true) {
                    best = Some((cost, car.id(), is_stop));
                }
            }

            match best {
                Some((_, car, false)) => {
                    claimed[car.index()] = true;
                    commands.push(Command::DispatchTo {
                        car,
                        floor: passenger.arrival_floor,
                        serving: Some(passenger.id),
                    });
                }
                Some((_, car, true)) => {
                    commands.push(Command::StopAtNext {
                        car,
                        serving: Some(passenger.id),
                    });
                }
                None => {}
            }
        }

        commands
    }
}
