//! The longest-queue-first scheduling algorithm.

use lift_core::CarId;

use crate::{Command, PolicyContext, SchedulingPolicy};

/// Which kind of candidate the scan has found so far for one passenger.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum HandleKind {
    None,
    Dispatch,
    Stop,
}

/// Longest queue first.
///
/// Every tick, scan the whole hall-call queue in arrival order.  For each
/// queued passenger, scan the car roster:
///
/// - a car is a **dispatch** candidate if it is idle, is not already at the
///   arrival floor, and no stop candidate has been found yet this scan;
/// - a car is a **stop** candidate if it is moving in the passenger's
///   direction and its next floor is the arrival floor.  Stop candidates
///   take precedence over dispatch candidates.
///
/// Among same-type candidates the minimum floor distance wins; the strict
/// `<` comparison means the first candidate found keeps exact ties.  At most
/// one command is issued per passenger per tick.
pub struct LongestQueueFirst;

impl SchedulingPolicy for LongestQueueFirst {
    fn name(&self) -> &'static str {
        "longest-queue-first"
    }

    fn update(&mut self, ctx: &PolicyContext<'_>) -> Vec<Command> {
        let cars = ctx.building.cars();
        let mut commands = Vec::new();
        // Cars dispatched earlier in this scan are no longer idle once the
        // commands are applied; track them so two passengers cannot claim
        // the same car within a single tick.
        let mut claimed = vec![false; cars.len()];

        for passenger in ctx.control.hall_calls() {
            let mut closest: Option<CarId> = None;
            let mut min_delta = 0u32;
            let mut kind = HandleKind::None;

            for car in cars {
                if !car.can_pickup(passenger) {
                    continue;
                }
                let delta = car.current_floor().0.abs_diff(passenger.arrival_floor.0);
                let mut candidate = false;

                // Dispatch calls.
                if car.state().is_idle()
                    && !claimed[car.id().index()]
                    && kind != HandleKind::Stop
                    && passenger.arrival_floor != car.current_floor()
                {
                    candidate = true;
                    if kind == HandleKind::None {
                        kind = HandleKind::Dispatch;
                    }
                }

                // Check if to stop at the next floor.
                if car.state().is_moving()
                    && car.direction() == passenger.direction()
                    && car.next_floor() == passenger.arrival_floor
                {
                    if kind != HandleKind::Stop {
                        // First stop candidate displaces any dispatch choice.
                        kind = HandleKind::Stop;
                        closest = None;
                    }
                    candidate = true;
                }

                if candidate {
                    match closest {
                        Some(_) if delta < min_delta => {
                            closest = Some(car.id());
                            min_delta = delta;
                        }
                        Some(_) => {}
                        None => {
                            closest = Some(car.id());
                            min_delta = delta;
                        }
                    }
                }
            }

            if let Some(car) = closest {
                match kind {
                    HandleKind::Dispatch => {
                        claimed[car.index()] = true;
                        commands.push(Command::DispatchTo {
                            car,
                            floor: passenger.arrival_floor,
                            serving: Some(passenger.id),
                        });
                    }
                    HandleKind::Stop => {
                        commands.push(Command::StopAtNext {
                            car,
                            serving: Some(passenger.id),
                        });
                    }
                    HandleKind::None => {}
                }
            }
        }

        commands
    }
}
