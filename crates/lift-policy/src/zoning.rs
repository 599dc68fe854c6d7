//! The static zoning scheduling algorithm.

use lift_building::Building;
use lift_core::{CarId, FloorId};

use crate::{Command, PolicyContext, PolicyError, PolicyResult, SchedulingPolicy};

/// Spillover tolerance: an accumulator within this distance of 1.0 counts
/// as having earned a full extra floor.
const SPILL_EPS: f64 = 1e-5;

/// A contiguous floor range with a dedicated subset of cars.
#[derive(Debug)]
struct Zone {
    floors: Vec<FloorId>,
    cars: Vec<CarId>,
}

impl Zone {
    fn bottom(&self) -> FloorId {
        self.floors[0]
    }

    fn middle(&self) -> FloorId {
        self.floors[self.floors.len() / 2]
    }

    fn top(&self) -> FloorId {
        self.floors[self.floors.len() - 1]
    }
}

/// Static zoning.
///
/// The building is partitioned once at construction into `num_zones`
/// contiguous floor ranges, each with its own contiguous slice of the car
/// roster.  Dispatch within a zone mirrors longest-queue-first restricted to
/// the zone's cars; there is no cross-zone fallback — a zone with no
/// eligible car leaves its passengers queued.
///
/// # Floor partition
///
/// `floors_per_zone = num_floors / num_zones` (integer), with the fractional
/// remainder `num_floors/num_zones - floors_per_zone` accumulated per zone;
/// once the accumulator reaches 1.0 (within [`SPILL_EPS`]) the zone is
/// awarded an extra floor and the accumulator drops by 1.0.  This spreads
/// remainder floors evenly across the zone sequence.
pub struct Zoning {
    zones: Vec<Zone>,
    /// Zone index by floor number.
    floor_to_zone: Vec<usize>,
    /// Zone index by car id.
    car_to_zone: Vec<usize>,
}

impl Zoning {
    /// Partition `building` into `num_zones` zones.
    ///
    /// `num_zones` must be at least 1 and no larger than either the floor
    /// count or the car count; anything else is a construction-time error.
    pub fn new(num_zones: u32, building: &Building) -> PolicyResult<Self> {
        let num_floors = building.num_floors();
        let num_cars = building.num_cars();
        if num_zones == 0 || num_zones > num_floors || num_zones > num_cars {
            return Err(PolicyError::InvalidZoneCount {
                num_zones,
                num_floors,
                num_cars,
            });
        }

        let floors_per_zone = num_floors / num_zones;
        let spill_per_zone = num_floors as f64 / num_zones as f64 - floors_per_zone as f64;
        let cars_per_zone = num_cars / num_zones;

        let mut zones = Vec::with_capacity(num_zones as usize);
        let mut floor_to_zone = vec![0usize; num_floors as usize];
        let mut car_to_zone = vec![0usize; num_cars as usize];

        let mut total_spill = 0.0f64;
        let mut handled_floors = 0u32;

        for zone_no in 0..num_zones {
            total_spill += spill_per_zone;
            let min_floor = handled_floors;
            let mut max_floor = handled_floors + floors_per_zone - 1;
            if total_spill >= 1.0 - SPILL_EPS {
                total_spill = (total_spill - 1.0).max(0.0);
                max_floor += 1;
            }

            let floors: Vec<FloorId> = (min_floor..=max_floor).map(FloorId).collect();
            handled_floors = max_floor + 1;

            // Contiguous car-id slice.  The roster remainder (when the car
            // count does not divide evenly) goes to the last zone so the
            // car partition stays total.
            let car_lo = zone_no * cars_per_zone;
            let car_hi = if zone_no == num_zones - 1 {
                num_cars
            } else {
                (zone_no + 1) * cars_per_zone
            };
            let cars: Vec<CarId> = (car_lo..car_hi).map(CarId).collect();

            for floor in &floors {
                floor_to_zone[floor.index()] = zone_no as usize;
            }
            for car in &cars {
                car_to_zone[car.index()] = zone_no as usize;
            }
            zones.push(Zone { floors, cars });
        }

        Ok(Self {
            zones,
            floor_to_zone,
            car_to_zone,
        })
    }

    fn zone_of_floor(&self, floor: FloorId) -> &Zone {
        &self.zones[self.floor_to_zone[floor.index()]]
    }

    fn zone_of_car(&self, car: CarId) -> &Zone {
        &self.zones[self.car_to_zone[car.index()]]
    }

    /// Floor numbers per zone, in zone order.  Exposed for partition checks.
    pub fn zone_floor_counts(&self) -> Vec<usize> {
        self.zones.iter().map(|z| z.floors.len()).collect()
    }

    /// Car counts per zone, in zone order.
    pub fn zone_car_counts(&self) -> Vec<usize> {
        self.zones.iter().map(|z| z.cars.len()).collect()
    }
}

impl SchedulingPolicy for Zoning {
    fn name(&self) -> &'static str {
        "zoning"
    }

    fn update(&mut self, ctx: &PolicyContext<'_>) -> Vec<Command> {
        let mut commands = Vec::new();
        let mut claimed = vec![false; ctx.building.cars().len()];

        for passenger in ctx.control.hall_calls() {
            let zone = self.zone_of_floor(passenger.arrival_floor);
            for &car_id in &zone.cars {
                let Some(car) = ctx.building.car(car_id) else {
                    continue;
                };

                // Check if to dispatch the elevator.
                if car.state().is_idle()
                    && !claimed[car_id.index()]
                    && car.can_pickup(passenger)
                    && car.current_floor() != passenger.arrival_floor
                {
                    claimed[car_id.index()] = true;
                    commands.push(Command::DispatchTo {
                        car: car_id,
                        floor: passenger.arrival_floor,
                        serving: Some(passenger.id),
                    });
                    break;
                }

                // Check if to stop at the next floor.
                if car.state().is_moving()
                    && car.direction() == passenger.direction()
                    && car.next_floor() == passenger.arrival_floor
                {
                    commands.push(Command::StopAtNext {
                        car: car_id,
                        serving: Some(passenger.id),
                    });
                    break;
                }
            }
        }

        commands
    }

    fn on_idle(&mut self, ctx: &PolicyContext<'_>, car_id: CarId) -> Vec<Command> {
        let zone = self.zone_of_car(car_id);
        let Some(car) = ctx.building.car(car_id) else {
            return Vec::new();
        };
        let here = car.current_floor();

        let mut target: Option<FloorId> = None;
        for &floor in &zone.floors {
            let has_waiting = ctx
                .building
                .floor(floor)
                .map(|f| f.has_waiting())
                .unwrap_or(false);
            if !has_waiting {
                continue;
            }
            let Some(best) = target else {
                target = Some(floor);
                continue;
            };
            let delta = floor.0.abs_diff(here.0);
            let best_delta = best.0.abs_diff(here.0);

            if here < zone.bottom() {
                // Below the zone: prefer the farthest matching floor.
                if delta > best_delta {
                    target = Some(floor);
                }
            } else if here > zone.top() {
                // Above the zone: prefer the nearest matching floor.
                if delta < best_delta {
                    target = Some(floor);
                }
            } else {
                // Inside the zone: prefer the highest matching floor.
                if floor > best {
                    target = Some(floor);
                }
            }
        }

        // Nothing waiting anywhere in the zone: park at the middle floor.
        let target = target.unwrap_or_else(|| zone.middle());
        if target == here {
            return Vec::new();
        }
        // Parking is not a commitment to any hall call.
        vec![Command::DispatchTo {
            car: car_id,
            floor: target,
            serving: None,
        }]
    }
}
