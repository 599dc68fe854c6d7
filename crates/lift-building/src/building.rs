//! `Building` — the immutable topology: floor range plus car roster.

use lift_core::{CarId, FloorId};

use crate::{BuildingError, BuildingResult, CarConfig, ElevatorCar, Floor};

/// The building: an ordered, contiguous sequence of floors and a fixed roster
/// of elevator cars.  Topology never changes after construction; the only
/// mutable state inside is the floor queues and the cars themselves.
#[derive(Debug)]
pub struct Building {
    floors: Vec<Floor>,
    cars: Vec<ElevatorCar>,
}

impl Building {
    /// Build a `num_floors`-floor building with one car per entry of
    /// `car_configs`, all cars starting idle at floor 0.
    pub fn new(num_floors: u32, car_configs: &[CarConfig]) -> BuildingResult<Self> {
        if num_floors < 2 {
            return Err(BuildingError::TooFewFloors(num_floors));
        }
        if car_configs.is_empty() {
            return Err(BuildingError::NoCars);
        }
        let top = FloorId(num_floors - 1);
        let floors = (0..num_floors).map(|i| Floor::new(FloorId(i))).collect();
        let cars = car_configs
            .iter()
            .enumerate()
            .map(|(i, &config)| ElevatorCar::new(CarId(i as u32), top, FloorId(0), config))
            .collect();
        Ok(Self { floors, cars })
    }

    /// Convenience constructor: `num_cars` identical cars.
    pub fn uniform(num_floors: u32, num_cars: u32, config: CarConfig) -> BuildingResult<Self> {
        Self::new(num_floors, &vec![config; num_cars as usize])
    }

    // ── Topology ──────────────────────────────────────────────────────────

    #[inline]
    pub fn num_floors(&self) -> u32 {
        self.floors.len() as u32
    }

    #[inline]
    pub fn num_cars(&self) -> u32 {
        self.cars.len() as u32
    }

    #[inline]
    pub fn top_floor(&self) -> FloorId {
        FloorId(self.num_floors() - 1)
    }

    #[inline]
    pub fn contains_floor(&self, floor: FloorId) -> bool {
        floor.index() < self.floors.len()
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn floor(&self, id: FloorId) -> BuildingResult<&Floor> {
        self.floors
            .get(id.index())
            .ok_or(BuildingError::FloorOutOfRange(id))
    }

    #[inline]
    pub fn cars(&self) -> &[ElevatorCar] {
        &self.cars
    }

    pub fn car(&self, id: CarId) -> Option<&ElevatorCar> {
        self.cars.get(id.index())
    }

    // ── Mutable accessors — simulator-only ────────────────────────────────

    pub fn floor_mut(&mut self, id: FloorId) -> BuildingResult<&mut Floor> {
        self.floors
            .get_mut(id.index())
            .ok_or(BuildingError::FloorOutOfRange(id))
    }

    pub fn car_mut(&mut self, id: CarId) -> BuildingResult<&mut ElevatorCar> {
        self.cars
            .get_mut(id.index())
            .ok_or(BuildingError::CarNotFound(id))
    }

    #[inline]
    pub fn cars_mut(&mut self) -> &mut [ElevatorCar] {
        &mut self.cars
    }
}
