//! Unit tests for the scheduling policies.

use std::cell::Cell;
use std::rc::Rc;

use lift_building::{Building, CarConfig, ControlSystem};
use lift_core::{CarId, FloorId, Tick};

use crate::{
    ActionSelector, Command, LearnedMetaPolicy, LongestQueueFirst, PolicyContext, PolicyError,
    RoundRobin, SchedulingPolicy, ThreePassageGroupElevator, Zoning,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_car_config() -> CarConfig {
    CarConfig {
        capacity: 8,
        speed_floors_per_sec: 1.0,
        stop_secs: 2.0,
    }
}

fn test_building(num_floors: u32, num_cars: u32) -> Building {
    Building::uniform(num_floors, num_cars, test_car_config()).unwrap()
}

fn ctx<'a>(building: &'a Building, control: &'a ControlSystem, now_secs: f64) -> PolicyContext<'a> {
    let tick = Tick((now_secs / 0.1).round() as u64);
    PolicyContext::new(tick, now_secs, 0.1, building, control)
}

/// Register a hall call and mirror it in the floor's waiting queue, the way
/// the simulator does on arrival.
fn admit(building: &mut Building, control: &mut ControlSystem, from: u32, to: u32) {
    let p = control
        .admit(FloorId(from), FloorId(to), Tick::ZERO)
        .unwrap();
    building.floor_mut(FloorId(from)).unwrap().push_waiting(p);
}

// ── LongestQueueFirst ─────────────────────────────────────────────────────────

mod longest_queue_first {
    use super::*;

    #[test]
    fn dispatches_closest_idle_car() {
        let mut building = test_building(10, 2);
        let mut control = ControlSystem::new();
        // Car 1 parked at floor 8, car 0 at floor 0; passenger at floor 6.
        building.car_mut(CarId(1)).unwrap().dispatch_to(FloorId(8)).unwrap();
        while !building.car(CarId(1)).unwrap().state().is_idle() {
            building.car_mut(CarId(1)).unwrap().step(0.1);
        }
        admit(&mut building, &mut control, 6, 2);

        let mut policy = LongestQueueFirst;
        let commands = policy.update(&ctx(&building, &control, 0.0));
        assert_eq!(commands.len(), 1);
        assert!(matches!(
            commands[0],
            Command::DispatchTo {
                car: CarId(1),
                floor: FloorId(6),
                serving: Some(_),
            }
        ));
    }

    #[test]
    fn tie_break_keeps_first_in_roster_order() {
        let mut building = test_building(10, 3);
        let mut control = ControlSystem::new();
        // All cars idle at floor 0, equally distant from floor 4.
        admit(&mut building, &mut control, 4, 7);

        let mut policy = LongestQueueFirst;
        let commands = policy.update(&ctx(&building, &control, 0.0));
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].car(), CarId(0));
    }

    #[test]
    fn stop_candidate_takes_precedence_over_dispatch() {
        let mut building = test_building(10, 2);
        let mut control = ControlSystem::new();
        // Car 1 is moving up past floor 1, about to reach floor 2.
        building.car_mut(CarId(1)).unwrap().dispatch_to(FloorId(7)).unwrap();
        building.car_mut(CarId(1)).unwrap().step(1.5); // position 1.5
        // Passenger at floor 2 going up: car 0 (idle, delta 2) is a dispatch
        // candidate, car 1 (moving, next floor 2) a stop candidate.
        admit(&mut building, &mut control, 2, 6);

        let mut policy = LongestQueueFirst;
        let commands = policy.update(&ctx(&building, &control, 0.0));
        assert_eq!(commands.len(), 1);
        assert!(matches!(
            commands[0],
            Command::StopAtNext {
                car: CarId(1),
                serving: Some(_),
            }
        ));
    }

    #[test]
    fn passenger_at_idle_car_floor_is_deferred() {
        // The zero-distance case: no dispatch command; the physics-level
        // pickup sweep boards the passenger instead.
        let mut building = test_building(10, 2);
        let mut control = ControlSystem::new();
        admit(&mut building, &mut control, 0, 9);

        let mut policy = LongestQueueFirst;
        let commands = policy.update(&ctx(&building, &control, 0.0));
        assert!(commands.is_empty());
    }

    #[test]
    fn two_passengers_claim_distinct_cars() {
        let mut building = test_building(10, 2);
        let mut control = ControlSystem::new();
        admit(&mut building, &mut control, 3, 7);
        admit(&mut building, &mut control, 5, 1);

        let mut policy = LongestQueueFirst;
        let commands = policy.update(&ctx(&building, &control, 0.0));
        assert_eq!(commands.len(), 2);
        assert_ne!(commands[0].car(), commands[1].car());
    }
}

// ── Zoning ────────────────────────────────────────────────────────────────────

mod zoning {
    use super::*;

    #[test]
    fn partition_is_total_and_contiguous_for_all_zone_counts() {
        let building = test_building(10, 10);
        for num_zones in 1..=10u32 {
            let zoning = Zoning::new(num_zones, &building).unwrap();
            let floor_counts = zoning.zone_floor_counts();
            let car_counts = zoning.zone_car_counts();
            assert_eq!(floor_counts.len(), num_zones as usize);
            assert_eq!(
                floor_counts.iter().sum::<usize>(),
                10,
                "floors must partition exactly for {num_zones} zones"
            );
            assert_eq!(
                car_counts.iter().sum::<usize>(),
                10,
                "cars must partition exactly for {num_zones} zones"
            );
            assert!(floor_counts.iter().all(|&c| c >= 1));
        }
    }

    #[test]
    fn spillover_ten_floors_three_zones() {
        let building = test_building(10, 3);
        let zoning = Zoning::new(3, &building).unwrap();
        let mut counts = zoning.zone_floor_counts();
        assert_eq!(counts.iter().sum::<usize>(), 10);
        counts.sort_unstable();
        assert_eq!(counts, vec![3, 3, 4]);
    }

    #[test]
    fn invalid_zone_counts_rejected() {
        let building = test_building(10, 3);
        assert!(matches!(
            Zoning::new(0, &building),
            Err(PolicyError::InvalidZoneCount { .. })
        ));
        assert!(matches!(
            Zoning::new(11, &building),
            Err(PolicyError::InvalidZoneCount { .. })
        ));
        // More zones than cars.
        assert!(matches!(
            Zoning::new(4, &building),
            Err(PolicyError::InvalidZoneCount { .. })
        ));
    }

    #[test]
    fn dispatch_stays_inside_the_zone() {
        // 2 zones over 10 floors, 2 cars: car 0 owns floors 0-4, car 1 owns
        // floors 5-9.  A passenger in the upper zone gets car 1, never the
        // equally close car 0.
        let mut building = test_building(10, 2);
        let mut control = ControlSystem::new();
        let mut policy = Zoning::new(2, &building).unwrap();
        admit(&mut building, &mut control, 6, 9);

        let commands = policy.update(&ctx(&building, &control, 0.0));
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].car(), CarId(1));
    }

    #[test]
    fn zone_without_eligible_car_defers() {
        let mut building = test_building(10, 2);
        let mut control = ControlSystem::new();
        let mut policy = Zoning::new(2, &building).unwrap();
        // Car 1 (upper zone) is busy moving; its zone's passenger waits.
        building.car_mut(CarId(1)).unwrap().dispatch_to(FloorId(9)).unwrap();
        building.car_mut(CarId(1)).unwrap().step(0.1);
        admit(&mut building, &mut control, 7, 5);

        let commands = policy.update(&ctx(&building, &control, 0.0));
        assert!(commands.is_empty(), "no cross-zone fallback");
    }

    #[test]
    fn idle_car_parks_at_zone_middle_when_nothing_waits() {
        let building = test_building(10, 2);
        let control = ControlSystem::new();
        let mut policy = Zoning::new(2, &building).unwrap();

        // Car 1 owns floors 5-9; middle is floor 7.  It sits at floor 0.
        let commands = policy.on_idle(&ctx(&building, &control, 0.0), CarId(1));
        assert_eq!(
            commands,
            vec![Command::DispatchTo {
                car: CarId(1),
                floor: FloorId(7),
                serving: None,
            }]
        );
    }

    #[test]
    fn idle_car_below_zone_prefers_farthest_waiting_floor() {
        let mut building = test_building(10, 2);
        let mut control = ControlSystem::new();
        let mut policy = Zoning::new(2, &building).unwrap();
        // Waiting passengers at floors 5 and 9, car 1 below its zone at 0.
        admit(&mut building, &mut control, 5, 6);
        admit(&mut building, &mut control, 9, 6);

        let commands = policy.on_idle(&ctx(&building, &control, 0.0), CarId(1));
        assert_eq!(commands.len(), 1);
        assert!(matches!(
            commands[0],
            Command::DispatchTo {
                floor: FloorId(9),
                serving: None,
                ..
            }
        ));
    }
}

// ── RoundRobin ────────────────────────────────────────────────────────────────

mod round_robin {
    use super::*;

    #[test]
    fn rotation_spreads_calls_across_cars() {
        let mut building = test_building(10, 3);
        let mut control = ControlSystem::new();
        admit(&mut building, &mut control, 2, 5);
        admit(&mut building, &mut control, 4, 8);
        admit(&mut building, &mut control, 6, 1);

        let mut policy = RoundRobin::new(false);
        let commands = policy.update(&ctx(&building, &control, 0.0));
        let cars: Vec<CarId> = commands.iter().map(Command::car).collect();
        assert_eq!(cars, vec![CarId(0), CarId(1), CarId(2)]);
    }

    #[test]
    fn cursor_persists_across_ticks() {
        let mut building = test_building(10, 3);
        let mut control = ControlSystem::new();
        let mut policy = RoundRobin::new(false);

        admit(&mut building, &mut control, 2, 5);
        let first = policy.update(&ctx(&building, &control, 0.0));
        assert_eq!(first[0].car(), CarId(0));

        // The first call is assigned; pretend it was applied and the next
        // passenger arrives.  The cursor has moved on to car 1.
        let served = first[0].serving().unwrap();
        control.commit(served);
        admit(&mut building, &mut control, 3, 6);
        let second = policy.update(&ctx(&building, &control, 0.1));
        assert_eq!(second[0].car(), CarId(1));
    }

    #[test]
    fn lobby_variant_parks_idle_cars_at_floor_zero() {
        let mut building = test_building(10, 2);
        let control = ControlSystem::new();
        let mut policy = RoundRobin::new(true);

        // Park car 0 at floor 5 first.
        building.car_mut(CarId(0)).unwrap().dispatch_to(FloorId(5)).unwrap();
        while !building.car(CarId(0)).unwrap().state().is_idle() {
            building.car_mut(CarId(0)).unwrap().step(0.1);
        }

        let commands = policy.on_idle(&ctx(&building, &control, 0.0), CarId(0));
        assert_eq!(
            commands,
            vec![Command::DispatchTo {
                car: CarId(0),
                floor: FloorId(0),
                serving: None,
            }]
        );

        // Already at the lobby: nothing to do.
        let commands = policy.on_idle(&ctx(&building, &control, 0.0), CarId(1));
        assert!(commands.is_empty());
    }
}

// ── ThreePassageGroupElevator ─────────────────────────────────────────────────

mod three_passage {
    use super::*;

    #[test]
    fn prefers_car_passing_the_floor_over_distant_idle() {
        let mut building = test_building(10, 2);
        let mut control = ControlSystem::new();
        // Car 1 moving up, next floor 3; car 0 idle at 0.
        building.car_mut(CarId(1)).unwrap().dispatch_to(FloorId(8)).unwrap();
        building.car_mut(CarId(1)).unwrap().step(2.5); // position 2.5
        admit(&mut building, &mut control, 3, 7);

        let mut policy = ThreePassageGroupElevator;
        let commands = policy.update(&ctx(&building, &control, 0.0));
        assert_eq!(commands.len(), 1);
        // Both are P1, but the stop candidate is closer (0.5 < 3 floors).
        assert!(matches!(
            commands[0],
            Command::StopAtNext { car: CarId(1), .. }
        ));
    }

    #[test]
    fn falls_back_to_idle_dispatch() {
        let mut building = test_building(10, 2);
        let mut control = ControlSystem::new();
        admit(&mut building, &mut control, 5, 2);

        let mut policy = ThreePassageGroupElevator;
        let commands = policy.update(&ctx(&building, &control, 0.0));
        assert_eq!(commands.len(), 1);
        assert!(matches!(
            commands[0],
            Command::DispatchTo {
                car: CarId(0),
                floor: FloorId(5),
                ..
            }
        ));
    }
}

// ── LearnedMetaPolicy ─────────────────────────────────────────────────────────

/// Selector that replays a fixed action sequence and records its inputs.
struct ScriptedSelector {
    script: Vec<usize>,
    next: usize,
    rewards: Rc<Cell<usize>>,
}

impl ActionSelector for ScriptedSelector {
    fn select_action(&mut self, _features: &[f64]) -> usize {
        let action = self.script[self.next % self.script.len()];
        self.next += 1;
        action
    }

    fn observe_reward(&mut self, _reward: f64) {
        self.rewards.set(self.rewards.get() + 1);
    }

    fn evaluation_mode(&mut self, _frozen: bool) {}

    fn reset_episode(&mut self) {
        self.next = 0;
    }
}

/// Sub-policy that counts `changed_to` activations.
struct Probe {
    label: &'static str,
    activations: Rc<Cell<usize>>,
}

impl SchedulingPolicy for Probe {
    fn name(&self) -> &'static str {
        self.label
    }

    fn changed_to(&mut self, _ctx: &PolicyContext<'_>) {
        self.activations.set(self.activations.get() + 1);
    }
}

mod meta {
    use super::*;

    fn meta_with_script(
        script: Vec<usize>,
    ) -> (LearnedMetaPolicy, Rc<Cell<usize>>, Rc<Cell<usize>>, Rc<Cell<usize>>) {
        let a0 = Rc::new(Cell::new(0));
        let a1 = Rc::new(Cell::new(0));
        let rewards = Rc::new(Cell::new(0));
        let actions: Vec<Box<dyn SchedulingPolicy>> = vec![
            Box::new(Probe {
                label: "probe-0",
                activations: Rc::clone(&a0),
            }),
            Box::new(Probe {
                label: "probe-1",
                activations: Rc::clone(&a1),
            }),
        ];
        let selector = Box::new(ScriptedSelector {
            script,
            next: 0,
            rewards: Rc::clone(&rewards),
        });
        let meta = LearnedMetaPolicy::new(actions, selector, 1.0).unwrap();
        (meta, a0, a1, rewards)
    }

    #[test]
    fn empty_action_space_rejected() {
        let selector = Box::new(ScriptedSelector {
            script: vec![0],
            next: 0,
            rewards: Rc::new(Cell::new(0)),
        });
        assert!(matches!(
            LearnedMetaPolicy::new(vec![], selector, 1.0),
            Err(PolicyError::EmptyActionSpace)
        ));
    }

    #[test]
    fn changed_to_fires_exactly_once_per_switch() {
        let (mut meta, a0, a1, rewards) = meta_with_script(vec![1, 1, 0]);
        let building = test_building(10, 2);
        let control = ControlSystem::new();

        // Drive updates at 0.1 s per tick across three decision boundaries.
        for tick in 0..=30u64 {
            let now = tick as f64 * 0.1;
            meta.update(&ctx(&building, &control, now));
        }

        // Boundary 1.0 s: switch 0→1 (one activation of probe 1).
        // Boundary 2.0 s: selector repeats 1, no re-activation.
        // Boundary 3.0 s: switch 1→0 (one activation of probe 0).
        assert_eq!(a1.get(), 1, "probe 1 activated exactly once");
        assert_eq!(a0.get(), 1, "probe 0 re-activated exactly once");
        assert_eq!(rewards.get(), 3, "one reward per decision boundary");
        assert_eq!(meta.action_usage(), &[0, 1, 1, 0]);
        assert_eq!(meta.usage_distribution(), &[2, 2]);
    }

    #[test]
    fn reset_episode_restores_initial_action() {
        let (mut meta, _a0, _a1, _rewards) = meta_with_script(vec![1]);
        let building = test_building(10, 2);
        let control = ControlSystem::new();
        for tick in 0..=10u64 {
            meta.update(&ctx(&building, &control, tick as f64 * 0.1));
        }
        assert_eq!(meta.active_action(), 1);

        meta.reset_episode();
        assert_eq!(meta.active_action(), 0);
        assert_eq!(meta.action_usage(), &[0]);
    }

    #[test]
    fn forwards_update_to_active_sub_policy() {
        // A meta over a real policy behaves like that policy.
        let actions: Vec<Box<dyn SchedulingPolicy>> = vec![Box::new(LongestQueueFirst)];
        let selector = Box::new(ScriptedSelector {
            script: vec![0],
            next: 0,
            rewards: Rc::new(Cell::new(0)),
        });
        let mut meta = LearnedMetaPolicy::new(actions, selector, 600.0).unwrap();

        let mut building = test_building(10, 2);
        let mut control = ControlSystem::new();
        admit(&mut building, &mut control, 4, 7);

        let commands = meta.update(&ctx(&building, &control, 0.0));
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].car(), CarId(0));
    }
}
