//! Unit and end-to-end tests for the simulation loop.

use std::cell::Cell;
use std::rc::Rc;

use lift_building::{Building, CarConfig};
use lift_core::{FloorId, SimConfig, SimRng, Tick};
use lift_policy::{
    ActionSelector, LearnedMetaPolicy, LongestQueueFirst, NoopPolicy, PolicyContext,
    SchedulingPolicy,
};

use crate::{
    PoissonTraffic, ScriptedTraffic, SimBuilder, SimError, SimulatorStats, StatsInterval,
    StatsSink, TrafficGenerator, TravelRequest,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(horizon_secs: f64) -> SimConfig {
    SimConfig {
        tick_duration_secs: 0.1,
        horizon_secs,
        seed: 7,
    }
}

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

fn request(from: u32, to: u32) -> TravelRequest {
    TravelRequest {
        arrival_floor: FloorId(from),
        destination_floor: FloorId(to),
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

mod builder {
    use super::*;

    #[test]
    fn rejects_nonpositive_tick_duration() {
        let config = SimConfig {
            tick_duration_secs: 0.0,
            horizon_secs: 60.0,
            seed: 1,
        };
        let result = SimBuilder::new(config, test_building(4, 1), NoopPolicy).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn rejects_nonpositive_horizon() {
        let config = SimConfig {
            tick_duration_secs: 0.1,
            horizon_secs: -1.0,
            seed: 1,
        };
        let result = SimBuilder::new(config, test_building(4, 1), NoopPolicy).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn activates_policy_before_first_tick() {
        struct ChangedProbe {
            fired: Rc<Cell<bool>>,
        }
        impl SchedulingPolicy for ChangedProbe {
            fn name(&self) -> &'static str {
                "changed-probe"
            }
            fn changed_to(&mut self, _ctx: &PolicyContext<'_>) {
                self.fired.set(true);
            }
        }

        let fired = Rc::new(Cell::new(false));
        let probe = ChangedProbe {
            fired: Rc::clone(&fired),
        };
        SimBuilder::new(test_config(1.0), test_building(4, 1), probe)
            .build()
            .unwrap();
        assert!(fired.get());
    }
}

// ── Traffic ───────────────────────────────────────────────────────────────────

mod traffic {
    use super::*;

    #[test]
    fn scripted_replays_in_tick_order() {
        let mut traffic = ScriptedTraffic::new(vec![
            (Tick(5), request(2, 0)),
            (Tick(0), request(0, 3)),
            (Tick(5), request(1, 4)),
        ]);
        assert_eq!(traffic.arrivals(Tick(0)), vec![request(0, 3)]);
        assert_eq!(traffic.arrivals(Tick(1)), vec![]);
        assert_eq!(traffic.arrivals(Tick(5)), vec![request(2, 0), request(1, 4)]);
        assert_eq!(traffic.arrivals(Tick(6)), vec![]);
    }

    #[test]
    fn poisson_requests_stay_in_range_with_distinct_floors() {
        let mut traffic = PoissonTraffic::new(SimRng::new(3), 8, 2.0, 0.1, 0.5);
        for tick in 0..10_000 {
            for req in traffic.arrivals(Tick(tick)) {
                assert!(req.arrival_floor.0 < 8);
                assert!(req.destination_floor.0 < 8);
                assert_ne!(req.arrival_floor, req.destination_floor);
            }
        }
    }

    #[test]
    fn poisson_is_replayable_by_seed() {
        let mut a = PoissonTraffic::new(SimRng::new(42), 10, 1.0, 0.1, 0.3);
        let mut b = PoissonTraffic::new(SimRng::new(42), 10, 1.0, 0.1, 0.3);
        for tick in 0..5_000 {
            assert_eq!(a.arrivals(Tick(tick)), b.arrivals(Tick(tick)));
        }
    }
}

// ── Stats ─────────────────────────────────────────────────────────────────────

mod stats {
    use super::*;

    #[test]
    fn interval_averages() {
        let mut interval = StatsInterval::new(0.0);
        interval.record(3.0);
        interval.record(5.0);
        assert_eq!(interval.num_exits(), 2);
        assert_eq!(interval.average_wait_time(), 4.0);
        assert_eq!(interval.average_squared_wait_time(), 17.0);
    }

    #[test]
    fn empty_interval_is_zero() {
        let interval = StatsInterval::new(10.0);
        assert_eq!(interval.average_wait_time(), 0.0);
        assert_eq!(interval.average_squared_wait_time(), 0.0);
    }

    #[test]
    fn hourly_roll_snapshots_and_resets() {
        let mut stats = SimulatorStats::new();
        stats.record_trip(2.0, 100.0);
        stats.on_interval(3_600.0);
        stats.record_trip(4.0, 3_700.0);

        assert_eq!(stats.hourly().len(), 1);
        assert_eq!(stats.hourly()[0].num_exits(), 1);
        assert_eq!(stats.hourly()[0].total_wait_secs(), 2.0);
        // The run-wide accumulator keeps counting across the boundary.
        assert_eq!(stats.global().num_exits(), 2);
        assert_eq!(stats.completions().len(), 2);
    }

    #[test]
    fn poll_interval_resets_independently() {
        let mut stats = SimulatorStats::new();
        stats.record_trip(2.0, 10.0);
        stats.reset_poll_interval(10.0);
        stats.record_trip(6.0, 20.0);

        assert_eq!(stats.poll_interval().num_exits(), 1);
        assert_eq!(stats.poll_interval().average_wait_time(), 6.0);
        assert_eq!(stats.global().num_exits(), 2);
    }
}

// ── Simulator ─────────────────────────────────────────────────────────────────

mod sim {
    use super::*;

    #[test]
    fn colocated_passenger_boards_without_a_dispatch() {
        // Passenger and car share floor 0; even a policy that never issues
        // a command serves the trip through the standing-car sweep.
        let traffic = ScriptedTraffic::new(vec![(Tick(0), request(0, 9))]);
        let mut sim = SimBuilder::new(test_config(60.0), test_building(10, 2), NoopPolicy)
            .traffic(traffic)
            .build()
            .unwrap();
        sim.run().unwrap();

        assert_eq!(sim.stats.global().num_exits(), 1);
        let trip = sim.stats.completions()[0];
        assert!(trip.wait_secs < 0.2, "wait was {}", trip.wait_secs);
        // 2 s doors + 9 floors at 1 floor/s.
        assert!(
            (10.0..13.0).contains(&trip.completed_secs),
            "completed at {}",
            trip.completed_secs
        );
        assert!(sim.control.is_empty());
    }

    #[test]
    fn dispatched_pickup_measures_queue_wait() {
        let traffic = ScriptedTraffic::new(vec![(Tick(0), request(5, 0))]);
        let mut sim = SimBuilder::new(test_config(60.0), test_building(10, 2), LongestQueueFirst)
            .traffic(traffic)
            .build()
            .unwrap();
        sim.run().unwrap();

        // Car 0 commits at t=0 and covers 5 floors at 1 floor/s.
        assert_eq!(sim.stats.global().num_exits(), 1);
        let trip = sim.stats.completions()[0];
        assert!(
            (4.9..5.4).contains(&trip.wait_secs),
            "wait was {}",
            trip.wait_secs
        );
        assert!(sim.control.is_empty());
        assert!(sim.building.floor(FloorId(5)).unwrap().waiting().is_empty());
    }

    #[test]
    fn out_of_range_request_is_rejected() {
        let traffic = ScriptedTraffic::new(vec![(Tick(0), request(0, 12))]);
        let mut sim = SimBuilder::new(test_config(10.0), test_building(10, 1), NoopPolicy)
            .traffic(traffic)
            .build()
            .unwrap();
        assert!(matches!(
            sim.advance(),
            Err(SimError::RequestOutOfRange(FloorId(12)))
        ));
    }

    #[test]
    fn hourly_intervals_roll_at_boundaries() {
        let config = SimConfig {
            tick_duration_secs: 1.0,
            horizon_secs: 7_200.0,
            seed: 1,
        };
        let mut sim = SimBuilder::new(config, test_building(4, 1), NoopPolicy)
            .build()
            .unwrap();
        sim.run().unwrap();

        assert_eq!(sim.stats.hourly().len(), 2);
        assert_eq!(sim.stats.hourly()[1].start_secs(), 3_600.0);
    }

    #[test]
    fn same_seed_same_run() {
        fn run_once() -> (Vec<crate::Completion>, f64) {
            let config = SimConfig {
                tick_duration_secs: 0.1,
                horizon_secs: 600.0,
                seed: 42,
            };
            let traffic = PoissonTraffic::new(SimRng::new(config.seed), 8, 0.3, 0.1, 0.5);
            let mut sim = SimBuilder::new(config, test_building(8, 3), LongestQueueFirst)
                .traffic(traffic)
                .build()
                .unwrap();
            sim.run().unwrap();
            (
                sim.stats.completions().to_vec(),
                sim.stats.average_squared_wait_time(),
            )
        }

        let (completions_a, aswt_a) = run_once();
        let (completions_b, aswt_b) = run_once();
        assert!(!completions_a.is_empty());
        assert_eq!(completions_a, completions_b);
        assert_eq!(aswt_a.to_bits(), aswt_b.to_bits());
    }

    #[test]
    fn meta_switch_preserves_in_flight_commitments() {
        struct AlwaysSecond;
        impl ActionSelector for AlwaysSecond {
            fn select_action(&mut self, _features: &[f64]) -> usize {
                1
            }
            fn observe_reward(&mut self, _reward: f64) {}
            fn evaluation_mode(&mut self, _frozen: bool) {}
            fn reset_episode(&mut self) {}
        }

        // Longest-queue-first commits a car at t=0; the selector switches to
        // the no-op policy at the first 1 s boundary, well before the 5 s
        // pickup ride ends.  The committed trip still completes.
        let meta = LearnedMetaPolicy::new(
            vec![Box::new(LongestQueueFirst), Box::new(NoopPolicy)],
            Box::new(AlwaysSecond),
            1.0,
        )
        .unwrap();
        let traffic = ScriptedTraffic::new(vec![(Tick(0), request(5, 0))]);
        let mut sim = SimBuilder::new(test_config(30.0), test_building(10, 2), meta)
            .traffic(traffic)
            .build()
            .unwrap();
        sim.run().unwrap();

        assert_eq!(sim.policy.active_action(), 1);
        assert_eq!(sim.stats.global().num_exits(), 1);
        let trip = sim.stats.completions()[0];
        assert!(
            (4.9..5.4).contains(&trip.wait_secs),
            "wait was {}",
            trip.wait_secs
        );
    }
}
