//! Unit tests for lift-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CarId, FloorId, PassengerId};

    #[test]
    fn index_roundtrip() {
        let id = CarId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(CarId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(CarId(0) < CarId(1));
        assert!(FloorId(100) > FloorId(99));
        assert!(PassengerId(7) < PassengerId(8));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(CarId::INVALID.0, u32::MAX);
        assert_eq!(FloorId::INVALID.0, u32::MAX);
        assert_eq!(PassengerId::INVALID.0, u64::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(FloorId(7).to_string(), "FloorId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(15).since(Tick(10)), 5u64);
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(0.01);
        assert_eq!(clock.now_secs(), 0.0);
        for _ in 0..100 {
            clock.advance();
        }
        assert!((clock.now_secs() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn secs_to_ticks_rounds_up() {
        let clock = SimClock::new(0.01);
        assert_eq!(clock.secs_to_ticks(1.0), 100);
        assert_eq!(clock.secs_to_ticks(0.015), 2);
    }

    #[test]
    fn clock_hms() {
        let mut clock = SimClock::new(1.0);
        // Advance 1 hour, 1 minute, 1 second.
        for _ in 0..3661 {
            clock.advance();
        }
        assert_eq!(clock.elapsed_hms(), (1, 1, 1));
    }

    #[test]
    fn sim_config_end_tick() {
        let cfg = SimConfig {
            tick_duration_secs: 0.01,
            horizon_secs: 60.0,
            seed: 42,
        };
        assert_eq!(cfg.end_tick(), Tick(6000));
    }

    #[test]
    fn one_day_horizon() {
        let cfg = SimConfig::one_day(1);
        assert_eq!(cfg.horizon_secs, 86_400.0);
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn child_streams_diverge() {
        let mut root1 = SimRng::new(1);
        let mut root2 = SimRng::new(1);
        let mut c0 = root1.child(0);
        let mut c1 = root2.child(1);
        let a: u64 = c0.random();
        let b: u64 = c1.random();
        assert_ne!(a, b, "child streams with different offsets should diverge");
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut rng = SimRng::new(0);
        for _ in 0..1000 {
            let v = rng.gen_range(0.0f64..1.0);
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }
}
