//! Unit tests for bus-core primitives.

#[cfg(test)]
mod ids {
    use crate::{BusId, PersonId, RouteId, StopId};

    #[test]
    fn index_roundtrip() {
        let id = StopId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(StopId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(BusId(0) < BusId(1));
        assert!(PersonId(100) > PersonId(99));
    }

    #[test]
    fn display() {
        assert_eq!(RouteId(3).to_string(), "RouteId(3)");
    }
}

#[cfg(test)]
mod time {
    use ordered_float::OrderedFloat;

    use crate::{SimConfig, SimTime};

    #[test]
    fn time_arithmetic() {
        let t = SimTime::from_minutes(10.0);
        assert_eq!(t + 5.5, SimTime::from_minutes(15.5));
        assert_eq!(t.offset(2.0), SimTime::from_minutes(12.0));
        assert_eq!(SimTime::from_minutes(15.0) - t, 5.0);
        assert_eq!(SimTime::from_hours(1.5).minutes(), 90.0);
    }

    #[test]
    fn total_order_for_queue_keys() {
        let mut times = vec![
            SimTime::from_minutes(3.0),
            SimTime::ZERO,
            SimTime::from_minutes(1.25),
        ];
        times.sort();
        assert_eq!(times[0], SimTime::ZERO);
        assert_eq!(times[2], SimTime::from_minutes(3.0));
    }

    #[test]
    fn hour_bucket() {
        assert_eq!(SimTime::from_minutes(0.0).hour(), 0);
        assert_eq!(SimTime::from_minutes(59.9).hour(), 0);
        assert_eq!(SimTime::from_minutes(60.0).hour(), 1);
        assert_eq!(SimTime::from_minutes(1079.0).hour(), 17);
    }

    #[test]
    fn non_finite_rejected() {
        assert!(SimTime::try_from_minutes(f64::NAN).is_err());
        assert!(SimTime::try_from_minutes(f64::INFINITY).is_err());
        assert!(SimTime::try_from_minutes(4.0).is_ok());
    }

    #[test]
    fn display_shows_clock() {
        assert_eq!(SimTime::from_minutes(65.5).to_string(), "t=65.50 (01:05.50)");
    }

    #[test]
    fn config_validation() {
        let cfg = SimConfig::new(SimTime::from_minutes(1080.0), 42);
        assert!(cfg.validate().is_ok());
        assert!(!cfg.snapshots_enabled());

        let bad_horizon = SimConfig::new(SimTime::from_minutes(-1.0), 42);
        assert!(bad_horizon.validate().is_err());

        // A run with no end would never stop dispatching.
        for endless in [f64::INFINITY, f64::NAN] {
            let cfg = SimConfig::new(SimTime(OrderedFloat(endless)), 42);
            assert!(cfg.validate().is_err(), "horizon {endless} accepted");
        }

        let bad_interval = SimConfig { snapshot_interval_mins: -5.0, ..cfg };
        assert!(bad_interval.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use rand::distributions::Uniform;

    use crate::SimRng;

    #[test]
    fn same_seed_same_stream() {
        let dist = Uniform::new(0.0f64, 1.0);
        let mut a = SimRng::new(7);
        let mut b = SimRng::new(7);
        for _ in 0..16 {
            assert_eq!(a.sample(&dist), b.sample(&dist));
        }
    }

    #[test]
    fn children_are_deterministic_and_distinct() {
        let mut root_a = SimRng::new(1);
        let mut root_b = SimRng::new(1);
        let mut c1 = root_a.child(0);
        let mut c2 = root_b.child(0);
        assert_eq!(c1.gen_range(0u64..u64::MAX), c2.gen_range(0u64..u64::MAX));

        let mut root = SimRng::new(1);
        let mut x = root.child(1);
        let mut y = root.child(2);
        let xs: Vec<u64> = (0..4).map(|_| x.gen_range(0..u64::MAX)).collect();
        let ys: Vec<u64> = (0..4).map(|_| y.gen_range(0..u64::MAX)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn gen_bool_clamps() {
        let mut rng = SimRng::new(3);
        assert!(rng.gen_bool(2.0));
        assert!(!rng.gen_bool(-1.0));
    }
}
