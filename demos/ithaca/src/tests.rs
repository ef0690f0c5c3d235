//! Unit tests for the Ithaca scenario.

use rand::distributions::Uniform;

use bus_core::{SimRng, SimTime};

use crate::network::{self, PAIRS};
use crate::scenario::Scenario;

#[cfg(test)]
mod network_tests {
    use super::*;

    #[test]
    fn rider_stream_is_not_the_engine_stream() {
        let unit = Uniform::new(0.0f64, 1.0);
        for seed in [0, 1, 42] {
            let mut engine = SimRng::new(seed);
            let mut riders = network::rider_rng(seed);
            let a: Vec<f64> = (0..8).map(|_| engine.sample(&unit)).collect();
            let b: Vec<f64> = (0..8).map(|_| riders.sample(&unit)).collect();
            assert_ne!(a, b, "seed {seed}");
        }
    }

    #[test]
    fn generated_day_is_reproducible() {
        let scenario = Scenario::default();
        let horizon = SimTime::from_minutes(scenario.horizon_mins);
        let a = network::generated(&scenario, horizon, 7).unwrap();
        let b = network::generated(&scenario, horizon, 7).unwrap();

        assert_eq!(a.stop_count(), 6);
        assert_eq!(a.routes.len(), 3);
        assert_eq!(a.pending_arrivals(), PAIRS.len() * scenario.riders_per_pair);
        for (x, y) in a.stops.iter().zip(&b.stops) {
            assert_eq!(x.schedule().streams(), y.schedule().streams());
        }
    }
}
