//! Scenario parameters, loadable from JSON.
//!
//! Every field has a default, so a scenario file only lists what it
//! changes:
//!
//! ```json
//! { "riders_per_pair": 40, "hold_mins": 1.5, "rotate_routes": [1, 3] }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use bus_fleet::{DEFAULT_SEATS, DEFAULT_STANDING, TravelParams};

/// A bus placed at the start of the day.
#[derive(Clone, Debug, Deserialize)]
pub struct StartingBus {
    pub name:  String,
    pub route: u32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub seed:                   u64,
    /// Length of the service day; 18 hours by default.
    pub horizon_mins:           f64,
    pub snapshot_interval_mins: f64,
    /// Mean gap between riders on each origin/destination pair.
    pub mean_gap_mins:          f64,
    pub riders_per_pair:        usize,
    /// Read rider arrivals from this CSV instead of generating them.
    pub arrivals_csv:           Option<PathBuf>,
    pub replications:           usize,
    pub seats:                  usize,
    pub standing:               usize,
    /// Minutes every departure is held at the stop.
    pub hold_mins:              f64,
    /// Routes a bus cycles through each time it reaches the depot.  Empty
    /// keeps every bus on its route.
    pub rotate_routes:          Vec<u32>,
    pub buses:                  Vec<StartingBus>,
    pub travel:                 TravelParams,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            seed:                   1,
            horizon_mins:           1080.0,
            snapshot_interval_mins: 60.0,
            mean_gap_mins:          5.0,
            riders_per_pair:        20,
            arrivals_csv:           None,
            replications:           1,
            seats:                  DEFAULT_SEATS,
            standing:               DEFAULT_STANDING,
            hold_mins:              0.0,
            rotate_routes:          Vec::new(),
            buses: vec![
                StartingBus { name: "Bus 1".into(), route: 1 },
                StartingBus { name: "The Kenta Bus".into(), route: 2 },
            ],
            travel:                 TravelParams::default(),
        }
    }
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing scenario {}", path.display()))
    }
}
