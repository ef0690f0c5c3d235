//! The Ithaca network: a depot, five stops, three routes.
//!
//! Distances are miles.  Route 2 is a downtown loop that never visits the
//! depot; routes 1 and 3 start and end there.

use bus_core::{SimRng, SimTime};
use bus_network::{NetworkResult, TransitNetwork, TransitNetworkBuilder};
use bus_schedule::{ArrivalTable, PoissonArrivals};

use crate::scenario::Scenario;

pub const DEPOT:       &str = "TDOG Depot";
pub const WEGMANS_E:   &str = "Wegmans-Eastbound";
pub const WEGMANS_W:   &str = "Wegmans-Westbound";
pub const COMMONS_E:   &str = "Commons-Eastbound";
pub const COMMONS_W:   &str = "Commons-Westbound";
pub const COLLEGETOWN: &str = "Collegetown";

/// Origin/destination pairs riders travel between.
pub const PAIRS: [(&str, &str); 6] = [
    (WEGMANS_E,   COMMONS_E),
    (WEGMANS_E,   COLLEGETOWN),
    (COMMONS_E,   COLLEGETOWN),
    (COLLEGETOWN, COMMONS_W),
    (COLLEGETOWN, WEGMANS_W),
    (COMMONS_W,   WEGMANS_W),
];

/// Stops and routes, without riders.
pub fn builder() -> NetworkResult<TransitNetworkBuilder> {
    let mut b = TransitNetworkBuilder::new();
    for name in [DEPOT, WEGMANS_E, WEGMANS_W, COMMONS_E, COMMONS_W, COLLEGETOWN] {
        b.add_stop(name)?;
    }
    b.depot(DEPOT)?;

    b.add_route(
        1,
        &[DEPOT, WEGMANS_E, COMMONS_E, COLLEGETOWN, COMMONS_W, WEGMANS_E, DEPOT],
        &[0.5, 2.0, 2.0, 2.0, 2.0, 0.5],
    )?;
    b.add_route(2, &[COMMONS_E, COLLEGETOWN, COMMONS_W, COMMONS_E], &[2.0, 2.0, 0.3])?;
    b.add_route(
        3,
        &[DEPOT, WEGMANS_E, COMMONS_E, COMMONS_W, WEGMANS_W, DEPOT],
        &[0.5, 2.0, 2.0, 2.0, 0.5],
    )?;
    Ok(b)
}

/// Child offset reserved for rider generation.
const RIDER_STREAM: u64 = u64::MAX;

/// The RNG riders are drawn from for a run seeded with `seed`.
///
/// The engine seeds its own `SimRng` with the same `seed`, so riders come
/// from a child stream rather than from `SimRng::new(seed)` itself.
pub fn rider_rng(seed: u64) -> SimRng {
    SimRng::new(seed).child(RIDER_STREAM)
}

/// The network with random riders drawn from `seed`, one independent
/// stream per pair.  No rider shows up after `horizon`.
pub fn generated(scenario: &Scenario, horizon: SimTime, seed: u64) -> NetworkResult<TransitNetwork> {
    let mut b = builder()?;
    let arrivals = PoissonArrivals::new(scenario.mean_gap_mins, scenario.riders_per_pair).until(horizon);
    let mut rng = rider_rng(seed);
    for (i, (origin, destination)) in PAIRS.into_iter().enumerate() {
        let mut stream = rng.child(i as u64);
        b.generate_arrivals(origin, destination, &arrivals, &mut stream)?;
    }
    Ok(b.build())
}

/// The network with riders read from a pre-generated table.
pub fn from_table(table: &ArrivalTable) -> NetworkResult<TransitNetwork> {
    let mut b = builder()?;
    b.arrival_table(table)?;
    Ok(b.build())
}
