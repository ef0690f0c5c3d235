//! Unit tests for bus-sim.

use bus_core::{BusId, RouteId, SimConfig, SimRng, SimTime, StopId};
use bus_fleet::Bus;
use bus_network::{PersonState, PersonStore, TransitNetwork, TransitNetworkBuilder};
use bus_schedule::{EventKind, PoissonArrivals};

use crate::{EventRecord, Map, NoopObserver, SimBuilder, SimObserver};

fn t(m: f64) -> SimTime {
    SimTime::from_minutes(m)
}

fn config(horizon: f64, seed: u64) -> SimConfig {
    SimConfig::new(t(horizon), seed)
}

/// Depot D and stops S, M, Y on a loop of 1-mile legs; one rider waits at S
/// from t = 1 for Y.
fn dsmy() -> TransitNetwork {
    let mut b = TransitNetworkBuilder::new();
    for name in ["D", "S", "M", "Y"] {
        b.add_stop(name).unwrap();
    }
    b.depot("D").unwrap();
    b.add_route(1, &["D", "S", "M", "Y", "D"], &[1.0; 4]).unwrap();
    b.arrivals("S", "Y", vec![t(1.0)]).unwrap();
    b.build()
}

/// Two stops and a shuttle between them.
fn shuttle() -> TransitNetwork {
    let mut b = TransitNetworkBuilder::new();
    b.add_stop("A").unwrap();
    b.add_stop("B").unwrap();
    b.add_route(1, &["A", "B", "A"], &[1.0, 1.0]).unwrap();
    b.build()
}

/// The six-stop, three-route town with random riders on six pairs.
fn town(seed: u64) -> TransitNetwork {
    let mut b = TransitNetworkBuilder::new();
    for name in ["Depot", "WegE", "WegW", "ComE", "ComW", "Ctown"] {
        b.add_stop(name).unwrap();
    }
    b.depot("Depot").unwrap();
    b.add_route(
        1,
        &["Depot", "WegE", "ComE", "Ctown", "ComW", "WegE", "Depot"],
        &[0.5, 2.0, 2.0, 2.0, 2.0, 0.5],
    )
    .unwrap();
    b.add_route(2, &["ComE", "Ctown", "ComW", "ComE"], &[2.0, 2.0, 0.3]).unwrap();
    b.add_route(3, &["Depot", "WegE", "ComE", "ComW", "WegW", "Depot"], &[0.5, 2.0, 2.0, 2.0, 0.5])
        .unwrap();

    let mut rng = SimRng::new(seed);
    let pairs = [
        ("WegE", "ComE"),
        ("WegE", "Ctown"),
        ("ComE", "Ctown"),
        ("Ctown", "ComW"),
        ("Ctown", "WegW"),
        ("ComW", "WegW"),
    ];
    for (i, (from, to)) in pairs.into_iter().enumerate() {
        let mut child = rng.child(i as u64);
        b.generate_arrivals(from, to, &PoissonArrivals::new(5.0, 20), &mut child).unwrap();
    }
    b.build()
}

fn town_map(horizon: f64, seed: u64) -> Map {
    SimBuilder::new(config(horizon, seed), town(seed))
        .bus("Bus 1", RouteId(1))
        .bus("The Kenta Bus", RouteId(2))
        .build()
        .unwrap()
}

/// Collects everything the engine reports.
#[derive(Default)]
struct Recorder {
    records:   Vec<EventRecord>,
    snapshots: Vec<(SimTime, usize)>,
    starts:    usize,
    ends:      usize,
}

impl SimObserver for Recorder {
    fn on_sim_start(&mut self, _now: SimTime, _horizon: SimTime) {
        self.starts += 1;
    }

    fn on_dispatch(&mut self, record: &EventRecord) {
        self.records.push(record.clone());
    }

    fn on_snapshot(&mut self, time: SimTime, network: &TransitNetwork, _buses: &[Bus]) {
        let waiting = network.stops.iter().map(|s| s.waiting_at(time)).sum();
        self.snapshots.push((time, waiting));
    }

    fn on_sim_end(&mut self, _final_time: SimTime, _people: &PersonStore, _buses: &[Bus]) {
        self.ends += 1;
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use bus_fleet::TravelParams;

    use super::*;
    use crate::SimError;

    #[test]
    fn no_buses_is_rejected() {
        let err = SimBuilder::new(config(10.0, 0), shuttle()).build().err().unwrap();
        assert!(matches!(err, SimError::NoBuses));
    }

    #[test]
    fn allocation_must_cover_every_route() {
        let err = SimBuilder::new(config(10.0, 0), town(0)).allocate(&[1, 1]).build().err().unwrap();
        assert!(matches!(err, SimError::AllocationMismatch { routes: 3, got: 2 }));
    }

    #[test]
    fn allocation_places_buses_by_route_number() {
        let map = SimBuilder::new(config(10.0, 0), town(0)).allocate(&[2, 0, 1]).build().unwrap();
        let placed: Vec<(&str, RouteId)> =
            map.buses.iter().map(|b| (b.name.as_str(), b.route())).collect();
        assert_eq!(
            placed,
            [
                ("Route 1 Bus 1", RouteId(1)),
                ("Route 1 Bus 2", RouteId(1)),
                ("Route 3 Bus 1", RouteId(3)),
            ]
        );
        assert_eq!(map.buses[2].id, BusId(2));
    }

    #[test]
    fn unknown_route_is_rejected() {
        let err = SimBuilder::new(config(10.0, 0), shuttle())
            .bus("Lost", RouteId(9))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, SimError::Network(_)));
    }

    #[test]
    fn bad_config_and_travel_are_rejected() {
        let err = SimBuilder::new(config(-1.0, 0), shuttle())
            .bus("Bus 1", RouteId(1))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, SimError::Core(_)));

        let err = SimBuilder::new(config(10.0, 0), shuttle())
            .bus("Bus 1", RouteId(1))
            .travel(TravelParams { short_hop_speed: 0.0, ..TravelParams::default() })
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, SimError::Fleet(_)));
    }

    #[test]
    fn capacity_applies_to_every_bus() {
        let map = SimBuilder::new(config(10.0, 0), town(0))
            .allocate(&[1, 1, 1])
            .capacity(4, 2)
            .build()
            .unwrap();
        assert!(map.buses.iter().all(|b| b.capacity() == 6 && b.seat_capacity == 4));
    }
}

// ── Event loop ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod engine_tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn horizon_zero_dispatches_only_initial_departures() {
        let mut map = town_map(0.0, 1);
        let summary = map.simulate(&mut NoopObserver).unwrap();
        assert_eq!(summary.dispatched, 2);
        assert_eq!(summary.final_time, SimTime::ZERO);
        assert_eq!(summary.pending, 2);
        assert!(map
            .event_log()
            .iter()
            .all(|r| r.kind == EventKind::Departure && r.time == SimTime::ZERO));
        // Bus 1 leaves the depot, the Kenta bus leaves Commons.
        assert_eq!(map.event_log()[0].stop, StopId(0));
        assert_eq!(map.event_log()[1].stop, StopId(3));
    }

    #[test]
    fn clock_is_monotonic_and_capacity_holds() {
        let mut map = SimBuilder::new(config(1080.0, 11), town(11))
            .bus("Bus 1", RouteId(1))
            .bus("The Kenta Bus", RouteId(2))
            .capacity(5, 2)
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        map.simulate(&mut rec).unwrap();

        assert!(rec.records.len() > 100);
        assert!(rec.records.windows(2).all(|w| w[0].time <= w[1].time));
        assert!(rec.records.iter().all(|r| r.occupancy <= 7));
        assert!(rec.records.iter().all(|r| r.successor_time >= r.time));
        assert!(rec.records.iter().all(|r| r.time <= t(1080.0)));
        assert_eq!(map.now(), rec.records.last().unwrap().time);
    }

    #[test]
    fn waiting_time_is_set_once_and_non_negative() {
        let mut map = town_map(1080.0, 3);
        map.simulate(&mut NoopObserver).unwrap();

        let people = map.people();
        assert!(!people.is_empty());
        for p in people.iter() {
            match p.state() {
                PersonState::Waiting => assert_eq!(p.waiting_time(), None),
                _ => assert!(p.waiting_time().unwrap() >= 0.0),
            }
            if p.state() == PersonState::Arrived {
                assert!(p.travel_time().unwrap() > 0.0);
            }
        }
        assert!(people.count_in(PersonState::Arrived) > 0);
    }

    #[test]
    fn single_rider_scenario() {
        let mut map = SimBuilder::new(config(100.0, 0), dsmy())
            .bus("Bus 1", RouteId(1))
            .build()
            .unwrap();
        let mut obs = NoopObserver;
        let h = t(100.0);

        let dep = map.step(h, &mut obs).unwrap().unwrap();
        assert_eq!((dep.kind, dep.stop, dep.time), (EventKind::Departure, StopId(0), SimTime::ZERO));
        assert_eq!(dep.boarded, 0);

        let arr = map.step(h, &mut obs).unwrap().unwrap();
        assert_eq!((arr.kind, arr.stop), (EventKind::Arrival, StopId(1)));
        assert!(arr.time >= t(1.0));
        assert_eq!(map.people().len(), 0, "nobody materialized until a bus boards");

        let dep = map.step(h, &mut obs).unwrap().unwrap();
        assert_eq!((dep.kind, dep.stop), (EventKind::Departure, StopId(1)));
        assert_eq!(dep.boarded, 1);
        assert_eq!(dep.occupancy, 1);
        let rider = map.people().get(bus_core::PersonId(0)).unwrap();
        assert_eq!(rider.state(), PersonState::Sitting);
        assert!((rider.waiting_time().unwrap() - (arr.time.minutes() - 1.0)).abs() < 1e-9);

        map.simulate(&mut obs).unwrap();
        let rider = map.people().get(bus_core::PersonId(0)).unwrap();
        assert_eq!(rider.state(), PersonState::Arrived);
        let drop_off = map
            .event_log()
            .iter()
            .find(|r| r.alighted == 1)
            .unwrap();
        assert_eq!(drop_off.stop, StopId(3));
    }

    #[test]
    fn rider_stands_when_there_are_no_seats() {
        let mut map = SimBuilder::new(config(3.5, 0), dsmy())
            .bus("Bus 1", RouteId(1))
            .capacity(0, 10)
            .build()
            .unwrap();
        map.simulate(&mut NoopObserver).unwrap();
        let rider = map.people().get(bus_core::PersonId(0)).unwrap();
        assert_eq!(rider.state(), PersonState::Standing);
    }

    #[test]
    fn shuttle_alternates_forever() {
        let mut map = SimBuilder::new(config(120.0, 0), shuttle())
            .bus("Shuttle", RouteId(1))
            .build()
            .unwrap();
        let mut obs = NoopObserver;
        let mut kinds = Vec::new();
        let mut arrival_stops = Vec::new();
        while let Some(r) = map.step(t(120.0), &mut obs).unwrap() {
            assert!((1..=2).contains(&map.buses[0].next_stop_index()));
            kinds.push(r.kind);
            if r.kind == EventKind::Arrival {
                arrival_stops.push(r.stop);
            }
        }
        assert!(kinds.len() > 60);
        assert!(kinds.iter().step_by(2).all(|&k| k == EventKind::Departure));
        assert!(kinds.iter().skip(1).step_by(2).all(|&k| k == EventKind::Arrival));
        for (i, stop) in arrival_stops.iter().enumerate() {
            let expected = if i % 2 == 0 { StopId(1) } else { StopId(0) };
            assert_eq!(*stop, expected);
        }
    }

    #[test]
    fn boarded_riders_all_arrive() {
        let mut b = TransitNetworkBuilder::new();
        for name in ["D", "S", "M", "Y"] {
            b.add_stop(name).unwrap();
        }
        b.depot("D").unwrap();
        b.add_route(1, &["D", "S", "M", "Y", "D"], &[1.0; 4]).unwrap();
        b.arrivals("S", "Y", vec![t(1.0), t(4.0), t(20.0)]).unwrap();
        b.arrivals("M", "S", vec![t(2.0), t(9.0)]).unwrap();
        b.arrivals("Y", "M", vec![t(0.5), t(25.0)]).unwrap();
        let mut map = SimBuilder::new(config(600.0, 2), b.build())
            .bus("Bus 1", RouteId(1))
            .build()
            .unwrap();
        map.simulate(&mut NoopObserver).unwrap();

        assert_eq!(map.people().len(), 7);
        assert_eq!(map.people().count_in(PersonState::Arrived), 7);
        let bus = &map.buses[0];
        assert_eq!((bus.boarded_total(), bus.alighted_total(), bus.occupancy()), (7, 7, 0));
    }

    #[test]
    fn same_seed_same_run() {
        let mut a = town_map(600.0, 21);
        let mut b = town_map(600.0, 21);
        a.simulate(&mut NoopObserver).unwrap();
        b.simulate(&mut NoopObserver).unwrap();
        assert_eq!(a.event_log(), b.event_log());

        let mut c = town_map(600.0, 22);
        c.simulate(&mut NoopObserver).unwrap();
        assert_ne!(a.event_log(), c.event_log());
    }

    #[test]
    fn resumed_run_matches_single_run() {
        let mut split = town_map(300.0, 8);
        let first = split.simulate_until(t(100.0), &mut NoopObserver).unwrap();
        let second = split.simulate_until(t(300.0), &mut NoopObserver).unwrap();

        let mut whole = town_map(300.0, 8);
        let all = whole.simulate(&mut NoopObserver).unwrap();

        assert_eq!(first.dispatched + second.dispatched, all.dispatched);
        assert_eq!(split.event_log(), whole.event_log());
        assert!(split.event_log().iter().map(|r| r.seq).eq(0..all.dispatched));
    }

    #[test]
    fn observer_sees_every_dispatch() {
        let mut map = town_map(240.0, 4);
        let mut rec = Recorder::default();
        let summary = map.simulate(&mut rec).unwrap();
        assert_eq!(rec.records.len() as u64, summary.dispatched);
        assert_eq!(rec.records, map.event_log());
        assert_eq!((rec.starts, rec.ends), (1, 1));
    }

    #[test]
    fn snapshots_every_interval_through_horizon() {
        let mut cfg = config(180.0, 5);
        cfg.snapshot_interval_mins = 60.0;
        let mut map = SimBuilder::new(cfg, town(5))
            .bus("Bus 1", RouteId(1))
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        map.simulate(&mut rec).unwrap();

        let times: Vec<SimTime> = rec.snapshots.iter().map(|&(at, _)| at).collect();
        assert_eq!(times, [t(0.0), t(60.0), t(120.0), t(180.0)]);
        assert_eq!(rec.snapshots[0].1, 0, "nobody has arrived at t = 0");
    }

    #[test]
    fn event_log_can_be_disabled() {
        let mut cfg = config(60.0, 5);
        cfg.record_events = false;
        let mut map = SimBuilder::new(cfg, shuttle()).bus("Bus 1", RouteId(1)).build().unwrap();
        let summary = map.simulate(&mut NoopObserver).unwrap();
        assert!(summary.dispatched > 0);
        assert!(map.event_log().is_empty());
    }

    #[test]
    fn stale_events_are_fatal() {
        let mut map = SimBuilder::new(config(60.0, 0), shuttle())
            .bus("Bus 1", RouteId(1))
            .build()
            .unwrap();
        map.schedule(bus_schedule::Event::arrival(t(0.5), BusId(0), StopId(0)));
        map.step(t(60.0), &mut NoopObserver).unwrap();
        let err = map.step(t(60.0), &mut NoopObserver).unwrap_err();
        assert!(matches!(err, SimError::StaleEvent { reason, .. } if reason.contains("next stop")));

        let mut map = SimBuilder::new(config(60.0, 0), shuttle())
            .bus("Bus 1", RouteId(1))
            .build()
            .unwrap();
        map.schedule(bus_schedule::Event::departure(t(1.0), BusId(9), StopId(0)));
        map.step(t(60.0), &mut NoopObserver).unwrap();
        assert!(matches!(
            map.step(t(60.0), &mut NoopObserver),
            Err(SimError::StaleEvent { reason: "no such bus", .. })
        ));
    }

    #[test]
    fn queryable_state() {
        let mut map = town_map(30.0, 6);
        map.simulate(&mut NoopObserver).unwrap();

        let positions = map.bus_positions().unwrap();
        assert_eq!(positions.len(), 2);
        assert!(positions.iter().all(|p| (0.0..=1.0).contains(&p.progress)));
        assert_eq!(map.stop_waiting().len(), 6);
        assert_eq!(map.pending().count(), 2);
        assert!(map.pending().all(|e| e.time > t(30.0)));
    }
}

// ── Policies ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod policy_tests {
    use bus_policy::{FixedDelay, RotateRoutes};

    use super::*;
    use crate::SimError;

    fn depot_network() -> TransitNetwork {
        let mut b = TransitNetworkBuilder::new();
        for name in ["Depot", "A", "B"] {
            b.add_stop(name).unwrap();
        }
        b.depot("Depot").unwrap();
        b.add_route(1, &["Depot", "A", "Depot"], &[1.0, 1.0]).unwrap();
        b.add_route(2, &["A", "B", "A"], &[1.0, 1.0]).unwrap();
        b.add_route(3, &["Depot", "A", "B", "Depot"], &[1.0, 1.0, 1.0]).unwrap();
        b.build()
    }

    #[test]
    fn keep_route_never_switches() {
        let mut map = SimBuilder::new(config(120.0, 0), depot_network())
            .bus("Bus 1", RouteId(1))
            .build()
            .unwrap();
        map.simulate(&mut NoopObserver).unwrap();
        assert!(map.event_log().iter().all(|r| r.route == RouteId(1)));
    }

    #[test]
    fn rotation_switches_at_depot() {
        let policy = RotateRoutes::new(vec![RouteId(1), RouteId(3)]).unwrap();
        let mut map = SimBuilder::new(config(120.0, 0), depot_network())
            .bus("Bus 1", RouteId(1))
            .reroute_policy(policy)
            .build()
            .unwrap();
        map.simulate(&mut NoopObserver).unwrap();

        let log = map.event_log();
        assert!(log.iter().any(|r| r.route == RouteId(3)));
        assert!(log.iter().any(|r| r.kind == EventKind::Arrival && r.stop == StopId(2)));
        for r in log {
            assert!(map.network.route(r.route).unwrap().goes_to(r.stop));
        }
        // Switches only ever happen on arrival at the depot.
        for w in log.windows(2) {
            if w[0].route != w[1].route {
                assert_eq!(w[1].stop, StopId(0));
            }
        }
    }

    #[test]
    fn reroute_must_start_at_depot() {
        let policy = RotateRoutes::new(vec![RouteId(1), RouteId(2)]).unwrap();
        let mut map = SimBuilder::new(config(120.0, 0), depot_network())
            .bus("Bus 1", RouteId(1))
            .reroute_policy(policy)
            .build()
            .unwrap();
        let err = map.simulate(&mut NoopObserver).unwrap_err();
        assert!(matches!(err, SimError::RerouteOffDepot { route: RouteId(2), .. }));
    }

    #[test]
    fn departure_hold_delays_every_leg() {
        let mut map = SimBuilder::new(config(120.0, 0), shuttle())
            .bus("Bus 1", RouteId(1))
            .departure_policy(FixedDelay::new(2.0).unwrap())
            .build()
            .unwrap();
        map.simulate(&mut NoopObserver).unwrap();
        let departures: Vec<_> =
            map.event_log().iter().filter(|r| r.kind == EventKind::Departure).collect();
        assert!(!departures.is_empty());
        for r in departures {
            assert!(r.successor_time.since(r.time) >= 5.0 - 1e-9);
        }
    }
}

// ── Replications ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod batch_tests {
    use super::*;
    use crate::{SimResult, replication_seeds, run_replications};

    #[test]
    fn seeds_are_consecutive() {
        assert_eq!(replication_seeds(10, 3), [10, 11, 12]);
        assert_eq!(replication_seeds(u64::MAX, 2), [u64::MAX, 0]);
    }

    #[test]
    fn replications_run_in_seed_order() {
        let seeds = replication_seeds(40, 4);
        let results = run_replications(&seeds, |seed| {
            let mut map = town_map(240.0, seed);
            map.simulate(&mut NoopObserver)?;
            Ok((seed, map.people().len()))
        });
        assert_eq!(results.len(), 4);
        let got: Vec<u64> = results.into_iter().map(|r| r.unwrap().0).collect();
        assert_eq!(got, seeds);
    }

    #[test]
    fn replication_is_reproducible() {
        let run = |seed: u64| -> SimResult<Vec<EventRecord>> {
            let mut map = town_map(240.0, seed);
            map.simulate(&mut NoopObserver)?;
            Ok(map.event_log().to_vec())
        };
        let a = run_replications(&[5, 5], run);
        assert_eq!(a[0].as_ref().unwrap(), a[1].as_ref().unwrap());
    }
}
