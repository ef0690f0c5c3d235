//! Unit tests for bus-fleet.

use bus_core::{BusId, RouteId, SimRng, SimTime, StopId};
use bus_network::{PersonState, PersonStore, TransitNetwork, TransitNetworkBuilder};

use crate::{Bus, TravelModel, TravelParams};

fn t(m: f64) -> SimTime {
    SimTime::from_minutes(m)
}

/// Depot D and stops S, M, Y on one loop of 1-mile legs.
fn loop_network() -> TransitNetwork {
    let mut b = TransitNetworkBuilder::new();
    for name in ["D", "S", "M", "Y", "X"] {
        b.add_stop(name).unwrap();
    }
    b.depot("D").unwrap();
    b.add_route(1, &["D", "S", "M", "Y", "D"], &[1.0; 4]).unwrap();
    b.add_route(2, &["D", "X", "D"], &[3.0, 3.0]).unwrap();
    b.build()
}

fn model() -> TravelModel {
    TravelModel::new(TravelParams::default()).unwrap()
}

// ── TravelModel ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod travel_tests {
    use super::*;

    #[test]
    fn short_hop_is_constant_speed() {
        let m = model();
        let mut rng = SimRng::new(0);
        assert!((m.travel_time(1.0, &mut rng) - 3.0).abs() < 1e-12);
        assert!((m.travel_time(0.5, &mut rng) - 1.5).abs() < 1e-12);
        assert_eq!(m.travel_time(0.0, &mut rng), 0.0);
    }

    #[test]
    fn long_haul_is_bounded() {
        let m = model();
        let mut rng = SimRng::new(7);
        for d in [2.0, 2.5, 40.0] {
            let mins = m.travel_time(d, &mut rng);
            assert!((5.0..=7.0).contains(&mins), "{mins}");
        }
    }

    #[test]
    fn boarding_delay_is_bounded() {
        let m = model();
        let mut rng = SimRng::new(3);
        for _ in 0..1_000 {
            let d = m.boarding_delay(&mut rng);
            assert!((0.0..=5.0 / 60.0).contains(&d));
        }
    }

    #[test]
    fn rejects_bad_params() {
        let bad = [
            TravelParams { short_hop_speed: 0.0, ..TravelParams::default() },
            TravelParams { short_hop_threshold: -1.0, ..TravelParams::default() },
            TravelParams { long_haul_min_mins: 8.0, ..TravelParams::default() },
            TravelParams { boarding_mode_mins: 1.0, ..TravelParams::default() },
        ];
        for p in bad {
            assert!(TravelModel::new(p).is_err());
        }
    }
}

// ── Bus ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod bus_tests {
    use super::*;
    use crate::{FleetError, Leg};

    #[test]
    fn arrive_advances_index_and_wraps() {
        let net = loop_network();
        let route = net.route(RouteId(1)).unwrap();
        let mut people = PersonStore::new();
        let mut bus = Bus::new(BusId(0), "Bus 1", route);

        let mut seen = Vec::new();
        for _ in 0..6 {
            let stop = &net.stops[route.stop_at(bus.next_stop_index()).index()];
            let ev = bus.arrive(route, stop, t(0.0), &mut people).unwrap();
            assert_eq!(ev.stop, stop.id);
            seen.push(bus.next_stop_index());
        }
        assert_eq!(seen, [2, 3, 4, 1, 2, 3]);
    }

    #[test]
    fn arrive_drops_only_riders_for_this_stop() {
        let mut net = loop_network();
        let mut people = PersonStore::new();
        let route = net.routes.get(RouteId(1)).unwrap().clone();
        let mut bus = Bus::new(BusId(0), "Bus 1", &route);

        // Two consecutive riders for M, one for Y.
        let depot = &mut net.stops[0];
        depot.admit(&mut people, StopId(2), t(0.0));
        depot.admit(&mut people, StopId(2), t(0.0));
        depot.admit(&mut people, StopId(3), t(0.0));
        bus.board(&route, depot, t(0.0), &mut people, &mut SimRng::new(1), &model()).unwrap();
        assert_eq!(bus.occupancy(), 3);

        bus.arrive(&route, &net.stops[1], t(3.0), &mut people).unwrap();
        assert_eq!(bus.occupancy(), 3);
        bus.arrive(&route, &net.stops[2], t(6.0), &mut people).unwrap();
        assert_eq!(bus.occupancy(), 1);
        assert_eq!(bus.alighted_total(), 2);
        assert_eq!(people.count_in(PersonState::Arrived), 2);
        assert_eq!(people.get(bus.passengers()[0]).unwrap().destination, StopId(3));
    }

    #[test]
    fn board_is_fifo_and_skips_other_routes() {
        let mut net = loop_network();
        let mut people = PersonStore::new();
        let route = net.routes.get(RouteId(1)).unwrap().clone();
        let mut bus = Bus::new(BusId(0), "Bus 1", &route);

        let depot = &mut net.stops[0];
        let a = depot.admit(&mut people, StopId(1), t(0.0));
        let x = depot.admit(&mut people, StopId(4), t(0.0));
        let b = depot.admit(&mut people, StopId(3), t(0.5));

        let done = bus
            .board(&route, depot, t(2.0), &mut people, &mut SimRng::new(1), &model())
            .unwrap();
        assert!(done >= t(2.0));
        assert_eq!(bus.passengers(), [a, b]);
        assert_eq!(depot.people_waiting(), [x]);

        let pa = people.get(a).unwrap();
        assert_eq!(pa.state(), PersonState::Standing);
        assert_eq!(pa.waiting_time(), Some(2.0));
        let pb = people.get(b).unwrap();
        assert!(pb.waiting_time().unwrap() >= 1.5);
    }

    #[test]
    fn board_materializes_due_arrivals() {
        let mut b = TransitNetworkBuilder::new();
        for name in ["D", "S"] {
            b.add_stop(name).unwrap();
        }
        b.add_route(1, &["D", "S", "D"], &[1.0, 1.0]).unwrap();
        b.arrivals("D", "S", vec![t(0.5), t(1.0), t(50.0)]).unwrap();
        let mut net = b.build();
        let route = net.routes.get(RouteId(1)).unwrap().clone();
        let mut people = PersonStore::new();
        let mut bus = Bus::new(BusId(0), "Bus 1", &route);

        bus.board(&route, &mut net.stops[0], t(2.0), &mut people, &mut SimRng::new(2), &model())
            .unwrap();
        assert_eq!(bus.occupancy(), 2);
        assert_eq!(net.stops[0].schedule().remaining(), 1);
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut net = loop_network();
        let mut people = PersonStore::new();
        let route = net.routes.get(RouteId(1)).unwrap().clone();
        let mut bus = Bus::new(BusId(0), "Tiny", &route).with_capacity(2, 1);

        let depot = &mut net.stops[0];
        for _ in 0..5 {
            depot.admit(&mut people, StopId(1), t(0.0));
        }
        bus.board(&route, depot, t(1.0), &mut people, &mut SimRng::new(4), &model()).unwrap();
        assert_eq!(bus.occupancy(), 3);
        assert!(bus.is_full());
        assert_eq!(depot.num_waiting(), 2);

        let extra = people.spawn(StopId(0), StopId(1), t(0.0));
        assert!(matches!(bus.load(extra), Err(FleetError::OverCapacity { capacity: 3, .. })));
    }

    #[test]
    fn depart_seats_first_riders_and_schedules_arrival() {
        let mut net = loop_network();
        let mut people = PersonStore::new();
        let route = net.routes.get(RouteId(1)).unwrap().clone();
        let mut bus = Bus::new(BusId(0), "Bus 1", &route).with_capacity(2, 5);

        let depot = &mut net.stops[0];
        let riders: Vec<_> = (0..3).map(|_| depot.admit(&mut people, StopId(2), t(0.0))).collect();

        let ev = bus
            .depart(&route, depot, t(0.0), SimTime::ZERO, &mut people, &mut SimRng::new(5), &model())
            .unwrap();
        assert_eq!(ev.stop, StopId(1));
        assert_eq!(ev.kind, bus_schedule::EventKind::Arrival);
        assert!(ev.time >= t(3.0));
        assert!((bus.distance() - 1.0).abs() < 1e-12);

        let states: Vec<_> = riders.iter().map(|&r| people.get(r).unwrap().state()).collect();
        assert_eq!(states, [PersonState::Sitting, PersonState::Sitting, PersonState::Standing]);
        assert!(matches!(bus.leg(), Leg::Travelling { from: StopId(0), to: StopId(1), .. }));
    }

    #[test]
    fn departure_floor_reruns_boarding() {
        let mut b = TransitNetworkBuilder::new();
        for name in ["D", "S"] {
            b.add_stop(name).unwrap();
        }
        b.add_route(1, &["D", "S", "D"], &[1.0, 1.0]).unwrap();
        b.arrivals("D", "S", vec![t(4.0)]).unwrap();
        let mut net = b.build();
        let route = net.routes.get(RouteId(1)).unwrap().clone();
        let mut people = PersonStore::new();
        let mut bus = Bus::new(BusId(0), "Bus 1", &route);

        let ev = bus
            .depart(&route, &mut net.stops[0], t(0.0), t(5.0), &mut people, &mut SimRng::new(6), &model())
            .unwrap();
        assert_eq!(bus.occupancy(), 1, "rider arriving while held gets on");
        assert!(ev.time >= t(8.0));
    }

    #[test]
    fn position_interpolates() {
        let mut net = loop_network();
        let mut people = PersonStore::new();
        let route = net.routes.get(RouteId(1)).unwrap().clone();
        let mut bus = Bus::new(BusId(0), "Bus 1", &route);

        let p0 = bus.position(&route, SimTime::ZERO);
        assert!(!p0.in_transit);
        assert_eq!((p0.last_stop, p0.next_stop), (StopId(0), StopId(1)));

        let ev = bus
            .depart(&route, &mut net.stops[0], t(0.0), SimTime::ZERO, &mut people, &mut SimRng::new(1), &model())
            .unwrap();
        let mid = SimTime::from_minutes(ev.time.minutes() / 2.0);
        let p = bus.position(&route, mid);
        assert!(p.in_transit);
        assert!((p.progress - 0.5).abs() < 1e-9);
        assert_eq!(bus.position(&route, t(100.0)).progress, 1.0);
    }

    #[test]
    fn reassign_resets_index_and_checks_route() {
        let net = loop_network();
        let r1 = net.route(RouteId(1)).unwrap();
        let r2 = net.route(RouteId(2)).unwrap();
        let mut people = PersonStore::new();
        let mut bus = Bus::new(BusId(0), "Bus 1", r1);

        assert!(matches!(
            bus.arrive(r2, &net.stops[1], t(1.0), &mut people),
            Err(FleetError::WrongRoute { .. })
        ));
        bus.reassign(r2);
        assert_eq!(bus.route(), RouteId(2));
        assert_eq!(bus.next_stop_index(), 1);
        assert!(bus.goes_to(r2, StopId(4)));
        assert!(!bus.goes_to(r1, StopId(1)), "not its route any more");
    }
}
