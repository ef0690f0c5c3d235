//! ithaca — one service day on a small three-route bus network.
//!
//! Two buses run from 00:00 to 18:00 of simulated time: "Bus 1" on the
//! long route through Wegmans, the Commons and Collegetown, and "The Kenta
//! Bus" on the downtown loop.  Riders appear at random on six
//! origin/destination pairs.
//!
//! ```text
//! cargo run -p ithaca -- --seed 7 --riders 40
//! RUST_LOG=bus_sim=debug cargo run -p ithaca -- --horizon 120
//! cargo run -p ithaca --release -- --replications 32
//! ```
//!
//! A single run writes raw CSV records to `--output`; replications only
//! print a per-seed summary.

mod network;
mod scenario;

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bus_core::{RouteId, SimConfig, SimTime};
use bus_fleet::Bus;
use bus_network::{PersonState, PersonStore};
use bus_output::{CsvWriter, SimOutputObserver};
use bus_policy::{FixedDelay, KeepRoute, PolicyContext, ReroutePolicy, RotateRoutes};
use bus_schedule::{ArrivalTable, load_arrivals_csv};
use bus_sim::{Map, NoopObserver, SimBuilder, SimResult, replication_seeds, run_replications};

use scenario::Scenario;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "ithaca", version, about = "Simulate a service day of the Ithaca bus network")]
struct Args {
    /// JSON scenario file; the flags below override its values
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Master RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Service day length in minutes
    #[arg(long)]
    horizon: Option<f64>,

    /// Mean minutes between riders on each origin/destination pair
    #[arg(long)]
    mean_gap: Option<f64>,

    /// Riders per origin/destination pair
    #[arg(long)]
    riders: Option<usize>,

    /// Run this many seeds (base seed, base + 1, ...) instead of one day
    #[arg(long)]
    replications: Option<usize>,

    /// Minutes between stop and bus snapshots; 0 disables them
    #[arg(long)]
    snapshot_interval: Option<f64>,

    /// Directory for CSV output
    #[arg(short, long, default_value = "output/ithaca")]
    output: PathBuf,
}

impl Args {
    fn scenario(&self) -> Result<Scenario> {
        let mut s = match &self.scenario {
            Some(path) => Scenario::load(path)?,
            None => Scenario::default(),
        };
        if let Some(v) = self.seed {
            s.seed = v;
        }
        if let Some(v) = self.horizon {
            s.horizon_mins = v;
        }
        if let Some(v) = self.mean_gap {
            s.mean_gap_mins = v;
        }
        if let Some(v) = self.riders {
            s.riders_per_pair = v;
        }
        if let Some(v) = self.replications {
            s.replications = v;
        }
        if let Some(v) = self.snapshot_interval {
            s.snapshot_interval_mins = v;
        }
        Ok(s)
    }
}

// ── Policies ──────────────────────────────────────────────────────────────────

/// Either policy, chosen by the scenario at runtime.
#[derive(Clone, Debug)]
enum Reroute {
    Keep(KeepRoute),
    Rotate(RotateRoutes),
}

impl Reroute {
    fn for_scenario(s: &Scenario) -> Result<Self> {
        if s.rotate_routes.is_empty() {
            return Ok(Reroute::Keep(KeepRoute));
        }
        let rotation = s.rotate_routes.iter().map(|&n| RouteId(n)).collect();
        Ok(Reroute::Rotate(RotateRoutes::new(rotation)?))
    }
}

impl ReroutePolicy for Reroute {
    fn reroute(&mut self, bus: &Bus, ctx: &PolicyContext<'_>) -> Option<RouteId> {
        match self {
            Reroute::Keep(p) => p.reroute(bus, ctx),
            Reroute::Rotate(p) => p.reroute(bus, ctx),
        }
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

/// Everything a run needs besides its seed, validated once up front.
struct Plan {
    scenario: Scenario,
    horizon:  SimTime,
    table:    Option<ArrivalTable>,
    reroute:  Reroute,
    hold:     FixedDelay,
}

impl Plan {
    fn new(scenario: Scenario) -> Result<Self> {
        let horizon = SimTime::try_from_minutes(scenario.horizon_mins)?;
        let table = match &scenario.arrivals_csv {
            Some(path) => Some(load_arrivals_csv(path)?),
            None => None,
        };
        if scenario.buses.is_empty() {
            bail!("scenario has no buses");
        }
        Ok(Self {
            reroute: Reroute::for_scenario(&scenario)?,
            hold: FixedDelay::new(scenario.hold_mins)?,
            scenario,
            horizon,
            table,
        })
    }

    fn map(&self, seed: u64, record_events: bool) -> SimResult<Map<Reroute, FixedDelay>> {
        let s = &self.scenario;
        let network = match &self.table {
            Some(table) => network::from_table(table)?,
            None => network::generated(s, self.horizon, seed)?,
        };

        let mut config = SimConfig::new(self.horizon, seed);
        config.snapshot_interval_mins = s.snapshot_interval_mins;
        config.record_events = record_events;

        let mut builder = SimBuilder::new(config, network)
            .capacity(s.seats, s.standing)
            .travel(s.travel.clone())
            .reroute_policy(self.reroute.clone())
            .departure_policy(self.hold);
        for bus in &s.buses {
            builder = builder.bus(&bus.name, RouteId(bus.route));
        }
        builder.build()
    }
}

// ── Reporting ─────────────────────────────────────────────────────────────────

/// Rider outcomes for one run.
struct RiderStats {
    materialized: usize,
    arrived:      usize,
    onboard:      usize,
    waiting:      usize,
    mean_wait:    f64,
    max_wait:     f64,
}

impl RiderStats {
    fn of(people: &PersonStore) -> Self {
        let waits: Vec<f64> = people.iter().filter_map(|p| p.waiting_time()).collect();
        let mean_wait = if waits.is_empty() { 0.0 } else { waits.iter().sum::<f64>() / waits.len() as f64 };
        Self {
            materialized: people.len(),
            arrived:      people.count_in(PersonState::Arrived),
            onboard:      people.iter().filter(|p| p.state().is_onboard()).count(),
            waiting:      people.count_in(PersonState::Waiting),
            mean_wait,
            max_wait:     waits.iter().copied().fold(0.0, f64::max),
        }
    }
}

fn print_day<P: ReroutePolicy>(map: &Map<P, FixedDelay>) {
    let stats = RiderStats::of(map.people());
    println!(
        "Riders: {} seen, {} arrived, {} still on board, {} still waiting",
        stats.materialized, stats.arrived, stats.onboard, stats.waiting
    );
    println!("Waiting time: mean {:.2} min, max {:.2} min", stats.mean_wait, stats.max_wait);
    println!();

    // Mean wait by the hour the rider showed up.
    let hours = (map.config.horizon.hour() + 1) as usize;
    let mut by_hour = vec![(0.0_f64, 0_usize); hours];
    for p in map.people().iter() {
        if let Some(w) = p.waiting_time() {
            let slot = &mut by_hour[(p.start_time.hour() as usize).min(hours - 1)];
            slot.0 += w;
            slot.1 += 1;
        }
    }
    println!("{:<6} {:>8} {:>10}", "Hour", "Boarded", "Mean wait");
    println!("{}", "-".repeat(26));
    for (h, &(sum, n)) in by_hour.iter().enumerate().filter(|(_, (_, n))| *n > 0) {
        println!("{:<6} {:>8} {:>10.2}", format!("{h:02}:00"), n, sum / n as f64);
    }
    println!();

    println!(
        "{:<16} {:>5} {:>10} {:>8} {:>8} {:>8}",
        "Bus", "Route", "Miles", "Boarded", "Alighted", "Onboard"
    );
    println!("{}", "-".repeat(60));
    for bus in &map.buses {
        println!(
            "{:<16} {:>5} {:>10.1} {:>8} {:>8} {:>8}",
            bus.name,
            bus.route().0,
            bus.distance(),
            bus.boarded_total(),
            bus.alighted_total(),
            bus.occupancy(),
        );
    }
    let miles: f64 = map.buses.iter().map(Bus::distance).sum();
    println!("{:<16} {:>5} {:>10.1}", "Total", "", miles);
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let plan = Plan::new(args.scenario()?)?;
    let s = &plan.scenario;

    println!("=== ithaca — rust_bus ===");
    println!(
        "Buses: {}  |  Horizon: {} min  |  Seed: {}  |  Riders/pair: {}",
        s.buses.len(),
        s.horizon_mins,
        s.seed,
        s.riders_per_pair
    );
    println!();

    if s.replications > 1 {
        return replications(&plan);
    }

    let mut map = plan.map(s.seed, false)?;
    let mut obs = SimOutputObserver::new(CsvWriter::new(&args.output)?);

    let t0 = Instant::now();
    let summary = map.simulate(&mut obs)?;
    let elapsed = t0.elapsed();
    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    println!(
        "Simulation complete in {:.3} s: {} events, clock {}",
        elapsed.as_secs_f64(),
        summary.dispatched,
        summary.final_time
    );
    println!("Raw records written to {}", args.output.display());
    println!();
    print_day(&map);
    Ok(())
}

fn replications(plan: &Plan) -> Result<()> {
    let s = &plan.scenario;
    let seeds = replication_seeds(s.seed, s.replications);
    info!(runs = seeds.len(), base = s.seed, "replications");

    let t0 = Instant::now();
    let results = run_replications(&seeds, |seed: u64| -> SimResult<RiderStats> {
        let mut map = plan.map(seed, false)?;
        map.simulate(&mut NoopObserver)?;
        Ok(RiderStats::of(map.people()))
    });
    println!("{} runs in {:.3} s", seeds.len(), t0.elapsed().as_secs_f64());
    println!();

    println!("{:<8} {:>8} {:>8} {:>10} {:>10}", "Seed", "Riders", "Arrived", "Mean wait", "Max wait");
    println!("{}", "-".repeat(48));
    let mut means = Vec::with_capacity(results.len());
    for (seed, result) in seeds.iter().zip(results) {
        match result {
            Ok(r) => {
                println!(
                    "{:<8} {:>8} {:>8} {:>10.2} {:>10.2}",
                    seed, r.materialized, r.arrived, r.mean_wait, r.max_wait
                );
                means.push(r.mean_wait);
            }
            Err(e) => println!("{seed:<8} failed: {e}"),
        }
    }
    if !means.is_empty() {
        let avg = means.iter().sum::<f64>() / means.len() as f64;
        println!("{}", "-".repeat(48));
        println!("Mean of run means: {avg:.2} min over {} runs", means.len());
    }
    Ok(())
}
