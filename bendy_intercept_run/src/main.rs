//! Headless scenario runner: loads a YAML scenario, steps the leader and its
//! formation at a fixed rate and prints where everything ended up.
//!
//! Usage:
//!   cargo run -p bendy_intercept_run -- --config scenario.yaml --ticks 3000
//!   RUST_LOG=bendy_intercept=debug cargo run -p bendy_intercept_run -- --formation intercept

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use bendy_intercept::*;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Random obstacles never spawn closer than this to the leader's start or
/// destination
const SPAWN_CLEARANCE: f64 = 3.0;

/// The leader counts as arrived inside this distance of its destination
const ARRIVAL_RADIUS: f64 = 0.1;

#[derive(Parser)]
#[command(name = "bendy-intercept-run")]
#[command(about = "Run a bendy ruler / interception scenario without a window")]
struct Args {
    /// YAML scenario file; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the formation: none, c_arc, role_swap or intercept
    #[arg(long)]
    formation: Option<String>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 3000)]
    ticks: usize,

    /// Tick length in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// Seed for the random obstacle field
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Scatter this many extra static obstacles between start and destination
    #[arg(long, default_value_t = 0)]
    random_obstacles: usize,
}

fn load_scenario(args: &Args) -> Result<ScenarioConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read scenario: {}", path.display()))?;
            ScenarioConfig::from_yaml(&text)
                .with_context(|| format!("invalid scenario: {}", path.display()))?
        }
        None => ScenarioConfig::default(),
    };
    if let Some(name) = &args.formation {
        config.formation.kind = name.parse::<FormationKind>()?;
        config.validate()?;
    }
    Ok(config)
}

fn random_obstacles(config: &ScenarioConfig, count: usize, seed: u64) -> Result<Vec<Obstacle>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = config.leader_start;
    let end = config.destination;
    let (min_x, max_x) = (start.x.min(end.x) - 10.0, start.x.max(end.x) + 10.0);
    let (min_y, max_y) = (start.y.min(end.y) - 10.0, start.y.max(end.y) + 10.0);

    let mut obstacles = Vec::with_capacity(count);
    while obstacles.len() < count {
        let center = Point::new(rng.gen_range(min_x..=max_x), rng.gen_range(min_y..=max_y));
        let radius = rng.gen_range(0.5..3.0);
        let clear = |p: Point| (p - center).norm() > radius + SPAWN_CLEARANCE;
        if clear(start) && clear(end) {
            obstacles.push(Obstacle::new(center, radius)?);
        }
    }
    Ok(obstacles)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    ensure!(args.dt.is_finite() && args.dt > 0.0, "--dt must be > 0, got {}", args.dt);
    let config = load_scenario(&args)?;

    let mut simulation = Simulation::from_config(&config)?;
    for obstacle in random_obstacles(&config, args.random_obstacles, args.seed)? {
        debug!(x = obstacle.center.x, y = obstacle.center.y, r = obstacle.radius, "random obstacle");
        simulation.add_obstacle(obstacle);
    }

    let tick = Duration::from_secs_f64(args.dt);
    let mut closest_approach = f64::INFINITY;
    let mut captured_at = None;
    let mut ticks_run = 0;

    info!(formation = %config.formation.kind, ticks = args.ticks, dt = args.dt, "starting run");
    for _ in 0..args.ticks {
        simulation.step(tick)?;
        ticks_run += 1;

        let leader = simulation.leader().position;
        for (_, obstacle) in simulation.obstacles() {
            closest_approach = closest_approach.min((leader - obstacle.center).norm() - obstacle.radius);
        }
        if captured_at.is_none() && simulation.is_success() {
            captured_at = Some(simulation.sim_time());
            info!(t = simulation.sim_time().as_secs_f64(), "leader captured");
        }
        if (simulation.destination() - leader).norm() < ARRIVAL_RADIUS {
            info!(t = simulation.sim_time().as_secs_f64(), "leader arrived");
            break;
        }
    }

    let leader = simulation.leader();
    println!("=== RUN SUMMARY ===");
    println!("  Formation:        {}", config.formation.kind);
    println!("  Ticks:            {ticks_run}");
    println!("  Sim time:         {:.2}s", simulation.sim_time().as_secs_f64());
    println!(
        "  Leader:           ({:.2}, {:.2})",
        leader.position.x, leader.position.y
    );
    println!(
        "  Distance to goal: {:.2}",
        (simulation.destination() - leader.position).norm()
    );
    println!("  Static obstacles: {}", simulation.obstacle_count());
    if closest_approach.is_finite() {
        println!("  Closest approach: {closest_approach:.2}");
    }
    match captured_at {
        Some(t) => println!("  Captured at:      {:.2}s", t.as_secs_f64()),
        None => println!("  Captured at:      never"),
    }
    Ok(())
}
