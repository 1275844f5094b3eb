use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use v2v_hazard_sim::simulation::{LanePolicy, Scenario, SimConfig, SimObserver, Simulation};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScenarioArg {
    Roadblock,
    Ambulance,
    Accident,
    Open,
}

impl From<ScenarioArg> for Scenario {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::Roadblock => Scenario::Roadblock,
            ScenarioArg::Ambulance => Scenario::Ambulance,
            ScenarioArg::Accident => Scenario::Accident,
            ScenarioArg::Open => Scenario::Open,
        }
    }
}

#[derive(Parser)]
#[command(name = "v2v_hazard_sim")]
#[command(about = "Headless multi-lane hazard avoidance simulation")]
struct Cli {
    /// Scenario to set up
    #[arg(long, value_enum, default_value = "roadblock")]
    scenario: ScenarioArg,

    /// Number of simulation ticks to run
    #[arg(long, default_value = "1200")]
    ticks: u64,

    /// Time delta per tick in seconds
    #[arg(long, default_value = "0.05")]
    delta: f32,

    /// Seed for scenario setup; random if omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Number of vehicles to place
    #[arg(long, default_value = "15")]
    vehicles: usize,

    /// Let vehicles swerve into clear adjacent lanes instead of braking
    #[arg(long)]
    lane_change: bool,

    /// Print a summary every N ticks (0 disables periodic output)
    #[arg(long, default_value = "0")]
    report_every: u64,

    /// Include the road map in periodic and final output
    #[arg(long)]
    map: bool,
}

/// Prints the world to stdout every `every` ticks
struct ConsoleObserver {
    every: u64,
    map: bool,
}

impl ConsoleObserver {
    fn print(&self, sim: &Simulation) {
        sim.print_summary();
        if self.map {
            sim.draw_map();
        }
        println!();
    }
}

impl SimObserver for ConsoleObserver {
    fn on_tick_end(&mut self, sim: &Simulation) {
        if self.every > 0 && sim.ticks() % self.every == 0 {
            println!(
                "--- After tick {} ({:.1}s simulated time) ---",
                sim.ticks(),
                sim.time()
            );
            self.print(sim);
        }
    }

    fn on_run_end(&mut self, sim: &Simulation) {
        println!("=== Final State ===");
        self.print(sim);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,v2v_hazard_sim=info"),
    )
    .init();

    let cli = Cli::parse();
    run_headless(&cli)
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(cli: &Cli) -> Result<()> {
    let seed = cli.seed.unwrap_or_else(rand::random);
    let scenario = Scenario::from(cli.scenario);
    info!(
        "Running '{}' for {} ticks (dt={}s, seed={})",
        scenario, cli.ticks, cli.delta, seed
    );

    let mut config = SimConfig::default().with_dt(cli.delta);
    if cli.lane_change {
        config = config.with_lane_policy(LanePolicy::LaneChange);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut sim = scenario
        .build_with_count(config, cli.vehicles, &mut rng)
        .with_context(|| format!("Failed to set up scenario '{}'", scenario))?;

    println!("Initial state:");
    sim.print_summary();
    if cli.map {
        sim.draw_map();
    }
    println!();

    let mut observer = ConsoleObserver {
        every: cli.report_every,
        map: cli.map,
    };
    sim.run_ticks(cli.ticks, &mut observer);

    sim.stats().log_report();
    Ok(())
}
