//! Scenario setup
//!
//! Randomness is only used here, and always through a caller-supplied RNG, so
//! a seeded RNG gives a reproducible world. Ticks themselves are
//! deterministic.

use std::fmt;
use std::ops::Range;

use log::{info, warn};
use rand::Rng;

use super::config::{LanePolicy, SimConfig};
use super::error::{SimError, SimResult};
use super::hazard::{HazardKind, HazardReport};
use super::world::Simulation;

/// Vehicles placed by the stock scenarios
pub const DEFAULT_VEHICLE_COUNT: usize = 15;

/// Extra bumper space required between spawned vehicles
const SPAWN_GAP: f32 = 20.0;

/// x-shift applied while a spawn slot overlaps another vehicle
const OVERLAP_STEP: f32 = 100.0;
const OVERLAP_ATTEMPTS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scenario {
    /// A roadblock across every lane in the middle of the road
    #[default]
    Roadblock,
    /// Free-flowing traffic with a priority vehicle approaching from behind
    Ambulance,
    /// A single-lane accident; vehicles may swerve around it
    Accident,
    /// Traffic only
    Open,
}

impl Scenario {
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::Roadblock => "roadblock",
            Scenario::Ambulance => "ambulance",
            Scenario::Accident => "accident",
            Scenario::Open => "open",
        }
    }

    /// Build the scenario with the stock vehicle count
    pub fn build<R: Rng + ?Sized>(self, config: SimConfig, rng: &mut R) -> SimResult<Simulation> {
        self.build_with_count(config, DEFAULT_VEHICLE_COUNT, rng)
    }

    pub fn build_with_count<R: Rng + ?Sized>(
        self,
        config: SimConfig,
        vehicle_count: usize,
        rng: &mut R,
    ) -> SimResult<Simulation> {
        let config = match self {
            Scenario::Accident => config.with_lane_policy(LanePolicy::LaneChange),
            _ => config,
        };
        let mut sim = Simulation::new(config)?;

        let centre_lane = sim.config().lane_count() / 2;
        let centre_y = sim.config().lane_y(centre_lane)?;
        let hazard_x = sim.config().world_width / 2.0;

        match self {
            Scenario::Roadblock => {
                let lanes = &sim.config().lanes;
                let first = lanes.first().copied().unwrap_or(centre_y);
                let last = lanes.last().copied().unwrap_or(centre_y);
                let tolerance = sim.config().lane_tolerance;
                let height = (last - first + 4.0 * tolerance).max(240.0);
                sim.add_hazard_report(
                    HazardReport::new(HazardKind::Roadblock, hazard_x, (first + last) / 2.0, 30.0, height)
                        .verified(),
                )?;
            }
            Scenario::Accident => {
                sim.add_hazard(HazardKind::Accident, hazard_x, centre_y, 50.0, 30.0)?;
            }
            Scenario::Ambulance | Scenario::Open => {}
        }

        let population = match self {
            Scenario::Accident => Population::scattered(vehicle_count, sim.config()),
            _ => Population::staggered(vehicle_count, sim.config()),
        };
        let placed = population.populate(&mut sim, rng)?;

        if self == Scenario::Ambulance {
            let speed = 20.0;
            let desired = sim.config().priority_desired_speed;
            sim.add_priority_vehicle(-200.0, centre_lane, speed, desired)?;
        }

        info!(
            "Scenario '{}' ready: {} vehicles ({} requested), {} hazards, policy {:?}",
            self.name(),
            sim.vehicles().len(),
            vehicle_count,
            sim.hazards().len(),
            sim.config().lane_policy
        );
        if placed < vehicle_count {
            warn!(
                "Only {} of {} vehicles could be placed without overlap",
                placed, vehicle_count
            );
        }

        Ok(sim)
    }
}

impl Simulation {
    /// Build a world for `scenario` with the stock vehicle count
    pub fn from_scenario<R: Rng + ?Sized>(
        config: SimConfig,
        scenario: Scenario,
        rng: &mut R,
    ) -> SimResult<Self> {
        scenario.build(config, rng)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How candidate x positions are generated
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// `x = i * spacing mod world_width`
    Staggered { spacing: f32 },
    /// Uniform over the world width
    Uniform,
}

/// Parameters of the seeded population routine
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    pub count: usize,
    pub placement: Placement,
    pub initial_speed: Range<f32>,
    pub desired_speed: f32,
    /// Spawns closer than this to a hazard (in x) are shifted right
    pub hazard_clearance: f32,
    pub hazard_step: f32,
    pub hazard_attempts: usize,
}

impl Population {
    /// Evenly staggered traffic kept well clear of hazards
    pub fn staggered(count: usize, config: &SimConfig) -> Self {
        Self {
            count,
            placement: Placement::Staggered { spacing: 150.0 },
            initial_speed: 18.0..23.0,
            desired_speed: config.default_desired_speed,
            hazard_clearance: 500.0,
            hazard_step: 200.0,
            hazard_attempts: 10,
        }
    }

    /// Randomly scattered traffic with a wider speed spread
    pub fn scattered(count: usize, config: &SimConfig) -> Self {
        Self {
            count,
            placement: Placement::Uniform,
            initial_speed: 18.0..30.0,
            desired_speed: config.default_desired_speed,
            hazard_clearance: 200.0,
            hazard_step: 300.0,
            hazard_attempts: 1,
        }
    }

    /// Place up to `count` vehicles without overlapping each other or any
    /// hazard footprint. Returns the number placed.
    pub fn populate<R: Rng + ?Sized>(&self, sim: &mut Simulation, rng: &mut R) -> SimResult<usize> {
        if self.initial_speed.is_empty() || self.initial_speed.start < 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "initial speed range {:?} is empty or negative",
                self.initial_speed
            )));
        }

        let width = sim.config().world_width;
        let lane_count = sim.config().lane_count();
        let mut placed = 0;

        for i in 0..self.count {
            let preferred_lane = rng.random_range(0..lane_count);
            let mut x = match self.placement {
                Placement::Staggered { spacing } => (i as f32 * spacing) % width,
                Placement::Uniform => rng.random_range(0.0..=width),
            };
            let speed = rng.random_range(self.initial_speed.clone());

            let mut attempts = 0;
            while attempts < self.hazard_attempts && self.near_hazard(sim, x) {
                x = (x + self.hazard_step) % width;
                attempts += 1;
            }

            let lanes = std::iter::once(preferred_lane)
                .chain((0..lane_count).filter(|lane| *lane != preferred_lane));
            let mut slot = None;
            for lane in lanes {
                if let Some(lane_x) = free_slot(sim, lane, x)? {
                    slot = Some((lane, lane_x));
                    break;
                }
            }

            match slot {
                Some((lane, lane_x)) => {
                    sim.add_vehicle(lane_x, lane, speed, self.desired_speed)?;
                    placed += 1;
                }
                None => warn!("No free spawn slot for vehicle {} near x={:.1}", i, x),
            }
        }

        Ok(placed)
    }

    fn near_hazard(&self, sim: &Simulation, x: f32) -> bool {
        sim.hazards()
            .iter()
            .any(|hazard| (x - hazard.position().x).abs() < self.hazard_clearance)
    }
}

/// First x at or after `x` (stepping right and wrapping) where a vehicle fits
/// in `lane`
fn free_slot(sim: &Simulation, lane: usize, x: f32) -> SimResult<Option<f32>> {
    let config = sim.config();
    let lane_y = config.lane_y(lane)?;
    let mut candidate = x;

    for _ in 0..OVERLAP_ATTEMPTS {
        if fits(sim, lane_y, candidate) {
            return Ok(Some(candidate));
        }
        candidate = (candidate + OVERLAP_STEP) % config.world_width;
    }

    Ok(None)
}

fn fits(sim: &Simulation, lane_y: f32, x: f32) -> bool {
    let config = sim.config();

    let clear_of_vehicles = sim.vehicles().iter().all(|other| {
        (other.position.y - lane_y).abs() >= config.lane_tolerance
            || (other.position.x - x).abs() >= config.vehicle_length + SPAWN_GAP
    });

    let clear_of_hazards = sim.hazards().iter().all(|hazard| {
        !hazard.covers_lane(lane_y)
            || (hazard.position().x - x).abs()
                >= hazard.width() / 2.0 + config.vehicle_length / 2.0 + config.collision_margin
    });

    clear_of_vehicles && clear_of_hazards
}
