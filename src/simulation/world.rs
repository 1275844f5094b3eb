//! Main simulation world that ties everything together
//!
//! `Simulation` owns every vehicle and hazard. `step()` is the only mutating
//! entry point once the world is populated; each call runs one full tick:
//! detect, decide, integrate, resolve collisions, advance the clock.

use log::{debug, info, warn};

use super::collision;
use super::config::{LanePolicy, SimConfig, Timestep};
use super::detector::{self, Detection, ObstacleRef};
use super::error::SimResult;
use super::hazard::{Hazard, HazardKind, HazardReport};
use super::lane_change;
use super::observer::SimObserver;
use super::speed_policy;
use super::types::{HazardId, Position, SimId, VehicleId};
use super::vehicle::{Vehicle, VehicleUpdate};

pub struct Simulation {
    config: SimConfig,
    dt: Timestep,

    /// Kept sorted by x between ticks
    vehicles: Vec<Vehicle>,
    hazards: Vec<Hazard>,

    next_id: usize,

    /// Simulated seconds since creation
    time: f32,
    ticks: u64,

    lane_changes: u64,
    wraps: u64,
}

impl Simulation {
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        let dt = config.timestep()?;

        Ok(Self {
            config,
            dt,
            vehicles: Vec::new(),
            hazards: Vec::new(),
            next_id: 0,
            time: 0.0,
            ticks: 0,
            lane_changes: 0,
            wraps: 0,
        })
    }

    fn next_sim_id(&mut self) -> SimId {
        let id = SimId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn timestep(&self) -> Timestep {
        self.dt
    }

    /// Materialise a hazard reported by the alert pipeline
    pub fn add_hazard(
        &mut self,
        kind: impl Into<HazardKind>,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> SimResult<HazardId> {
        self.add_hazard_report(HazardReport::new(kind, x, y, width, height))
    }

    pub fn add_hazard_report(&mut self, report: HazardReport) -> SimResult<HazardId> {
        let id = HazardId(self.next_sim_id());
        let hazard = Hazard::new(id, report)?;
        info!(
            "Hazard {} ({}, {:?}) at ({:.1}, {:.1}), {:.0}x{:.0}",
            id,
            hazard.kind(),
            hazard.status(),
            hazard.position().x,
            hazard.position().y,
            hazard.width(),
            hazard.height()
        );
        self.hazards.push(hazard);
        Ok(id)
    }

    pub fn add_vehicle(
        &mut self,
        x: f32,
        lane: usize,
        initial_speed: f32,
        desired_speed: f32,
    ) -> SimResult<VehicleId> {
        let id = VehicleId(self.next_sim_id());
        let vehicle = Vehicle::new(id, x, lane, initial_speed, desired_speed, &self.config)?;
        self.insert_vehicle(vehicle);
        Ok(id)
    }

    pub fn add_priority_vehicle(
        &mut self,
        x: f32,
        lane: usize,
        initial_speed: f32,
        desired_speed: f32,
    ) -> SimResult<VehicleId> {
        let id = VehicleId(self.next_sim_id());
        let vehicle = Vehicle::priority(id, x, lane, initial_speed, desired_speed, &self.config)?;
        self.insert_vehicle(vehicle);
        Ok(id)
    }

    fn insert_vehicle(&mut self, vehicle: Vehicle) {
        self.vehicles.push(vehicle);
        collision::sort_by_x(&mut self.vehicles);
    }

    /// Vehicles ordered rear to front
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|vehicle| vehicle.id == id)
    }

    pub fn hazard(&self, id: HazardId) -> Option<&Hazard> {
        self.hazards.iter().find(|hazard| hazard.id() == id)
    }

    /// Resolve a transient obstacle reference against the current state
    pub fn obstacle_position(&self, obstacle: ObstacleRef) -> Option<Position> {
        match obstacle {
            ObstacleRef::Hazard(id) => self.hazard(id).map(|hazard| hazard.position()),
            ObstacleRef::Vehicle(id) => self.vehicle(id).map(|vehicle| vehicle.position),
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn lane_changes(&self) -> u64 {
        self.lane_changes
    }

    pub fn wraps(&self) -> u64 {
        self.wraps
    }

    /// Main simulation tick
    pub fn step(&mut self) {
        collision::sort_by_x(&mut self.vehicles);

        // Vehicles are updated in place rear to front, so each one sees the
        // vehicles ahead of it as they were at the end of the previous tick.
        for index in 0..self.vehicles.len() {
            self.update_vehicle(index);
        }

        let corrections = collision::resolve_collisions(&mut self.vehicles, &self.config);
        if corrections > 0 {
            debug!("tick {}: {} overlap corrections", self.ticks, corrections);
        }

        self.ticks += 1;
        self.time += self.dt.secs();
    }

    fn update_vehicle(&mut self, index: usize) {
        let mut detection = self.detect(index);

        if self.config.lane_policy == LanePolicy::LaneChange {
            let target_lane = lane_change::choose_lane(
                &self.vehicles[index],
                &detection,
                &self.vehicles,
                &self.hazards,
                &self.config,
            );
            if let Some(lane) = target_lane {
                let vehicle = &mut self.vehicles[index];
                let from = vehicle.lane();
                match vehicle.change_lane(lane, &self.config) {
                    Ok(()) => {
                        debug!(
                            "Vehicle {} switched lane {} -> {} at x={:.1}",
                            vehicle.id,
                            from,
                            lane,
                            vehicle.position.x
                        );
                        self.lane_changes += 1;
                        // Braking follows what is ahead in the new lane
                        detection = self.detect(index);
                    }
                    Err(err) => {
                        warn!("Vehicle {} could not change lane: {}", vehicle.id, err);
                    }
                }
            }
        }

        let config = &self.config;
        let dt = self.dt;
        let vehicle = &mut self.vehicles[index];
        vehicle.observe(&detection, config);

        let decision = speed_policy::decide(detection.distance, vehicle.base_speed(), config);
        vehicle.apply_speed_decision(decision, dt, config);

        if vehicle.step(dt, config) == VehicleUpdate::Wrapped {
            self.wraps += 1;
            debug!("Vehicle {} wrapped to x={:.1}", vehicle.id, vehicle.position.x);
        }
    }

    fn detect(&self, index: usize) -> Detection {
        detector::nearest_obstacle(
            &self.vehicles[index],
            &self.vehicles,
            &self.hazards,
            &self.config,
        )
    }

    /// Run `ticks` ticks, notifying `observer` after each
    pub fn run_ticks<O: SimObserver + ?Sized>(&mut self, ticks: u64, observer: &mut O) {
        for _ in 0..ticks {
            self.step();
            observer.on_tick_end(self);
        }
        observer.on_run_end(self);
    }

    /// Run until at least `duration_secs` more simulated seconds have passed
    pub fn run_for<O: SimObserver + ?Sized>(&mut self, duration_secs: f32, observer: &mut O) {
        let ticks = (duration_secs.max(0.0) / self.dt.secs()).ceil() as u64;
        self.run_ticks(ticks, observer);
    }
}
