//! Vehicle kinematics for the hazard simulation
//!
//! A vehicle only ever mutates its own state. Everything it knows about the
//! world arrives through `observe` and `apply_speed_decision`, which the
//! simulation calls once per tick before `step`.

use super::config::{SimConfig, Timestep};
use super::detector::{Detection, ObstacleRef};
use super::error::{finite, speed, SimResult};
use super::speed_policy::{BrakingZone, SpeedDecision};
use super::types::{Position, VehicleId};

/// Result of integrating a vehicle for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleUpdate {
    Moved,
    /// Vehicle left the right edge and re-entered on the left
    Wrapped,
}

/// A vehicle on the road
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: VehicleId,
    /// Only x is moved from outside this module; y follows `lane`
    pub(crate) position: Position,
    /// Index into the configured lane set; `position.y` is that lane's y
    lane: usize,
    pub speed: f32,
    base_speed: f32,
    pub target_speed: f32,
    pub accel: f32,
    pub is_priority: bool,

    /// Nearest obstacle ahead in the lane, recomputed every tick
    pub hazard_ahead: Option<ObstacleRef>,
    /// Nearest obstacle ahead, only while within sensor range
    pub detected_obstacle: Option<ObstacleRef>,
    pub sensor_detected: bool,
    pub obstacle_distance: f32,
    pub braking_zone: BrakingZone,
}

impl Vehicle {
    pub fn new(
        id: VehicleId,
        x: f32,
        lane: usize,
        initial_speed: f32,
        desired_speed: f32,
        config: &SimConfig,
    ) -> SimResult<Self> {
        let y = config.lane_y(lane)?;
        let x = finite("vehicle x", x)?;
        let initial_speed = speed("initial", initial_speed)?;
        let desired_speed = speed("desired", desired_speed)?;

        Ok(Self {
            id,
            position: Position::new(x, y),
            lane,
            speed: initial_speed,
            base_speed: desired_speed,
            target_speed: desired_speed,
            accel: 0.0,
            is_priority: false,
            hazard_ahead: None,
            detected_obstacle: None,
            sensor_detected: false,
            obstacle_distance: f32::INFINITY,
            braking_zone: BrakingZone::Clear,
        })
    }

    /// An emergency vehicle: its desired speed is raised to at least the
    /// configured priority speed
    pub fn priority(
        id: VehicleId,
        x: f32,
        lane: usize,
        initial_speed: f32,
        desired_speed: f32,
        config: &SimConfig,
    ) -> SimResult<Self> {
        let mut vehicle = Self::new(id, x, lane, initial_speed, desired_speed, config)?;
        vehicle.is_priority = true;
        vehicle.base_speed = desired_speed.max(config.priority_desired_speed);
        vehicle.target_speed = vehicle.base_speed;
        Ok(vehicle)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Lane membership; only `change_lane` moves a vehicle between lanes
    pub fn lane(&self) -> usize {
        self.lane
    }

    /// Desired cruising speed, fixed at creation
    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    /// Rear bumper x
    pub fn rear(&self, config: &SimConfig) -> f32 {
        self.position.x - config.vehicle_length / 2.0
    }

    /// Front bumper x
    pub fn front(&self, config: &SimConfig) -> f32 {
        self.position.x + config.vehicle_length / 2.0
    }

    pub fn is_stopped(&self) -> bool {
        self.speed == 0.0
    }

    /// Record this tick's obstacle lookup
    pub fn observe(&mut self, detection: &Detection, config: &SimConfig) {
        self.obstacle_distance = detection.distance;
        self.hazard_ahead = detection.obstacle;
        self.sensor_detected = detection.distance <= config.sensor_range;
        self.detected_obstacle = if self.sensor_detected {
            detection.obstacle
        } else {
            None
        };
    }

    /// Adopt a new target speed. Emergency decisions also knock speed down
    /// immediately, bypassing the bounded deceleration in `step`.
    pub fn apply_speed_decision(
        &mut self,
        decision: SpeedDecision,
        dt: Timestep,
        config: &SimConfig,
    ) {
        self.target_speed = decision.target_speed;
        self.braking_zone = decision.zone;
        if decision.zone == BrakingZone::Emergency {
            self.speed = (self.speed - config.emergency_markdown * dt.secs()).max(0.0);
        }
    }

    /// Move into another lane; x and speed are kept
    pub fn change_lane(&mut self, lane: usize, config: &SimConfig) -> SimResult<()> {
        self.position.y = config.lane_y(lane)?;
        self.lane = lane;
        Ok(())
    }

    fn deceleration_cap(&self, config: &SimConfig) -> f32 {
        if self.hazard_ahead.is_some() && self.obstacle_distance < config.hard_brake_zone {
            config.emergency_decel
        } else {
            config.max_decel
        }
    }

    /// Integrate speed toward the target speed and advance x
    pub fn step(&mut self, dt: Timestep, config: &SimConfig) -> VehicleUpdate {
        let dt = dt.secs();
        let delta = self.target_speed - self.speed;
        let cap = if delta > 0.0 {
            config.max_accel
        } else {
            self.deceleration_cap(config)
        };

        let max_change = cap * dt;
        let new_speed = if delta.abs() <= max_change {
            self.target_speed
        } else {
            self.speed + max_change.copysign(delta)
        };
        let new_speed = new_speed.max(0.0);

        self.accel = (new_speed - self.speed) / dt;
        self.speed = new_speed;
        self.position.x += self.speed * dt;

        if self.position.x > config.wrap_limit() {
            self.position.x = config.reentry_x;
            self.speed = self.speed.min(config.reentry_speed_cap);
            return VehicleUpdate::Wrapped;
        }

        VehicleUpdate::Moved
    }
}
