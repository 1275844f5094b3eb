//! Simulation parameters
//!
//! `SimConfig` bundles the fixed world geometry and the behavioural tuning of
//! the braking, lane-change and collision models. Defaults reproduce the
//! roadblock scenario geometry.

use super::error::{finite, positive, speed, SimError, SimResult};
use super::types::{
    DEFAULT_DESIRED_SPEED, DT_S, LANE_SPACING, LANE_TOLERANCE, PRIORITY_DESIRED_SPEED, ROAD_Y,
    SAFE_DISTANCE, SENSOR_RANGE, VEHICLE_LENGTH, WORLD_HEIGHT, WORLD_WIDTH,
};

/// A validated, strictly positive timestep in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timestep(f32);

impl Timestep {
    pub fn new(dt: f32) -> SimResult<Self> {
        if dt.is_finite() && dt > 0.0 {
            Ok(Self(dt))
        } else {
            Err(SimError::InvalidTimestep(dt))
        }
    }

    pub fn secs(self) -> f32 {
        self.0
    }
}

/// How a vehicle reacts to an obstacle in its lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanePolicy {
    /// Always brake according to the zoned speed profile
    #[default]
    BrakeOnly,
    /// Try to move into a clear adjacent lane before braking
    LaneChange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub world_width: f32,
    pub world_height: f32,
    /// y-coordinates of the lanes, lowest first
    pub lanes: Vec<f32>,
    pub dt: f32,
    pub safe_distance: f32,
    pub sensor_range: f32,
    pub vehicle_length: f32,
    pub lane_tolerance: f32,

    /// Vehicles past `world_width + wrap_margin` re-enter on the left
    pub wrap_margin: f32,
    pub reentry_x: f32,
    pub reentry_speed_cap: f32,

    pub max_accel: f32,
    pub max_decel: f32,
    pub emergency_decel: f32,
    /// Extra speed removed per second inside the emergency zone
    pub emergency_markdown: f32,
    pub emergency_zone: f32,
    pub hard_brake_zone: f32,

    /// Gap added to the vehicle length when separating overlapping vehicles
    pub collision_margin: f32,
    /// Rear vehicle speed is capped to this fraction of its leader's
    pub rear_speed_factor: f32,

    /// Half-width of the window that must be empty in a target lane
    pub lane_change_clearance: f32,
    pub lane_policy: LanePolicy,

    pub default_desired_speed: f32,
    pub priority_desired_speed: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            lanes: vec![ROAD_Y - LANE_SPACING, ROAD_Y, ROAD_Y + LANE_SPACING],
            dt: DT_S,
            safe_distance: SAFE_DISTANCE,
            sensor_range: SENSOR_RANGE,
            vehicle_length: VEHICLE_LENGTH,
            lane_tolerance: LANE_TOLERANCE,
            wrap_margin: 50.0,
            reentry_x: -300.0,
            reentry_speed_cap: 15.0,
            max_accel: 2.5,
            max_decel: 6.0,
            emergency_decel: 12.0,
            emergency_markdown: 15.0,
            emergency_zone: 30.0,
            hard_brake_zone: 80.0,
            collision_margin: 5.0,
            rear_speed_factor: 0.9,
            lane_change_clearance: 100.0,
            lane_policy: LanePolicy::BrakeOnly,
            default_desired_speed: DEFAULT_DESIRED_SPEED,
            priority_desired_speed: PRIORITY_DESIRED_SPEED,
        }
    }
}

impl SimConfig {
    pub fn with_lane_policy(mut self, lane_policy: LanePolicy) -> Self {
        self.lane_policy = lane_policy;
        self
    }

    pub fn with_dt(mut self, dt: f32) -> Self {
        self.dt = dt;
        self
    }

    /// Check every parameter, failing on the first invalid one
    pub fn validate(&self) -> SimResult<()> {
        Timestep::new(self.dt)?;
        positive("world width", self.world_width)?;
        positive("world height", self.world_height)?;
        positive("safe distance", self.safe_distance)?;
        positive("sensor range", self.sensor_range)?;
        positive("vehicle length", self.vehicle_length)?;
        positive("lane tolerance", self.lane_tolerance)?;
        positive("max acceleration", self.max_accel)?;
        positive("max deceleration", self.max_decel)?;
        positive("emergency deceleration", self.emergency_decel)?;
        positive("emergency zone", self.emergency_zone)?;
        positive("hard brake zone", self.hard_brake_zone)?;
        positive("lane change clearance", self.lane_change_clearance)?;
        finite("wrap margin", self.wrap_margin)?;
        finite("re-entry x", self.reentry_x)?;
        finite("collision margin", self.collision_margin)?;
        speed("re-entry cap", self.reentry_speed_cap)?;
        speed("emergency markdown", self.emergency_markdown)?;
        speed("default desired", self.default_desired_speed)?;
        speed("priority desired", self.priority_desired_speed)?;

        if !(0.0..=1.0).contains(&self.rear_speed_factor) {
            return Err(SimError::InvalidConfig(format!(
                "rear speed factor must be within [0, 1], got {}",
                self.rear_speed_factor
            )));
        }

        if !(self.emergency_zone < self.hard_brake_zone
            && self.hard_brake_zone < self.safe_distance)
        {
            return Err(SimError::InvalidConfig(format!(
                "braking zones must satisfy emergency ({}) < hard brake ({}) < safe distance ({})",
                self.emergency_zone, self.hard_brake_zone, self.safe_distance
            )));
        }

        if self.lanes.is_empty() {
            return Err(SimError::InvalidConfig("road has no lanes".to_string()));
        }
        for (index, y) in self.lanes.iter().enumerate() {
            finite("lane y", *y)?;
            if let Some(next) = self.lanes.get(index + 1) {
                if next - y < self.lane_tolerance {
                    return Err(SimError::InvalidConfig(format!(
                        "lanes {} and {} are closer than the lane tolerance {}",
                        index,
                        index + 1,
                        self.lane_tolerance
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn timestep(&self) -> SimResult<Timestep> {
        Timestep::new(self.dt)
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// y-coordinate of a lane
    pub fn lane_y(&self, lane: usize) -> SimResult<f32> {
        self.lanes.get(lane).copied().ok_or(SimError::UnknownLane(lane))
    }

    /// Lanes directly beside `lane`, lower y first
    pub fn adjacent_lanes(&self, lane: usize) -> impl Iterator<Item = usize> + '_ {
        [lane.checked_sub(1), lane.checked_add(1)]
            .into_iter()
            .flatten()
            .filter(move |candidate| *candidate < self.lanes.len())
    }

    /// Index of the first lane within the lane tolerance of `y`
    pub fn lane_at(&self, y: f32) -> Option<usize> {
        self.lanes
            .iter()
            .position(|lane_y| (lane_y - y).abs() < self.lane_tolerance)
    }

    /// Minimum x-separation between two same-lane vehicles
    pub fn min_gap(&self) -> f32 {
        self.vehicle_length + self.collision_margin
    }

    /// x beyond which a vehicle wraps back to the left edge
    pub fn wrap_limit(&self) -> f32 {
        self.world_width + self.wrap_margin
    }
}
