//! Standalone hazard simulation module
//!
//! This module contains all the vehicle, hazard and collision logic. It has
//! no rendering or I/O dependencies and can be driven from a console loop or
//! a test harness.

mod collision;
mod config;
mod detector;
mod error;
mod hazard;
mod lane_change;
mod observer;
mod report;
mod scenario;
mod speed_policy;
mod stats;
mod types;
mod vehicle;
mod world;

pub use collision::{resolve_collisions, sort_by_x};
pub use config::{LanePolicy, SimConfig, Timestep};
pub use detector::{hazard_gap, nearest_obstacle, vehicle_gap, Detection, ObstacleKind, ObstacleRef};
pub use error::{SimError, SimResult};
pub use hazard::{Hazard, HazardKind, HazardReport, HazardStatus};
pub use lane_change::{choose_lane, detection_in_lane, is_lane_clear};
pub use observer::{NoopObserver, SimObserver};
pub use scenario::{Placement, Population, Scenario, DEFAULT_VEHICLE_COUNT};
pub use speed_policy::{decide, BrakingZone, SpeedDecision};
pub use stats::SimStats;
pub use types::{
    HazardId, Position, SimId, VehicleId, DEFAULT_DESIRED_SPEED, DT_S, LANE_SPACING,
    LANE_TOLERANCE, PRIORITY_DESIRED_SPEED, ROAD_Y, SAFE_DISTANCE, SENSOR_RANGE, VEHICLE_LENGTH,
    WORLD_HEIGHT, WORLD_WIDTH,
};
pub use vehicle::{Vehicle, VehicleUpdate};
pub use world::Simulation;
