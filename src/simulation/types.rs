//! Core types for the hazard simulation
//!
//! Identifiers, positions and the default physical parameters shared by
//! every other component.

use std::fmt;

/// A unique identifier for simulation entities
/// This is a simple wrapper around a usize for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SimId(pub usize);

/// A wrapper type for vehicle IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub SimId);

/// A wrapper type for hazard IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HazardId(pub SimId);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V{}", self.0 .0)
    }
}

impl fmt::Display for HazardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.0 .0)
    }
}

/// A 2D position on the road. `y` is the lane coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Whether two y-coordinates belong to the same lane
    pub fn same_lane(&self, other: &Position, lane_tolerance: f32) -> bool {
        (self.y - other.y).abs() < lane_tolerance
    }
}

/// World width in distance units
pub const WORLD_WIDTH: f32 = 1600.0;

/// World height in distance units
pub const WORLD_HEIGHT: f32 = 900.0;

/// y-coordinate of the centre lane
pub const ROAD_Y: f32 = WORLD_HEIGHT / 2.0;

/// Spacing between adjacent lanes
pub const LANE_SPACING: f32 = 60.0;

/// Fixed simulation timestep in seconds
pub const DT_S: f32 = 0.05;

/// Distance below which vehicles start reducing speed proportionally
pub const SAFE_DISTANCE: f32 = 250.0;

/// Distance within which vehicles sense obstacles
pub const SENSOR_RANGE: f32 = 400.0;

/// Length of a vehicle in world units
pub const VEHICLE_LENGTH: f32 = 40.0;

/// Two y-coordinates closer than this are in the same lane
pub const LANE_TOLERANCE: f32 = 30.0;

/// Desired speed of an ordinary vehicle
pub const DEFAULT_DESIRED_SPEED: f32 = 25.0;

/// Desired speed floor of a priority (emergency) vehicle
pub const PRIORITY_DESIRED_SPEED: f32 = 35.0;
