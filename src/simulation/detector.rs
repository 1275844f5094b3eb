//! Nearest-obstacle lookup
//!
//! Recomputed from scratch every tick over the current vehicle and hazard
//! collections; nothing here is cached between ticks.

use super::config::SimConfig;
use super::hazard::Hazard;
use super::types::{HazardId, VehicleId};
use super::vehicle::Vehicle;

/// Non-owning handle to whatever is blocking a vehicle. Valid for the tick it
/// was produced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleRef {
    Hazard(HazardId),
    Vehicle(VehicleId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Hazard,
    Vehicle,
}

impl ObstacleRef {
    pub fn kind(&self) -> ObstacleKind {
        match self {
            ObstacleRef::Hazard(_) => ObstacleKind::Hazard,
            ObstacleRef::Vehicle(_) => ObstacleKind::Vehicle,
        }
    }
}

/// Outcome of an obstacle lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// Effective gap to the obstacle, `f32::INFINITY` when the road is clear
    pub distance: f32,
    pub obstacle: Option<ObstacleRef>,
}

impl Detection {
    pub fn clear() -> Self {
        Self {
            distance: f32::INFINITY,
            obstacle: None,
        }
    }

    pub fn is_clear(&self) -> bool {
        self.obstacle.is_none()
    }

    pub fn kind(&self) -> Option<ObstacleKind> {
        self.obstacle.map(|obstacle| obstacle.kind())
    }

    fn consider(&mut self, distance: f32, obstacle: ObstacleRef) {
        // Strict comparison keeps the first candidate on ties
        if distance > 0.0 && distance < self.distance {
            self.distance = distance;
            self.obstacle = Some(obstacle);
        }
    }
}

/// Effective distance from `vehicle` to `hazard`, if the hazard is ahead in
/// the vehicle's lane
pub fn hazard_gap(vehicle: &Vehicle, hazard: &Hazard, config: &SimConfig) -> Option<f32> {
    let hazard_x = hazard.position().x;
    if hazard_x > vehicle.position.x && hazard.covers_lane(vehicle.position.y) {
        Some(hazard_x - vehicle.position.x - config.vehicle_length / 2.0)
    } else {
        None
    }
}

/// Effective bumper-to-bumper gap from `vehicle` to `other`, if `other` is
/// ahead in the same lane
pub fn vehicle_gap(vehicle: &Vehicle, other: &Vehicle, config: &SimConfig) -> Option<f32> {
    if other.id != vehicle.id
        && other.position.x > vehicle.position.x
        && other.position.same_lane(&vehicle.position, config.lane_tolerance)
    {
        Some(other.position.x - vehicle.position.x - config.vehicle_length)
    } else {
        None
    }
}

/// Find the nearest obstacle ahead of `vehicle`.
///
/// Hazards are evaluated before vehicles, so a hazard wins a tie with a
/// vehicle at the same effective distance. Within each collection the earlier
/// entry wins.
pub fn nearest_obstacle(
    vehicle: &Vehicle,
    vehicles: &[Vehicle],
    hazards: &[Hazard],
    config: &SimConfig,
) -> Detection {
    let mut detection = Detection::clear();

    for hazard in hazards {
        if let Some(distance) = hazard_gap(vehicle, hazard, config) {
            detection.consider(distance, ObstacleRef::Hazard(hazard.id()));
        }
    }

    for other in vehicles {
        if let Some(distance) = vehicle_gap(vehicle, other, config) {
            detection.consider(distance, ObstacleRef::Vehicle(other.id));
        }
    }

    detection
}
