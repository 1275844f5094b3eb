//! Adjacent-lane check used by `LanePolicy::LaneChange`

use super::config::SimConfig;
use super::detector::{self, Detection};
use super::hazard::Hazard;
use super::vehicle::Vehicle;

/// Whether `lane` has room for `vehicle` to move in beside its current x.
///
/// The lane must have no other vehicle within the clearance window around
/// the vehicle's x, and no hazard covering it ahead within sensor range.
pub fn is_lane_clear(
    vehicle: &Vehicle,
    lane: usize,
    vehicles: &[Vehicle],
    hazards: &[Hazard],
    config: &SimConfig,
) -> bool {
    let Ok(lane_y) = config.lane_y(lane) else {
        return false;
    };
    let x = vehicle.position.x;

    let occupied = vehicles.iter().any(|other| {
        other.id != vehicle.id
            && (other.position.y - lane_y).abs() < config.lane_tolerance
            && (other.position.x - x).abs() < config.lane_change_clearance
    });
    if occupied {
        return false;
    }

    !hazards.iter().any(|hazard| {
        let ahead = hazard.position().x - x;
        hazard.covers_lane(lane_y)
            && ahead > -config.lane_change_clearance
            && ahead <= config.sensor_range
    })
}

/// What `vehicle` would see ahead if it were in `lane` at its current x
pub fn detection_in_lane(
    vehicle: &Vehicle,
    lane: usize,
    vehicles: &[Vehicle],
    hazards: &[Hazard],
    config: &SimConfig,
) -> Option<Detection> {
    let mut shifted = vehicle.clone();
    shifted.change_lane(lane, config).ok()?;
    Some(detector::nearest_obstacle(&shifted, vehicles, hazards, config))
}

/// Pick the lane `vehicle` should swerve into, if its detection warrants a
/// lane change and an adjacent lane is clear. Lower-y lanes are tried first.
///
/// A lane only qualifies if its nearest obstacle ahead is strictly farther
/// than `detection`, so a vehicle never swaps one blocked lane for another
/// equally blocked one.
pub fn choose_lane(
    vehicle: &Vehicle,
    detection: &Detection,
    vehicles: &[Vehicle],
    hazards: &[Hazard],
    config: &SimConfig,
) -> Option<usize> {
    if detection.is_clear() || detection.distance > config.sensor_range {
        return None;
    }

    config.adjacent_lanes(vehicle.lane()).find(|lane| {
        is_lane_clear(vehicle, *lane, vehicles, hazards, config)
            && detection_in_lane(vehicle, *lane, vehicles, hazards, config)
                .is_some_and(|candidate| candidate.distance > detection.distance)
    })
}
