//! Zoned braking profile
//!
//! Maps the distance to the nearest obstacle onto a target speed. Zones are
//! checked nearest first:
//!
//! | zone        | distance                         | target                                  |
//! |-------------|----------------------------------|-----------------------------------------|
//! | emergency   | `< emergency_zone`               | 0, plus an immediate speed markdown     |
//! | hard brake  | `< hard_brake_zone`              | 0                                       |
//! | cautious    | `< safe_distance`                | `base * max(0.01, d / safe) * 0.4`      |
//! | recovering  | `< 2 * safe_distance`            | `base * (0.5 + 0.5 * (d - safe) / safe)`|
//! | clear       | otherwise                        | `base`                                  |

use super::config::SimConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrakingZone {
    Emergency,
    HardBrake,
    Cautious,
    Recovering,
    #[default]
    Clear,
}

impl BrakingZone {
    pub fn classify(distance: f32, config: &SimConfig) -> Self {
        if distance < config.emergency_zone {
            BrakingZone::Emergency
        } else if distance < config.hard_brake_zone {
            BrakingZone::HardBrake
        } else if distance < config.safe_distance {
            BrakingZone::Cautious
        } else if distance < config.safe_distance * 2.0 {
            BrakingZone::Recovering
        } else {
            BrakingZone::Clear
        }
    }

    /// Whether the vehicle is actively slowing for an obstacle
    pub fn is_braking(&self) -> bool {
        matches!(
            self,
            BrakingZone::Emergency | BrakingZone::HardBrake | BrakingZone::Cautious
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedDecision {
    pub zone: BrakingZone,
    pub target_speed: f32,
}

/// Target speed for a vehicle with desired speed `base_speed` whose nearest
/// obstacle is `distance` away
pub fn decide(distance: f32, base_speed: f32, config: &SimConfig) -> SpeedDecision {
    let zone = BrakingZone::classify(distance, config);
    let safe = config.safe_distance;

    let target_speed = match zone {
        BrakingZone::Emergency | BrakingZone::HardBrake => 0.0,
        BrakingZone::Cautious => base_speed * (distance / safe).max(0.01) * 0.4,
        BrakingZone::Recovering => base_speed * (0.5 + 0.5 * (distance - safe) / safe),
        BrakingZone::Clear => base_speed,
    };

    SpeedDecision { zone, target_speed }
}
