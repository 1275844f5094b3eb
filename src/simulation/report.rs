//! Terminal rendering of the simulation state

use super::detector::ObstacleKind;
use super::world::Simulation;

/// World units per map column
const MAP_SCALE: f32 = 20.0;

impl Simulation {
    /// Print a summary of the world state
    pub fn print_summary(&self) {
        let stats = self.stats();

        println!("=== Hazard Simulation Summary ===");
        println!("Time: {:.2}s (tick {})", stats.elapsed_time, stats.ticks);
        println!("Vehicles: {}, Hazards: {}", stats.vehicles, stats.hazards);
        println!(
            "Stopped: {}, Sensing: {}, Braking: {}, Lane changes: {}",
            stats.stopped_vehicles,
            stats.sensing_vehicles,
            stats.braking_vehicles,
            stats.lane_changes
        );
        println!();

        if !self.hazards().is_empty() {
            println!("--- Hazards ---");
            for hazard in self.hazards() {
                println!(
                    "  Hazard {}: {} ({:?}) at ({:.1}, {:.1}), {:.0}x{:.0}",
                    hazard.id(),
                    hazard.kind(),
                    hazard.status(),
                    hazard.position().x,
                    hazard.position().y,
                    hazard.width(),
                    hazard.height()
                );
            }
        }

        if !self.vehicles().is_empty() {
            println!("--- Vehicles ---");
            for vehicle in self.vehicles() {
                let ahead = match vehicle.hazard_ahead.map(|obstacle| obstacle.kind()) {
                    Some(ObstacleKind::Hazard) => format!("hazard @ {:.1}", vehicle.obstacle_distance),
                    Some(ObstacleKind::Vehicle) => {
                        format!("vehicle @ {:.1}", vehicle.obstacle_distance)
                    }
                    None => "clear".to_string(),
                };
                println!(
                    "  Vehicle {}{}: lane={}, x={:.1}, speed={:.1}/{:.1}, zone={:?}, sensor={}, ahead={}",
                    vehicle.id,
                    if vehicle.is_priority { "*" } else { "" },
                    vehicle.lane(),
                    vehicle.position().x,
                    vehicle.speed,
                    vehicle.target_speed,
                    vehicle.braking_zone,
                    if vehicle.sensor_detected { "on" } else { "off" },
                    ahead
                );
            }
        }
    }

    /// Draw the road as one text row per lane
    pub fn draw_map(&self) {
        let config = self.config();
        let width = (config.world_width / MAP_SCALE).ceil().max(1.0) as usize;
        let to_col = |x: f32| -> Option<usize> {
            if x < 0.0 || x > config.world_width {
                None
            } else {
                Some(((x / MAP_SCALE) as usize).min(width - 1))
            }
        };

        let mut grid = vec![vec!['-'; width]; config.lane_count()];

        for (row, lane_y) in grid.iter_mut().zip(config.lanes.iter()) {
            for hazard in self.hazards().iter().filter(|h| h.covers_lane(*lane_y)) {
                let start = hazard.leading_edge().max(0.0);
                let end = (hazard.leading_edge() + hazard.width()).min(config.world_width);
                if let (Some(first), Some(last)) = (to_col(start), to_col(end)) {
                    for cell in &mut row[first..=last] {
                        *cell = '#';
                    }
                }
            }
        }

        let mut off_road = 0;
        for vehicle in self.vehicles() {
            let Some(col) = to_col(vehicle.position().x) else {
                off_road += 1;
                continue;
            };
            let Some(row) = grid.get_mut(vehicle.lane()) else {
                continue;
            };
            row[col] = if vehicle.is_priority {
                'P'
            } else if vehicle.is_stopped() {
                'o'
            } else {
                '>'
            };
        }

        println!("\n=== Road Map ===");
        println!("Legend: >=Moving, o=Stopped, P=Priority, #=Hazard");
        println!();
        // Highest y on top
        for (lane, row) in grid.iter().enumerate().rev() {
            let line: String = row.iter().collect();
            println!("{:>2} |{}|", lane, line);
        }
        if off_road > 0 {
            println!("({} vehicle(s) re-entering off screen)", off_road);
        }
        println!();
    }
}
