//! Aggregate statistics over the current simulation state

use log::info;

use super::world::Simulation;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimStats {
    pub elapsed_time: f32,
    pub ticks: u64,
    pub vehicles: usize,
    pub hazards: usize,
    pub stopped_vehicles: usize,
    pub sensing_vehicles: usize,
    pub braking_vehicles: usize,
    pub priority_vehicles: usize,
    pub average_speed: f32,
    pub max_speed: f32,
    /// Smallest x-gap between consecutive vehicles in any lane, if any lane
    /// holds two or more vehicles
    pub min_same_lane_gap: Option<f32>,
    pub lane_changes: u64,
    pub wraps: u64,
}

impl SimStats {
    pub fn collect(sim: &Simulation) -> Self {
        let vehicles = sim.vehicles();
        let config = sim.config();

        let total_speed: f32 = vehicles.iter().map(|vehicle| vehicle.speed).sum();
        let average_speed = if vehicles.is_empty() {
            0.0
        } else {
            total_speed / vehicles.len() as f32
        };

        let mut min_same_lane_gap: Option<f32> = None;
        for lane in 0..config.lane_count() {
            // Vehicles are kept sorted by x
            let xs: Vec<f32> = vehicles
                .iter()
                .filter(|vehicle| vehicle.lane() == lane)
                .map(|vehicle| vehicle.position().x)
                .collect();
            for pair in xs.windows(2) {
                let gap = pair[1] - pair[0];
                min_same_lane_gap = Some(min_same_lane_gap.map_or(gap, |current| current.min(gap)));
            }
        }

        Self {
            elapsed_time: sim.time(),
            ticks: sim.ticks(),
            vehicles: vehicles.len(),
            hazards: sim.hazards().len(),
            stopped_vehicles: vehicles.iter().filter(|v| v.is_stopped()).count(),
            sensing_vehicles: vehicles.iter().filter(|v| v.sensor_detected).count(),
            braking_vehicles: vehicles.iter().filter(|v| v.braking_zone.is_braking()).count(),
            priority_vehicles: vehicles.iter().filter(|v| v.is_priority).count(),
            average_speed,
            max_speed: vehicles.iter().map(|v| v.speed).fold(0.0, f32::max),
            min_same_lane_gap,
            lane_changes: sim.lane_changes(),
            wraps: sim.wraps(),
        }
    }

    /// Log the end-of-run report
    pub fn log_report(&self) {
        info!("=== SIMULATION COMPLETE ===");
        info!("Elapsed time: {:.2}s", self.elapsed_time);
        info!("Ticks: {}", self.ticks);
        info!("Vehicles: {}", self.vehicles);
        info!("Hazards: {}", self.hazards);
        info!("Stopped vehicles: {}", self.stopped_vehicles);
        info!("Sensing vehicles: {}", self.sensing_vehicles);
        info!("Braking vehicles: {}", self.braking_vehicles);
        info!("Average speed: {:.2}", self.average_speed);
        match self.min_same_lane_gap {
            Some(gap) => info!("Min same-lane gap: {:.2}", gap),
            None => info!("Min same-lane gap: n/a"),
        }
        info!("Lane changes: {}", self.lane_changes);
        info!("Wrap-arounds: {}", self.wraps);
    }
}

impl Simulation {
    pub fn stats(&self) -> SimStats {
        SimStats::collect(self)
    }
}
