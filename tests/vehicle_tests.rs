//! Vehicle kinematics validation
//!
//! Speed convergence, wrap-around and stopping behaviour in front of hazards.

use v2v_hazard_sim::simulation::{
    BrakingZone, HazardKind, SimConfig, SimId, Simulation, Timestep, Vehicle, VehicleId,
    VehicleUpdate, ROAD_Y,
};

const CENTRE_LANE: usize = 1;

fn empty_sim() -> Simulation {
    Simulation::new(SimConfig::default()).unwrap()
}

/// Simulation with a full-width roadblock 30 units wide centred at x=700
fn roadblock_sim() -> Simulation {
    let mut sim = empty_sim();
    sim.add_hazard(HazardKind::Roadblock, 700.0, ROAD_Y, 30.0, 240.0)
        .unwrap();
    sim
}

#[test]
fn test_lone_vehicle_converges_to_desired_speed() {
    let mut sim = empty_sim();
    let id = sim.add_vehicle(0.0, CENTRE_LANE, 0.0, 25.0).unwrap();

    // 25 / (2.5 * 0.05) = 200 ticks at full acceleration
    let mut reached_at = None;
    for tick in 1..=220 {
        sim.step();
        let vehicle = sim.vehicle(id).unwrap();
        if reached_at.is_none() && vehicle.speed == 25.0 {
            reached_at = Some(tick);
        }
    }

    let reached_at = reached_at.expect("vehicle never reached its desired speed");
    assert!(reached_at <= 201, "took {} ticks to converge", reached_at);

    let vehicle = sim.vehicle(id).unwrap();
    assert_eq!(vehicle.speed, 25.0);
    assert_eq!(vehicle.target_speed, 25.0);
    assert!(!vehicle.sensor_detected);
    assert!(vehicle.hazard_ahead.is_none());
    assert_eq!(vehicle.braking_zone, BrakingZone::Clear);
}

#[test]
fn test_acceleration_is_bounded() {
    let mut sim = empty_sim();
    let id = sim.add_vehicle(0.0, CENTRE_LANE, 0.0, 25.0).unwrap();

    sim.step();
    let vehicle = sim.vehicle(id).unwrap();
    assert!((vehicle.speed - 0.125).abs() < 1e-6);
    assert!((vehicle.accel - 2.5).abs() < 1e-3);
}

#[test]
fn test_priority_vehicle_has_raised_desired_speed() {
    let mut sim = empty_sim();
    let id = sim.add_priority_vehicle(0.0, CENTRE_LANE, 20.0, 25.0).unwrap();

    let vehicle = sim.vehicle(id).unwrap();
    assert!(vehicle.is_priority);
    assert_eq!(vehicle.base_speed(), 35.0);

    for _ in 0..200 {
        sim.step();
    }
    assert_eq!(sim.vehicle(id).unwrap().speed, 35.0);
}

#[test]
fn test_vehicle_wraps_to_reentry_offset() {
    let config = SimConfig::default();
    let dt = Timestep::new(config.dt).unwrap();
    let mut vehicle =
        Vehicle::new(VehicleId(SimId(0)), 1649.0, 0, 25.0, 25.0, &config).unwrap();

    assert_eq!(vehicle.step(dt, &config), VehicleUpdate::Wrapped);
    assert_eq!(vehicle.position().x, config.reentry_x);
    assert_eq!(vehicle.position().x, -300.0);
    assert_eq!(vehicle.speed, 15.0);

    // Slow vehicles keep their speed on re-entry
    let mut slow = Vehicle::new(VehicleId(SimId(1)), 1649.9, 0, 10.0, 10.0, &config).unwrap();
    assert_eq!(slow.step(dt, &config), VehicleUpdate::Wrapped);
    assert_eq!(slow.speed, 10.0);
}

#[test]
fn test_vehicle_never_stays_past_world_bound() {
    let mut sim = empty_sim();
    let id = sim.add_vehicle(1500.0, 2, 25.0, 25.0).unwrap();
    let limit = sim.config().wrap_limit();

    for _ in 0..5000 {
        sim.step();
        assert!(sim.vehicle(id).unwrap().position().x <= limit);
    }
    assert!(sim.wraps() >= 2);
}

#[test]
fn test_scenario_example_stops_before_hazard() {
    let mut sim = roadblock_sim();
    let id = sim.add_vehicle(0.0, CENTRE_LANE, 20.0, 25.0).unwrap();
    let length = sim.config().vehicle_length;

    let mut stopped_at = None;
    for tick in 1..=3000 {
        sim.step();
        if stopped_at.is_none() && sim.vehicle(id).unwrap().is_stopped() {
            stopped_at = Some(tick);
        }
    }

    // (700 / 20) / 0.05 = 700 ticks is the naive travel time
    let stopped_at = stopped_at.expect("vehicle never stopped");
    assert!(stopped_at < 3000, "stopped only at tick {}", stopped_at);

    let vehicle = sim.vehicle(id).unwrap();
    let final_x = vehicle.position().x;
    assert_eq!(vehicle.speed, 0.0);
    assert!(
        final_x < 700.0 - 15.0 - length / 2.0,
        "vehicle ended at x={}",
        final_x
    );
    assert!(vehicle.hazard_ahead.is_some());
    assert_eq!(vehicle.braking_zone, BrakingZone::HardBrake);

    // And it stays put
    for _ in 0..200 {
        sim.step();
    }
    let vehicle = sim.vehicle(id).unwrap();
    assert_eq!(vehicle.speed, 0.0);
    assert_eq!(vehicle.position().x, final_x);
}

#[test]
fn test_hard_stop_before_hazard_leading_edge() {
    for approach in [80.0_f32, 100.0, 120.0, 250.0, 400.0, 600.0] {
        for initial_speed in [5.0_f32, 15.0, 25.0, 30.0] {
            let mut sim = roadblock_sim();
            let leading_edge = sim.hazards()[0].leading_edge();
            let x = 700.0 - sim.config().vehicle_length / 2.0 - approach;
            let id = sim.add_vehicle(x, CENTRE_LANE, initial_speed, 25.0).unwrap();

            for _ in 0..4000 {
                sim.step();
                let vehicle = sim.vehicle(id).unwrap();
                assert!(
                    vehicle.front(sim.config()) < leading_edge,
                    "approach {} at speed {} reached x={}",
                    approach,
                    initial_speed,
                    vehicle.position().x
                );
            }

            assert_eq!(
                sim.vehicle(id).unwrap().speed,
                0.0,
                "approach {} at speed {} never stopped",
                approach,
                initial_speed
            );
        }
    }
}

#[test]
fn test_emergency_zone_marks_speed_down() {
    let mut sim = roadblock_sim();
    // Effective distance: 700 - 660 - 20 = 20
    let id = sim.add_vehicle(660.0, CENTRE_LANE, 10.0, 25.0).unwrap();

    sim.step();
    let vehicle = sim.vehicle(id).unwrap();
    assert_eq!(vehicle.braking_zone, BrakingZone::Emergency);
    assert_eq!(vehicle.target_speed, 0.0);
    // 10 - 15 * 0.05 markdown, then 12 * 0.05 emergency deceleration
    assert!((vehicle.speed - 8.65).abs() < 1e-4, "speed {}", vehicle.speed);
}

#[test]
fn test_normal_braking_outside_emergency_threshold() {
    let mut sim = roadblock_sim();
    // Effective distance 200: cautious zone, normal deceleration cap
    let id = sim.add_vehicle(480.0, CENTRE_LANE, 25.0, 25.0).unwrap();

    sim.step();
    let vehicle = sim.vehicle(id).unwrap();
    assert_eq!(vehicle.braking_zone, BrakingZone::Cautious);
    assert!((vehicle.speed - (25.0 - 6.0 * 0.05)).abs() < 1e-4);
}

#[test]
fn test_change_lane_moves_lane_and_y_together() {
    let config = SimConfig::default();
    let mut vehicle = Vehicle::new(VehicleId(SimId(0)), 100.0, 1, 20.0, 25.0, &config).unwrap();
    assert_eq!(vehicle.lane(), 1);
    assert_eq!(vehicle.position().y, config.lanes[1]);

    vehicle.change_lane(2, &config).unwrap();
    assert_eq!(vehicle.lane(), 2);
    assert_eq!(vehicle.position().y, config.lanes[2]);
    assert_eq!(vehicle.position().x, 100.0);

    // A lane outside the road leaves the vehicle where it was
    assert!(vehicle.change_lane(3, &config).is_err());
    assert_eq!(vehicle.lane(), 2);
    assert_eq!(vehicle.position().y, config.lanes[2]);
    assert_eq!(config.lane_at(vehicle.position().y), Some(vehicle.lane()));
}
