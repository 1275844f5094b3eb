//! Post-move overlap correction
//!
//! Pairwise O(n²) over the vehicle list. Fine for tens of vehicles; a larger
//! population would want a per-lane sorted index instead.

use ordered_float::OrderedFloat;

use super::config::SimConfig;
use super::vehicle::Vehicle;

/// Sort vehicles rear to front
pub fn sort_by_x(vehicles: &mut [Vehicle]) {
    vehicles.sort_by_key(|vehicle| OrderedFloat(vehicle.position.x));
}

/// Push overlapping same-lane vehicles apart and slow the rear one.
///
/// Every pair closer than `min_gap` is moved apart symmetrically by half the
/// overlap, and the rear vehicle's speed is capped to `rear_speed_factor`
/// times its leader's. A settle sweep then walks each lane front to back and
/// pulls any rear vehicle still inside the gap back behind its leader, which
/// the symmetric pass alone cannot guarantee for clusters of three or more.
///
/// Leaves `vehicles` sorted by x. Returns the number of corrections applied.
pub fn resolve_collisions(vehicles: &mut [Vehicle], config: &SimConfig) -> usize {
    sort_by_x(vehicles);

    let min_gap = config.min_gap();
    let mut corrections = 0;

    for i in 0..vehicles.len() {
        for j in (i + 1)..vehicles.len() {
            let (head, tail) = vehicles.split_at_mut(j);
            let (first, second) = (&mut head[i], &mut tail[0]);

            if !first.position.same_lane(&second.position, config.lane_tolerance) {
                continue;
            }

            let separation = (second.position.x - first.position.x).abs();
            if separation >= min_gap {
                continue;
            }

            let (front, rear) = if first.position.x > second.position.x {
                (first, second)
            } else {
                (second, first)
            };
            let push = (min_gap - separation) / 2.0;
            front.position.x += push;
            rear.position.x -= push;
            rear.speed = rear.speed.min(front.speed * config.rear_speed_factor);
            corrections += 1;
        }
    }

    sort_by_x(vehicles);
    let settled = settle(vehicles, config);
    if settled > 0 {
        sort_by_x(vehicles);
    }
    corrections + settled
}

fn settle(vehicles: &mut [Vehicle], config: &SimConfig) -> usize {
    let min_gap = config.min_gap();
    let mut corrections = 0;

    for lane in 0..config.lane_count() {
        let mut leader: Option<usize> = None;
        for index in (0..vehicles.len()).rev() {
            if vehicles[index].lane() != lane {
                continue;
            }
            if let Some(front_index) = leader {
                let front_x = vehicles[front_index].position.x;
                let front_speed = vehicles[front_index].speed;
                let rear = &mut vehicles[index];
                if front_x - rear.position.x < min_gap {
                    rear.position.x = front_x - min_gap;
                    rear.speed = rear.speed.min(front_speed * config.rear_speed_factor);
                    corrections += 1;
                }
            }
            leader = Some(index);
        }
    }

    corrections
}
