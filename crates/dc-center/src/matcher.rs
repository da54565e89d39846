//! Greedy nearest-free-drone selection.

use dc_core::{Coordinate, DroneId, Metric};
use dc_fleet::FleetStore;

/// The free drone closest to `target` under `metric`, or `None` if no drone
/// is free.
///
/// Ties go to the lowest `DroneId`: the free view iterates in ascending id
/// order and a candidate only replaces the best on a strictly smaller
/// distance.  A NaN distance ranks behind every real one.
pub fn nearest_free_drone<M: Metric + ?Sized>(
    fleet:  &FleetStore,
    target: Coordinate,
    metric: &M,
) -> Option<DroneId> {
    let mut best: Option<(DroneId, f64)> = None;
    for drone in fleet.free() {
        let d = metric.distance(drone.location(), target);
        let d = if d.is_nan() { f64::INFINITY } else { d };
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((drone.id(), d));
        }
    }
    best.map(|(id, _)| id)
}
