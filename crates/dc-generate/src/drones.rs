//! `DroneGenerator` — creates the fleet at its warehouses.

use dc_core::{Coordinate, DroneId};
use dc_fleet::Drone;

use crate::{GenerationError, GenerationResult};

/// Hands out free drones, cycling through the warehouses in order.
///
/// Ids are dense and continue across calls, matching what `FleetStore`
/// expects.
#[derive(Debug, Clone)]
pub struct DroneGenerator {
    warehouses: Vec<Coordinate>,
    next_id:    u32,
}

impl DroneGenerator {
    pub fn new(warehouses: Vec<Coordinate>) -> GenerationResult<Self> {
        if warehouses.is_empty() {
            return Err(GenerationError::NoWarehouses);
        }
        if let Some(bad) = warehouses.iter().find(|w| !w.is_finite()) {
            return Err(GenerationError::InvalidBounds(format!("warehouse {bad} is not finite")));
        }
        Ok(Self { warehouses, next_id: 0 })
    }

    pub fn warehouses(&self) -> &[Coordinate] {
        &self.warehouses
    }

    /// `n` drones; drone `k` starts at warehouse `k mod warehouses.len()`.
    pub fn generate(&mut self, n: usize) -> Vec<Drone> {
        let drones: Vec<Drone> = (0..n)
            .map(|k| {
                let id = DroneId(self.next_id + k as u32);
                Drone::new(id, self.warehouses[id.index() % self.warehouses.len()])
            })
            .collect();
        self.next_id += n as u32;
        tracing::debug!(count = n, warehouses = self.warehouses.len(), "generated drones");
        drones
    }
}
