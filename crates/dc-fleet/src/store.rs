//! `FleetStore` — arena of drones indexed by `DroneId`.
//!
//! The free / awaiting-planning / delivering partitions are views obtained by
//! filtering the arena on [`DroneStatus`].  There is no second copy of a
//! drone anywhere, so a drone can never sit in two partitions, and moving
//! between partitions is just a status change inside the drone's own
//! lifecycle methods.
//!
//! Every view iterates in ascending `DroneId` order.  The matcher relies on
//! this for its tie-break.

use dc_core::DroneId;

use crate::{Drone, DroneStatus, FleetError, FleetResult};

/// Partition sizes at one instant.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PartitionCounts {
    pub free:              usize,
    pub awaiting_planning: usize,
    pub delivering:        usize,
}

impl PartitionCounts {
    pub fn total(&self) -> usize {
        self.free + self.awaiting_planning + self.delivering
    }
}

/// Owns every drone of the fleet for the whole run.
#[derive(Debug, Default)]
pub struct FleetStore {
    drones: Vec<Drone>,
}

impl FleetStore {
    /// Build the arena.  Drone `n` must carry `DroneId(n)`.
    pub fn new(drones: Vec<Drone>) -> FleetResult<Self> {
        for (i, drone) in drones.iter().enumerate() {
            let expected = DroneId(i as u32);
            if drone.id() != expected {
                return Err(FleetError::IdMismatch { expected, got: drone.id() });
            }
        }
        Ok(Self { drones })
    }

    pub fn len(&self) -> usize {
        self.drones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drones.is_empty()
    }

    pub fn get(&self, id: DroneId) -> FleetResult<&Drone> {
        self.drones.get(id.index()).ok_or(FleetError::UnknownDrone(id))
    }

    pub fn get_mut(&mut self, id: DroneId) -> FleetResult<&mut Drone> {
        self.drones.get_mut(id.index()).ok_or(FleetError::UnknownDrone(id))
    }

    /// Every drone, ascending id.
    pub fn iter(&self) -> impl Iterator<Item = &Drone> {
        self.drones.iter()
    }

    // ── Partition views ───────────────────────────────────────────────────

    pub fn with_status(&self, status: DroneStatus) -> impl Iterator<Item = &Drone> {
        self.drones.iter().filter(move |d| d.status() == status)
    }

    pub fn free(&self) -> impl Iterator<Item = &Drone> {
        self.with_status(DroneStatus::Free)
    }

    pub fn awaiting_planning(&self) -> impl Iterator<Item = &Drone> {
        self.with_status(DroneStatus::AwaitingPlanning)
    }

    pub fn delivering(&self) -> impl Iterator<Item = &Drone> {
        self.with_status(DroneStatus::Delivering)
    }

    /// Snapshot of the ids currently in `status`.
    ///
    /// Mutation passes iterate this snapshot so a drone that changes status
    /// mid-pass is not visited twice.
    pub fn ids_with(&self, status: DroneStatus) -> Vec<DroneId> {
        self.with_status(status).map(Drone::id).collect()
    }

    pub fn count(&self, status: DroneStatus) -> usize {
        self.with_status(status).count()
    }

    /// `true` if at least one drone is in `status`.
    pub fn any(&self, status: DroneStatus) -> bool {
        self.drones.iter().any(|d| d.status() == status)
    }

    pub fn partition_counts(&self) -> PartitionCounts {
        let mut counts = PartitionCounts::default();
        for drone in &self.drones {
            match drone.status() {
                DroneStatus::Free             => counts.free += 1,
                DroneStatus::AwaitingPlanning => counts.awaiting_planning += 1,
                DroneStatus::Delivering       => counts.delivering += 1,
            }
        }
        counts
    }
}
