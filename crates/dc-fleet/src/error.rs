use dc_core::DroneId;
use thiserror::Error;

use crate::DroneStatus;

#[derive(Debug, Error)]
pub enum FleetError {
    /// `pop` on an empty queue.  Callers guard with `is_empty()`, so this is a
    /// programming error, never a recoverable condition.
    #[error("pop from an empty order queue")]
    EmptyQueue,

    #[error("drone {0} not found in fleet")]
    UnknownDrone(DroneId),

    #[error("drone {drone} cannot {action} while {from}")]
    InvalidTransition {
        drone:  DroneId,
        from:   DroneStatus,
        action: &'static str,
    },

    #[error("drone {0} is delivering without an order")]
    MissingOrder(DroneId),

    #[error("drone at slot {expected} carries id {got}; fleet ids must be dense and ordered")]
    IdMismatch { expected: DroneId, got: DroneId },
}

pub type FleetResult<T> = Result<T, FleetError>;
