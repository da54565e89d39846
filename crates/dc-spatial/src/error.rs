//! Spatial-subsystem error type.

use thiserror::Error;

use dc_core::Coordinate;

/// Errors produced by `dc-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// No path exists between the two points.
    #[error("no path from {from} to {to}")]
    Unreachable { from: Coordinate, to: Coordinate },

    #[error("{0} lies outside the planning grid")]
    OutOfBounds(Coordinate),

    #[error("planner step must be positive and finite, got {0}")]
    InvalidStep(f64),

    #[error("invalid grid: {0}")]
    InvalidGrid(String),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
