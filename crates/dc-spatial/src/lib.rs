//! `dc-spatial` — path planning and spatial exposure tracking.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`grid`]    | `GridSpec`, `Cell` — bounding box split into square cells   |
//! | [`density`] | `DensityMatrix` — per-cell count of delivering drones       |
//! | [`noise`]   | `NoiseTracker`, `NoiseSample` — per-tick noise exposure     |
//! | [`planner`] | `Planner` trait, `StraightLinePlanner`, `GridPlanner`       |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! The planner receives the density matrix on every call, so congestion-aware
//! planners can steer new paths away from busy cells.

pub mod density;
pub mod error;
pub mod grid;
pub mod noise;
pub mod planner;


pub use density::{DensityCell, DensityMatrix};
pub use error::{SpatialError, SpatialResult};
pub use grid::{Cell, GridSpec};
pub use noise::{NoiseSample, NoiseTracker};
pub use planner::{GridPlanner, Planner, StraightLinePlanner, MAX_SEGMENTS};
