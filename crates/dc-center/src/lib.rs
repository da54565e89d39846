//! `dc-center` — the dispatch center control loop.
//!
//! # Tick loop
//!
//! ```text
//! loop:
//!   stop flag set?          → halt (Stopped)
//!   pacer.should_advance?   → no: pacer.idle(), poll again
//!   tick += 1
//!   if waiting work:
//!     ① Match    — pop orders FIFO, give each to the nearest free drone
//!     ② Plan     — route every AWAITING_PLANNING drone's current leg
//!     ③ Update   — step every DELIVERING drone one waypoint
//!     ④ Density  — accumulate delivering positions (if enabled)
//!     observers  — on_tick_end(tick, fleet)
//!   quiescent?              → halt (Quiescent)
//!   max_ticks reached?      → halt (TickLimit)
//! ```
//!
//! Quiescence means an empty order queue with no drone awaiting planning or
//! delivering.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use dc_center::{CenterBuilder, NoopObserver};
//! use dc_core::{CenterConfig, ImmediatePacer};
//! use dc_spatial::StraightLinePlanner;
//!
//! let mut center = CenterBuilder::new(CenterConfig::default(), StraightLinePlanner::new(1.0)?)
//!     .drones(drones)
//!     .orders(orders)
//!     .build()?;
//! let report = center.run_with(ImmediatePacer, &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod center;
pub mod error;
pub mod matcher;
pub mod observer;

#[cfg(test)]
mod tests;

pub use builder::{CenterBuilder, Deployment, DEFAULT_GRID_CELLS};
pub use center::{Center, RunOutcome, RunReport, StepStats};
pub use error::{CenterError, CenterResult};
pub use matcher::nearest_free_drone;
pub use observer::{CenterObserver, NoopObserver, RunSummary};
