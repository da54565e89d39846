//! `dc-core` — foundational types for the `rust_dc` dispatch center.
//!
//! This crate is a dependency of every other `dc-*` crate.  It intentionally
//! has no `dc-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `OrderId`, `DroneId`                                  |
//! | [`geo`]         | `Coordinate`, `Path`, `Metric`, `Euclidean`, `Haversine` |
//! | [`time`]        | `Tick`, `TickPacer`, wall-clock / immediate / scripted pacers |
//! | [`rng`]         | `SimRng` (seeded, deterministic)                      |
//! | [`config`]      | `CenterConfig`                                        |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::CenterConfig;
pub use error::{CoreError, CoreResult};
pub use geo::{Coordinate, Euclidean, Haversine, Metric, Path};
pub use ids::{DroneId, OrderId};
pub use rng::SimRng;
pub use time::{ImmediatePacer, ScriptedPacer, Tick, TickPacer, WallClockPacer};
