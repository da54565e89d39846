//! `dc-fleet` — orders, drones, the order queue, and the fleet arena.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`order`]   | `Order`, `OrderStatus`                                      |
//! | [`drone`]   | `Drone`, `DroneStatus`, `DroneEvent`, `Leg`                 |
//! | [`queue`]   | `OrderQueue` (FIFO)                                         |
//! | [`store`]   | `FleetStore` arena, status-derived partitions               |
//! | [`error`]   | `FleetError`, `FleetResult<T>`                              |
//!
//! # Drone lifecycle
//!
//! ```text
//!            accept_order                receive_path
//!   FREE ───────────────▶ AWAITING_PLANNING ──────────▶ DELIVERING
//!    ▲                           ▲                          │
//!    │                           └──── update(): pickup ────┤
//!    │                                 reached / replan     │
//!    └────────────── update(): drop-off path exhausted ─────┘
//! ```
//!
//! Partitions are never stored: `FleetStore` filters its arena by status, so
//! a drone is in exactly one partition by construction.

pub mod drone;
pub mod error;
pub mod order;
pub mod queue;
pub mod store;


pub use drone::{Drone, DroneEvent, DroneStatus, Leg};
pub use error::{FleetError, FleetResult};
pub use order::{Order, OrderStatus};
pub use queue::OrderQueue;
pub use store::{FleetStore, PartitionCounts};
