//! `dc-generate` — where orders and drones come from.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`orders`] | `OrderGenerator` — uniform or hotspot-biased orders        |
//! | [`drones`] | `DroneGenerator` — drones spread over warehouses           |
//! | [`loader`] | `load_orders_csv`, `load_orders_reader`, `save_orders_csv` |
//! | [`error`]  | `GenerationError`, `GenerationResult<T>`                   |
//!
//! Every failure here happens before the control loop exists; the center
//! treats it as fatal at startup.

pub mod drones;
pub mod error;
pub mod loader;
pub mod orders;

#[cfg(test)]
mod tests;

pub use drones::DroneGenerator;
pub use error::{GenerationError, GenerationResult};
pub use loader::{load_orders_csv, load_orders_reader, save_orders_csv, save_orders_writer};
pub use orders::OrderGenerator;
