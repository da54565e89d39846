//! Persisted-order CSV loading and saving.
//!
//! # CSV format
//!
//! One row per order, in queue order:
//!
//! ```csv
//! order_id,origin_lat,origin_lon,dest_lat,dest_lon,created_tick
//! 0,1.0,0.0,5.0,5.0,0
//! 1,0.0,1.0,2.0,2.0,0
//! ```
//!
//! Rows keep file order.  Duplicate ids and non-finite coordinates are
//! rejected; any malformed row fails the whole load.

use std::collections::HashSet;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use dc_core::{Coordinate, OrderId, Tick};
use dc_fleet::Order;

use crate::{GenerationError, GenerationResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize, Serialize)]
struct OrderRecord {
    order_id:     u32,
    origin_lat:   f64,
    origin_lon:   f64,
    dest_lat:     f64,
    dest_lon:     f64,
    created_tick: u64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load persisted orders from a CSV file.
pub fn load_orders_csv(path: &Path) -> GenerationResult<Vec<Order>> {
    let file = std::fs::File::open(path)?;
    let orders = load_orders_reader(file)?;
    tracing::info!(count = orders.len(), path = %path.display(), "loaded persisted orders");
    Ok(orders)
}

/// Like [`load_orders_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`).
pub fn load_orders_reader<R: Read>(reader: R) -> GenerationResult<Vec<Order>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut seen = HashSet::new();
    let mut orders = Vec::new();

    for (line, result) in csv_reader.deserialize::<OrderRecord>().enumerate() {
        let row = result.map_err(|e| GenerationError::Parse(e.to_string()))?;
        let origin = Coordinate::new(row.origin_lat, row.origin_lon);
        let destination = Coordinate::new(row.dest_lat, row.dest_lon);

        if !(origin.is_finite() && destination.is_finite()) {
            return Err(GenerationError::Parse(format!(
                "record {}: order {} has a non-finite coordinate",
                line + 1,
                row.order_id
            )));
        }
        if !seen.insert(row.order_id) {
            return Err(GenerationError::Parse(format!(
                "record {}: duplicate order id {}",
                line + 1,
                row.order_id
            )));
        }

        orders.push(Order::new(OrderId(row.order_id), origin, destination, Tick(row.created_tick)));
    }

    Ok(orders)
}

/// Persist `orders` as CSV so a later run can replay them with
/// `use_local_orders`.
pub fn save_orders_csv(path: &Path, orders: &[Order]) -> GenerationResult<()> {
    let file = std::fs::File::create(path)?;
    save_orders_writer(file, orders)
}

/// Like [`save_orders_csv`] but accepts any `Write` sink.
pub fn save_orders_writer<W: Write>(writer: W, orders: &[Order]) -> GenerationResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for order in orders {
        csv_writer.serialize(OrderRecord {
            order_id:     order.id.0,
            origin_lat:   order.origin.lat,
            origin_lon:   order.origin.lon,
            dest_lat:     order.destination.lat,
            dest_lon:     order.destination.lon,
            created_tick: order.created.0,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}
