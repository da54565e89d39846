//! Delivery orders.

use std::fmt;

use dc_core::{Coordinate, OrderId, Tick};

/// Where an order is in its life.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrderStatus {
    /// Queued, not yet matched to a drone.
    #[default]
    Waiting,
    /// Carried by a drone (pickup or drop-off leg).
    Assigned,
    /// Dropped off at its destination.
    Delivered,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Waiting   => "waiting",
            OrderStatus::Assigned  => "assigned",
            OrderStatus::Delivered => "delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to carry something from `origin` to `destination`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    pub id:          OrderId,
    pub origin:      Coordinate,
    pub destination: Coordinate,
    /// Tick at which the order entered the system.
    pub created:     Tick,
    status:          OrderStatus,
    delivered_at:    Option<Tick>,
}

impl Order {
    /// A new order in the `Waiting` state.
    pub fn new(id: OrderId, origin: Coordinate, destination: Coordinate, created: Tick) -> Self {
        Self {
            id,
            origin,
            destination,
            created,
            status:       OrderStatus::Waiting,
            delivered_at: None,
        }
    }

    #[inline]
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Tick of drop-off, once delivered.
    #[inline]
    pub fn delivered_at(&self) -> Option<Tick> {
        self.delivered_at
    }

    /// Ticks from creation to drop-off, once delivered.
    pub fn lead_time(&self) -> Option<u64> {
        self.delivered_at.map(|t| t.since(self.created))
    }

    pub(crate) fn mark_assigned(&mut self) {
        debug_assert_eq!(self.status, OrderStatus::Waiting);
        self.status = OrderStatus::Assigned;
    }

    pub(crate) fn mark_delivered(&mut self, at: Tick) {
        debug_assert_eq!(self.status, OrderStatus::Assigned);
        self.status = OrderStatus::Delivered;
        self.delivered_at = Some(at);
    }
}
