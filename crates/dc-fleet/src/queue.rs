//! `OrderQueue` — FIFO of orders awaiting assignment.

use std::collections::VecDeque;

use crate::{FleetError, FleetResult, Order};

/// First-in, first-out order queue.
///
/// `push` never reorders: orders created on the same tick leave in insertion
/// order.
#[derive(Debug, Default)]
pub struct OrderQueue {
    inner: VecDeque<Order>,
}

impl OrderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `order` at the back.  O(1) amortised.
    pub fn push(&mut self, order: Order) {
        self.inner.push_back(order);
    }

    /// Remove and return the oldest order.
    ///
    /// Fails with [`FleetError::EmptyQueue`] if the queue is empty; check
    /// [`is_empty`][Self::is_empty] first.
    pub fn pop(&mut self) -> FleetResult<Order> {
        self.inner.pop_front().ok_or(FleetError::EmptyQueue)
    }

    /// The order `pop` would return next.
    pub fn peek(&self) -> Option<&Order> {
        self.inner.front()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate oldest → newest.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.inner.iter()
    }
}

impl Extend<Order> for OrderQueue {
    fn extend<I: IntoIterator<Item = Order>>(&mut self, iter: I) {
        self.inner.extend(iter);
    }
}

impl FromIterator<Order> for OrderQueue {
    fn from_iter<I: IntoIterator<Item = Order>>(iter: I) -> Self {
        Self { inner: iter.into_iter().collect() }
    }
}
