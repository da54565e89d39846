//! `OrderGenerator` — random orders inside a bounding box.
//!
//! # Bias
//!
//! With `bias = true`, each origin is drawn from a disc around a demand
//! hotspot with probability [`HOTSPOT_SHARE`], and uniformly from the box
//! otherwise.  Without configured hotspots the box centre is used.
//! Destinations are always uniform.

use std::f64::consts::TAU;

use dc_core::{Coordinate, OrderId, SimRng, Tick};
use dc_fleet::Order;

use crate::{GenerationError, GenerationResult};

/// Fraction of biased origins drawn near a hotspot.
pub const HOTSPOT_SHARE: f64 = 0.8;

pub struct OrderGenerator {
    min:            Coordinate,
    max:            Coordinate,
    hotspots:       Vec<Coordinate>,
    hotspot_radius: f64,
    rng:            SimRng,
    next_id:        u32,
}

impl OrderGenerator {
    /// Orders inside `[min, max]`, drawn from `rng`.
    pub fn new(min: Coordinate, max: Coordinate, rng: SimRng) -> GenerationResult<Self> {
        if !(min.is_finite() && max.is_finite()) {
            return Err(GenerationError::InvalidBounds("bounds must be finite".into()));
        }
        if max.lat < min.lat || max.lon < min.lon {
            return Err(GenerationError::InvalidBounds(format!("max {max} is below min {min}")));
        }
        let span = (max.lat - min.lat).max(max.lon - min.lon);
        Ok(Self {
            min,
            max,
            hotspots:       Vec::new(),
            hotspot_radius: span * 0.1,
            rng,
            next_id:        0,
        })
    }

    /// Demand hotspots used for biased origins.
    pub fn with_hotspots(mut self, hotspots: Vec<Coordinate>) -> Self {
        self.hotspots = hotspots;
        self
    }

    /// Spread of biased origins around their hotspot.  Defaults to a tenth
    /// of the longer side of the box.
    pub fn with_hotspot_radius(mut self, radius: f64) -> Self {
        self.hotspot_radius = radius.max(0.0);
        self
    }

    /// `n` new `Waiting` orders stamped with `created`.  Ids continue across
    /// calls.
    pub fn generate(&mut self, n: usize, bias: bool, created: Tick) -> Vec<Order> {
        let orders: Vec<Order> = (0..n)
            .map(|_| {
                let origin = if bias && self.rng.gen_bool(HOTSPOT_SHARE) {
                    self.near_hotspot()
                } else {
                    self.uniform()
                };
                let destination = self.uniform();
                let id = OrderId(self.next_id);
                self.next_id += 1;
                Order::new(id, origin, destination, created)
            })
            .collect();
        tracing::debug!(count = n, bias, "generated orders");
        orders
    }

    fn uniform(&mut self) -> Coordinate {
        Coordinate::new(
            sample(&mut self.rng, self.min.lat, self.max.lat),
            sample(&mut self.rng, self.min.lon, self.max.lon),
        )
    }

    fn near_hotspot(&mut self) -> Coordinate {
        let center = match self.hotspots.len() {
            0 => self.min.lerp(self.max, 0.5),
            n => self.hotspots[self.rng.gen_range(0..n)],
        };
        // Uniform over the disc: r = R·√u.
        let r = self.hotspot_radius * self.rng.random::<f64>().sqrt();
        let theta = self.rng.random::<f64>() * TAU;
        Coordinate::new(
            (center.lat + r * theta.sin()).clamp(self.min.lat, self.max.lat),
            (center.lon + r * theta.cos()).clamp(self.min.lon, self.max.lon),
        )
    }
}

/// Uniform in `[lo, hi]`; a degenerate range yields `lo`.
fn sample(rng: &mut SimRng, lo: f64, hi: f64) -> f64 {
    if hi > lo { rng.gen_range(lo..=hi) } else { lo }
}
