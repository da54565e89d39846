//! Coordinates, planned paths, and the distance provider.
//!
//! The dispatch core never computes geometry itself; it asks a [`Metric`].
//! Two metrics ship here: [`Euclidean`] treats `(lat, lon)` as a flat plane
//! (the unit the toy city maps and tests use), [`Haversine`] gives
//! great-circle metres for real WGS-84 coordinates.

use std::fmt;

/// A point on the city map.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    #[inline]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` if both components are finite (no NaN / ±∞).
    #[inline]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Linear interpolation: `t = 0` → `self`, `t = 1` → `other`.
    #[inline]
    pub fn lerp(self, other: Coordinate, t: f64) -> Coordinate {
        Coordinate {
            lat: self.lat + (other.lat - self.lat) * t,
            lon: self.lon + (other.lon - self.lon) * t,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── Metric ────────────────────────────────────────────────────────────────────

/// Distance provider consulted by the matcher and the planners.
pub trait Metric {
    /// Non-negative distance between `a` and `b`.
    fn distance(&self, a: Coordinate, b: Coordinate) -> f64;
}

/// Planar distance, `sqrt(Δlat² + Δlon²)`.
#[derive(Copy, Clone, Debug, Default)]
pub struct Euclidean;

impl Metric for Euclidean {
    #[inline]
    fn distance(&self, a: Coordinate, b: Coordinate) -> f64 {
        (a.lat - b.lat).hypot(a.lon - b.lon)
    }
}

/// Haversine great-circle distance in metres.
#[derive(Copy, Clone, Debug, Default)]
pub struct Haversine;

impl Metric for Haversine {
    fn distance(&self, a: Coordinate, b: Coordinate) -> f64 {
        const R: f64 = 6_371_000.0; // mean Earth radius, metres

        let d_lat = (b.lat - a.lat).to_radians();
        let d_lon = (b.lon - a.lon).to_radians();

        let lat1 = a.lat.to_radians();
        let lat2 = b.lat.to_radians();

        let h = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
        R * c
    }
}

// ── Path ──────────────────────────────────────────────────────────────────────

/// An ordered, non-empty sequence of waypoints from a start to an end.
///
/// Emptiness is ruled out at construction, so `start()` and `end()` are total.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    waypoints: Vec<Coordinate>,
}

impl Path {
    /// Wrap `waypoints`; returns `None` if the list is empty.
    pub fn new(waypoints: Vec<Coordinate>) -> Option<Self> {
        if waypoints.is_empty() {
            None
        } else {
            Some(Self { waypoints })
        }
    }

    /// A one-waypoint path (start and end coincide).
    pub fn single(at: Coordinate) -> Self {
        Self { waypoints: vec![at] }
    }

    pub fn start(&self) -> Coordinate {
        self.waypoints[0]
    }

    pub fn end(&self) -> Coordinate {
        self.waypoints[self.waypoints.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always `false`; present for API symmetry with `len()`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn waypoints(&self) -> &[Coordinate] {
        &self.waypoints
    }

    pub fn into_waypoints(self) -> Vec<Coordinate> {
        self.waypoints
    }

    /// Sum of segment lengths under `metric`.
    pub fn length<M: Metric + ?Sized>(&self, metric: &M) -> f64 {
        self.waypoints
            .windows(2)
            .map(|w| metric.distance(w[0], w[1]))
            .sum()
    }
}
