//! Square-cell grid over a bounding box.
//!
//! Rows run along latitude, columns along longitude.  Cell `(0, 0)` holds the
//! `min` corner.  Points on the `max` edge belong to the last row/column.

use std::fmt;

use dc_core::Coordinate;

use crate::{SpatialError, SpatialResult};

/// A grid cell, addressed by row and column.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: u32,
    pub col: u32,
}

impl Cell {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Chebyshev distance in cells (8-connected steps).
    pub fn steps_to(self, other: Cell) -> u32 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.row, self.col)
    }
}

/// Geometry of the grid shared by the planner, density matrix, and noise tracker.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSpec {
    min:       Coordinate,
    cell_size: f64,
    rows:      u32,
    cols:      u32,
}

impl GridSpec {
    /// Cover `[min, max]` with square cells of side `cell_size`.
    pub fn new(min: Coordinate, max: Coordinate, cell_size: f64) -> SpatialResult<Self> {
        if !(min.is_finite() && max.is_finite()) {
            return Err(SpatialError::InvalidGrid("bounds must be finite".into()));
        }
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(SpatialError::InvalidGrid(format!(
                "cell size must be positive, got {cell_size}"
            )));
        }
        if max.lat < min.lat || max.lon < min.lon {
            return Err(SpatialError::InvalidGrid(format!("max {max} is below min {min}")));
        }
        let rows = (((max.lat - min.lat) / cell_size).ceil() as u32).max(1);
        let cols = (((max.lon - min.lon) / cell_size).ceil() as u32).max(1);
        Ok(Self { min, cell_size, rows, cols })
    }

    /// Smallest grid with `cells_per_side` cells along its longer side that
    /// contains every point in `points`, padded by one cell on each side.
    pub fn covering<I>(points: I, cells_per_side: u32) -> SpatialResult<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut min = Coordinate::new(f64::INFINITY, f64::INFINITY);
        let mut max = Coordinate::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            min.lat = min.lat.min(p.lat);
            min.lon = min.lon.min(p.lon);
            max.lat = max.lat.max(p.lat);
            max.lon = max.lon.max(p.lon);
        }
        if !(min.is_finite() && max.is_finite()) {
            return Err(SpatialError::InvalidGrid("no finite points to cover".into()));
        }
        let span = (max.lat - min.lat).max(max.lon - min.lon);
        // All points coincide → unit span.
        let span = if span > 0.0 { span } else { 1.0 };
        let cell_size = span / cells_per_side.max(1) as f64;
        let pad = Coordinate::new(cell_size, cell_size);
        GridSpec::new(
            Coordinate::new(min.lat - pad.lat, min.lon - pad.lon),
            Coordinate::new(max.lat + pad.lat, max.lon + pad.lon),
            cell_size,
        )
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// The cell containing `p`, or `None` outside the grid.
    pub fn cell_of(&self, p: Coordinate) -> Option<Cell> {
        if !p.is_finite() {
            return None;
        }
        let r = ((p.lat - self.min.lat) / self.cell_size).floor();
        let c = ((p.lon - self.min.lon) / self.cell_size).floor();
        if r < 0.0 || c < 0.0 {
            return None;
        }
        // Points exactly on the max edge fold into the last row/column.
        let row = if r as u32 == self.rows && p.lat <= self.max_lat() { self.rows - 1 } else { r as u32 };
        let col = if c as u32 == self.cols && p.lon <= self.max_lon() { self.cols - 1 } else { c as u32 };
        (row < self.rows && col < self.cols).then_some(Cell { row, col })
    }

    /// Centre point of `cell`.
    pub fn center(&self, cell: Cell) -> Coordinate {
        Coordinate::new(
            self.min.lat + (cell.row as f64 + 0.5) * self.cell_size,
            self.min.lon + (cell.col as f64 + 0.5) * self.cell_size,
        )
    }

    /// Row-major index of `cell` into a dense per-cell `Vec`.
    #[inline]
    pub fn index(&self, cell: Cell) -> usize {
        cell.row as usize * self.cols as usize + cell.col as usize
    }

    /// Inverse of [`index`][Self::index].
    #[inline]
    pub fn cell_at(&self, index: usize) -> Cell {
        let cols = self.cols as usize;
        Cell::new((index / cols) as u32, (index % cols) as u32)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// In-grid cells within `radius` steps of `cell` (including `cell`).
    pub fn neighborhood(&self, cell: Cell, radius: u32) -> impl Iterator<Item = Cell> + '_ {
        let r0 = cell.row.saturating_sub(radius);
        let r1 = (cell.row + radius).min(self.rows - 1);
        let c0 = cell.col.saturating_sub(radius);
        let c1 = (cell.col + radius).min(self.cols - 1);
        (r0..=r1).flat_map(move |row| (c0..=c1).map(move |col| Cell::new(row, col)))
    }

    fn max_lat(&self) -> f64 {
        self.min.lat + self.rows as f64 * self.cell_size
    }

    fn max_lon(&self) -> f64 {
        self.min.lon + self.cols as f64 * self.cell_size
    }
}
