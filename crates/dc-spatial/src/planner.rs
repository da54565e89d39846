//! Planner trait and the two shipped planners.
//!
//! # Pluggability
//!
//! The dispatch center calls planning via the [`Planner`] trait, so
//! applications can swap in their own implementation without touching the
//! control loop.  Contract:
//!
//! - the returned [`Path`] starts at `start` and ends at `end`;
//! - identical `(start, end, tick, congestion)` inputs give identical paths;
//! - failure to route is reported as [`SpatialError::Unreachable`] (or
//!   [`SpatialError::OutOfBounds`]); the caller keeps the drone waiting.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::FxHashSet;

use dc_core::{Coordinate, Path, Tick};

use crate::{Cell, DensityMatrix, GridSpec, SpatialError, SpatialResult};

// ── Planner trait ─────────────────────────────────────────────────────────────

pub trait Planner {
    /// Plan a path from `start` to `end` at `tick`.
    ///
    /// `congestion` holds the density accumulated so far; planners that do
    /// not route around traffic may ignore it.
    fn plan(
        &self,
        start:      Coordinate,
        end:        Coordinate,
        tick:       Tick,
        congestion: &DensityMatrix,
    ) -> SpatialResult<Path>;
}

impl<P: Planner + ?Sized> Planner for Box<P> {
    fn plan(
        &self,
        start:      Coordinate,
        end:        Coordinate,
        tick:       Tick,
        congestion: &DensityMatrix,
    ) -> SpatialResult<Path> {
        (**self).plan(start, end, tick, congestion)
    }
}

// ── StraightLinePlanner ───────────────────────────────────────────────────────

/// Longest path, in steps, a [`StraightLinePlanner`] will build.
pub const MAX_SEGMENTS: usize = 1_000_000;

/// Flies the straight segment from `start` to `end` in steps of at most
/// `step` (planar distance).  Never consults congestion.  Legs needing more
/// than [`MAX_SEGMENTS`] steps are unreachable.
#[derive(Copy, Clone, Debug)]
pub struct StraightLinePlanner {
    step: f64,
}

impl StraightLinePlanner {
    /// Fails unless `step` is a positive finite number.
    pub fn new(step: f64) -> SpatialResult<Self> {
        if !(step.is_finite() && step > 0.0) {
            return Err(SpatialError::InvalidStep(step));
        }
        Ok(Self { step })
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

impl Planner for StraightLinePlanner {
    fn plan(
        &self,
        start:       Coordinate,
        end:         Coordinate,
        _tick:       Tick,
        _congestion: &DensityMatrix,
    ) -> SpatialResult<Path> {
        if !(start.is_finite() && end.is_finite()) {
            return Err(SpatialError::Unreachable { from: start, to: end });
        }
        if start == end {
            return Ok(Path::single(start));
        }
        let dist = (end.lat - start.lat).hypot(end.lon - start.lon);
        let segments = (dist / self.step).ceil();
        if !(segments <= MAX_SEGMENTS as f64) {
            return Err(SpatialError::Unreachable { from: start, to: end });
        }
        let segments = (segments as usize).max(1);
        let mut waypoints: Vec<Coordinate> = (0..segments)
            .map(|i| start.lerp(end, i as f64 / segments as f64))
            .collect();
        // Exact end point, free of interpolation rounding.
        waypoints.push(end);
        Ok(Path::new(waypoints).unwrap_or_else(|| Path::single(end)))
    }
}

// ── GridPlanner ───────────────────────────────────────────────────────────────

/// Dijkstra over an 8-connected cell lattice.
///
/// Step cost is the geometric step length (1 or √2 cells) times
/// `1 + congestion_weight · density(target cell)`, so a positive weight bends
/// new paths around cells that have been busy.  Blocked cells are impassable
/// and diagonal moves may not cut a blocked corner.
///
/// Waypoints are `start`, the centres of the intermediate cells, and `end`.
#[derive(Clone, Debug)]
pub struct GridPlanner {
    grid:              GridSpec,
    blocked:           FxHashSet<Cell>,
    congestion_weight: f64,
}

/// Fixed-point scale for Dijkstra costs.  Integer costs keep heap ordering
/// total and results bit-for-bit reproducible.
const COST_SCALE: f64 = 1_000_000.0;

impl GridPlanner {
    pub fn new(grid: GridSpec) -> Self {
        Self {
            grid,
            blocked:           FxHashSet::default(),
            congestion_weight: 0.0,
        }
    }

    /// Make `cells` impassable (no-fly zones).
    pub fn with_blocked<I: IntoIterator<Item = Cell>>(mut self, cells: I) -> Self {
        self.blocked.extend(cells);
        self
    }

    /// Weight of the density penalty.  `0.0` gives pure shortest paths.
    pub fn with_congestion_weight(mut self, weight: f64) -> Self {
        self.congestion_weight = weight.max(0.0);
        self
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.blocked.contains(&cell)
    }

    fn passable(&self, row: i64, col: i64) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        let cell = Cell::new(row as u32, col as u32);
        (self.grid.contains(cell) && !self.is_blocked(cell)).then_some(cell)
    }

    fn step_cost(&self, diagonal: bool, to: Cell, congestion: &DensityMatrix) -> u64 {
        let length = if diagonal { std::f64::consts::SQRT_2 } else { 1.0 };
        // Density is only meaningful on the matrix's own grid.
        let density = if congestion.grid() == &self.grid { congestion.density(to) } else { 0.0 };
        let cost = length * self.grid.cell_size() * (1.0 + self.congestion_weight * density);
        (cost * COST_SCALE).round() as u64
    }

    fn search(&self, from: Cell, to: Cell, congestion: &DensityMatrix) -> Option<Vec<Cell>> {
        let n = self.grid.cell_count();
        let mut dist = vec![u64::MAX; n];
        let mut prev = vec![usize::MAX; n];

        dist[self.grid.index(from)] = 0;

        // Min-heap on (cost, row-major index); the index breaks ties
        // deterministically.
        let mut heap: BinaryHeap<Reverse<(u64, usize)>> = BinaryHeap::new();
        heap.push(Reverse((0, self.grid.index(from))));

        while let Some(Reverse((cost, idx))) = heap.pop() {
            let cell = self.grid.cell_at(idx);
            if cell == to {
                return Some(self.reconstruct(&prev, idx));
            }
            // Skip stale heap entries.
            if cost > dist[idx] {
                continue;
            }

            let (r, c) = (cell.row as i64, cell.col as i64);
            for (dr, dc) in NEIGHBOURS {
                let Some(next) = self.passable(r + dr, c + dc) else {
                    continue;
                };
                let diagonal = dr != 0 && dc != 0;
                if diagonal
                    && (self.passable(r + dr, c).is_none() || self.passable(r, c + dc).is_none())
                {
                    continue;
                }
                let new_cost = cost.saturating_add(self.step_cost(diagonal, next, congestion));
                let ni = self.grid.index(next);
                if new_cost < dist[ni] {
                    dist[ni] = new_cost;
                    prev[ni] = idx;
                    heap.push(Reverse((new_cost, ni)));
                }
            }
        }
        None
    }

    fn reconstruct(&self, prev: &[usize], to: usize) -> Vec<Cell> {
        let mut cells = vec![self.grid.cell_at(to)];
        let mut cur = to;
        while prev[cur] != usize::MAX {
            cur = prev[cur];
            cells.push(self.grid.cell_at(cur));
        }
        cells.reverse();
        cells
    }
}

const NEIGHBOURS: [(i64, i64); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

impl Planner for GridPlanner {
    fn plan(
        &self,
        start:      Coordinate,
        end:        Coordinate,
        _tick:      Tick,
        congestion: &DensityMatrix,
    ) -> SpatialResult<Path> {
        let from = self.grid.cell_of(start).ok_or(SpatialError::OutOfBounds(start))?;
        let to   = self.grid.cell_of(end).ok_or(SpatialError::OutOfBounds(end))?;

        if self.is_blocked(from) || self.is_blocked(to) {
            return Err(SpatialError::Unreachable { from: start, to: end });
        }
        if start == end {
            return Ok(Path::single(start));
        }

        let cells = self
            .search(from, to, congestion)
            .ok_or(SpatialError::Unreachable { from: start, to: end })?;

        let mut waypoints = Vec::with_capacity(cells.len() + 1);
        waypoints.push(start);
        // Interior cells only: the first and last cells are represented by
        // the exact start and end points.
        if cells.len() > 2 {
            waypoints.extend(cells[1..cells.len() - 1].iter().map(|&c| self.grid.center(c)));
        }
        waypoints.push(end);
        Ok(Path::new(waypoints).unwrap_or_else(|| Path::single(end)))
    }
}
