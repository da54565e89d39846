//! `DensityMatrix` — how often each cell has hosted a delivering drone.
//!
//! Accumulated once per tick from the delivering partition.  Planners read
//! [`density`][DensityMatrix::density] (visits per accumulated tick) as a
//! congestion signal.  An unaccumulated matrix reads zero everywhere.

use dc_core::Coordinate;

use crate::{Cell, GridSpec};

/// One rendered cell of the matrix.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DensityCell {
    pub cell:    Cell,
    pub center:  Coordinate,
    pub count:   u32,
    /// `count` divided by the number of accumulated ticks.
    pub density: f64,
}

/// Per-cell visit counts over a [`GridSpec`].
#[derive(Clone, Debug)]
pub struct DensityMatrix {
    grid:    GridSpec,
    counts:  Vec<u32>,
    ticks:   u64,
    outside: u64,
}

impl DensityMatrix {
    pub fn new(grid: GridSpec) -> Self {
        let counts = vec![0; grid.cell_count()];
        Self { grid, counts, ticks: 0, outside: 0 }
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// Record one tick's worth of drone positions.
    ///
    /// Positions outside the grid are tallied in
    /// [`outside_count`][Self::outside_count] and otherwise ignored.
    pub fn accumulate<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = Coordinate>,
    {
        for p in positions {
            match self.grid.cell_of(p) {
                Some(cell) => {
                    let i = self.grid.index(cell);
                    self.counts[i] = self.counts[i].saturating_add(1);
                }
                None => self.outside += 1,
            }
        }
        self.ticks += 1;
    }

    /// Ticks accumulated so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Positions that fell outside the grid.
    pub fn outside_count(&self) -> u64 {
        self.outside
    }

    pub fn count(&self, cell: Cell) -> u32 {
        if self.grid.contains(cell) {
            self.counts[self.grid.index(cell)]
        } else {
            0
        }
    }

    /// Average drones per tick in `cell`.
    pub fn density(&self, cell: Cell) -> f64 {
        if self.ticks == 0 {
            return 0.0;
        }
        self.count(cell) as f64 / self.ticks as f64
    }

    /// [`density`][Self::density] of the cell containing `p`; zero outside.
    pub fn density_at(&self, p: Coordinate) -> f64 {
        self.grid.cell_of(p).map_or(0.0, |cell| self.density(cell))
    }

    /// The busiest cell.  Ties resolve to the lowest row-major index.
    pub fn peak(&self) -> Option<(Cell, u32)> {
        let (i, &count) = self
            .counts
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))?;
        (count > 0).then(|| (self.grid.cell_at(i), count))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = DensityCell> + '_ {
        (0..self.counts.len()).map(move |i| {
            let cell = self.grid.cell_at(i);
            DensityCell {
                cell,
                center:  self.grid.center(cell),
                count:   self.counts[i],
                density: self.density(cell),
            }
        })
    }
}
