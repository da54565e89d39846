//! `NoiseTracker` — per-tick noise exposure on the ground.
//!
//! Every delivering drone is a point source of `source_db` decibels at its
//! cell.  Neighbouring cells within `radius` steps receive the level
//! attenuated by 6 dB per doubling of distance (inverse-square law), i.e.
//! `L = source_db − 20·log10(1 + steps)`.  Levels from several drones add in
//! the energy domain, not in decibels.
//!
//! Call [`track_noise`][NoiseTracker::track_noise] once per delivering drone,
//! then [`advance_tick`][NoiseTracker::advance_tick] once per tick to close
//! the tick and append a [`NoiseSample`].

use rustc_hash::FxHashMap;

use dc_core::{Coordinate, Tick};

use crate::{Cell, GridSpec};

/// Exposure summary for one tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NoiseSample {
    pub tick:          Tick,
    /// Drones tracked during the tick.
    pub sources:       u32,
    /// Cells that received any noise.
    pub exposed_cells: u32,
    /// Loudest cell level, dB.  `0.0` when nothing was tracked.
    pub peak_db:       f64,
    /// Energy-mean level over exposed cells, dB.
    pub mean_db:       f64,
}

#[derive(Clone, Debug)]
pub struct NoiseTracker {
    grid:       GridSpec,
    source_db:  f64,
    radius:     u32,
    tick:       Tick,
    sources:    u32,
    current:    FxHashMap<Cell, f64>,
    cumulative: FxHashMap<Cell, f64>,
    timeline:   Vec<NoiseSample>,
}

impl NoiseTracker {
    /// Default source level of a small delivery drone at ground level.
    pub const DEFAULT_SOURCE_DB: f64 = 70.0;

    pub fn new(grid: GridSpec, source_db: f64, radius: u32) -> Self {
        Self {
            grid,
            source_db,
            radius,
            tick:       Tick(1),
            sources:    0,
            current:    FxHashMap::default(),
            cumulative: FxHashMap::default(),
            timeline:   Vec::new(),
        }
    }

    /// Add one drone's emission at `location` to the current tick.
    pub fn track_noise(&mut self, location: Coordinate) {
        let Some(src) = self.grid.cell_of(location) else {
            return;
        };
        self.sources += 1;
        for cell in self.grid.neighborhood(src, self.radius) {
            let level = self.source_db - 20.0 * (1.0 + src.steps_to(cell) as f64).log10();
            *self.current.entry(cell).or_insert(0.0) += db_to_energy(level);
        }
    }

    /// Close the current tick, record its sample, and start the next one.
    pub fn advance_tick(&mut self) -> NoiseSample {
        let exposed = self.current.len() as u32;
        let (peak, total) = self
            .current
            .values()
            .fold((0.0_f64, 0.0_f64), |(peak, total), &e| (peak.max(e), total + e));

        let sample = NoiseSample {
            tick:          self.tick,
            sources:       self.sources,
            exposed_cells: exposed,
            peak_db:       if exposed > 0 { energy_to_db(peak) } else { 0.0 },
            mean_db:       if exposed > 0 { energy_to_db(total / exposed as f64) } else { 0.0 },
        };

        for (cell, energy) in self.current.drain() {
            *self.cumulative.entry(cell).or_insert(0.0) += energy;
        }
        self.timeline.push(sample);
        self.sources = 0;
        self.tick = self.tick.next();
        sample
    }

    /// Tick the next sample will be labelled with.
    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn timeline(&self) -> &[NoiseSample] {
        &self.timeline
    }

    /// Total energy-summed exposure of `cell` across all closed ticks, dB.
    pub fn exposure_db(&self, cell: Cell) -> Option<f64> {
        self.cumulative.get(&cell).map(|&e| energy_to_db(e))
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }
}

#[inline]
fn db_to_energy(db: f64) -> f64 {
    10f64.powf(db / 10.0)
}

#[inline]
fn energy_to_db(energy: f64) -> f64 {
    10.0 * energy.log10()
}
