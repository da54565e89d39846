//! Plain data row types written by output backends.

use dc_core::Tick;
use dc_spatial::NoiseSample;

/// One delivering drone's position at the end of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRow {
    pub tick:     u64,
    pub drone_id: u32,
    pub lat:      f64,
    pub lon:      f64,
    /// Order being carried.  Written as an empty cell (or `NULL`) when
    /// absent.
    pub order_id: Option<u32>,
    /// `"pickup"` or `"dropoff"`.
    pub leg:      Option<&'static str>,
}

/// Fleet-level counts for one executed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:              u64,
    pub free:              u32,
    pub awaiting_planning: u32,
    pub delivering:        u32,
    pub matched:           u32,
    pub delivered:         u32,
}

/// One tick of the noise timeline, labelled with the center's tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseRow {
    pub tick:          u64,
    pub sources:       u32,
    pub exposed_cells: u32,
    pub peak_db:       f64,
    pub mean_db:       f64,
}

impl NoiseRow {
    pub fn from_sample(tick: Tick, sample: &NoiseSample) -> Self {
        Self {
            tick:          tick.0,
            sources:       sample.sources,
            exposed_cells: sample.exposed_cells,
            peak_db:       sample.peak_db,
            mean_db:       sample.mean_db,
        }
    }
}
