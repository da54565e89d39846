//! End-of-run artifacts: the density matrix and the noise timeline.

use std::path::Path;

use dc_core::Tick;
use dc_spatial::{DensityMatrix, NoiseTracker};

use crate::{NoiseRow, OutputResult};

pub const NOISE_TIMELINE_FILE: &str = "noise_timeline.csv";
pub const NOISE_EXPOSURE_FILE: &str = "noise_exposure.csv";

/// `density_matrix_T<tick>.csv`.
pub fn density_file_name(tick: Tick) -> String {
    format!("density_matrix_{tick}.csv")
}

/// Render `matrix` as one row per cell, row-major.
pub fn write_density_csv(path: &Path, matrix: &DensityMatrix) -> OutputResult<()> {
    let mut w = csv::Writer::from_path(path)?;
    w.write_record(["row", "col", "center_lat", "center_lon", "count", "density"])?;
    for cell in matrix.cells() {
        w.write_record(&[
            cell.cell.row.to_string(),
            cell.cell.col.to_string(),
            cell.center.lat.to_string(),
            cell.center.lon.to_string(),
            cell.count.to_string(),
            cell.density.to_string(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

pub fn write_noise_csv(path: &Path, rows: &[NoiseRow]) -> OutputResult<()> {
    let mut w = csv::Writer::from_path(path)?;
    w.write_record(["tick", "sources", "exposed_cells", "peak_db", "mean_db"])?;
    for row in rows {
        w.write_record(&[
            row.tick.to_string(),
            row.sources.to_string(),
            row.exposed_cells.to_string(),
            format!("{:.3}", row.peak_db),
            format!("{:.3}", row.mean_db),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Cumulative exposure of every cell that heard at least one drone.
pub fn write_exposure_csv(path: &Path, tracker: &NoiseTracker) -> OutputResult<()> {
    let grid = tracker.grid();
    let mut w = csv::Writer::from_path(path)?;
    w.write_record(["row", "col", "exposure_db"])?;
    for i in 0..grid.cell_count() {
        let cell = grid.cell_at(i);
        if let Some(db) = tracker.exposure_db(cell) {
            w.write_record(&[cell.row.to_string(), cell.col.to_string(), format!("{db:.3}")])?;
        }
    }
    w.flush()?;
    Ok(())
}
