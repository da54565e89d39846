//! The three collaborator observers.
//!
//! Observer hooks have no return value, so each observer keeps the first
//! write error it hits.  Check [`take_error`][FrameRecorder::take_error]
//! after `center.run()` returns.

use std::path::{Path, PathBuf};

use dc_center::{CenterObserver, RunSummary, StepStats};
use dc_core::Tick;
use dc_fleet::{Drone, FleetStore, Leg};
use dc_spatial::{GridSpec, NoiseTracker};

use crate::artifact::{self, NOISE_EXPOSURE_FILE, NOISE_TIMELINE_FILE};
use crate::row::{FrameRow, NoiseRow, TickSummaryRow};
use crate::writer::FrameWriter;
use crate::{OutputError, OutputResult};

fn keep_first(slot: &mut Option<OutputError>, result: OutputResult<()>) {
    if let Err(e) = result {
        if slot.is_none() {
            *slot = Some(e);
        }
    }
}

// ── FrameRecorder ─────────────────────────────────────────────────────────────

/// The plotter: records every delivering drone's position once per executed
/// tick, plus a per-tick partition summary, to any [`FrameWriter`].
pub struct FrameRecorder<W: FrameWriter> {
    writer:     W,
    frames:     u64,
    last_error: Option<OutputError>,
}

impl<W: FrameWriter> FrameRecorder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, frames: 0, last_error: None }
    }

    /// Frames recorded so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Take the stored write error (if any).
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: FrameWriter> CenterObserver for FrameRecorder<W> {
    fn on_tick_end(&mut self, tick: Tick, fleet: &FleetStore, stats: &StepStats) {
        let rows: Vec<FrameRow> = fleet
            .delivering()
            .map(|d| FrameRow {
                tick:     tick.0,
                drone_id: d.id().0,
                lat:      d.location().lat,
                lon:      d.location().lon,
                order_id: d.order().map(|o| o.id.0),
                leg:      d.leg().map(|leg| match leg {
                    Leg::Pickup  => "pickup",
                    Leg::Dropoff => "dropoff",
                }),
            })
            .collect();
        let result = self.writer.write_frame(&rows);
        keep_first(&mut self.last_error, result);

        let counts = fleet.partition_counts();
        let summary = TickSummaryRow {
            tick:              tick.0,
            free:              counts.free as u32,
            awaiting_planning: counts.awaiting_planning as u32,
            delivering:        counts.delivering as u32,
            matched:           stats.matched as u32,
            delivered:         stats.delivered as u32,
        };
        let result = self.writer.write_tick_summary(&summary);
        keep_first(&mut self.last_error, result);
        self.frames += 1;
    }

    fn on_finish(&mut self, _summary: &RunSummary<'_>) {
        let result = self.writer.finish();
        keep_first(&mut self.last_error, result);
    }
}

// ── NoiseObserver ─────────────────────────────────────────────────────────────

/// Cell radius a drone is audible over by default.
pub const DEFAULT_NOISE_RADIUS: u32 = 2;

/// Feeds every drone that flew during an executed tick to a [`NoiseTracker`]
/// and writes the timeline and cumulative exposure when the run ends.
pub struct NoiseObserver {
    tracker:    NoiseTracker,
    dir:        PathBuf,
    rows:       Vec<NoiseRow>,
    last_error: Option<OutputError>,
}

impl NoiseObserver {
    /// Default-strength tracker over `grid`, writing into `dir`.
    pub fn new(grid: GridSpec, dir: &Path) -> Self {
        let tracker = NoiseTracker::new(grid, NoiseTracker::DEFAULT_SOURCE_DB, DEFAULT_NOISE_RADIUS);
        Self::with_tracker(tracker, dir)
    }

    pub fn with_tracker(tracker: NoiseTracker, dir: &Path) -> Self {
        Self { tracker, dir: dir.to_path_buf(), rows: Vec::new(), last_error: None }
    }

    pub fn tracker(&self) -> &NoiseTracker {
        &self.tracker
    }

    /// Timeline rows recorded so far.
    pub fn rows(&self) -> &[NoiseRow] {
        &self.rows
    }

    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    fn persist(&self) -> OutputResult<()> {
        artifact::write_noise_csv(&self.dir.join(NOISE_TIMELINE_FILE), &self.rows)?;
        artifact::write_exposure_csv(&self.dir.join(NOISE_EXPOSURE_FILE), &self.tracker)?;
        tracing::info!(ticks = self.rows.len(), dir = %self.dir.display(), "noise timeline written");
        Ok(())
    }
}

impl CenterObserver for NoiseObserver {
    fn on_drone_updated(&mut self, _tick: Tick, drone: &Drone) {
        self.tracker.track_noise(drone.location());
    }

    fn on_tick_end(&mut self, tick: Tick, _fleet: &FleetStore, _stats: &StepStats) {
        let sample = self.tracker.advance_tick();
        self.rows.push(NoiseRow::from_sample(tick, &sample));
    }

    fn on_finish(&mut self, _summary: &RunSummary<'_>) {
        let result = self.persist();
        keep_first(&mut self.last_error, result);
    }
}

// ── DensityArtifactWriter ─────────────────────────────────────────────────────

/// Renders the center's density matrix to `density_matrix_T<tick>.csv` when
/// the run ends.  Does nothing if density accumulation was disabled.
pub struct DensityArtifactWriter {
    dir:        PathBuf,
    written:    Option<PathBuf>,
    last_error: Option<OutputError>,
}

impl DensityArtifactWriter {
    pub fn new(dir: &Path) -> Self {
        Self { dir: dir.to_path_buf(), written: None, last_error: None }
    }

    /// Path of the artifact, once written.
    pub fn written(&self) -> Option<&Path> {
        self.written.as_deref()
    }

    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }
}

impl CenterObserver for DensityArtifactWriter {
    fn on_finish(&mut self, summary: &RunSummary<'_>) {
        let Some(matrix) = summary.density else {
            tracing::debug!("density accumulation disabled; no matrix written");
            return;
        };
        let path = self.dir.join(artifact::density_file_name(summary.report.final_tick));
        match artifact::write_density_csv(&path, matrix) {
            Ok(()) => {
                tracing::info!(
                    path  = %path.display(),
                    ticks = matrix.ticks(),
                    peak  = ?matrix.peak(),
                    "density matrix written"
                );
                self.written = Some(path);
            }
            Err(e) => keep_first(&mut self.last_error, Err(e)),
        }
    }
}
