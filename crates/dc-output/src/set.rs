//! `OutputSet` — the collaborators a `CenterConfig` asks for, as one observer.

use std::path::Path;

use dc_center::{CenterObserver, RunSummary, StepStats};
use dc_core::{CenterConfig, DroneId, Tick};
use dc_fleet::{Drone, FleetStore, Order};
use dc_spatial::{GridSpec, SpatialError};

use crate::{DensityArtifactWriter, FrameRecorder, FrameWriter, NoiseObserver};
use crate::{OutputError, OutputResult};

/// Whichever of the plotter, noise tracker and density artifact writer the
/// configuration enables.  Disabled collaborators are simply absent.
pub struct OutputSet {
    pub frames:  Option<FrameRecorder<Box<dyn FrameWriter>>>,
    pub noise:   Option<NoiseObserver>,
    pub density: Option<DensityArtifactWriter>,
}

impl OutputSet {
    /// No collaborators.
    pub fn empty() -> Self {
        Self { frames: None, noise: None, density: None }
    }

    /// Build the enabled collaborators, creating `config.output_dir` if any
    /// of them writes.  `grid` should be the center's density grid so noise
    /// cells line up with density cells.
    pub fn from_config(config: &CenterConfig, grid: &GridSpec) -> OutputResult<Self> {
        let dir = config.output_dir.as_path();
        if config.writes_output() {
            std::fs::create_dir_all(dir)?;
        }

        let frames = if config.plot_simulation {
            Some(FrameRecorder::new(frame_writer(dir)?))
        } else {
            None
        };
        let noise = config.track_noise.then(|| NoiseObserver::new(grid.clone(), dir));
        let density = config.density_matrix.then(|| DensityArtifactWriter::new(dir));

        Ok(Self { frames, noise, density })
    }

    /// Drain the first error of every collaborator.
    pub fn take_errors(&mut self) -> Vec<OutputError> {
        let mut errors = Vec::new();
        if let Some(e) = self.frames.as_mut().and_then(FrameRecorder::take_error) {
            errors.push(e);
        }
        if let Some(e) = self.noise.as_mut().and_then(NoiseObserver::take_error) {
            errors.push(e);
        }
        if let Some(e) = self.density.as_mut().and_then(DensityArtifactWriter::take_error) {
            errors.push(e);
        }
        errors
    }

    fn each(&mut self, mut f: impl FnMut(&mut dyn CenterObserver)) {
        if let Some(o) = self.frames.as_mut() {
            f(o);
        }
        if let Some(o) = self.noise.as_mut() {
            f(o);
        }
        if let Some(o) = self.density.as_mut() {
            f(o);
        }
    }
}

#[cfg(not(feature = "sqlite"))]
fn frame_writer(dir: &Path) -> OutputResult<Box<dyn FrameWriter>> {
    Ok(Box::new(crate::CsvFrameWriter::new(dir)?))
}

#[cfg(feature = "sqlite")]
fn frame_writer(dir: &Path) -> OutputResult<Box<dyn FrameWriter>> {
    Ok(Box::new(crate::SqliteFrameWriter::new(dir)?))
}

impl CenterObserver for OutputSet {
    fn on_tick_start(&mut self, tick: Tick) {
        self.each(|o| o.on_tick_start(tick));
    }

    fn on_plan_failed(&mut self, tick: Tick, drone: DroneId, error: &SpatialError) {
        self.each(|o| o.on_plan_failed(tick, drone, error));
    }

    fn on_delivered(&mut self, tick: Tick, drone: DroneId, order: &Order) {
        self.each(|o| o.on_delivered(tick, drone, order));
    }

    fn on_drone_updated(&mut self, tick: Tick, drone: &Drone) {
        self.each(|o| o.on_drone_updated(tick, drone));
    }

    fn on_tick_end(&mut self, tick: Tick, fleet: &FleetStore, stats: &StepStats) {
        self.each(|o| o.on_tick_end(tick, fleet, stats));
    }

    fn on_finish(&mut self, summary: &RunSummary<'_>) {
        self.each(|o| o.on_finish(summary));
    }
}
