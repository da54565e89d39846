//! Observer trait for the optional collaborators (plotter, noise tracker,
//! density artifact) and for progress reporting.

use dc_core::{DroneId, Tick};
use dc_fleet::{Drone, FleetStore, Order};
use dc_spatial::{DensityMatrix, SpatialError};

use crate::{RunReport, StepStats};

/// End-of-run view handed to [`CenterObserver::on_finish`].
pub struct RunSummary<'a> {
    pub report:    &'a RunReport,
    pub fleet:     &'a FleetStore,
    /// Completed orders in delivery order.
    pub delivered: &'a [Order],
    /// `Some` only when density accumulation was enabled.
    pub density:   Option<&'a DensityMatrix>,
}

/// Callbacks invoked by [`Center::run_with`][crate::Center::run_with].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Observers get shared references only;
/// they can never mutate fleet or order state.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct Progress;
///
/// impl CenterObserver for Progress {
///     fn on_tick_end(&mut self, tick: Tick, fleet: &FleetStore, _stats: &StepStats) {
///         println!("{tick}: {} delivering", fleet.delivering().count());
///     }
/// }
/// ```
pub trait CenterObserver {
    /// Called before the core step of an executed tick.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// The planner could not route `drone`; it stays awaiting planning and
    /// is retried next tick.
    fn on_plan_failed(&mut self, _tick: Tick, _drone: DroneId, _error: &SpatialError) {}

    /// `drone` dropped off `order` during this tick's update pass.
    fn on_delivered(&mut self, _tick: Tick, _drone: DroneId, _order: &Order) {}

    /// `drone` was delivering at the start of this tick's update pass and
    /// has just taken its step.  Fires even when that step ended a leg and
    /// the drone has already left the delivering partition.
    fn on_drone_updated(&mut self, _tick: Tick, _drone: &Drone) {}

    /// Called after the core step of an executed tick.  `fleet.delivering()`
    /// is the set the plotter and noise tracker record.
    fn on_tick_end(&mut self, _tick: Tick, _fleet: &FleetStore, _stats: &StepStats) {}

    /// Called once when the loop halts, for whatever reason.
    fn on_finish(&mut self, _summary: &RunSummary<'_>) {}
}

/// A [`CenterObserver`] that does nothing.
pub struct NoopObserver;

impl CenterObserver for NoopObserver {}

impl<O: CenterObserver + ?Sized> CenterObserver for Box<O> {
    fn on_tick_start(&mut self, tick: Tick) {
        (**self).on_tick_start(tick);
    }

    fn on_plan_failed(&mut self, tick: Tick, drone: DroneId, error: &SpatialError) {
        (**self).on_plan_failed(tick, drone, error);
    }

    fn on_delivered(&mut self, tick: Tick, drone: DroneId, order: &Order) {
        (**self).on_delivered(tick, drone, order);
    }

    fn on_drone_updated(&mut self, tick: Tick, drone: &Drone) {
        (**self).on_drone_updated(tick, drone);
    }

    fn on_tick_end(&mut self, tick: Tick, fleet: &FleetStore, stats: &StepStats) {
        (**self).on_tick_end(tick, fleet, stats);
    }

    fn on_finish(&mut self, summary: &RunSummary<'_>) {
        (**self).on_finish(summary);
    }
}

/// Fan-out: every hook is forwarded to each observer in order.
impl<O: CenterObserver> CenterObserver for Vec<O> {
    fn on_tick_start(&mut self, tick: Tick) {
        self.iter_mut().for_each(|o| o.on_tick_start(tick));
    }

    fn on_plan_failed(&mut self, tick: Tick, drone: DroneId, error: &SpatialError) {
        self.iter_mut().for_each(|o| o.on_plan_failed(tick, drone, error));
    }

    fn on_delivered(&mut self, tick: Tick, drone: DroneId, order: &Order) {
        self.iter_mut().for_each(|o| o.on_delivered(tick, drone, order));
    }

    fn on_drone_updated(&mut self, tick: Tick, drone: &Drone) {
        self.iter_mut().for_each(|o| o.on_drone_updated(tick, drone));
    }

    fn on_tick_end(&mut self, tick: Tick, fleet: &FleetStore, stats: &StepStats) {
        self.iter_mut().for_each(|o| o.on_tick_end(tick, fleet, stats));
    }

    fn on_finish(&mut self, summary: &RunSummary<'_>) {
        self.iter_mut().for_each(|o| o.on_finish(summary));
    }
}
