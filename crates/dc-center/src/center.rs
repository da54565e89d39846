//! The `Center` struct and its tick loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use dc_core::{CenterConfig, DroneId, Euclidean, Metric, Tick, TickPacer, WallClockPacer};
use dc_fleet::{Drone, DroneEvent, DroneStatus, FleetStore, Order, OrderQueue};
use dc_spatial::{DensityMatrix, Planner};

use crate::{matcher, CenterObserver, CenterResult, RunSummary};

// ── Run results ───────────────────────────────────────────────────────────────

/// Why the loop halted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Queue empty, no drone awaiting planning or delivering.
    Quiescent,
    /// The stop flag was raised between ticks.
    Stopped,
    /// `config.max_ticks` executed ticks elapsed with work remaining.
    TickLimit,
}

/// Returned by [`Center::run_with`].
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    /// Last tick advanced to.
    pub final_tick:     Tick,
    /// Ticks on which the core step actually ran.
    pub executed_ticks: u64,
    /// Orders delivered over the whole run.
    pub delivered:      usize,
    pub outcome:        RunOutcome,
}

/// What one core step did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Orders handed to a free drone.
    pub matched:    usize,
    /// Drones that received a path.
    pub planned:    usize,
    /// Drones the planner could not route; still awaiting planning.
    pub stalled:    usize,
    pub moved:      usize,
    pub picked_up:  usize,
    pub delivered:  usize,
    /// Drones sent back to planning by a replan request.
    pub replanning: usize,
}

// ── Center ────────────────────────────────────────────────────────────────────

/// The dispatch center.
///
/// Owns the order queue and the whole fleet for the run; nothing else
/// mutates them.  Each executed tick runs, in order:
///
/// 1. [`process_orders`][Self::process_orders] — FIFO orders to nearest free
///    drones.
/// 2. [`plan_drones_path`][Self::plan_drones_path] — a path for every drone
///    awaiting planning.
/// 3. [`update_drones`][Self::update_drones] — one lifecycle step per
///    delivering drone.
/// 4. Density accumulation over the delivering drones, when enabled.
///
/// Create via [`CenterBuilder`][crate::CenterBuilder].
pub struct Center<P: Planner, M: Metric = Euclidean> {
    pub(crate) config:    CenterConfig,
    pub(crate) queue:     OrderQueue,
    pub(crate) fleet:     FleetStore,
    pub(crate) planner:   P,
    pub(crate) metric:    M,
    /// Always present so the planner can consult it; only accumulated when
    /// `config.density_matrix` is set.
    pub(crate) density:   DensityMatrix,
    pub(crate) tick:      Tick,
    pub(crate) executed:  u64,
    pub(crate) delivered: Vec<Order>,
    pub(crate) stop:      Option<Arc<AtomicBool>>,
}

impl<P: Planner, M: Metric> Center<P, M> {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &CenterConfig {
        &self.config
    }

    /// Ticks advanced so far (the iteration count).
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn executed_ticks(&self) -> u64 {
        self.executed
    }

    pub fn queue(&self) -> &OrderQueue {
        &self.queue
    }

    pub fn fleet(&self) -> &FleetStore {
        &self.fleet
    }

    pub fn planner(&self) -> &P {
        &self.planner
    }

    pub fn density(&self) -> &DensityMatrix {
        &self.density
    }

    /// Completed orders in delivery order.
    pub fn delivered(&self) -> &[Order] {
        &self.delivered
    }

    /// Queue an order that arrives while the center is running.
    pub fn push_order(&mut self, order: Order) {
        self.queue.push(order);
    }

    /// Flag a delivering drone for a fresh path; it returns to planning on
    /// its next update.
    pub fn request_replan(&mut self, drone: DroneId) -> CenterResult<()> {
        self.fleet.get_mut(drone)?.request_replan()?;
        Ok(())
    }

    // ── Predicates ────────────────────────────────────────────────────────

    /// Orders queued or any drone not free.
    pub fn has_waiting_work(&self) -> bool {
        !self.queue.is_empty()
            || self.fleet.any(DroneStatus::AwaitingPlanning)
            || self.fleet.any(DroneStatus::Delivering)
    }

    /// Queue, awaiting-planning and delivering all empty at once.
    pub fn is_quiescent(&self) -> bool {
        self.queue.is_empty()
            && !self.fleet.any(DroneStatus::AwaitingPlanning)
            && !self.fleet.any(DroneStatus::Delivering)
    }

    fn stop_requested(&self) -> bool {
        self.stop.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    // ── Core step ─────────────────────────────────────────────────────────

    /// Match queued orders to free drones until either runs out.
    ///
    /// Returns the number of assignments.  Unmatched orders stay queued in
    /// their original order.
    pub fn process_orders(&mut self) -> CenterResult<usize> {
        let mut matched = 0;
        while let Some(next) = self.queue.peek() {
            let Some(drone) = matcher::nearest_free_drone(&self.fleet, next.origin, &self.metric)
            else {
                break;
            };
            let order = self.queue.pop()?;
            tracing::debug!(tick = %self.tick, order = %order.id, %drone, "matched order");
            self.fleet.get_mut(drone)?.accept_order(order)?;
            matched += 1;
        }
        Ok(matched)
    }

    /// Ask the planner for every drone awaiting planning.
    ///
    /// Drones that receive a path move to delivering; the rest stay awaiting
    /// planning and are retried on the next executed tick.  Returns
    /// `(planned, stalled)`.
    pub fn plan_drones_path<O>(&mut self, observer: &mut O) -> CenterResult<(usize, usize)>
    where
        O: CenterObserver + ?Sized,
    {
        let (mut planned, mut stalled) = (0, 0);
        for id in self.fleet.ids_with(DroneStatus::AwaitingPlanning) {
            let drone = self.fleet.get(id)?;
            let (from, to) = (drone.location(), drone.destination());
            match self.planner.plan(from, to, self.tick, &self.density) {
                Ok(path) => {
                    self.fleet.get_mut(id)?.receive_path(path)?;
                    planned += 1;
                }
                Err(e) => {
                    tracing::warn!(tick = %self.tick, drone = %id, error = %e, "planning failed");
                    observer.on_plan_failed(self.tick, id, &e);
                    stalled += 1;
                }
            }
        }
        Ok((planned, stalled))
    }

    /// Run one lifecycle update on every delivering drone.
    ///
    /// Every drone in the pre-update delivering set is reported through
    /// [`CenterObserver::on_drone_updated`], including those whose step
    /// just ended a leg.
    pub fn update_drones<O>(&mut self, observer: &mut O) -> CenterResult<StepStats>
    where
        O: CenterObserver + ?Sized,
    {
        let mut stats = StepStats::default();
        for id in self.fleet.ids_with(DroneStatus::Delivering) {
            let event = self.fleet.get_mut(id)?.update(self.tick)?;
            observer.on_drone_updated(self.tick, self.fleet.get(id)?);
            match event {
                DroneEvent::Moved { .. } => stats.moved += 1,
                DroneEvent::Replanning => {
                    tracing::debug!(tick = %self.tick, drone = %id, "replanning");
                    stats.replanning += 1;
                }
                DroneEvent::PickedUp(order) => {
                    tracing::debug!(tick = %self.tick, drone = %id, %order, "picked up");
                    stats.picked_up += 1;
                }
                DroneEvent::Delivered(order) => {
                    tracing::debug!(tick = %self.tick, drone = %id, order = %order.id, "delivered");
                    observer.on_delivered(self.tick, id, &order);
                    self.delivered.push(order);
                    stats.delivered += 1;
                }
            }
        }
        Ok(stats)
    }

    /// Match, plan, update and accumulate density for the current tick.
    pub fn step<O>(&mut self, observer: &mut O) -> CenterResult<StepStats>
    where
        O: CenterObserver + ?Sized,
    {
        let matched = self.process_orders()?;
        let (planned, stalled) = self.plan_drones_path(observer)?;
        let stats = StepStats { matched, planned, stalled, ..self.update_drones(observer)? };

        if self.config.density_matrix {
            self.density.accumulate(self.fleet.delivering().map(Drone::location));
        }

        let counts = self.fleet.partition_counts();
        tracing::debug!(
            tick              = %self.tick,
            queued            = self.queue.len(),
            free              = counts.free,
            awaiting_planning = counts.awaiting_planning,
            delivering        = counts.delivering,
            matched,
            delivered         = stats.delivered,
            "tick complete"
        );
        Ok(stats)
    }

    /// Advance the tick counter by one and execute the core step if there
    /// is waiting work.  Returns `None` for an idle tick.
    pub fn advance<O>(&mut self, observer: &mut O) -> CenterResult<Option<StepStats>>
    where
        O: CenterObserver + ?Sized,
    {
        self.tick = self.tick.next();
        if !self.has_waiting_work() {
            return Ok(None);
        }
        observer.on_tick_start(self.tick);
        let stats = self.step(observer)?;
        self.executed += 1;
        observer.on_tick_end(self.tick, &self.fleet, &stats);
        Ok(Some(stats))
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run in real time, one tick every `config.tick_duration_ms`.
    pub fn run<O>(&mut self, observer: &mut O) -> CenterResult<RunReport>
    where
        O: CenterObserver + ?Sized,
    {
        let pacer = WallClockPacer::start(self.config.tick_duration());
        self.run_with(pacer, observer)
    }

    /// Run until quiescence, the stop flag, or `config.max_ticks`.
    ///
    /// `pacer` decides when the next tick may start; the loop calls
    /// [`TickPacer::idle`] between polls that do not advance.  The stop flag
    /// is only read at the poll point, so a tick is never cut short.
    pub fn run_with<T, O>(&mut self, mut pacer: T, observer: &mut O) -> CenterResult<RunReport>
    where
        T: TickPacer,
        O: CenterObserver + ?Sized,
    {
        tracing::info!(
            orders  = self.queue.len(),
            drones  = self.fleet.len(),
            tick_ms = self.config.tick_duration_ms,
            "dispatch center starting"
        );

        let outcome = loop {
            if self.stop_requested() {
                break RunOutcome::Stopped;
            }
            if !pacer.should_advance(self.tick) {
                pacer.idle(self.tick);
                continue;
            }

            self.advance(observer)?;

            if self.is_quiescent() {
                break RunOutcome::Quiescent;
            }
            if self.config.max_ticks.is_some_and(|max| self.executed >= max) {
                break RunOutcome::TickLimit;
            }
        };

        let report = RunReport {
            final_tick:     self.tick,
            executed_ticks: self.executed,
            delivered:      self.delivered.len(),
            outcome,
        };
        match outcome {
            RunOutcome::Quiescent => tracing::info!(
                final_tick = %report.final_tick,
                delivered  = report.delivered,
                "all orders completed"
            ),
            _ => tracing::warn!(
                ?outcome,
                final_tick = %report.final_tick,
                queued     = self.queue.len(),
                "dispatch center halted with work remaining"
            ),
        }

        observer.on_finish(&RunSummary {
            report:    &report,
            fleet:     &self.fleet,
            delivered: &self.delivered,
            density:   self.config.density_matrix.then_some(&self.density),
        });
        Ok(report)
    }
}
