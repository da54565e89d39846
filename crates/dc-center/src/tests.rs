//! Integration tests for dc-center.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use dc_core::{
    CenterConfig, Coordinate, DroneId, ImmediatePacer, OrderId, Path, ScriptedPacer, Tick,
    TickPacer,
};
use dc_fleet::{Drone, DroneStatus, FleetStore, Leg, Order, OrderStatus};
use dc_spatial::{DensityMatrix, Planner, SpatialError, SpatialResult, StraightLinePlanner};

use crate::{
    nearest_free_drone, Center, CenterBuilder, CenterError, CenterObserver, Deployment,
    NoopObserver, RunOutcome, RunSummary, StepStats,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn c(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon)
}

fn order(id: u32, origin: Coordinate, destination: Coordinate) -> Order {
    Order::new(OrderId(id), origin, destination, Tick(0))
}

fn drones_at(points: &[Coordinate]) -> Vec<Drone> {
    points.iter().enumerate().map(|(i, &p)| Drone::new(DroneId(i as u32), p)).collect()
}

fn unit_planner() -> StraightLinePlanner {
    StraightLinePlanner::new(1.0).unwrap()
}

fn config() -> CenterConfig {
    CenterConfig { tick_duration_ms: 1, ..CenterConfig::default() }
}

fn center(drones: Vec<Drone>, orders: Vec<Order>) -> Center<StraightLinePlanner> {
    CenterBuilder::new(config(), unit_planner())
        .drones(drones)
        .orders(orders)
        .build()
        .unwrap()
}

/// Order A (1,0)→(5,5) and order B (0,1)→(2,2); two drones at a warehouse
/// at the origin.
fn two_drone_scenario() -> Center<StraightLinePlanner> {
    center(
        drones_at(&[c(0.0, 0.0), c(0.0, 0.0)]),
        vec![order(0, c(1.0, 0.0), c(5.0, 5.0)), order(1, c(0.0, 1.0), c(2.0, 2.0))],
    )
}

/// Fails to route anything ending at `blocked`; flies straight otherwise.
struct BlockingPlanner {
    blocked: Coordinate,
    inner:   StraightLinePlanner,
}

impl Planner for BlockingPlanner {
    fn plan(
        &self,
        start:      Coordinate,
        end:        Coordinate,
        tick:       Tick,
        congestion: &DensityMatrix,
    ) -> SpatialResult<Path> {
        if end == self.blocked {
            return Err(SpatialError::Unreachable { from: start, to: end });
        }
        self.inner.plan(start, end, tick, congestion)
    }
}

/// Records every hook and checks partition invariants at each tick end.
#[derive(Default)]
struct Recorder {
    started:      Vec<Tick>,
    ended:        Vec<Tick>,
    stats:        Vec<StepStats>,
    plan_failed:  Vec<(Tick, DroneId)>,
    delivered:    Vec<(Tick, DroneId, OrderId)>,
    updated:      Vec<(Tick, DroneId, DroneStatus)>,
    finished:     usize,
    outcome:      Option<RunOutcome>,
    quiescent:    Vec<bool>,
}

impl CenterObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.started.push(tick);
    }

    fn on_plan_failed(&mut self, tick: Tick, drone: DroneId, _error: &SpatialError) {
        self.plan_failed.push((tick, drone));
    }

    fn on_delivered(&mut self, tick: Tick, drone: DroneId, order: &Order) {
        assert_eq!(order.status(), OrderStatus::Delivered);
        self.delivered.push((tick, drone, order.id));
    }

    fn on_drone_updated(&mut self, tick: Tick, drone: &Drone) {
        self.updated.push((tick, drone.id(), drone.status()));
    }

    fn on_tick_end(&mut self, tick: Tick, fleet: &FleetStore, stats: &StepStats) {
        let counts = fleet.partition_counts();
        assert_eq!(counts.total(), fleet.len(), "partitions do not cover the fleet at {tick}");
        for drone in fleet.iter() {
            let memberships = DroneStatus::ALL
                .iter()
                .filter(|&&s| fleet.with_status(s).any(|d| d.id() == drone.id()))
                .count();
            assert_eq!(memberships, 1);
        }
        self.ended.push(tick);
        self.stats.push(*stats);
        self.quiescent.push(counts.awaiting_planning == 0 && counts.delivering == 0);
    }

    fn on_finish(&mut self, summary: &RunSummary<'_>) {
        self.finished += 1;
        self.outcome = Some(summary.report.outcome);
    }
}

/// Advances freely until `after` ticks have passed, then raises `flag` and
/// refuses to advance.
struct StopAfter {
    after: u64,
    flag:  Arc<AtomicBool>,
}

impl TickPacer for StopAfter {
    fn should_advance(&mut self, advanced: Tick) -> bool {
        if advanced.0 >= self.after {
            self.flag.store(true, Ordering::Relaxed);
            return false;
        }
        true
    }
}

// ── Matcher ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod matcher_tests {
    use super::*;
    use dc_core::Euclidean;

    fn fleet(points: &[Coordinate]) -> FleetStore {
        FleetStore::new(drones_at(points)).unwrap()
    }

    #[test]
    fn picks_nearest() {
        let f = fleet(&[c(0.0, 0.0), c(5.0, 5.0), c(2.0, 2.0)]);
        assert_eq!(nearest_free_drone(&f, c(3.0, 3.0), &Euclidean), Some(DroneId(2)));
    }

    #[test]
    fn tie_goes_to_lowest_id() {
        let f = fleet(&[c(1.0, 0.0), c(0.0, 1.0), c(-1.0, 0.0)]);
        assert_eq!(nearest_free_drone(&f, c(0.0, 0.0), &Euclidean), Some(DroneId(0)));
    }

    #[test]
    fn skips_busy_drones() {
        let mut f = fleet(&[c(0.0, 0.0), c(9.0, 9.0)]);
        f.get_mut(DroneId(0)).unwrap().accept_order(order(0, c(1.0, 1.0), c(2.0, 2.0))).unwrap();
        assert_eq!(nearest_free_drone(&f, c(0.0, 0.0), &Euclidean), Some(DroneId(1)));
    }

    #[test]
    fn none_when_no_free_drone() {
        let mut f = fleet(&[c(0.0, 0.0)]);
        f.get_mut(DroneId(0)).unwrap().accept_order(order(0, c(1.0, 1.0), c(2.0, 2.0))).unwrap();
        assert_eq!(nearest_free_drone(&f, c(0.0, 0.0), &Euclidean), None);
        assert_eq!(nearest_free_drone(&FleetStore::default(), c(0.0, 0.0), &Euclidean), None);
    }

    #[test]
    fn nan_distance_ranks_last() {
        let f = fleet(&[c(f64::NAN, 0.0), c(100.0, 100.0)]);
        assert_eq!(nearest_free_drone(&f, c(0.0, 0.0), &Euclidean), Some(DroneId(1)));
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    fn deployment() -> Deployment {
        Deployment {
            warehouses: vec![c(5.0, 5.0), c(1.0, 1.0)],
            min:        c(0.0, 0.0),
            max:        c(10.0, 10.0),
            hotspots:   vec![],
        }
    }

    #[test]
    fn rejects_orders_without_drones() {
        let r = CenterBuilder::new(config(), unit_planner())
            .orders(vec![order(0, c(0.0, 0.0), c(1.0, 1.0))])
            .build();
        assert!(matches!(r, Err(CenterError::Config(_))));
    }

    #[test]
    fn rejects_non_dense_drone_ids() {
        let r = CenterBuilder::new(config(), unit_planner())
            .drones(vec![Drone::new(DroneId(1), c(0.0, 0.0))])
            .build();
        assert!(matches!(r, Err(CenterError::Fleet(_))));
    }

    #[test]
    fn default_grid_covers_every_point() {
        let center = two_drone_scenario();
        let grid = center.density().grid();
        for p in [c(0.0, 0.0), c(1.0, 0.0), c(5.0, 5.0), c(2.0, 2.0)] {
            assert!(grid.cell_of(p).is_some(), "{p} outside the default grid");
        }
    }

    #[test]
    fn empty_center_builds() {
        let center = CenterBuilder::new(config(), unit_planner()).build().unwrap();
        assert!(center.is_quiescent());
        assert!(!center.has_waiting_work());
    }

    #[test]
    fn from_config_generates_fleet_and_orders() {
        let cfg = CenterConfig { order_count: 6, drone_count: 3, ..config() };
        let center = CenterBuilder::from_config(cfg, &deployment(), unit_planner())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(center.fleet().len(), 3);
        assert_eq!(center.queue().len(), 6);
        assert_eq!(center.fleet().get(DroneId(1)).unwrap().location(), c(1.0, 1.0));
    }

    #[test]
    fn from_config_rejects_invalid_config() {
        let cfg = CenterConfig { tick_duration_ms: 0, ..config() };
        let r = CenterBuilder::from_config(cfg, &deployment(), unit_planner());
        assert!(matches!(r, Err(CenterError::Core(_))));
    }

    #[test]
    fn from_config_loads_local_orders() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.csv");
        std::fs::write(
            &path,
            "order_id,origin_lat,origin_lon,dest_lat,dest_lon,created_tick\n\
             0,1.0,1.0,2.0,2.0,0\n\
             1,3.0,3.0,4.0,4.0,0\n",
        )
        .unwrap();
        let cfg = CenterConfig { use_local_orders: true, local_orders_path: path, ..config() };
        let center = CenterBuilder::from_config(cfg, &deployment(), unit_planner())
            .unwrap()
            .build()
            .unwrap();
        let ids: Vec<OrderId> = center.queue().iter().map(|o| o.id).collect();
        assert_eq!(ids, [OrderId(0), OrderId(1)]);
    }

    #[test]
    fn from_config_missing_local_orders_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = CenterConfig {
            use_local_orders:  true,
            local_orders_path: dir.path().join("missing.csv"),
            ..config()
        };
        let r = CenterBuilder::from_config(cfg, &deployment(), unit_planner());
        assert!(matches!(r, Err(CenterError::Generation(_))));
    }
}

// ── Core step ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod step_tests {
    use super::*;

    #[test]
    fn two_drone_scenario_first_tick() {
        let mut center = two_drone_scenario();
        let stats = center.advance(&mut NoopObserver).unwrap().unwrap();
        assert_eq!(center.tick(), Tick(1));
        assert_eq!(stats.matched, 2);
        assert_eq!(stats.planned, 2);
        // Both pickups are one waypoint away.
        assert_eq!(stats.picked_up, 2);

        let d0 = center.fleet().get(DroneId(0)).unwrap();
        let d1 = center.fleet().get(DroneId(1)).unwrap();
        // Equidistant: the first order goes to the lower id.
        assert_eq!(d0.order().map(|o| o.id), Some(OrderId(0)));
        assert_eq!(d1.order().map(|o| o.id), Some(OrderId(1)));
        assert_eq!(d0.leg(), Some(Leg::Dropoff));
        assert_eq!(d0.status(), DroneStatus::AwaitingPlanning);
        assert!(center.queue().is_empty());
    }

    #[test]
    fn no_free_drone_leaves_order_queued() {
        let mut center = center(
            drones_at(&[c(0.0, 0.0)]),
            vec![order(0, c(0.0, 5.0), c(0.0, 9.0)), order(1, c(1.0, 1.0), c(2.0, 2.0))],
        );
        assert_eq!(center.process_orders().unwrap(), 1);
        assert_eq!(center.queue().len(), 1);

        // The only drone is busy: zero assignments.
        assert_eq!(center.process_orders().unwrap(), 0);
        assert_eq!(center.queue().peek().map(|o| o.id), Some(OrderId(1)));
        assert!(!center.is_quiescent());
    }

    #[test]
    fn matching_minimality() {
        let mut center = center(
            drones_at(&[c(0.0, 0.0), c(5.0, 5.0), c(2.0, 2.0)]),
            vec![order(0, c(3.0, 3.0), c(0.0, 0.0))],
        );
        center.process_orders().unwrap();
        let assigned = center.fleet().ids_with(DroneStatus::AwaitingPlanning);
        assert_eq!(assigned, [DroneId(2)]);
    }

    #[test]
    fn planning_completeness() {
        let planner = BlockingPlanner { blocked: c(3.0, 0.0), inner: unit_planner() };
        let mut center = CenterBuilder::new(config(), planner)
            .drones(drones_at(&[c(0.0, 0.0), c(9.0, 9.0)]))
            .orders(vec![order(0, c(3.0, 0.0), c(4.0, 0.0)), order(1, c(9.0, 8.0), c(9.0, 0.0))])
            .build()
            .unwrap();
        center.process_orders().unwrap();
        let before = center.fleet().ids_with(DroneStatus::AwaitingPlanning);
        assert_eq!(before.len(), 2);

        let mut rec = Recorder::default();
        let (planned, stalled) = center.plan_drones_path(&mut rec).unwrap();
        assert_eq!((planned, stalled), (1, 1));

        for id in before {
            let status = center.fleet().get(id).unwrap().status();
            assert_ne!(status, DroneStatus::Free);
        }
        assert_eq!(center.fleet().ids_with(DroneStatus::AwaitingPlanning), [DroneId(0)]);
        assert_eq!(center.fleet().ids_with(DroneStatus::Delivering), [DroneId(1)]);
        assert_eq!(rec.plan_failed, [(Tick(0), DroneId(0))]);
    }

    #[test]
    fn idle_tick_skips_step() {
        let mut center = center(drones_at(&[c(0.0, 0.0)]), vec![]);
        let mut rec = Recorder::default();
        assert!(center.advance(&mut rec).unwrap().is_none());
        assert_eq!(center.tick(), Tick(1));
        assert_eq!(center.executed_ticks(), 0);
        assert!(rec.started.is_empty());
    }

    #[test]
    fn orders_pushed_mid_run_are_served() {
        let mut center = center(drones_at(&[c(0.0, 0.0)]), vec![]);
        center.push_order(order(4, c(0.0, 1.0), c(0.0, 2.0)));
        let report = center.run_with(ImmediatePacer, &mut NoopObserver).unwrap();
        assert_eq!(report.delivered, 1);
        assert_eq!(center.delivered()[0].id, OrderId(4));
    }
}

// ── Run loop ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn two_drone_scenario_runs_to_quiescence() {
        let mut center = two_drone_scenario();
        let mut rec = Recorder::default();
        let report = center.run_with(ImmediatePacer, &mut rec).unwrap();

        assert_eq!(report.outcome, RunOutcome::Quiescent);
        assert_eq!(report.delivered, 2);
        // B: pickup at tick 1, three drop-off steps.  A: pickup at tick 1,
        // seven drop-off steps.
        assert_eq!(rec.delivered, [
            (Tick(4), DroneId(1), OrderId(1)),
            (Tick(8), DroneId(0), OrderId(0)),
        ]);
        assert_eq!(report.final_tick, Tick(8));
        assert_eq!(report.executed_ticks, 8);
        assert_eq!(rec.started, rec.ended);
        assert_eq!(rec.ended.len(), 8);
        assert_eq!(rec.stats.iter().map(|s| s.delivered).sum::<usize>(), 2);

        assert!(center.fleet().iter().all(|d| d.status() == DroneStatus::Free));
        assert_eq!(center.fleet().get(DroneId(0)).unwrap().location(), c(5.0, 5.0));
        assert_eq!(center.fleet().get(DroneId(1)).unwrap().location(), c(2.0, 2.0));
        assert!(center.delivered().iter().all(|o| o.status() == OrderStatus::Delivered));
    }

    #[test]
    fn every_flying_drone_reported_once_per_tick() {
        let mut center = two_drone_scenario();
        let mut rec = Recorder::default();
        center.run_with(ImmediatePacer, &mut rec).unwrap();

        // 2 pickup steps at T1, then 3 drop-off steps for B and 7 for A.
        assert_eq!(rec.updated.len(), 2 + 3 + 7);
        for t in 1..=8 {
            let ids: Vec<DroneId> =
                rec.updated.iter().filter(|u| u.0 == Tick(t)).map(|u| u.1).collect();
            let expected = if t <= 4 { vec![DroneId(0), DroneId(1)] } else { vec![DroneId(0)] };
            assert_eq!(ids, expected, "tick {t}");
        }
        // Steps that end a leg are reported after the drone leaves delivering.
        assert!(rec.updated.contains(&(Tick(1), DroneId(0), DroneStatus::AwaitingPlanning)));
        assert!(rec.updated.contains(&(Tick(4), DroneId(1), DroneStatus::Free)));
        assert!(rec.updated.contains(&(Tick(8), DroneId(0), DroneStatus::Free)));
    }

    #[test]
    fn never_halts_with_work_remaining() {
        let mut center = two_drone_scenario();
        let mut rec = Recorder::default();
        center.run_with(ImmediatePacer, &mut rec).unwrap();
        let (last, earlier) = rec.quiescent.split_last().unwrap();
        assert!(*last);
        assert!(earlier.iter().all(|&q| !q));
        assert_eq!(rec.finished, 1);
        assert_eq!(rec.outcome, Some(RunOutcome::Quiescent));
    }

    #[test]
    fn lifecycle_closure() {
        let mut center = center(
            drones_at(&[c(0.0, 0.0), c(3.0, 3.0)]),
            (0..6).map(|i| order(i, c(i as f64, 0.0), c(0.0, i as f64))).collect(),
        );
        let mut rec = Recorder::default();
        center.run_with(ImmediatePacer, &mut rec).unwrap();

        let mut ids: Vec<u32> = rec.delivered.iter().map(|&(_, _, o)| o.0).collect();
        ids.sort_unstable();
        assert_eq!(ids, [0, 1, 2, 3, 4, 5]);
        let total: u32 = center.fleet().iter().map(Drone::delivered_count).sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn empty_run_halts_after_first_tick() {
        let mut center = center(drones_at(&[c(0.0, 0.0)]), vec![]);
        let report = center.run_with(ImmediatePacer, &mut NoopObserver).unwrap();
        assert_eq!(report.outcome, RunOutcome::Quiescent);
        assert_eq!(report.final_tick, Tick(1));
        assert_eq!(report.executed_ticks, 0);
    }

    #[test]
    fn pacer_idles_between_refused_polls() {
        let mut center = two_drone_scenario();
        let mut pacer = ScriptedPacer::new([false, false, true, false]);
        let report = center.run_with(&mut pacer, &mut NoopObserver).unwrap();
        assert_eq!(report.final_tick, Tick(8));
        assert_eq!(pacer.idles(), 3);
    }

    #[test]
    fn stop_flag_halts_between_ticks() {
        let flag = Arc::new(AtomicBool::new(false));
        let mut center = CenterBuilder::new(config(), unit_planner())
            .drones(drones_at(&[c(0.0, 0.0)]))
            .orders(vec![order(0, c(0.0, 0.0), c(0.0, 50.0))])
            .stop_flag(flag.clone())
            .build()
            .unwrap();
        let pacer = StopAfter { after: 3, flag };
        let report = center.run_with(pacer, &mut NoopObserver).unwrap();

        assert_eq!(report.outcome, RunOutcome::Stopped);
        assert_eq!(report.final_tick, Tick(3));
        assert_eq!(report.executed_ticks, 3);
        assert_eq!(center.fleet().get(DroneId(0)).unwrap().status(), DroneStatus::Delivering);
    }

    #[test]
    fn preset_stop_flag_runs_nothing() {
        let flag = Arc::new(AtomicBool::new(true));
        let mut center = CenterBuilder::new(config(), unit_planner())
            .drones(drones_at(&[c(0.0, 0.0)]))
            .orders(vec![order(0, c(0.0, 0.0), c(0.0, 5.0))])
            .stop_flag(flag)
            .build()
            .unwrap();
        let report = center.run_with(ImmediatePacer, &mut NoopObserver).unwrap();
        assert_eq!(report.outcome, RunOutcome::Stopped);
        assert_eq!(report.final_tick, Tick(0));
        assert_eq!(center.queue().len(), 1);
    }

    #[test]
    fn max_ticks_bounds_the_run() {
        let cfg = CenterConfig { max_ticks: Some(3), ..config() };
        let mut center = CenterBuilder::new(cfg, unit_planner())
            .drones(drones_at(&[c(0.0, 0.0)]))
            .orders(vec![order(0, c(0.0, 0.0), c(0.0, 50.0))])
            .build()
            .unwrap();
        let report = center.run_with(ImmediatePacer, &mut NoopObserver).unwrap();
        assert_eq!(report.outcome, RunOutcome::TickLimit);
        assert_eq!(report.executed_ticks, 3);
        assert_eq!(report.delivered, 0);
    }

    #[test]
    fn unroutable_drone_stalls_without_halting_others() {
        let planner = BlockingPlanner { blocked: c(0.0, 9.0), inner: unit_planner() };
        let cfg = CenterConfig { max_ticks: Some(10), ..config() };
        let mut center = CenterBuilder::new(cfg, planner)
            .drones(drones_at(&[c(0.0, 0.0), c(5.0, 5.0)]))
            .orders(vec![order(0, c(0.0, 1.0), c(0.0, 9.0)), order(1, c(5.0, 6.0), c(5.0, 7.0))])
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        let report = center.run_with(ImmediatePacer, &mut rec).unwrap();

        assert_eq!(report.outcome, RunOutcome::TickLimit);
        assert_eq!(report.delivered, 1);
        assert_eq!(center.delivered()[0].id, OrderId(1));
        let stalled = center.fleet().get(DroneId(0)).unwrap();
        assert_eq!(stalled.status(), DroneStatus::AwaitingPlanning);
        assert_eq!(stalled.leg(), Some(Leg::Dropoff));
        // Retried on every tick after pickup.
        assert_eq!(rec.plan_failed.len(), 9);
        assert!(rec.plan_failed.iter().all(|&(_, d)| d == DroneId(0)));
    }

    #[test]
    fn replan_request_still_delivers() {
        let mut center = center(drones_at(&[c(0.0, 0.0)]), vec![order(0, c(0.0, 0.0), c(0.0, 6.0))]);
        // Tick 1 picks up in place; tick 2 plans the drop-off and moves once.
        center.advance(&mut NoopObserver).unwrap();
        center.advance(&mut NoopObserver).unwrap();
        center.request_replan(DroneId(0)).unwrap();

        let stats = center.advance(&mut NoopObserver).unwrap().unwrap();
        assert_eq!(stats.replanning, 1);
        assert_eq!(center.fleet().get(DroneId(0)).unwrap().location(), c(0.0, 1.0));

        let report = center.run_with(ImmediatePacer, &mut NoopObserver).unwrap();
        assert_eq!(report.outcome, RunOutcome::Quiescent);
        assert_eq!(report.delivered, 1);
    }

    #[test]
    fn request_replan_on_free_drone_is_error() {
        let mut center = center(drones_at(&[c(0.0, 0.0)]), vec![]);
        assert!(matches!(center.request_replan(DroneId(0)), Err(CenterError::Fleet(_))));
        assert!(matches!(center.request_replan(DroneId(9)), Err(CenterError::Fleet(_))));
    }

    #[test]
    fn density_accumulates_only_when_enabled() {
        let mut off = two_drone_scenario();
        off.run_with(ImmediatePacer, &mut NoopObserver).unwrap();
        assert_eq!(off.density().ticks(), 0);

        let cfg = CenterConfig { density_matrix: true, ..config() };
        let mut on = CenterBuilder::new(cfg, unit_planner())
            .drones(drones_at(&[c(0.0, 0.0), c(0.0, 0.0)]))
            .orders(vec![order(0, c(1.0, 0.0), c(5.0, 5.0)), order(1, c(0.0, 1.0), c(2.0, 2.0))])
            .build()
            .unwrap();
        let report = on.run_with(ImmediatePacer, &mut NoopObserver).unwrap();
        assert_eq!(on.density().ticks(), report.executed_ticks);
    }

    #[test]
    fn boxed_observers_fan_out() {
        let mut center = two_drone_scenario();
        let mut observers: Vec<Box<dyn CenterObserver>> =
            vec![Box::new(Recorder::default()), Box::new(NoopObserver)];
        let report = center.run_with(ImmediatePacer, &mut observers).unwrap();
        assert_eq!(report.delivered, 2);
    }
}
