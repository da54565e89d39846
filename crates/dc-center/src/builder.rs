//! Fluent builder for constructing a [`Center`].

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use dc_core::{CenterConfig, Coordinate, Euclidean, Metric, SimRng, Tick};
use dc_fleet::{Drone, FleetStore, Order, OrderQueue, OrderStatus};
use dc_generate::{load_orders_csv, DroneGenerator, OrderGenerator};
use dc_spatial::{DensityMatrix, GridSpec, Planner};

use crate::{Center, CenterError, CenterResult};

/// Cells along the longer side of the default density grid.
pub const DEFAULT_GRID_CELLS: u32 = 32;

/// RNG stream offsets, so order and drone generation never share draws.
const ORDER_STREAM: u64 = 1;

/// Where the service operates: the warehouses drones start from and the box
/// orders are generated in.
#[derive(Clone, Debug)]
pub struct Deployment {
    pub warehouses: Vec<Coordinate>,
    pub min:        Coordinate,
    pub max:        Coordinate,
    /// Demand hotspots for biased order origins.  Empty means the centre of
    /// the box.
    pub hotspots:   Vec<Coordinate>,
}

/// Fluent builder for [`Center<P, M>`].
///
/// # Required inputs
///
/// - [`CenterConfig`] — tick length, collaborator flags, bounds, …
/// - `P: Planner` — e.g. [`dc_spatial::StraightLinePlanner`] or
///   [`dc_spatial::GridPlanner`]
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                        |
/// |-------------------|------------------------------------------------|
/// | `.metric(m)`      | [`Euclidean`]                                  |
/// | `.drones(v)`      | no drones                                      |
/// | `.orders(v)`      | empty queue                                    |
/// | `.grid(g)`        | covers every drone and order point             |
/// | `.stop_flag(f)`   | none; the run ends by quiescence or tick limit |
///
/// # Example
///
/// ```rust,ignore
/// let mut center = CenterBuilder::new(config, GridPlanner::new(grid.clone()))
///     .grid(grid)
///     .drones(drones)
///     .orders(orders)
///     .build()?;
/// center.run(&mut NoopObserver)?;
/// ```
pub struct CenterBuilder<P: Planner, M: Metric = Euclidean> {
    config:  CenterConfig,
    planner: P,
    metric:  M,
    drones:  Vec<Drone>,
    orders:  Vec<Order>,
    grid:    Option<GridSpec>,
    stop:    Option<Arc<AtomicBool>>,
}

impl<P: Planner> CenterBuilder<P> {
    /// Create a builder with all required inputs.
    pub fn new(config: CenterConfig, planner: P) -> Self {
        Self {
            config,
            planner,
            metric: Euclidean,
            drones: Vec::new(),
            orders: Vec::new(),
            grid:   None,
            stop:   None,
        }
    }

    /// Validate `config` and populate the fleet and queue the way it asks:
    /// `drone_count` drones spread over the warehouses, then either the
    /// persisted orders at `local_orders_path` or `order_count` generated
    /// ones.
    ///
    /// Missing or malformed persisted data fails here, before any run state
    /// exists.
    pub fn from_config(config: CenterConfig, deployment: &Deployment, planner: P) -> CenterResult<Self> {
        config.validate()?;

        let drones = DroneGenerator::new(deployment.warehouses.clone())?.generate(config.drone_count);

        let orders = if config.use_local_orders {
            load_orders_csv(&config.local_orders_path)?
        } else {
            let mut rng = SimRng::new(config.seed);
            OrderGenerator::new(deployment.min, deployment.max, rng.child(ORDER_STREAM))?
                .with_hotspots(deployment.hotspots.clone())
                .generate(config.order_count, config.biased_orders, Tick::ZERO)
        };

        Ok(Self::new(config, planner).drones(drones).orders(orders))
    }
}

impl<P: Planner, M: Metric> CenterBuilder<P, M> {
    /// Distance used by the matcher.
    pub fn metric<M2: Metric>(self, metric: M2) -> CenterBuilder<P, M2> {
        CenterBuilder {
            config:  self.config,
            planner: self.planner,
            metric,
            drones:  self.drones,
            orders:  self.orders,
            grid:    self.grid,
            stop:    self.stop,
        }
    }

    /// The fleet.  Drone `n` must carry `DroneId(n)`.
    pub fn drones(mut self, drones: Vec<Drone>) -> Self {
        self.drones = drones;
        self
    }

    /// Initial queue contents, in FIFO order.
    pub fn orders(mut self, orders: Vec<Order>) -> Self {
        self.orders = orders;
        self
    }

    /// Grid for the density matrix.  Pass the planner's own grid so a
    /// congestion-aware planner sees the accumulated density.
    pub fn grid(mut self, grid: GridSpec) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Halt the run at the next poll once `flag` is set.
    pub fn stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop = Some(flag);
        self
    }

    /// Validate inputs and return a ready-to-run [`Center`].
    pub fn build(self) -> CenterResult<Center<P, M>> {
        let fleet = FleetStore::new(self.drones)?;

        if !self.orders.is_empty() && fleet.is_empty() {
            return Err(CenterError::Config(format!(
                "{} orders queued but the fleet is empty",
                self.orders.len()
            )));
        }
        if let Some(order) = self.orders.iter().find(|o| o.status() != OrderStatus::Waiting) {
            return Err(CenterError::Config(format!(
                "order {} is {}, only waiting orders can be queued",
                order.id,
                order.status()
            )));
        }

        let grid = match self.grid {
            Some(grid) => grid,
            None => default_grid(&fleet, &self.orders)?,
        };

        Ok(Center {
            config:    self.config,
            queue:     self.orders.into_iter().collect::<OrderQueue>(),
            fleet,
            planner:   self.planner,
            metric:    self.metric,
            density:   DensityMatrix::new(grid),
            tick:      Tick::ZERO,
            executed:  0,
            delivered: Vec::new(),
            stop:      self.stop,
        })
    }
}

/// A grid around every warehouse, order origin and order destination.
fn default_grid(fleet: &FleetStore, orders: &[Order]) -> CenterResult<GridSpec> {
    let points: Vec<Coordinate> = fleet
        .iter()
        .map(Drone::location)
        .chain(orders.iter().flat_map(|o| [o.origin, o.destination]))
        .collect();
    let grid = if points.is_empty() {
        GridSpec::new(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0), 1.0)?
    } else {
        GridSpec::covering(points, DEFAULT_GRID_CELLS)?
    };
    Ok(grid)
}
