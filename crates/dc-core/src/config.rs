//! Run configuration.
//!
//! One `CenterConfig` is built at startup (defaults, optionally overlaid by a
//! JSON file in the application crate) and moved into the `Center`.  Nothing
//! reads configuration from process-wide state after that.

use std::path::PathBuf;
use std::time::Duration;

use crate::{CoreError, CoreResult};

/// Top-level dispatch-center configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CenterConfig {
    /// Wall-clock length of one tick, in milliseconds.
    pub tick_duration_ms: u64,

    /// Record one frame of delivering-drone positions per tick.
    pub plot_simulation: bool,

    /// Run the per-tick noise tracker.
    pub track_noise: bool,

    /// Accumulate the density matrix and write it out at termination.
    pub density_matrix: bool,

    /// Load orders from `local_orders_path` instead of generating them.
    pub use_local_orders: bool,

    /// Persisted orders CSV, read when `use_local_orders` is set.
    pub local_orders_path: PathBuf,

    /// Directory for frame, noise, and density artifacts.
    pub output_dir: PathBuf,

    /// Number of orders to generate when not loading persisted ones.
    pub order_count: usize,

    /// Number of drones created at startup.
    pub drone_count: usize,

    /// Master RNG seed.  The same seed always produces identical orders and fleet.
    pub seed: u64,

    /// Bias generated order origins towards demand hotspots.
    pub biased_orders: bool,

    /// Stop after this many executed ticks even if work remains.  `None`
    /// runs until quiescence.
    pub max_ticks: Option<u64>,
}

impl Default for CenterConfig {
    fn default() -> Self {
        Self {
            tick_duration_ms:  100,
            plot_simulation:   false,
            track_noise:       false,
            density_matrix:    false,
            use_local_orders:  false,
            local_orders_path: PathBuf::from("orders.csv"),
            output_dir:        PathBuf::from("output"),
            order_count:       100,
            drone_count:       10,
            seed:              42,
            biased_orders:     true,
            max_ticks:         None,
        }
    }
}

impl CenterConfig {
    /// Tick length as a `Duration`.
    #[inline]
    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_duration_ms)
    }

    /// Reject configurations that can never make progress.
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_duration_ms == 0 {
            return Err(CoreError::Config("tick_duration_ms must be positive".into()));
        }
        let has_orders = self.use_local_orders || self.order_count > 0;
        if has_orders && self.drone_count == 0 {
            return Err(CoreError::Config(
                "drone_count must be positive when orders are expected".into(),
            ));
        }
        if self.max_ticks == Some(0) {
            return Err(CoreError::Config("max_ticks must be positive when set".into()));
        }
        Ok(())
    }

    /// `true` if any optional collaborator writes to `output_dir`.
    pub fn writes_output(&self) -> bool {
        self.plot_simulation || self.track_noise || self.density_matrix
    }
}
