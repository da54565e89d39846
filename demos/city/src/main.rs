//! city — a small delivery fleet over a synthetic 20 × 20 km city.
//!
//! Usage: `city [config.json]`.  The optional JSON file overrides any
//! `CenterConfig` field; missing fields keep the demo's settings (all
//! outputs on, 20 ms ticks, `output/city`, at most 20 000 ticks).  Set `RUST_LOG`
//! (e.g. `RUST_LOG=dc_center=debug`) for per-tick logging.

use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dc_center::{CenterBuilder, Deployment};
use dc_core::{CenterConfig, Coordinate};
use dc_fleet::DroneStatus;
use dc_generate::save_orders_csv;
use dc_output::OutputSet;
use dc_spatial::{GridPlanner, GridSpec};

// ── Constants ─────────────────────────────────────────────────────────────────

/// City bounding box, kilometres.
const CITY_MIN: Coordinate = Coordinate::new(0.0, 0.0);
const CITY_MAX: Coordinate = Coordinate::new(20.0, 20.0);
const CELL_KM:  f64        = 0.5;

/// Cost multiplier on cells that have been busy.
const CONGESTION_WEIGHT: f64 = 4.0;

const WAREHOUSES: [Coordinate; 3] = [
    Coordinate::new(3.0, 4.0),
    Coordinate::new(16.0, 6.0),
    Coordinate::new(9.0, 17.0),
];

/// Downtown and the university district.
const HOTSPOTS: [Coordinate; 2] = [
    Coordinate::new(10.0, 10.0),
    Coordinate::new(14.0, 15.0),
];

// ── Configuration ─────────────────────────────────────────────────────────────

/// The demo's own settings; a config file is layered on top of these.
fn demo_config() -> CenterConfig {
    CenterConfig {
        tick_duration_ms: 20,
        plot_simulation:  true,
        track_noise:      true,
        density_matrix:   true,
        output_dir:       "output/city".into(),
        max_ticks:        Some(20_000),
        ..CenterConfig::default()
    }
}

/// Replace only the fields present in the JSON object `text`.
fn overlay(base: CenterConfig, text: &str) -> Result<CenterConfig> {
    let mut merged = serde_json::to_value(base)?;
    let patch: serde_json::Value = serde_json::from_str(text)?;
    let (Some(fields), Some(overrides)) = (merged.as_object_mut(), patch.as_object()) else {
        bail!("config file must hold a JSON object");
    };
    for (key, value) in overrides {
        fields.insert(key.clone(), value.clone());
    }
    Ok(serde_json::from_value(merged)?)
}

fn load_config() -> Result<CenterConfig> {
    let mut config = demo_config();
    if let Some(path) = std::env::args().nth(1) {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config file {path}"))?;
        config = overlay(config, &text).with_context(|| format!("parsing config file {path}"))?;
    }
    config.validate()?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config()?;
    println!("=== city — drone dispatch center ===");
    println!(
        "Drones: {}  |  Orders: {}  |  Tick: {} ms  |  Seed: {}",
        config.drone_count,
        if config.use_local_orders {
            format!("from {}", config.local_orders_path.display())
        } else {
            config.order_count.to_string()
        },
        config.tick_duration_ms,
        config.seed,
    );
    println!();

    // 1. Planning grid; the density matrix shares it so the planner sees
    //    congestion.
    let grid = GridSpec::new(CITY_MIN, CITY_MAX, CELL_KM)?;
    let planner = GridPlanner::new(grid.clone()).with_congestion_weight(CONGESTION_WEIGHT);

    // 2. Fleet and orders.
    let deployment = Deployment {
        warehouses: WAREHOUSES.to_vec(),
        min:        CITY_MIN,
        max:        CITY_MAX,
        hotspots:   HOTSPOTS.to_vec(),
    };
    let mut center = CenterBuilder::from_config(config.clone(), &deployment, planner)?
        .grid(grid)
        .build()?;

    // 3. Persist generated orders so the run can be replayed with
    //    `use_local_orders`.
    let mut outputs = OutputSet::from_config(&config, center.density().grid())?;
    if !config.use_local_orders {
        std::fs::create_dir_all(&config.output_dir)?;
        let orders: Vec<_> = center.queue().iter().cloned().collect();
        let path = config.output_dir.join("orders.csv");
        save_orders_csv(&path, &orders)?;
        tracing::info!(count = orders.len(), path = %path.display(), "orders persisted");
    }

    // 4. Run in real time.
    let t0 = Instant::now();
    let report = center.run(&mut outputs)?;
    let elapsed = t0.elapsed();

    for e in outputs.take_errors() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    println!("Run finished in {:.3} s ({:?})", elapsed.as_secs_f64(), report.outcome);
    println!("  ticks advanced : {}", report.final_tick.0);
    println!("  ticks executed : {}", report.executed_ticks);
    println!("  orders delivered: {}", report.delivered);
    if let Some(lead) = mean_lead_time(center.delivered()) {
        println!("  mean lead time : {lead:.1} ticks");
    }
    if let Some(path) = outputs.density.as_ref().and_then(|d| d.written()) {
        println!("  density matrix : {}", path.display());
    }
    print_artifact(&config.output_dir, "noise_timeline.csv");
    println!();

    // 6. Per-drone table.
    println!("{:<8} {:<18} {:<10} {:<20} {:<20}", "Drone", "Status", "Delivered", "Home", "Location");
    println!("{}", "-".repeat(79));
    for drone in center.fleet().iter() {
        println!(
            "{:<8} {:<18} {:<10} {:<20} {:<20}",
            drone.id().0,
            drone.status().as_str(),
            drone.delivered_count(),
            drone.warehouse().to_string(),
            drone.location().to_string(),
        );
    }
    let stranded = center.fleet().count(DroneStatus::AwaitingPlanning);
    if stranded > 0 {
        println!("{stranded} drone(s) still waiting for a path");
    }

    Ok(())
}

fn mean_lead_time(delivered: &[dc_fleet::Order]) -> Option<f64> {
    let times: Vec<u64> = delivered.iter().filter_map(|o| o.lead_time()).collect();
    (!times.is_empty()).then(|| times.iter().sum::<u64>() as f64 / times.len() as f64)
}

fn print_artifact(dir: &Path, name: &str) {
    let path = dir.join(name);
    if path.exists() {
        println!("  {name:<15}: {}", path.display());
    }
}
