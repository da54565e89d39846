//! Unit tests for dc-generate.

use std::io::Cursor;

use dc_core::{Coordinate, DroneId, OrderId, SimRng, Tick};
use dc_fleet::{DroneStatus, OrderStatus};

use crate::{
    load_orders_csv, load_orders_reader, save_orders_csv, save_orders_writer, DroneGenerator,
    GenerationError, OrderGenerator,
};

fn c(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon)
}

// ── DroneGenerator ────────────────────────────────────────────────────────────

#[cfg(test)]
mod drone_tests {
    use super::*;

    #[test]
    fn requires_a_warehouse() {
        assert!(matches!(DroneGenerator::new(vec![]), Err(GenerationError::NoWarehouses)));
    }

    #[test]
    fn rejects_non_finite_warehouse() {
        assert!(DroneGenerator::new(vec![c(f64::NAN, 0.0)]).is_err());
    }

    #[test]
    fn round_robin_over_warehouses() {
        let mut g = DroneGenerator::new(vec![c(0.0, 0.0), c(9.0, 9.0)]).unwrap();
        let drones = g.generate(3);
        assert_eq!(drones.len(), 3);
        assert_eq!(drones[0].location(), c(0.0, 0.0));
        assert_eq!(drones[1].location(), c(9.0, 9.0));
        assert_eq!(drones[2].location(), c(0.0, 0.0));
        assert!(drones.iter().all(|d| d.status() == DroneStatus::Free));
    }

    #[test]
    fn ids_dense_across_calls() {
        let mut g = DroneGenerator::new(vec![c(0.0, 0.0)]).unwrap();
        let first = g.generate(2);
        let second = g.generate(2);
        let ids: Vec<DroneId> = first.iter().chain(&second).map(|d| d.id()).collect();
        assert_eq!(ids, [DroneId(0), DroneId(1), DroneId(2), DroneId(3)]);
    }
}

// ── OrderGenerator ────────────────────────────────────────────────────────────

#[cfg(test)]
mod order_tests {
    use super::*;

    fn generator(seed: u64) -> OrderGenerator {
        OrderGenerator::new(c(0.0, 0.0), c(10.0, 10.0), SimRng::new(seed)).unwrap()
    }

    #[test]
    fn rejects_inverted_bounds() {
        let r = OrderGenerator::new(c(5.0, 5.0), c(0.0, 0.0), SimRng::new(0));
        assert!(matches!(r, Err(GenerationError::InvalidBounds(_))));
    }

    #[test]
    fn orders_inside_bounds_and_waiting() {
        let orders = generator(1).generate(200, false, Tick(0));
        assert_eq!(orders.len(), 200);
        for o in &orders {
            assert_eq!(o.status(), OrderStatus::Waiting);
            assert_eq!(o.created, Tick(0));
            for p in [o.origin, o.destination] {
                assert!((0.0..=10.0).contains(&p.lat) && (0.0..=10.0).contains(&p.lon), "{p}");
            }
        }
    }

    #[test]
    fn same_seed_same_orders() {
        let a = generator(7).generate(20, true, Tick(0));
        let b = generator(7).generate(20, true, Tick(0));
        assert_eq!(a, b);
    }

    #[test]
    fn ids_sequential_across_calls() {
        let mut g = generator(3);
        let a = g.generate(2, false, Tick(0));
        let b = g.generate(1, false, Tick(4));
        assert_eq!(a[0].id, OrderId(0));
        assert_eq!(a[1].id, OrderId(1));
        assert_eq!(b[0].id, OrderId(2));
        assert_eq!(b[0].created, Tick(4));
    }

    #[test]
    fn bias_concentrates_origins() {
        let hotspot = c(2.0, 2.0);
        let mut g = generator(11).with_hotspots(vec![hotspot]).with_hotspot_radius(0.5);
        let orders = g.generate(500, true, Tick(0));
        let near = orders
            .iter()
            .filter(|o| (o.origin.lat - hotspot.lat).hypot(o.origin.lon - hotspot.lon) <= 0.5 + 1e-9)
            .count();
        // ~80 % from the hotspot plus a few uniform hits.
        assert!(near > 350, "only {near} of 500 origins near the hotspot");
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader_tests {
    use super::*;

    const CSV: &str = "\
order_id,origin_lat,origin_lon,dest_lat,dest_lon,created_tick\n\
0,1.0,0.0,5.0,5.0,0\n\
1,0.0,1.0,2.0,2.0,0\n\
";

    #[test]
    fn loads_in_file_order() {
        let orders = load_orders_reader(Cursor::new(CSV)).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, OrderId(0));
        assert_eq!(orders[0].origin, c(1.0, 0.0));
        assert_eq!(orders[0].destination, c(5.0, 5.0));
        assert_eq!(orders[1].origin, c(0.0, 1.0));
        assert!(orders.iter().all(|o| o.status() == OrderStatus::Waiting));
    }

    #[test]
    fn empty_file_with_header_is_empty() {
        let csv = "order_id,origin_lat,origin_lon,dest_lat,dest_lon,created_tick\n";
        assert!(load_orders_reader(Cursor::new(csv)).unwrap().is_empty());
    }

    #[test]
    fn malformed_row_is_parse_error() {
        let csv = "order_id,origin_lat,origin_lon,dest_lat,dest_lon,created_tick\n0,abc,0,1,1,0\n";
        assert!(matches!(load_orders_reader(Cursor::new(csv)), Err(GenerationError::Parse(_))));
    }

    #[test]
    fn missing_column_is_parse_error() {
        let csv = "order_id,origin_lat,origin_lon\n0,1,1\n";
        assert!(matches!(load_orders_reader(Cursor::new(csv)), Err(GenerationError::Parse(_))));
    }

    #[test]
    fn duplicate_id_rejected() {
        let csv = "order_id,origin_lat,origin_lon,dest_lat,dest_lon,created_tick\n\
                   3,0,0,1,1,0\n\
                   3,0,0,2,2,0\n";
        let err = load_orders_reader(Cursor::new(csv)).unwrap_err();
        assert!(err.to_string().contains("duplicate"), "{err}");
    }

    #[test]
    fn non_finite_coordinate_rejected() {
        let csv = "order_id,origin_lat,origin_lon,dest_lat,dest_lon,created_tick\n0,NaN,0,1,1,0\n";
        assert!(matches!(load_orders_reader(Cursor::new(csv)), Err(GenerationError::Parse(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_orders_csv(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, GenerationError::Io(_)));
    }

    #[test]
    fn saved_orders_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.csv");
        let orders = OrderGenerator::new(c(0.0, 0.0), c(1.0, 1.0), SimRng::new(5))
            .unwrap()
            .generate(4, false, Tick(2));
        save_orders_csv(&path, &orders).unwrap();
        assert_eq!(load_orders_csv(&path).unwrap(), orders);
    }

    #[test]
    fn save_empty_writes_nothing() {
        let mut buf = Vec::new();
        save_orders_writer(&mut buf, &[]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        // csv only writes the header with the first record.
        assert!(text.is_empty());
    }
}
