//! JSON instance loader and result sink, the two collaborators the
//! search engine is wired to, kept thin and external per the system's
//! scope (the core only depends on [`crate::instance::Instance`]).

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CvrpError, CvrpResult};
use crate::instance::{Coord, Instance};
use crate::solution::Solution;

#[derive(Debug, Deserialize)]
struct DepotDto {
    x: i64,
    y: i64,
}

#[derive(Debug, Deserialize)]
struct NodeDto {
    x: i64,
    y: i64,
    demand: i64,
}

#[derive(Debug, Deserialize)]
struct InstanceDto {
    #[serde(rename = "vehicleCapacity")]
    vehicle_capacity: i64,
    depot: DepotDto,
    nodes: Vec<NodeDto>,
}

/// Loads and validates an [`Instance`] from the JSON schema described in
/// the system's external interface: `vehicleCapacity`, `depot: {x, y}`,
/// and an ordered `nodes` array where element `i` becomes client id `i+1`.
/// Any missing or negative field is a fatal [`CvrpError::InvalidInstance`].
pub fn load_instance(path: impl AsRef<Path>) -> CvrpResult<Instance> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|err| CvrpError::InvalidInstance {
        reason: format!("cannot read instance file {}: {err}", path.display()),
    })?;

    let dto: InstanceDto = serde_json::from_str(&text).map_err(|err| CvrpError::InvalidInstance {
        reason: format!("malformed instance JSON: {err}"),
    })?;

    if dto.vehicle_capacity < 0 {
        return Err(CvrpError::InvalidInstance {
            reason: format!("negative vehicleCapacity: {}", dto.vehicle_capacity),
        });
    }
    if dto.depot.x < 0 || dto.depot.y < 0 {
        return Err(CvrpError::InvalidInstance {
            reason: format!("negative depot coordinate: ({}, {})", dto.depot.x, dto.depot.y),
        });
    }

    let mut clients = Vec::with_capacity(dto.nodes.len());
    for (i, node) in dto.nodes.iter().enumerate() {
        if node.x < 0 || node.y < 0 || node.demand < 0 {
            return Err(CvrpError::InvalidInstance {
                reason: format!(
                    "node {} (client {}) has a negative field: x={}, y={}, demand={}",
                    i,
                    i + 1,
                    node.x,
                    node.y,
                    node.demand
                ),
            });
        }
        clients.push((Coord::new(node.x, node.y), node.demand as u32));
    }

    Instance::new(dto.vehicle_capacity as u32, Coord::new(dto.depot.x, dto.depot.y), clients)
}

/// Renders a [`Solution`] as one line per trip (its client ids in visit
/// order, then its covered demand) followed by a final total-cost line.
pub fn format_solution(solution: &Solution) -> String {
    let mut out = String::new();
    for trip in solution.trips() {
        let ids: Vec<String> = trip.sequence().iter().map(|id| id.to_string()).collect();
        out.push_str(&format!("{} | demand {}\n", ids.join(" "), trip.demand_covered()));
    }
    out.push_str(&format!("Total cost: {:.2}\n", solution.cost()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::atomic::{AtomicU64, Ordering};

    static NEXT_ID: AtomicU64 = AtomicU64::new(0);

    fn write_temp(contents: &str) -> std::path::PathBuf {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let mut path = std::env::temp_dir();
        path.push(format!("cvrp-instance-test-{}-{id}.json", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_a_well_formed_instance() {
        let path = write_temp(
            r#"{
                "vehicleCapacity": 10,
                "depot": {"x": 0, "y": 0},
                "nodes": [
                    {"x": 3, "y": 4, "demand": 5},
                    {"x": 1, "y": 1, "demand": 2}
                ]
            }"#,
        );
        let instance = load_instance(&path).unwrap();
        assert_eq!(instance.capacity(), 10);
        assert_eq!(instance.num_clients(), 2);
        assert_eq!(instance.client_demand(1).unwrap(), 5);
        assert_eq!(instance.client_position(2).unwrap(), Coord::new(1, 1));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn rejects_negative_capacity() {
        let path = write_temp(
            r#"{"vehicleCapacity": -1, "depot": {"x": 0, "y": 0}, "nodes": []}"#,
        );
        let err = load_instance(&path).unwrap_err();
        assert!(matches!(err, CvrpError::InvalidInstance { .. }));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn rejects_negative_node_field() {
        let path = write_temp(
            r#"{
                "vehicleCapacity": 10,
                "depot": {"x": 0, "y": 0},
                "nodes": [{"x": -1, "y": 0, "demand": 1}]
            }"#,
        );
        let err = load_instance(&path).unwrap_err();
        assert!(matches!(err, CvrpError::InvalidInstance { .. }));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn rejects_missing_field() {
        let path = write_temp(
            r#"{"vehicleCapacity": 10, "depot": {"x": 0, "y": 0}, "nodes": [{"x": 1, "y": 1}]}"#,
        );
        let err = load_instance(&path).unwrap_err();
        assert!(matches!(err, CvrpError::InvalidInstance { .. }));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn formats_one_line_per_trip_plus_total() {
        let instance = Instance::new(10, Coord::new(0, 0), vec![(Coord::new(1, 0), 4)])
            .unwrap()
            .shared();
        let mut trip = crate::trip::Trip::new(instance);
        trip.append(1).unwrap();
        trip.recompute().unwrap();
        let solution = Solution::new(vec![trip]);
        let rendered = format_solution(&solution);
        let mut lines = rendered.lines();
        assert_eq!(lines.next().unwrap(), "1 | demand 4");
        assert_eq!(lines.next().unwrap(), "Total cost: 2.00");
        assert!(lines.next().is_none());
    }
}
