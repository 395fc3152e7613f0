//! Immutable description of a CVRP instance: vehicle capacity, depot
//! coordinate, and per-client coordinate and demand.
//!
//! An `Instance` is validated once at construction time and is read-only
//! for the rest of the program's life; every `Trip` and `Solution` built
//! against it shares it through an `Arc`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{CvrpError, CvrpResult};

/// A 2D coordinate with non-negative integer components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coord {
    pub x: i64,
    pub y: i64,
}

impl Coord {
    pub fn new(x: i64, y: i64) -> Self {
        Coord { x, y }
    }
}

/// A single client: its position and its demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Client {
    position: Coord,
    demand: u32,
}

/// Immutable CVRP instance: capacity, depot, and the client table.
#[derive(Debug, Clone)]
pub struct Instance {
    capacity: u32,
    depot: Coord,
    // Indexed by `id - 1`; client ids are contiguous 1..=clients.len().
    clients: Vec<Client>,
}

impl Instance {
    /// Builds a new instance, validating capacity, every coordinate, and
    /// every client demand.
    ///
    /// Fails with [`CvrpError::InvalidInstance`] if `capacity` is zero, if
    /// the depot or any client coordinate is negative, or if any client's
    /// demand is zero or exceeds `capacity`.
    pub fn new(
        capacity: u32,
        depot: Coord,
        clients: Vec<(Coord, u32)>,
    ) -> CvrpResult<Self> {
        if capacity == 0 {
            return Err(CvrpError::InvalidInstance {
                reason: "vehicle capacity must be positive".to_string(),
            });
        }
        if depot.x < 0 || depot.y < 0 {
            return Err(CvrpError::InvalidInstance {
                reason: format!("negative depot coordinate: ({}, {})", depot.x, depot.y),
            });
        }

        let clients: Vec<Client> = clients
            .into_iter()
            .map(|(position, demand)| Client { position, demand })
            .collect();

        for (i, client) in clients.iter().enumerate() {
            if client.position.x < 0 || client.position.y < 0 {
                return Err(CvrpError::InvalidInstance {
                    reason: format!(
                        "client {} has a negative coordinate: ({}, {})",
                        i + 1,
                        client.position.x,
                        client.position.y
                    ),
                });
            }
            if client.demand == 0 || client.demand > capacity {
                return Err(CvrpError::InvalidInstance {
                    reason: format!(
                        "client {} has demand {} which is not satisfiable by capacity {}",
                        i + 1,
                        client.demand,
                        capacity
                    ),
                });
            }
        }

        Ok(Instance {
            capacity,
            depot,
            clients,
        })
    }

    /// Wraps this instance in an `Arc` for sharing across trips/solutions.
    pub fn shared(self) -> Arc<Instance> {
        Arc::new(self)
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn depot(&self) -> Coord {
        self.depot
    }

    pub fn num_clients(&self) -> usize {
        self.clients.len()
    }

    /// Client ids in ascending order (1..=N).
    pub fn client_ids(&self) -> impl Iterator<Item = u32> {
        1..=(self.clients.len() as u32)
    }

    fn lookup(&self, id: u32) -> CvrpResult<&Client> {
        if id == 0 || id as usize > self.clients.len() {
            return Err(CvrpError::UnknownClient { id });
        }
        Ok(&self.clients[(id - 1) as usize])
    }

    pub fn client_demand(&self, id: u32) -> CvrpResult<u32> {
        self.lookup(id).map(|c| c.demand)
    }

    pub fn client_position(&self, id: u32) -> CvrpResult<Coord> {
        self.lookup(id).map(|c| c.position)
    }

    /// Euclidean distance from the depot to client `id`.
    pub fn distance_depot(&self, id: u32) -> CvrpResult<f64> {
        let pos = self.client_position(id)?;
        Ok(euclidean(self.depot, pos))
    }

    /// Euclidean distance between two clients. Symmetric; `distance(a, a) == 0`.
    pub fn distance(&self, a: u32, b: u32) -> CvrpResult<f64> {
        let pa = self.client_position(a)?;
        let pb = self.client_position(b)?;
        Ok(euclidean(pa, pb))
    }
}

/// Euclidean distance with the intermediate squared-difference arithmetic
/// carried out in `i64` to avoid overflow for coordinates up to ±2^31.
fn euclidean(a: Coord, b: Coord) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let sq: i64 = dx * dx + dy * dy;
    (sq as f64).sqrt()
}
