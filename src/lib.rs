//! A population-based evolutionary solver for the Capacitated Vehicle
//! Routing Problem (CVRP).
//!
//! Given a depot, a fleet of identical vehicles of capacity `Q`, and a set
//! of clients with coordinates and demands, the engine searches for a
//! collection of vehicle trips that covers every client exactly once,
//! respects capacity on every trip, and minimizes total Euclidean route
//! length.
//!
//! # Example
//!
//! ```no_run
//! use cvrp_solver::engine::{Engine, EngineConfig};
//! use cvrp_solver::io::{format_solution, load_instance};
//!
//! let instance = load_instance("instance.json").unwrap().shared();
//! let engine = Engine::new(instance, EngineConfig::default());
//! let solution = engine.run().unwrap();
//! print!("{}", format_solution(&solution));
//! ```

pub mod engine;
pub mod error;
pub mod instance;
pub mod io;
pub mod operators;
pub mod solution;
pub mod trip;

pub use error::{CvrpError, CvrpResult};
pub use instance::Instance;
pub use solution::Solution;
pub use trip::Trip;
