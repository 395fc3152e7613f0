//! Construction, crossover, and the per-worker random number facility:
//! everything the evolutionary engine uses to produce and mutate
//! candidate solutions.

pub mod construct;
pub mod crossover;
pub mod rng;

pub use construct::{construct_from_permutation, construct_random};
pub use crossover::crossover;
