//! Error kinds surfaced by the core solver.
//!
//! The engine never surfaces offspring-level failures: infeasible offspring
//! are silently dropped during the generation loop. These three variants are
//! the only ways the public API can fail.

use thiserror::Error;

/// Errors raised by instance construction, instance queries, and engine
/// startup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CvrpError {
    /// A queried client id was not in `1..=N`.
    #[error("unknown client id: {id}")]
    UnknownClient { id: u32 },

    /// The input schema was violated, or capacity/demand was non-positive.
    #[error("invalid instance: {reason}")]
    InvalidInstance { reason: String },

    /// The population was empty after initialization; the engine refuses
    /// to iterate.
    #[error("population is empty after initialization")]
    DegeneratePopulation,
}

pub type CvrpResult<T> = Result<T, CvrpError>;
