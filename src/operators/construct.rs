//! Randomized greedy first-fit construction: the operator that seeds the
//! initial population.

use std::sync::Arc;

use crate::error::CvrpResult;
use crate::instance::Instance;
use crate::operators::rng;
use crate::solution::Solution;
use crate::trip::Trip;

/// Builds a feasible [`Solution`] from a freshly shuffled permutation of
/// every client id in `instance`.
pub fn construct_random(instance: &Arc<Instance>) -> CvrpResult<Solution> {
    let mut genome: Vec<u32> = instance.client_ids().collect();
    rng::shuffle(&mut genome);
    construct_from_permutation(instance, &genome)
}

/// Builds a feasible [`Solution`] from an explicit visit order: scans
/// existing trips in order and drops each id into the first one that can
/// accommodate it, opening a new trip when none can. Every trip is
/// recomputed (demand + local reorder) once all ids are placed.
pub fn construct_from_permutation(instance: &Arc<Instance>, genome: &[u32]) -> CvrpResult<Solution> {
    let mut trips: Vec<Trip> = vec![Trip::new(Arc::clone(instance))];

    for &id in genome {
        let mut placed = false;
        for trip in trips.iter_mut() {
            if trip.can_accommodate(id)? {
                trip.append(id)?;
                placed = true;
                break;
            }
        }
        if !placed {
            let mut trip = Trip::new(Arc::clone(instance));
            trip.append(id)?;
            trips.push(trip);
        }
    }

    for trip in trips.iter_mut() {
        trip.recompute()?;
    }

    Ok(Solution::new(trips))
}
