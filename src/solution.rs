//! A complete solution: an ordered collection of vehicle trips covering
//! every client exactly once.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use ordered_float::OrderedFloat;

use crate::trip::Trip;

/// A candidate solution: one trip per vehicle used, in no particular
/// meaningful order beyond what crossover imposes.
#[derive(Debug, Clone)]
pub struct Solution {
    trips: Vec<Trip>,
}

impl Solution {
    pub fn new(trips: Vec<Trip>) -> Self {
        Solution { trips }
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// Mutable access to the trip list, used by the crossover operator to
    /// swap sequence fragments between two trips of the same solution.
    pub(crate) fn trips_mut(&mut self) -> &mut Vec<Trip> {
        &mut self.trips
    }

    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    /// Sum of every trip's cost.
    pub fn cost(&self) -> f64 {
        self.trips.iter().map(Trip::cost).sum()
    }

    /// True iff every client in `1..=num_clients` is covered by exactly one
    /// trip and every trip respects capacity.
    pub fn is_valid(&self, num_clients: usize) -> bool {
        let mut covered = vec![false; num_clients + 1];
        for trip in &self.trips {
            if !trip.is_valid() {
                return false;
            }
            for &id in trip.sequence() {
                let idx = id as usize;
                if idx == 0 || idx > num_clients || covered[idx] {
                    return false;
                }
                covered[idx] = true;
            }
        }
        covered.iter().skip(1).all(|&c| c)
    }

    /// Recomputes every trip's cost and demand. Each trip already owns its
    /// own instance reference, so no instance handle is needed here.
    pub fn recompute(&mut self) {
        for trip in &mut self.trips {
            trip.recompute().expect("solution trips reference only valid client ids");
        }
    }

    /// Identity key used for population deduplication: the ordered sequence
    /// of client ids in each trip, trip order included.
    fn identity(&self) -> Vec<&[u32]> {
        self.trips.iter().map(Trip::sequence).collect()
    }
}

impl PartialEq for Solution {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Solution {}

impl Hash for Solution {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for seq in self.identity() {
            seq.hash(state);
        }
    }
}

impl PartialOrd for Solution {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Solution {
    /// Ordered by cost; ties broken by trip-sequence identity so equal-cost
    /// solutions still have a total order inside a `BTreeSet`.
    fn cmp(&self, other: &Self) -> Ordering {
        OrderedFloat(self.cost())
            .cmp(&OrderedFloat(other.cost()))
            .then_with(|| self.identity().cmp(&other.identity()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::instance::Coord;
    use crate::instance::Instance;

    fn two_client_instance() -> Arc<Instance> {
        Instance::new(
            10,
            Coord::new(0, 0),
            vec![(Coord::new(1, 0), 3), (Coord::new(2, 0), 3)],
        )
        .unwrap()
        .shared()
    }

    fn trip_with(instance: &Arc<Instance>, ids: &[u32]) -> Trip {
        let mut trip = Trip::new(Arc::clone(instance));
        for &id in ids {
            trip.append(id).unwrap();
        }
        trip.recompute().unwrap();
        trip
    }

    #[test]
    fn valid_solution_covers_every_client_once() {
        let instance = two_client_instance();
        let solution = Solution::new(vec![trip_with(&instance, &[1, 2])]);
        assert!(solution.is_valid(2));
    }

    #[test]
    fn missing_client_is_invalid() {
        let instance = two_client_instance();
        let solution = Solution::new(vec![trip_with(&instance, &[1])]);
        assert!(!solution.is_valid(2));
    }

    #[test]
    fn duplicate_client_across_trips_is_invalid() {
        let instance = two_client_instance();
        let solution = Solution::new(vec![
            trip_with(&instance, &[1]),
            trip_with(&instance, &[1, 2]),
        ]);
        assert!(!solution.is_valid(2));
    }

    #[test]
    fn cost_sums_trip_costs() {
        let instance = two_client_instance();
        let solution = Solution::new(vec![trip_with(&instance, &[1]), trip_with(&instance, &[2])]);
        let expected = 2.0 * 1.0 + 2.0 * 2.0; // depot round trips to (1,0) and (2,0)
        assert!((solution.cost() - expected).abs() < 1e-9);
    }

    #[test]
    fn identity_distinguishes_trip_order() {
        let instance = two_client_instance();
        let a = Solution::new(vec![trip_with(&instance, &[1]), trip_with(&instance, &[2])]);
        let b = Solution::new(vec![trip_with(&instance, &[2]), trip_with(&instance, &[1])]);
        assert_ne!(a, b);
    }
}
