//! A single vehicle's ordered client visit sequence.
//!
//! A `Trip` is bound to an [`Instance`] for its whole life: it stores only
//! client ids and derives its cost and demand from the instance on demand
//! via [`Trip::recompute`].

use std::sync::Arc;

use crate::error::CvrpResult;
use crate::instance::Instance;

/// One vehicle's route: depot -> sequence[0] -> ... -> sequence[last] -> depot.
#[derive(Debug, Clone)]
pub struct Trip {
    instance: Arc<Instance>,
    sequence: Vec<u32>,
    demand_covered: u32,
    cost: f64,
}

impl Trip {
    /// A new trip with an empty sequence, bound to `instance`.
    pub fn new(instance: Arc<Instance>) -> Self {
        Trip {
            instance,
            sequence: Vec::new(),
            demand_covered: 0,
            cost: 0.0,
        }
    }

    pub fn sequence(&self) -> &[u32] {
        &self.sequence
    }

    pub fn demand_covered(&self) -> u32 {
        self.demand_covered
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn size(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// True iff adding `id` would not push `demand_covered` past capacity.
    pub fn can_accommodate(&self, id: u32) -> CvrpResult<bool> {
        let demand = self.instance.client_demand(id)?;
        Ok(self.demand_covered + demand <= self.instance.capacity())
    }

    /// Pushes `id` at the tail and adds its demand. Cost is not updated;
    /// call [`Trip::recompute`] once the trip is fully assembled.
    pub fn append(&mut self, id: u32) -> CvrpResult<()> {
        let demand = self.instance.client_demand(id)?;
        self.sequence.push(id);
        self.demand_covered += demand;
        Ok(())
    }

    /// Replaces the sequence wholesale, as crossover does, leaving
    /// `demand_covered`/`cost` stale until [`Trip::recompute`] runs.
    pub fn set_sequence(&mut self, sequence: Vec<u32>) {
        self.sequence = sequence;
    }

    /// Direct mutable access to the client sequence, used by the crossover
    /// operators to splice trip tails/heads in place. Callers must follow up
    /// with [`Trip::recompute`].
    pub(crate) fn sequence_mut(&mut self) -> &mut Vec<u32> {
        &mut self.sequence
    }

    /// True iff the trip's covered demand fits within capacity.
    pub fn is_valid(&self) -> bool {
        self.demand_covered <= self.instance.capacity()
    }

    /// Resynchronizes `demand_covered` from `sequence`, then reorders the
    /// sequence in place and recomputes `cost` via [`Trip::optimize_cost`].
    pub fn recompute(&mut self) -> CvrpResult<()> {
        let mut demand_covered = 0u32;
        for &id in &self.sequence {
            demand_covered += self.instance.client_demand(id)?;
        }
        self.demand_covered = demand_covered;
        self.optimize_cost()
    }

    /// Greedy in-place nearest-anchor reorder.
    ///
    /// For each position `i`, finds the remaining candidate `s[k]` (`k >= i`)
    /// closest to the "anchor" (the depot when `i == 0`, otherwise the
    /// client just placed at `i - 1`), swaps it into position `i`, and adds
    /// the chosen distance to `cost`. Ties break toward the smallest `k`.
    /// After the loop, adds the return-to-depot edge from the last client.
    /// An empty sequence costs `0.0` and has no terminal depot edge.
    pub fn optimize_cost(&mut self) -> CvrpResult<()> {
        self.cost = 0.0;
        let len = self.sequence.len();
        if len == 0 {
            return Ok(());
        }

        for i in 0..len {
            let anchor_cost = |instance: &Instance, j: usize, seq: &[u32]| -> CvrpResult<f64> {
                if i == 0 {
                    instance.distance_depot(seq[j])
                } else {
                    instance.distance(seq[i - 1], seq[j])
                }
            };

            let mut best_k = i;
            let mut best_cost = anchor_cost(&self.instance, i, &self.sequence)?;
            for k in (i + 1)..len {
                let candidate = anchor_cost(&self.instance, k, &self.sequence)?;
                if candidate < best_cost {
                    best_cost = candidate;
                    best_k = k;
                }
            }

            if best_k != i {
                self.sequence.swap(i, best_k);
            }
            self.cost += best_cost;
        }

        self.cost += self.instance.distance_depot(*self.sequence.last().unwrap())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{Coord, Instance};

    fn line_instance() -> Arc<Instance> {
        Instance::new(
            10,
            Coord::new(0, 0),
            vec![
                (Coord::new(1, 0), 4),
                (Coord::new(2, 0), 4),
                (Coord::new(3, 0), 4),
            ],
        )
        .unwrap()
        .shared()
    }

    #[test]
    fn single_client_round_trip_cost() {
        let instance = Instance::new(10, Coord::new(0, 0), vec![(Coord::new(3, 4), 5)])
            .unwrap()
            .shared();
        let mut trip = Trip::new(instance);
        trip.append(1).unwrap();
        trip.recompute().unwrap();
        assert_eq!(trip.sequence(), &[1]);
        assert!((trip.cost() - 10.0).abs() < 1e-9);
        assert_eq!(trip.demand_covered(), 5);
    }

    #[test]
    fn empty_trip_has_zero_cost() {
        let instance = line_instance();
        let mut trip = Trip::new(instance);
        trip.recompute().unwrap();
        assert_eq!(trip.cost(), 0.0);
        assert_eq!(trip.demand_covered(), 0);
    }

    #[test]
    fn reorder_picks_nearest_to_depot_first() {
        let instance = line_instance();
        let mut trip = Trip::new(instance);
        // Appended out of spatial order; optimize_cost should still walk
        // 1 -> 2 -> 3 since they're already nearest-first from the depot.
        trip.append(3).unwrap();
        trip.append(1).unwrap();
        trip.append(2).unwrap();
        trip.recompute().unwrap();
        assert_eq!(trip.sequence(), &[1, 2, 3]);
        assert!((trip.cost() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn recompute_is_idempotent() {
        let instance = line_instance();
        let mut trip = Trip::new(instance);
        trip.append(3).unwrap();
        trip.append(1).unwrap();
        trip.append(2).unwrap();
        trip.recompute().unwrap();
        let (seq, cost) = (trip.sequence().to_vec(), trip.cost());
        trip.recompute().unwrap();
        assert_eq!(trip.sequence(), seq.as_slice());
        assert_eq!(trip.cost(), cost);
    }

    #[test]
    fn capacity_check_rejects_overflow() {
        let instance = line_instance();
        let mut trip = Trip::new(instance);
        trip.append(1).unwrap(); // demand 4
        trip.append(2).unwrap(); // demand 4, covered = 8
        assert!(!trip.can_accommodate(3).unwrap()); // 8 + 4 = 12 > capacity 10
    }

    #[test]
    fn capacity_check_accepts_within_bound() {
        let instance = Instance::new(
            12,
            Coord::new(0, 0),
            vec![(Coord::new(1, 0), 4), (Coord::new(2, 0), 4), (Coord::new(3, 0), 4)],
        )
        .unwrap()
        .shared();
        let mut trip = Trip::new(instance);
        trip.append(1).unwrap();
        trip.append(2).unwrap();
        assert!(trip.can_accommodate(3).unwrap()); // 8 + 4 = 12 <= capacity 12
    }
}
