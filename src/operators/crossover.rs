//! Crossover: the operator that mutates a cloned parent [`Solution`] into an
//! offspring by exchanging a suffix/prefix range between two of its trips.
//!
//! Trip index 0 never participates; subjects are drawn from `[1, T-1]`.
//! Whether this is an intentional elitism device or a quirk of the system
//! this was ported from is unclear; the behavior is preserved literally.

use crate::operators::rng;
use crate::solution::Solution;
use crate::trip::Trip;

/// Mutates `solution` in place via one crossover application.
///
/// A solution needs at least two candidate subjects to draw two *distinct*
/// indices from `[1, T-1]`, which requires `T >= 3` trips; with fewer, the
/// trip-index range collapses to zero or one elements and no distinct pair
/// exists, so the call is a no-op (trips are still left as they were, and
/// no recompute is needed since nothing changed).
pub fn crossover(solution: &mut Solution) {
    let trip_count = solution.trip_count();
    if trip_count < 3 {
        return;
    }

    let hi = (trip_count - 1) as u32;
    let a = rng::gen_range_inclusive(1, hi) as usize;
    let mut b = rng::gen_range_inclusive(1, hi) as usize;
    while b == a {
        b = rng::gen_range_inclusive(1, hi) as usize;
    }

    let size_a = solution.trips()[a].size();
    let size_b = solution.trips()[b].size();
    let m = size_a.min(size_b);

    if m >= 2 {
        let p = rng::gen_range_inclusive(1, (m - 1) as u32) as usize;
        if rng::gen_bool() {
            split_and_cascade(solution, a, b, p);
        } else {
            split_and_flip_cascade(solution, a, b, p);
        }
    }

    solution.recompute();
}

/// Borrows two distinct trips of `trips` mutably at once.
fn two_mut(trips: &mut [Trip], i: usize, j: usize) -> (&mut Trip, &mut Trip) {
    debug_assert_ne!(i, j);
    if i < j {
        let (left, right) = trips.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = trips.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}

/// Tail-swap: exchanges `trip_a[p..]` with `trip_b[p..]`.
fn split_and_cascade(solution: &mut Solution, a: usize, b: usize, p: usize) {
    let (trip_a, trip_b) = two_mut(solution.trips_mut(), a, b);
    let seq_a = trip_a.sequence_mut();
    let seq_b = trip_b.sequence_mut();
    let tail_a = seq_a.split_off(p);
    let tail_b = seq_b.split_off(p);
    seq_a.extend(tail_b);
    seq_b.extend(tail_a);
}

/// Tail-head-swap: removes `A = trip_a[p..]` and `B = trip_b[..p]`, then sets
/// `trip_a <- trip_a[..p] ++ B` and `trip_b <- trip_b[p..] ++ A`. Note the
/// asymmetry: the tail of `a` pairs with the head of `b`, not the other way
/// around. Preserved literally.
fn split_and_flip_cascade(solution: &mut Solution, a: usize, b: usize, p: usize) {
    let (trip_a, trip_b) = two_mut(solution.trips_mut(), a, b);
    let seq_a = trip_a.sequence_mut();
    let seq_b = trip_b.sequence_mut();
    let tail_a = seq_a.split_off(p);
    let head_b: Vec<u32> = seq_b.drain(..p).collect();
    seq_a.extend(head_b);
    seq_b.extend(tail_a);
}
