//! Per-worker random number facility.
//!
//! Each OS thread gets its own [`ChaCha8Rng`], seeded once from
//! nondeterministic entropy the first time that thread touches it. Workers
//! never share a generator: `rayon`'s thread pool reuses the same OS thread
//! for a given worker across tasks, so the thread-local survives for the
//! process lifetime without any synchronization.

use std::cell::RefCell;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

thread_local! {
    static RNG: RefCell<ChaCha8Rng> = RefCell::new(ChaCha8Rng::from_entropy());
}

/// Runs `f` against this thread's generator.
fn with_rng<R>(f: impl FnOnce(&mut ChaCha8Rng) -> R) -> R {
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// An unbiased integer in `[lo, hi]`.
pub fn gen_range_inclusive(lo: u32, hi: u32) -> u32 {
    with_rng(|rng| rng.gen_range(lo..=hi))
}

/// A fair coin flip.
pub fn gen_bool() -> bool {
    with_rng(|rng| rng.gen_bool(0.5))
}

/// Shuffles `slice` in place using this thread's generator.
pub fn shuffle<T>(slice: &mut [T]) {
    with_rng(|rng| slice.shuffle(rng));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inclusive_range_stays_in_bounds() {
        for _ in 0..1000 {
            let v = gen_range_inclusive(3, 7);
            assert!((3..=7).contains(&v));
        }
    }

    #[test]
    fn single_value_range_is_degenerate() {
        for _ in 0..10 {
            assert_eq!(gen_range_inclusive(5, 5), 5);
        }
    }

    #[test]
    fn shuffle_preserves_multiset() {
        let mut v: Vec<u32> = (1..=20).collect();
        let original = v.clone();
        shuffle(&mut v);
        let mut sorted = v.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, original);
    }
}
