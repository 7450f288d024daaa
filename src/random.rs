//! Uniform selection primitives
//!
//! Both operations take the RNG explicitly so callers (and tests) decide
//! where randomness comes from: `rand::rng()` in production, a seeded
//! `StdRng` in tests.

use rand::seq::SliceRandom;
use rand::Rng;

/// One uniformly-random element, or `None` for an empty slice.
///
/// The engine never passes an empty slice; an empty pool here means the
/// catalog tables are misconfigured.
pub fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let index = rng.random_range(0..items.len());
    Some(&items[index])
}

/// A new vec with all elements in a uniformly random permutation.
/// The input is left untouched.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(rng: &mut R, items: &[T]) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled
}
