//! Random sequence generation.
//!
//! Every generated sequence holds at least one value at or below [`MIN_VALUE`], so the
//! browsing screen always offers something to drill down into.

use crate::model::{MAX_NUMBER, MIN_VALUE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draw `count` values uniformly from `1..=MAX_NUMBER`.
///
/// If no drawn value is small, one uniformly chosen position is overwritten with
/// exactly [`MIN_VALUE`] after the whole sequence is built. `count` must be positive;
/// callers validate it first.
pub fn generate<R: Rng>(count: usize, rng: &mut R) -> Vec<u32> {
    let mut numbers = Vec::with_capacity(count);
    let mut has_small = false;
    while numbers.len() < count {
        let value = rng.gen_range(1..=MAX_NUMBER);
        if value <= MIN_VALUE {
            has_small = true;
        }
        numbers.push(value);
    }
    if !has_small && count > 0 {
        let idx = rng.gen_range(0..count);
        numbers[idx] = MIN_VALUE;
    }
    numbers
}

/// Build the RNG a session draws from: seeded when reproducibility was requested.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}
