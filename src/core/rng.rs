//! Deterministic random number generation for secret draws.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical secret sequences
//! - **Seedable from entropy**: Sessions without a configured seed still get
//!   a recorded seed, so any game can be replayed from its snapshot
//!
//! ```
//! use simon_says::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! assert_eq!(a.gen_range_inclusive(0..=9), b.gen_range_inclusive(0..=9));
//! ```

use std::ops::RangeInclusive;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG used to draw round secrets.
///
/// Uses ChaCha8 for speed while keeping uniform, high-quality output.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from OS entropy.
    ///
    /// The drawn seed is kept and reported by [`GameRng::seed`].
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a uniformly distributed integer in an inclusive range.
    ///
    /// # Panics
    ///
    /// Panics if the range is empty. Callers validate bounds up front.
    pub fn gen_range_inclusive(&mut self, range: RangeInclusive<i32>) -> i32 {
        self.inner.gen_range(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(
                rng1.gen_range_inclusive(0..=1000),
                rng2.gen_range_inclusive(0..=1000)
            );
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_range_inclusive(0..=1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_range_inclusive(0..=1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_single_value_range() {
        let mut rng = GameRng::new(7);
        for _ in 0..20 {
            assert_eq!(rng.gen_range_inclusive(-3..=-3), -3);
        }
    }

    #[test]
    fn test_entropy_seed_is_reported() {
        let rng = GameRng::from_entropy();
        let mut replay = GameRng::new(rng.seed());
        let mut original = rng.clone();

        assert_eq!(
            original.gen_range_inclusive(0..=1_000_000),
            replay.gen_range_inclusive(0..=1_000_000)
        );
    }
}
