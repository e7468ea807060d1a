//! Seeded randomness for playouts.
//!
//! A [`Player`](crate::search::Player) owns one root stream and splits off a
//! fresh stream per decision. Two players built with the same seed make the
//! same random choices turn for turn.
//!
//! ```
//! use rust_ggp::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! let (mut turn_a, mut turn_b) = (a.fork(), b.fork());
//!
//! assert_eq!(turn_a.gen_range_usize(0..100), turn_b.gen_range_usize(0..100));
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Odd multiplier (the 64-bit golden ratio) spreading child seeds apart.
const SPLIT: u64 = 0x9E37_79B9_7F4A_7C15;

/// ChaCha8 stream that remembers its seed and how often it was split.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    /// Split off the next child stream.
    ///
    /// The n-th child of a given seed is always the same stream, and the
    /// parent's own sequence is left untouched.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed.wrapping_add(self.forks.wrapping_mul(SPLIT)))
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `range`. The range must be non-empty.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Uniform element of `items`, or `None` when it is empty.
    #[must_use]
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }
}
