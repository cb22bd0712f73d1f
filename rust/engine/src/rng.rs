//! Randomness sources feeding card draws.
//!
//! The card pool never owns a generator directly; it asks a [`RandomSource`]
//! for a candidate index. Swapping the source changes how cards are picked
//! without touching pool or session logic.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Supplies candidate indices for card draws.
pub trait RandomSource: Send {
    /// Returns a value in `0..bound`. `bound` is always non-zero.
    fn next_index(&mut self, bound: usize) -> usize;
}

/// ChaCha20-backed source. Seeded instances are fully reproducible.
#[derive(Debug, Clone)]
pub struct ChaChaSource {
    rng: ChaCha20Rng,
}

impl ChaChaSource {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha20Rng::from_os_rng(),
        }
    }
}

impl RandomSource for ChaChaSource {
    fn next_index(&mut self, bound: usize) -> usize {
        self.rng.random_range(0..bound)
    }
}

/// Replays a fixed script of indices, cycling when exhausted.
///
/// ```
/// use showdown_engine::rng::{RandomSource, SequenceSource};
///
/// let mut src = SequenceSource::new(vec![3, 60]);
/// assert_eq!(src.next_index(52), 3);
/// assert_eq!(src.next_index(52), 8);
/// assert_eq!(src.next_index(52), 3);
/// ```
#[derive(Debug, Clone)]
pub struct SequenceSource {
    script: Vec<usize>,
    position: usize,
}

impl SequenceSource {
    pub fn new(script: Vec<usize>) -> Self {
        Self {
            script,
            position: 0,
        }
    }
}

impl RandomSource for SequenceSource {
    fn next_index(&mut self, bound: usize) -> usize {
        if self.script.is_empty() {
            return 0;
        }
        let v = self.script[self.position % self.script.len()];
        self.position += 1;
        v % bound
    }
}
