//! Sources of bounded random integers used to name bound parameters.

use rand::Rng;

pub trait Randomizer {
    /// Returns a value in `0..n`. Implementations return 0 when `n` is 0.
    fn int_n(&mut self, n: usize) -> usize;
}

/// Production randomizer backed by the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandomizer;

impl Randomizer for ThreadRandomizer {
    fn int_n(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        rand::rng().random_range(0..n)
    }
}

/// Deterministic randomizer for tests: yields 1, 2, 3, ... modulo `n`.
///
/// With a 26-letter alphabet the first parameter names are `cql_bcde`,
/// `cql_fghi`, `cql_jklm` and so on.
#[derive(Debug, Default, Clone)]
pub struct SequentialRandomizer {
    counter: usize,
}

impl SequentialRandomizer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Randomizer for SequentialRandomizer {
    fn int_n(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.counter = self.counter.wrapping_add(1);
        self.counter % n
    }
}
