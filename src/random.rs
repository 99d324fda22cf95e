use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

const DEFAULT_SEED: u64 = 3819201;

/// A source of uniform random draws for the opponent policy.
///
/// Implementations only need [`next_unit`](RandomGenerator::next_unit); the other methods
/// are derived from it the same way a `Math.floor(random() * len)` pick would be.
pub trait RandomGenerator: Default {
    /// Returns a uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Returns a uniform integer in `[from, to)`. `to` must be greater than `from`.
    fn next_range(&mut self, from: usize, to: usize) -> usize {
        let span = to - from;
        let offset = (self.next_unit() * span as f64) as usize;
        from + offset.min(span - 1)
    }

    /// Draws once and returns `true` with the given probability.
    fn roll(&mut self, probability: f64) -> bool {
        self.next_unit() < probability
    }

    /// Returns a uniformly chosen element, or `None` for an empty slice.
    fn get_random_from_slice<'a, K>(&mut self, slice: &'a [K]) -> Option<&'a K> {
        if slice.is_empty() {
            return None;
        }
        slice.get(self.next_range(0, slice.len()))
    }
}

/// Draws from the thread-local, OS-seeded generator. Nothing is shared between calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardRandomGenerator;

impl RandomGenerator for StandardRandomGenerator {
    fn next_unit(&mut self) -> f64 {
        rand::rng().random()
    }

    fn next_range(&mut self, from: usize, to: usize) -> usize {
        rand::rng().random_range(from..to)
    }
}

/// A reproducible generator: the same seed always yields the same sequence of draws.
#[derive(Debug, Clone)]
pub struct SeededRandomGenerator {
    rng: StdRng,
}

impl Default for SeededRandomGenerator {
    fn default() -> Self {
        SeededRandomGenerator::new(DEFAULT_SEED)
    }
}

impl SeededRandomGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomGenerator for SeededRandomGenerator {
    fn next_unit(&mut self) -> f64 {
        self.rng.random()
    }

    fn next_range(&mut self, from: usize, to: usize) -> usize {
        self.rng.random_range(from..to)
    }
}

/// Replays a fixed list of unit draws, in order. Yields `0.0` once the list runs out.
///
/// Useful for steering the opponent down one particular branch.
#[derive(Debug, Default, Clone)]
pub struct ScriptedRandomGenerator {
    draws: VecDeque<f64>,
}

impl ScriptedRandomGenerator {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    /// Returns how many scripted draws have not been consumed yet.
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomGenerator for ScriptedRandomGenerator {
    fn next_unit(&mut self) -> f64 {
        self.draws.pop_front().unwrap_or(0.0)
    }
}
