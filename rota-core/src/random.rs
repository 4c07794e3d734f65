//! Randomness used when drawing reviewers
//!
//! The selection engine never touches a global generator; it is handed a
//! [`RandomSource`] so that tests can script the draws.

use std::collections::VecDeque;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed indices
pub trait RandomSource: Send + Sync {
    /// Return an index in `0..len`. `len` is never zero.
    fn pick_index(&self, len: usize) -> usize;
}

/// Production source backed by rand's thread-local generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Reproducible source seeded with a fixed value
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&self, len: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(0..len)
    }
}

/// Scripted source that replays a fixed sequence of indices
///
/// Each value is reduced modulo `len`. Once the script runs out every draw
/// returns 0.
#[derive(Debug, Default)]
pub struct SequenceRandom {
    script: Mutex<VecDeque<usize>>,
}

impl SequenceRandom {
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
        }
    }
}

impl RandomSource for SequenceRandom {
    fn pick_index(&self, len: usize) -> usize {
        let mut script = self.script.lock().unwrap_or_else(|e| e.into_inner());
        script.pop_front().unwrap_or(0) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_random_in_range() {
        let source = ThreadRandom;
        for _ in 0..100 {
            assert!(source.pick_index(3) < 3);
        }
        assert_eq!(source.pick_index(1), 0);
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let a = SeededRandom::new(42);
        let b = SeededRandom::new(42);
        let draws_a: Vec<_> = (0..20).map(|_| a.pick_index(7)).collect();
        let draws_b: Vec<_> = (0..20).map(|_| b.pick_index(7)).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn test_sequence_random_replays_and_wraps() {
        let source = SequenceRandom::new([1, 5]);
        assert_eq!(source.pick_index(3), 1);
        assert_eq!(source.pick_index(3), 2);
        // exhausted
        assert_eq!(source.pick_index(3), 0);
    }
}
