//! Random source adapters backed by the `rand` crate.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};

use crate::ports::RandomSource;

/// Draws from the thread-local generator. Used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandomSource;

impl RandomSource for ThreadRandomSource {
    fn next_index(&self, upper: usize) -> usize {
        thread_rng().gen_range(0..upper)
    }
}

/// Deterministic generator seeded once, for reproducible runs.
#[derive(Debug)]
pub struct SeededRandomSource {
    rng: Mutex<StdRng>,
}

impl SeededRandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandomSource {
    fn next_index(&self, upper: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..upper)
    }
}

/// Replays a fixed script of indices, wrapping each into `0..upper`.
///
/// Once the script is exhausted it starts over.
#[derive(Debug)]
pub struct ScriptedRandomSource {
    script: Vec<usize>,
    cursor: AtomicUsize,
}

impl ScriptedRandomSource {
    pub fn new(script: Vec<usize>) -> Self {
        Self {
            script,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Always picks the first remaining candidate.
    pub fn first() -> Self {
        Self::new(vec![0])
    }
}

impl RandomSource for ScriptedRandomSource {
    fn next_index(&self, upper: usize) -> usize {
        if self.script.is_empty() {
            return 0;
        }
        let at = self.cursor.fetch_add(1, Ordering::Relaxed) % self.script.len();
        self.script[at] % upper
    }
}
