//! Seeded random draws
//!
//! Every stage draws from one `MazeRng`, so a maze is fully determined by
//! its configuration and seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::Span;

/// Random source threaded through the generation pipeline
///
/// Serialized as its seed; a deserialized generator restarts the stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub struct MazeRng {
    stream: ChaCha8Rng,
    seed: u64,
}

impl From<u64> for MazeRng {
    fn from(seed: u64) -> Self {
        MazeRng::new(seed)
    }
}

impl From<MazeRng> for u64 {
    fn from(rng: MazeRng) -> Self {
        rng.seed
    }
}

impl MazeRng {
    pub fn new(seed: u64) -> Self {
        Self {
            stream: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Generator with a seed taken from the OS
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Index in `0..n`; 0 when `n` is 0
    pub fn below(&mut self, n: u32) -> u32 {
        match n {
            0 => 0,
            n => self.stream.gen_range(0..n),
        }
    }

    /// Uniform draw from an inclusive span
    ///
    /// An inverted or single-value span yields its lower bound without
    /// advancing the stream.
    pub fn span(&mut self, span: Span) -> u32 {
        if span.upper <= span.lower {
            return span.lower;
        }
        span.lower + self.below(span.upper - span.lower + 1)
    }

    /// True once in `n` draws on average
    pub fn one_in(&mut self, n: u32) -> bool {
        self.below(n) == 0
    }

    /// True `chance` percent of the time
    pub fn percent(&mut self, chance: u32) -> bool {
        self.below(100) < chance
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.below(items.len() as u32) as usize)
    }

    /// Fisher-Yates shuffle in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i as u32 + 1) as usize;
            items.swap(i, j);
        }
    }
}
