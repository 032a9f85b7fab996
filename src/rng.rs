//! # Random Sources
//!
//! The `RandomNumberGenerator` struct provides a small interface over the
//! `rand` crate for the sampling operations the engine needs: uniform
//! indices, probabilities, and biased coin flips.
//!
//! ## Example
//!
//! ```rust
//! use evotour::rng::RandomNumberGenerator;
//!
//! let mut a = RandomNumberGenerator::from_seed(42);
//! let mut b = RandomNumberGenerator::from_seed(42);
//!
//! // Identically seeded generators produce identical sequences.
//! assert_eq!(a.index(10), b.index(10));
//! assert_eq!(a.probability(), b.probability());
//! ```
//!
//! ## Per-worker streams
//!
//! For parallel processing, `SeedSequence` hands out independent generators,
//! one per worker, so no generator is ever shared mutably across threads:
//!
//! ```rust
//! use evotour::rng::SeedSequence;
//!
//! let seeds = SeedSequence::new(7);
//! let mut worker_rng = seeds.stream(0);
//! let _ = worker_rng.index(100);
//! ```

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};

/// Decorrelates consecutive stream indices; odd constant from splitmix64.
const STREAM_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// A wrapper around the `rand` crate's `StdRng` that provides the sampling
/// methods used throughout the engine.
#[derive(Debug, Clone)]
pub struct RandomNumberGenerator {
    rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` with a specific seed.
    ///
    /// This is useful for reproducible runs and tests.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns a uniformly random index in `[0, bound)`.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is zero.
    pub fn index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }

    /// Returns a uniformly random index in `[low, bound)`.
    ///
    /// # Panics
    ///
    /// Panics if the range is empty, except that `low == bound` is treated
    /// as the degenerate single-value range and returns `low`.
    pub fn index_from(&mut self, low: usize, bound: usize) -> usize {
        if low == bound {
            return low;
        }
        self.rng.gen_range(low..bound)
    }

    /// Returns a uniformly random probability in `[0, 1)`.
    pub fn probability(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Returns `true` with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Hands out independent, deterministically seeded random streams.
///
/// Each worker in a parallel section receives its own stream keyed by its
/// slot index, so workers never contend on a shared generator and a fixed
/// base seed reproduces the whole run.
#[derive(Debug)]
pub struct SeedSequence {
    base: u64,
    counter: AtomicU64,
}

impl SeedSequence {
    /// Creates a sequence with the given base seed.
    pub fn new(base: u64) -> Self {
        Self {
            base,
            counter: AtomicU64::new(0),
        }
    }

    /// Creates a sequence with a base seed drawn from the system entropy.
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Returns the generator for the stream with the given index.
    ///
    /// The same `(base, index)` pair always yields the same stream.
    pub fn stream(&self, index: u64) -> RandomNumberGenerator {
        RandomNumberGenerator::from_seed(self.base.wrapping_add(index.wrapping_mul(STREAM_GAMMA)))
    }

    /// Returns the generator for the next unused stream index.
    pub fn next_stream(&self) -> RandomNumberGenerator {
        self.stream(self.counter.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_stays_in_bounds() {
        let mut rng = RandomNumberGenerator::new();
        for _ in 0..100 {
            assert!(rng.index(7) < 7);
        }
    }

    #[test]
    fn test_index_from_respects_lower_bound() {
        let mut rng = RandomNumberGenerator::new();
        for _ in 0..100 {
            let value = rng.index_from(3, 9);
            assert!((3..9).contains(&value));
        }
    }

    #[test]
    fn test_index_from_degenerate_range() {
        let mut rng = RandomNumberGenerator::new();
        assert_eq!(rng.index_from(4, 4), 4);
    }

    #[test]
    fn test_probability_is_unit_interval() {
        let mut rng = RandomNumberGenerator::new();
        for _ in 0..100 {
            let p = rng.probability();
            assert!((0.0..1.0).contains(&p));
        }
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = RandomNumberGenerator::new();
        for _ in 0..100 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
        }
    }

    #[test]
    fn test_seeded_generators_agree() {
        let mut a = RandomNumberGenerator::from_seed(1234);
        let mut b = RandomNumberGenerator::from_seed(1234);
        for _ in 0..20 {
            assert_eq!(a.index(1000), b.index(1000));
        }
    }

    #[test]
    fn test_streams_are_reproducible() {
        let seeds_a = SeedSequence::new(99);
        let seeds_b = SeedSequence::new(99);
        let mut a = seeds_a.stream(5);
        let mut b = seeds_b.stream(5);
        for _ in 0..20 {
            assert_eq!(a.index(1000), b.index(1000));
        }
    }

    #[test]
    fn test_distinct_streams_diverge() {
        let seeds = SeedSequence::new(99);
        let mut a = seeds.stream(0);
        let mut b = seeds.stream(1);
        let matches = (0..32).filter(|_| a.index(1000) == b.index(1000)).count();
        assert!(matches < 32, "streams 0 and 1 produced identical output");
    }

    #[test]
    fn test_next_stream_advances() {
        let seeds = SeedSequence::new(7);
        let mut first = seeds.next_stream();
        let mut second = seeds.next_stream();
        let mut replay = seeds.stream(0);
        // next_stream() starts at index 0 and must not repeat it.
        assert_eq!(first.index(1_000_000), replay.index(1_000_000));
        let mut replay_second = seeds.stream(1);
        assert_eq!(second.index(1_000_000), replay_second.index(1_000_000));
    }
}
