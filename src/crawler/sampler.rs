//! Random sampling of harvested records

use crate::crawler::Record;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};

/// Picks a uniformly random subset of records
///
/// The random source is injected; [`Sampler::new`] seeds one from the OS so
/// repeated runs return different selections.
pub struct Sampler {
    rng: Box<dyn RngCore + Send>,
}

impl Sampler {
    /// Creates a sampler seeded from operating system entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Creates a sampler with a fixed seed, for reproducible selections
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: impl RngCore + Send + 'static) -> Self {
        Self { rng: Box::new(rng) }
    }

    /// Shuffles `records` and keeps at most `count` of them
    pub fn sample(&mut self, mut records: Vec<Record>, count: usize) -> Vec<Record> {
        records.shuffle(&mut *self.rng);
        records.truncate(count);
        records
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}
