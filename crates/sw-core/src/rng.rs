//! Seedable RNG for point sampling and pair selection.
//!
//! A run with `seed` set in its configuration draws the same points and the
//! same pairs every time; without a seed the RNG is seeded from OS entropy
//! and the chosen seed is logged so the run can still be reproduced.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Sampling RNG wrapping a `SmallRng`.
///
/// Used only in single-threaded contexts; the pipeline never shares it.
pub struct SampleRng {
    rng:  SmallRng,
    seed: u64,
}

impl SampleRng {
    pub fn new(seed: u64) -> Self {
        SampleRng { rng: SmallRng::seed_from_u64(seed), seed }
    }

    /// Seed from `seed` if given, otherwise draw a fresh seed from OS entropy.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(seed),
            None => {
                let seed: u64 = rand::thread_rng().r#gen();
                log::info!("no sampling seed configured; using seed {seed}");
                Self::new(seed)
            }
        }
    }

    /// The seed this RNG was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.rng
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.rng.gen_range(range)
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.rng);
    }
}
