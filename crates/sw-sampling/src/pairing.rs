//! Turning sampled candidates into origin–destination pairs.
//!
//! Two strategies are available:
//!
//! | Strategy   | Origins                              | Destinations                      |
//! |------------|--------------------------------------|-----------------------------------|
//! | `Disjoint` | first `pairs` of a shuffled copy     | next `pairs` of the same shuffle  |
//! | `Legacy`   | last `pairs` of the first `pool`     | last `pairs` of all candidates    |
//!
//! `Disjoint` never reuses a candidate.  `Legacy` reproduces the slicing of
//! earlier runs; it depends on candidate order, and origins and destinations
//! overlap whenever there are fewer than `pool + pairs` candidates.  Both
//! reject a pair whose origin and destination coincide.

use sw_core::{GeoPoint, PairId, SampleRng};

use crate::area::StudyArea;
use crate::sampler::sample_points;
use crate::table::OdPair;
use crate::{SamplingError, SamplingResult};

/// How candidates are paired.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PairingStrategy {
    /// `pairs` disjoint pairs drawn without replacement.
    Disjoint { pairs: usize },
    /// Slice the first `pool` candidates and the tail of the list.
    Legacy { pool: usize, pairs: usize },
}

impl PairingStrategy {
    /// The historical first-200 / last-100 slicing.
    pub const LEGACY: PairingStrategy = PairingStrategy::Legacy { pool: 200, pairs: 100 };

    /// Strategy for a configured pairing mode.  `Legacy` ignores `n_pairs`.
    pub fn from_mode(mode: sw_core::PairingMode, n_pairs: usize) -> Self {
        match mode {
            sw_core::PairingMode::Disjoint => PairingStrategy::Disjoint { pairs: n_pairs },
            sw_core::PairingMode::Legacy => PairingStrategy::LEGACY,
        }
    }

    /// Minimum number of candidates this strategy needs; `None` when that
    /// number does not fit in a `usize`.
    pub fn required_candidates(self) -> Option<usize> {
        match self {
            PairingStrategy::Disjoint { pairs } => pairs.checked_mul(2),
            PairingStrategy::Legacy { pool, pairs } => Some(pool.max(pairs)),
        }
    }

    fn name(self) -> &'static str {
        match self {
            PairingStrategy::Disjoint { .. } => "disjoint",
            PairingStrategy::Legacy { .. } => "legacy",
        }
    }
}

/// Pair `candidates` according to `strategy`.  Ids are assigned `0..n`.
pub fn pair_candidates(
    candidates: &[GeoPoint],
    strategy: PairingStrategy,
    rng: &mut SampleRng,
) -> SamplingResult<Vec<OdPair>> {
    let needed = strategy
        .required_candidates()
        .ok_or(SamplingError::TooManyPairs { strategy: strategy.name() })?;
    if candidates.len() < needed {
        return Err(SamplingError::NotEnoughCandidates {
            strategy: strategy.name(),
            needed,
            got: candidates.len(),
        });
    }

    let (origins, destinations): (Vec<GeoPoint>, Vec<GeoPoint>) = match strategy {
        PairingStrategy::Disjoint { pairs } => {
            let mut shuffled = candidates.to_vec();
            rng.shuffle(&mut shuffled);
            shuffled.truncate(needed);
            let destinations = shuffled.split_off(pairs);
            (shuffled, destinations)
        }
        PairingStrategy::Legacy { pool, pairs } => {
            let origins = candidates[pool.saturating_sub(pairs)..pool].to_vec();
            let destinations = candidates[candidates.len() - pairs..].to_vec();
            (origins, destinations)
        }
    };

    origins
        .into_iter()
        .zip(destinations)
        .enumerate()
        .map(|(i, (origin, destination))| {
            let id = PairId::try_from(i).map_err(|_| SamplingError::TooManyPairs { strategy: strategy.name() })?;
            if origin == destination {
                return Err(SamplingError::DegeneratePair(id));
            }
            Ok(OdPair::new(id, origin, destination))
        })
        .collect()
}

/// Sample `count` points in `area` and pair the survivors.
pub fn generate_pairs(
    area: &StudyArea,
    count: usize,
    strategy: PairingStrategy,
    rng: &mut SampleRng,
) -> SamplingResult<Vec<OdPair>> {
    let candidates = sample_points(area, count, rng);
    log::info!(
        "{} of {} sampled points fell inside the study area",
        candidates.len(),
        count
    );
    pair_candidates(&candidates, strategy, rng)
}
