//! Bounding-box rejection sampling.
//!
//! `count` points are drawn uniformly in the area's bounding box and only
//! those inside the area are kept, so the result holds *at most* `count`
//! points.  The expected yield is `count * area / bbox_area`; callers that
//! need a minimum number of candidates must check the length themselves
//! (pairing does, see [`crate::pairing`]).

use sw_core::{GeoPoint, SampleRng};

use crate::area::StudyArea;

/// Draw `count` uniform points in the bounding box of `area` and return the
/// ones strictly inside it, in draw order.
pub fn sample_points(area: &StudyArea, count: usize, rng: &mut SampleRng) -> Vec<GeoPoint> {
    let bounds = area.bounds();
    let (min, max) = (bounds.min(), bounds.max());

    let mut candidates = Vec::with_capacity(count);
    for _ in 0..count {
        let lon = uniform(rng, min.x, max.x);
        let lat = uniform(rng, min.y, max.y);
        let p = GeoPoint::new(lon, lat);
        if area.contains(p) {
            candidates.push(p);
        }
    }

    log::debug!("kept {} of {} sampled points", candidates.len(), count);
    candidates
}

/// Uniform in `[lo, hi)`; a zero-width axis collapses to `lo`.
#[inline]
fn uniform(rng: &mut SampleRng, lo: f64, hi: f64) -> f64 {
    if hi > lo { rng.gen_range(lo..hi) } else { lo }
}
