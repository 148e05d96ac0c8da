//! Polylines in a metric coordinate system.

use crate::{MetricsError, MetricsResult};

/// A 3D polyline `[x, y, z]`, typically UTM metres plus elevation.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    coords: Vec<[f64; 3]>,
}

impl Line {
    /// Fails with [`MetricsError::ShortLine`] for fewer than two points.
    pub fn new(coords: Vec<[f64; 3]>) -> MetricsResult<Self> {
        if coords.len() < 2 {
            return Err(MetricsError::ShortLine(coords.len()));
        }
        Ok(Self { coords })
    }

    pub fn coords(&self) -> &[[f64; 3]] {
        &self.coords
    }

    pub fn segment_count(&self) -> usize {
        self.coords.len() - 1
    }

    /// Sum of the 3D Euclidean segment lengths.
    pub fn length(&self) -> f64 {
        self.coords
            .windows(2)
            .map(|w| {
                let (dx, dy, dz) = delta(w[0], w[1]);
                (dx * dx + dy * dy + dz * dz).sqrt()
            })
            .sum()
    }

    /// Sum of the segment lengths in the `x`/`y` plane.
    pub fn horizontal_length(&self) -> f64 {
        self.coords
            .windows(2)
            .map(|w| {
                let (dx, dy, _) = delta(w[0], w[1]);
                dx.hypot(dy)
            })
            .sum()
    }

    /// `Δz / horizontal distance` per segment.
    ///
    /// A vertical (or repeated) point gives `f64::INFINITY` rather than a
    /// division error; the sign of `Δz` is not carried in that case.
    pub fn segment_slopes(&self) -> Vec<f64> {
        self.coords
            .windows(2)
            .map(|w| {
                let (dx, dy, dz) = delta(w[0], w[1]);
                let run = dx.hypot(dy);
                if run == 0.0 { f64::INFINITY } else { dz / run }
            })
            .collect()
    }

    /// Shift every point by `(dx, dy, dz)`.
    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        for p in &mut self.coords {
            p[0] += dx;
            p[1] += dy;
            p[2] += dz;
        }
    }
}

#[inline]
fn delta(a: [f64; 3], b: [f64; 3]) -> (f64, f64, f64) {
    (b[0] - a[0], b[1] - a[1], b[2] - a[2])
}
