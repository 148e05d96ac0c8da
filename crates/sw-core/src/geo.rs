//! Geographic coordinate type and great-circle distance.
//!
//! `GeoPoint` stores WGS-84 longitude/latitude as `f64`, in that order, to
//! match GeoJSON positions and the routing API's coordinate convention.

use serde::{Deserialize, Serialize};

/// Earth radius used by [`haversine_km`], in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6367.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Haversine great-circle distance to `other` in kilometres.
    #[inline]
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        haversine_km(self.lon, self.lat, other.lon, other.lat)
    }

    /// `[lon, lat]`, the position layout expected by the routing API.
    #[inline]
    pub fn to_lon_lat(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lon, self.lat)
    }
}

/// Haversine great-circle distance between two lon/lat positions, in
/// kilometres.
///
/// Uses `2 * asin(sqrt(a))` for the central angle.  `a` is clamped to
/// `[0, 1]` so rounding can never push `sqrt`/`asin` outside their domain;
/// the result is therefore always finite and non-negative for finite input.
pub fn haversine_km(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let lon1 = lon1.to_radians();
    let lat1 = lat1.to_radians();
    let lon2 = lon2.to_radians();
    let lat2 = lat2.to_radians();

    let d_lon = lon2 - lon1;
    let d_lat = lat2 - lat1;

    let a = (d_lat * 0.5).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();
    EARTH_RADIUS_KM * c
}
