//! WGS84 → UTM projection.
//!
//! The zone is picked from the data; the transform itself is delegated to
//! `proj4rs` (`+proj=longlat` → `+proj=utm`), which works in radians on the
//! geographic side.

use proj4rs::Proj;
use proj4rs::transform::transform;

use crate::MetricsResult;

const WGS84: &str = "+proj=longlat +ellps=WGS84 +datum=WGS84 +no_defs";

/// A UTM zone, e.g. 32N (EPSG:32632).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UtmZone {
    /// `1..=60`
    pub number: u8,
    pub north:  bool,
}

impl UtmZone {
    /// Standard 6° zone containing `(lon, lat)`.  Norway/Svalbard exceptions
    /// are not applied.
    pub fn for_point(lon: f64, lat: f64) -> Self {
        let idx = ((lon + 180.0) / 6.0).floor() as i64;
        let number = (idx.rem_euclid(60) + 1) as u8;
        Self { number, north: lat >= 0.0 }
    }

    pub fn central_meridian(&self) -> f64 {
        f64::from(self.number) * 6.0 - 183.0
    }

    pub fn epsg(&self) -> u32 {
        let base = if self.north { 32_600 } else { 32_700 };
        base + u32::from(self.number)
    }

    /// PROJ definition of the zone's CRS.
    pub fn proj_string(&self) -> String {
        let south = if self.north { "" } else { " +south" };
        format!("+proj=utm +zone={}{south} +datum=WGS84 +units=m +no_defs", self.number)
    }

    pub fn projector(&self) -> MetricsResult<UtmProjector> {
        UtmProjector::new(*self)
    }
}

/// A ready-to-use WGS84 → UTM transform for one zone.
pub struct UtmProjector {
    zone: UtmZone,
    src:  Proj,
    dst:  Proj,
}

impl UtmProjector {
    pub fn new(zone: UtmZone) -> MetricsResult<Self> {
        Ok(Self {
            zone,
            src: Proj::from_proj_string(WGS84)?,
            dst: Proj::from_proj_string(&zone.proj_string())?,
        })
    }

    pub fn zone(&self) -> UtmZone {
        self.zone
    }

    /// Project `(lon, lat)` in degrees to `(easting, northing)` in metres.
    pub fn project(&self, lon: f64, lat: f64) -> MetricsResult<(f64, f64)> {
        let mut point = (lon.to_radians(), lat.to_radians(), 0.0);
        transform(&self.src, &self.dst, &mut point)?;
        Ok((point.0, point.1))
    }
}
