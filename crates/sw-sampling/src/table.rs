//! OD table rows and their CSV persistence.
//!
//! # CSV format
//!
//! ```csv
//! id,lon,lat,lon2,lat2,distance_km
//! 0,8.6521,49.4012,8.7043,49.3987,3.79
//! ```
//!
//! `lon`/`lat` is the origin, `lon2`/`lat2` the destination.

use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use sw_core::{GeoPoint, PairId};

use crate::SamplingResult;

// ── Rows ──────────────────────────────────────────────────────────────────────

/// One origin–destination pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OdPair {
    pub id:   PairId,
    pub lon:  f64,
    pub lat:  f64,
    pub lon2: f64,
    pub lat2: f64,
}

impl OdPair {
    pub fn new(id: PairId, origin: GeoPoint, destination: GeoPoint) -> Self {
        Self {
            id,
            lon:  origin.lon,
            lat:  origin.lat,
            lon2: destination.lon,
            lat2: destination.lat,
        }
    }

    #[inline]
    pub fn origin(&self) -> GeoPoint {
        GeoPoint::new(self.lon, self.lat)
    }

    #[inline]
    pub fn destination(&self) -> GeoPoint {
        GeoPoint::new(self.lon2, self.lat2)
    }
}

/// An [`OdPair`] with its haversine distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OdDistance {
    pub id:          PairId,
    pub lon:         f64,
    pub lat:         f64,
    pub lon2:        f64,
    pub lat2:        f64,
    pub distance_km: f64,
}

impl OdDistance {
    pub fn pair(&self) -> OdPair {
        OdPair {
            id:   self.id,
            lon:  self.lon,
            lat:  self.lat,
            lon2: self.lon2,
            lat2: self.lat2,
        }
    }
}

/// Attach the haversine distance to every pair.
pub fn with_distances(pairs: &[OdPair]) -> Vec<OdDistance> {
    pairs
        .iter()
        .map(|p| OdDistance {
            id:          p.id,
            lon:         p.lon,
            lat:         p.lat,
            lon2:        p.lon2,
            lat2:        p.lat2,
            distance_km: p.origin().distance_km(p.destination()),
        })
        .collect()
}

// ── CSV I/O ───────────────────────────────────────────────────────────────────

/// Write any serializable rows (pairs or pairs with distances) as CSV.
pub fn write_rows<W: Write, T: Serialize>(writer: W, rows: &[T]) -> SamplingResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the OD table to `path`, replacing any existing file.
pub fn write_od_csv(path: &Path, rows: &[OdDistance]) -> SamplingResult<()> {
    let file = std::fs::File::create(path)?;
    write_rows(file, rows)
}

/// Read an OD table written by [`write_od_csv`].
pub fn read_od_csv(path: &Path) -> SamplingResult<Vec<OdDistance>> {
    let file = std::fs::File::open(path)?;
    read_od_reader(file)
}

/// Like [`read_od_csv`] but accepts any `Read` source.
pub fn read_od_reader<R: Read>(reader: R) -> SamplingResult<Vec<OdDistance>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let rows = csv_reader.deserialize::<OdDistance>().collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}
