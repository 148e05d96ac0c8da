//! One persisted routing response.
//!
//! Only the parts of the directions GeoJSON the metrics need are read: the
//! first feature's coordinates and its `properties.extras`.  Everything else
//! in the document is ignored.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use sw_core::ArtifactKey;
use sw_output::RouteSummaryRow;

use crate::{Line, MetricsError, MetricsResult, UtmZone};

// ── Extra info ──────────────────────────────────────────────────────────────

/// One class of an extra-info summary: how much of the route has `value`.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
pub struct SummaryEntry {
    pub value:    f64,
    /// Metres.
    pub distance: f64,
    /// Percent of the route.
    #[serde(default)]
    pub amount:   f64,
}

/// Extra-info block for one criterion.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Extra {
    /// `(first waypoint, last waypoint, value)` runs along the geometry.
    #[serde(default)]
    pub values:  Vec<(usize, usize, f64)>,
    #[serde(default)]
    pub summary: Vec<SummaryEntry>,
}

/// Distance-weighted mean of `value`; `NaN` when the entries cover no
/// distance.
pub fn weighted_exposure(entries: &[SummaryEntry]) -> f64 {
    let total: f64 = entries.iter().map(|e| e.distance).sum();
    if total == 0.0 {
        return f64::NAN;
    }
    entries.iter().map(|e| e.value * e.distance).sum::<f64>() / total
}

// ── Wire format ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct Document {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    geometry:   Geometry,
    #[serde(default)]
    properties: Properties,
}

#[derive(Deserialize)]
struct Geometry {
    coordinates: Vec<Vec<f64>>,
}

#[derive(Default, Deserialize)]
struct Properties {
    #[serde(default)]
    extras: BTreeMap<String, Extra>,
}

// ── Route ───────────────────────────────────────────────────────────────────

/// A parsed route artifact.
#[derive(Clone, Debug)]
pub struct Route {
    pub key:         ArtifactKey,
    /// `[lon, lat, elevation]`; elevation is `0` when the response had none.
    pub coordinates: Vec<[f64; 3]>,
    pub extras:      BTreeMap<String, Extra>,
}

impl Route {
    /// Read and parse an artifact; its identifiers come from the file stem.
    pub fn load(path: &Path) -> MetricsResult<Self> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| MetricsError::Malformed(format!("no file stem in {}", path.display())))?;
        let key: ArtifactKey = stem.parse()?;
        let text = std::fs::read_to_string(path)?;
        Self::from_json(key, &text)
    }

    pub fn from_json(key: ArtifactKey, text: &str) -> MetricsResult<Self> {
        let doc: Document = serde_json::from_str(text)?;
        let feature = doc
            .features
            .into_iter()
            .next()
            .ok_or_else(|| MetricsError::Malformed(format!("{key}: no features")))?;

        let coordinates = feature
            .geometry
            .coordinates
            .iter()
            .map(|c| match c.as_slice() {
                [lon, lat] => Ok([*lon, *lat, 0.0]),
                [lon, lat, ele, ..] => Ok([*lon, *lat, *ele]),
                _ => Err(MetricsError::Malformed(format!("{key}: position with {} values", c.len()))),
            })
            .collect::<MetricsResult<Vec<_>>>()?;

        Ok(Self { key, coordinates, extras: feature.properties.extras })
    }

    /// Summary entries of `criterion`.
    pub fn summary_criterion(&self, criterion: &str) -> MetricsResult<&[SummaryEntry]> {
        self.extras
            .get(criterion)
            .map(|extra| extra.summary.as_slice())
            .ok_or_else(|| MetricsError::UnknownCriterion(criterion.to_string()))
    }

    /// Distance-weighted mean value of `criterion` over the whole route.
    pub fn exposure(&self, criterion: &str) -> MetricsResult<f64> {
        self.summary_criterion(criterion).map(weighted_exposure)
    }

    /// One row per summary entry of `criterion`, each carrying the route's
    /// exposure.
    pub fn summary_rows(&self, criterion: &str) -> MetricsResult<Vec<RouteSummaryRow>> {
        let entries = self.summary_criterion(criterion)?;
        let exposure = weighted_exposure(entries);
        let source = self.key.stem();

        Ok(entries
            .iter()
            .map(|e| RouteSummaryRow {
                source:      source.clone(),
                pair_id:     self.key.pair_id.0,
                time_of_day: self.key.time_of_day.clone(),
                preference:  self.key.preference.clone(),
                value:       e.value,
                distance:    e.distance,
                amount:      e.amount,
                exposure,
            })
            .collect())
    }

    /// UTM zone of the route's first point.
    pub fn utm_zone(&self) -> MetricsResult<UtmZone> {
        let [lon, lat, _] = self
            .coordinates
            .first()
            .copied()
            .ok_or_else(|| MetricsError::Malformed(format!("{}: empty geometry", self.key)))?;
        Ok(UtmZone::for_point(lon, lat))
    }

    /// The geometry in UTM metres, elevation kept.
    pub fn projected_line(&self) -> MetricsResult<Line> {
        let projector = self.utm_zone()?.projector()?;
        let coords = self
            .coordinates
            .iter()
            .map(|&[lon, lat, ele]| {
                let (x, y) = projector.project(lon, lat)?;
                Ok([x, y, ele])
            })
            .collect::<MetricsResult<Vec<_>>>()?;
        Line::new(coords)
    }
}
