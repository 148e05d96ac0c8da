//! Study-area polygon and its GeoJSON loader.
//!
//! # Accepted input
//!
//! A GeoJSON `FeatureCollection`, a single `Feature`, or a bare geometry.
//! Every `Polygon` and `MultiPolygon` found (including inside
//! `GeometryCollection`s) becomes one part of the area; other geometry types
//! are ignored.  Positions are read as `[lon, lat, ...]`; extra ordinates are
//! dropped.
//!
//! # Containment policy
//!
//! [`StudyArea::contains`] is a strict "within" test: a point lying exactly
//! on an exterior or hole ring is outside.

use std::path::Path;

use geo::{BoundingRect, Contains, Coord, LineString, MultiPolygon, Point, Polygon, Rect};
use geojson::{GeoJson, Geometry, Value};

use sw_core::GeoPoint;

use crate::{SamplingError, SamplingResult};

// ── StudyArea ─────────────────────────────────────────────────────────────────

/// The polygon points are sampled in, with its cached bounding box.
#[derive(Debug, Clone)]
pub struct StudyArea {
    shape:  MultiPolygon<f64>,
    bounds: Rect<f64>,
}

impl StudyArea {
    /// Wrap a multi-polygon.  Fails if it has no bounds (no coordinates).
    pub fn new(shape: MultiPolygon<f64>) -> SamplingResult<Self> {
        let bounds = shape.bounding_rect().ok_or(SamplingError::EmptyArea)?;
        let finite = [bounds.min(), bounds.max()].iter().all(|c| c.x.is_finite() && c.y.is_finite());
        if !finite {
            return Err(SamplingError::EmptyArea);
        }
        Ok(Self { shape, bounds })
    }

    /// A rectangular area spanning `(min_lon, min_lat)`–`(max_lon, max_lat)`.
    pub fn from_bounds(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> SamplingResult<Self> {
        let rect = Rect::new(
            Coord { x: min_lon, y: min_lat },
            Coord { x: max_lon, y: max_lat },
        );
        Self::new(MultiPolygon::new(vec![rect.to_polygon()]))
    }

    /// A single-polygon area from an exterior ring of `(lon, lat)` pairs.
    pub fn from_ring(ring: Vec<(f64, f64)>) -> SamplingResult<Self> {
        Self::new(MultiPolygon::new(vec![Polygon::new(LineString::from(ring), vec![])]))
    }

    /// Axis-aligned bounding box of the whole area.
    #[inline]
    pub fn bounds(&self) -> Rect<f64> {
        self.bounds
    }

    #[inline]
    pub fn shape(&self) -> &MultiPolygon<f64> {
        &self.shape
    }

    /// `true` if `p` lies strictly inside the area (boundary excluded).
    #[inline]
    pub fn contains(&self, p: GeoPoint) -> bool {
        self.shape.contains(&Point::new(p.lon, p.lat))
    }
}

// ── GeoJSON loading ───────────────────────────────────────────────────────────

/// Load every polygon in the GeoJSON file at `path` into one [`StudyArea`].
pub fn load_study_area(path: &Path) -> SamplingResult<StudyArea> {
    let text = std::fs::read_to_string(path)?;
    let geojson: GeoJson = text.parse()?;

    let mut polygons = Vec::new();
    match &geojson {
        GeoJson::FeatureCollection(fc) => {
            for feature in &fc.features {
                if let Some(geometry) = &feature.geometry {
                    collect_polygons(geometry, &mut polygons);
                }
            }
        }
        GeoJson::Feature(feature) => {
            if let Some(geometry) = &feature.geometry {
                collect_polygons(geometry, &mut polygons);
            }
        }
        GeoJson::Geometry(geometry) => collect_polygons(geometry, &mut polygons),
    }

    if polygons.is_empty() {
        return Err(SamplingError::NoPolygon { path: path.to_path_buf() });
    }
    log::info!("loaded study area with {} polygon part(s) from {}", polygons.len(), path.display());
    StudyArea::new(MultiPolygon::new(polygons))
}

fn collect_polygons(geometry: &Geometry, out: &mut Vec<Polygon<f64>>) {
    match &geometry.value {
        Value::Polygon(rings) => out.extend(polygon_from_rings(rings)),
        Value::MultiPolygon(parts) => out.extend(parts.iter().filter_map(|rings| polygon_from_rings(rings))),
        Value::GeometryCollection(members) => {
            for member in members {
                collect_polygons(member, out);
            }
        }
        _ => {}
    }
}

/// First ring is the exterior, the rest are holes.  Positions with fewer than
/// two ordinates are skipped; a polygon without an exterior yields `None`.
fn polygon_from_rings(rings: &[Vec<Vec<f64>>]) -> Option<Polygon<f64>> {
    let mut rings = rings.iter().map(|ring| {
        LineString::from(
            ring.iter()
                .filter(|pos| pos.len() >= 2)
                .map(|pos| (pos[0], pos[1]))
                .collect::<Vec<_>>(),
        )
    });
    let exterior = rings.next()?;
    if exterior.0.is_empty() {
        return None;
    }
    Some(Polygon::new(exterior, rings.collect()))
}
