//! Immutable per-combination routing requests.
//!
//! A [`RouteRequest`] is built fresh for every (pair, time-of-day,
//! preference) combination and never mutated, so nothing set for one
//! combination can leak into the next.
//!
//! # Request body
//!
//! ```json
//! {
//!   "coordinates": [[8.6871, 49.4189], [8.6836, 49.3876]],
//!   "instructions": false,
//!   "preference": "recommended",
//!   "extra_info": ["csv"],
//!   "elevation": true,
//!   "continue_straight": true,
//!   "options": {
//!     "avoid_features": ["ferries"],
//!     "profile_params": { "weightings": { "csv_factor": 1.0, "csv_column": "noon" } }
//!   }
//! }
//! ```
//!
//! The time-of-day label doubles as the `csv_column`: the routing server's
//! cost-surface CSV has one column per time of day.

use serde::Serialize;

use sw_core::{ArtifactKey, GeoPoint, RunConfig};
use sw_sampling::OdPair;

/// Settings that are identical for every request of a run.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestSettings {
    pub profile:    String,
    pub criterion:  String,
    pub csv_factor: f64,
}

impl RequestSettings {
    pub fn from_config(config: &RunConfig) -> Self {
        Self {
            profile:    config.profile.clone(),
            criterion:  config.criterion.clone(),
            csv_factor: config.csv_factor,
        }
    }
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            profile:    "foot-walking".to_string(),
            criterion:  "csv".to_string(),
            csv_factor: 1.0,
        }
    }
}

/// One routing request.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteRequest {
    pub key:         ArtifactKey,
    pub origin:      GeoPoint,
    pub destination: GeoPoint,
    pub profile:     String,
    pub criterion:   String,
    pub csv_factor:  f64,
}

impl RouteRequest {
    pub fn new(pair: &OdPair, time_of_day: &str, preference: &str, settings: &RequestSettings) -> Self {
        Self {
            key:         ArtifactKey::new(pair.id, time_of_day, preference),
            origin:      pair.origin(),
            destination: pair.destination(),
            profile:     settings.profile.clone(),
            criterion:   settings.criterion.clone(),
            csv_factor:  settings.csv_factor,
        }
    }

    /// The JSON body sent to the directions endpoint.
    pub fn body(&self) -> DirectionsBody<'_> {
        DirectionsBody {
            coordinates:       [self.origin.to_lon_lat(), self.destination.to_lon_lat()],
            instructions:      false,
            preference:        &self.key.preference,
            extra_info:        [self.criterion.as_str()],
            elevation:         true,
            continue_straight: true,
            options:           DirectionsOptions {
                avoid_features: ["ferries"],
                profile_params: ProfileParams {
                    weightings: Weightings {
                        csv_factor: self.csv_factor,
                        csv_column: &self.key.time_of_day,
                    },
                },
            },
        }
    }
}

// ── Wire types ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct DirectionsBody<'a> {
    coordinates:       [[f64; 2]; 2],
    instructions:      bool,
    preference:        &'a str,
    extra_info:        [&'a str; 1],
    elevation:         bool,
    continue_straight: bool,
    options:           DirectionsOptions<'a>,
}

#[derive(Debug, Serialize)]
struct DirectionsOptions<'a> {
    avoid_features: [&'static str; 1],
    profile_params: ProfileParams<'a>,
}

#[derive(Debug, Serialize)]
struct ProfileParams<'a> {
    weightings: Weightings<'a>,
}

#[derive(Debug, Serialize)]
struct Weightings<'a> {
    csv_factor: f64,
    csv_column: &'a str,
}
