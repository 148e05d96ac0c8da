//! `sw-core`: foundational types for the `shadewalk` pipeline.
//!
//! Every other `sw-*` crate depends on this one.  It has no `sw-*`
//! dependencies of its own.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `PairId`                                              |
//! | [`artifact`]    | `ArtifactKey`, route artifact file naming             |
//! | [`geo`]         | `GeoPoint`, `haversine_km`                            |
//! | [`rng`]         | `SampleRng` (seedable sampling RNG)                   |
//! | [`config`]      | `RunConfig` (YAML), `PairingMode`, `OutputFormat`     |
//! | [`paths`]       | `RunPaths`, `ResultPaths` output directory layout     |
//! | [`error`]       | `CoreError`, `CoreResult`                             |

pub mod artifact;
pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod paths;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use artifact::{ARTIFACT_EXTENSION, ArtifactKey};
pub use config::{OutputFormat, PairingMode, RunConfig};
pub use error::{CoreError, CoreResult};
pub use geo::{GeoPoint, haversine_km};
pub use ids::PairId;
pub use paths::{ResultPaths, RunPaths};
pub use rng::SampleRng;
