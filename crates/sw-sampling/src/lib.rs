//! `sw-sampling`: random origin–destination pairs inside a study area.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`area`]     | `StudyArea` (multi-polygon + bounds), GeoJSON loading      |
//! | [`sampler`]  | `sample_points`, bounding-box rejection sampling           |
//! | [`pairing`]  | `PairingStrategy`, `pair_candidates`, `generate_pairs`     |
//! | [`table`]    | `OdPair`, `OdDistance`, OD table CSV I/O                   |
//! | [`error`]    | `SamplingError`, `SamplingResult<T>`                       |
//!
//! # Pipeline (summary)
//!
//! ```text
//! boundary GeoJSON ──load──▶ StudyArea ──sample──▶ candidates
//!     ──pair──▶ Vec<OdPair> ──haversine──▶ Vec<OdDistance> ──▶ od_pairs.csv
//! ```

pub mod area;
pub mod error;
pub mod pairing;
pub mod sampler;
pub mod table;


pub use area::{StudyArea, load_study_area};
pub use error::{SamplingError, SamplingResult};
pub use pairing::{PairingStrategy, generate_pairs, pair_candidates};
pub use sampler::sample_points;
pub use table::{OdDistance, OdPair, read_od_csv, with_distances, write_od_csv};
