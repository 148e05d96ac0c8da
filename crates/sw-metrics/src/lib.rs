//! `sw-metrics`: turning persisted route artifacts into one metrics table.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`route`]      | `Route` (one parsed artifact), `Extra`, `SummaryEntry`   |
//! | [`aggregate`]  | `aggregate`, `Aggregation`, `write_table`                |
//! | [`line`]       | `Line`: 3D polyline length, slopes, translation          |
//! | [`projection`] | `UtmZone`, `UtmProjector`: WGS84 → UTM via `proj4rs`     |
//! | [`error`]      | `MetricsError`, `MetricsResult<T>`                       |
//!
//! # Exposure
//!
//! For a criterion summary `[(value, distance, amount), ..]` the exposure is
//! the distance-weighted mean value `Σ(value·distance) / Σ distance`.  A
//! summary covering zero distance has exposure `NaN`.

pub mod aggregate;
pub mod error;
pub mod line;
pub mod projection;
pub mod route;


pub use aggregate::{Aggregation, SkippedRoute, aggregate, list_artifacts, write_table};
pub use error::{MetricsError, MetricsResult};
pub use line::Line;
pub use projection::{UtmProjector, UtmZone};
pub use route::{Extra, Route, SummaryEntry, weighted_exposure};
