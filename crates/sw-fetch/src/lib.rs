//! `sw-fetch`: requesting walking routes from an openrouteservice-style API.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`request`]  | `RouteRequest`, `RequestSettings`, directions request body  |
//! | [`client`]   | `RoutingClient` trait, `OrsClient` (blocking `reqwest`)     |
//! | [`fetcher`]  | `fetch_routes`, `FetchOptions`                              |
//! | [`report`]   | `FetchReport`, `FetchFailure`, failure CSV                  |
//! | [`error`]    | `FetchError`, `FetchResult<T>`                              |
//!
//! # Execution model
//!
//! Strictly sequential: one blocking request at a time, a fixed pause
//! between requests, a global cap on the number of requests, and no retries.
//! A failed request is recorded and the batch moves on.

pub mod client;
pub mod error;
pub mod fetcher;
pub mod report;
pub mod request;

#[cfg(test)]
mod tests;

pub use client::{OrsClient, RoutingClient};
pub use error::{FetchError, FetchResult};
pub use fetcher::{FetchOptions, fetch_routes};
pub use report::{FAILURE_COLUMNS, FetchFailure, FetchReport, write_failures_csv};
pub use request::{RequestSettings, RouteRequest};
