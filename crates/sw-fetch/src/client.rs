//! Routing API client.
//!
//! # Pluggability
//!
//! [`fetch_routes`](crate::fetch_routes) talks to the routing service only
//! through the [`RoutingClient`] trait, so tests and alternative back ends
//! (a local GraphHopper, a recorded-response replayer) can stand in for the
//! real HTTP client.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};

use crate::request::RouteRequest;
use crate::{FetchError, FetchResult};

const ACCEPT_VALUE: &str = "application/json, application/geo+json, application/gpx+xml, img/png; charset=utf-8";

/// Longest error body kept in a [`FetchError::Status`].
const MAX_ERROR_BODY: usize = 512;

// ── RoutingClient trait ───────────────────────────────────────────────────────

/// Something that can answer a directions request with a raw response body.
pub trait RoutingClient {
    /// Issue one request and return the response body unchanged.
    ///
    /// Non-success statuses are errors; the body is never retried.
    fn directions(&self, request: &RouteRequest) -> FetchResult<String>;
}

// ── OrsClient ─────────────────────────────────────────────────────────────────

/// Blocking HTTP client for the openrouteservice directions endpoint.
#[derive(Debug, Clone)]
pub struct OrsClient {
    client:   Client,
    base_url: String,
    api_key:  Option<String>,
}

impl OrsClient {
    /// Create a client for `base_url` (e.g. `http://localhost:8080/ors`).
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> FetchResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// `{base_url}/v2/directions/{profile}/geojson`
    pub fn directions_url(&self, profile: &str) -> String {
        format!("{}/v2/directions/{}/geojson", self.base_url, profile)
    }
}

impl RoutingClient for OrsClient {
    fn directions(&self, request: &RouteRequest) -> FetchResult<String> {
        let mut builder = self
            .client
            .post(self.directions_url(&request.profile))
            .header(ACCEPT, ACCEPT_VALUE)
            .json(&request.body());
        if let Some(key) = &self.api_key {
            builder = builder.header(AUTHORIZATION, key.as_str());
        }

        let response = builder.send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body:   truncate(body),
            });
        }
        Ok(body)
    }
}

fn truncate(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let mut end = MAX_ERROR_BODY;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
        body.push_str("...");
    }
    body
}
