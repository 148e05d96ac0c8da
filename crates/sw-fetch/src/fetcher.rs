//! The budgeted, throttled fetch loop.
//!
//! # Order
//!
//! ```text
//! for time_of_day in times_of_day
//!   for preference in preferences
//!     for pair in pairs[..pairs_per_time]
//!       request → write artifact | record failure
//! ```
//!
//! # Budget
//!
//! Every issued request counts, failed or not.  Once `request_budget`
//! requests have been made the loop stops; the remaining combinations are
//! counted in [`FetchReport::not_attempted`].  The budget caps cost, it does
//! not guarantee coverage: with a small budget, later times of day may get
//! no routes at all.

use std::path::{Path, PathBuf};
use std::time::Duration;

use sw_core::{ARTIFACT_EXTENSION, RunConfig};
use sw_sampling::OdPair;

use crate::client::RoutingClient;
use crate::report::{FetchFailure, FetchReport};
use crate::request::{RequestSettings, RouteRequest};
use crate::FetchResult;

/// Knobs of one fetch run.
#[derive(Clone, Debug)]
pub struct FetchOptions {
    /// Pairs requested per time-of-day and preference (from the front of the
    /// pair list).
    pub pairs_per_time: usize,
    /// Maximum number of requests; `None` means unlimited.
    pub request_budget: Option<usize>,
    /// Pause between consecutive requests.
    pub delay:          Duration,
    pub settings:       RequestSettings,
}

impl FetchOptions {
    pub fn from_config(config: &RunConfig) -> Self {
        Self {
            pairs_per_time: config.n_pairs,
            request_budget: config.request_budget,
            delay:          config.request_delay(),
            settings:       RequestSettings::from_config(config),
        }
    }
}

/// Request one route per (pair, time-of-day, preference) combination and
/// persist each response in `routes_dir`.
///
/// Never fails as a whole: every per-request problem, including a failed
/// artifact write, ends up in [`FetchReport::failures`].
pub fn fetch_routes<C: RoutingClient + ?Sized>(
    client: &C,
    pairs: &[OdPair],
    times_of_day: &[String],
    preferences: &[String],
    options: &FetchOptions,
    routes_dir: &Path,
) -> FetchReport {
    let pairs = &pairs[..options.pairs_per_time.min(pairs.len())];
    let total = times_of_day.len() * preferences.len() * pairs.len();
    let budget = options.request_budget.unwrap_or(usize::MAX);

    log::info!(
        "fetching up to {} routes ({} pairs x {} times x {} preferences, budget {})",
        total,
        pairs.len(),
        times_of_day.len(),
        preferences.len(),
        options.request_budget.map_or_else(|| "unlimited".to_string(), |b| b.to_string()),
    );

    let combinations = times_of_day.iter().flat_map(move |time| {
        preferences
            .iter()
            .flat_map(move |preference| pairs.iter().map(move |pair| (pair, time, preference)))
    });

    let mut report = FetchReport::default();
    for (pair, time_of_day, preference) in combinations {
        if report.attempts >= budget {
            report.budget_exhausted = true;
            break;
        }
        if report.attempts > 0 && !options.delay.is_zero() {
            std::thread::sleep(options.delay);
        }

        let request = RouteRequest::new(pair, time_of_day, preference, &options.settings);
        report.attempts += 1;
        log::debug!("requesting {} ({} -> {})", request.key, request.origin, request.destination);

        match client
            .directions(&request)
            .and_then(|body| persist(routes_dir, &request, &body))
        {
            Ok(path) => report.written.push(path),
            Err(e) => {
                log::warn!(
                    "request for pair {} at {} ({}) failed: {e}",
                    request.key.pair_id,
                    request.key.time_of_day,
                    request.key.preference
                );
                report.failures.push(FetchFailure::new(&request.key, e.to_string()));
            }
        }
    }
    report.not_attempted = total - report.attempts;

    log::info!(
        "fetch finished: {} attempted, {} written, {} failed, {} not attempted",
        report.attempts,
        report.succeeded(),
        report.failures.len(),
        report.not_attempted
    );
    report
}

/// Written under a `.part` name and renamed into place: an artifact with its
/// final name is always complete.
fn persist(routes_dir: &Path, request: &RouteRequest, body: &str) -> FetchResult<PathBuf> {
    let path = routes_dir.join(request.key.file_name());
    let partial = path.with_extension(format!("{ARTIFACT_EXTENSION}.part"));
    std::fs::write(&partial, body)?;
    std::fs::rename(&partial, &path)?;
    Ok(path)
}
