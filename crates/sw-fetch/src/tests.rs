//! Unit tests for sw-fetch.
//!
//! The routing service is replaced by an in-memory client; no test opens a
//! network connection.

#[cfg(test)]
mod helpers {
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::time::Duration;

    use sw_core::{GeoPoint, PairId};
    use sw_sampling::OdPair;

    use crate::{FetchError, FetchOptions, FetchResult, RequestSettings, RouteRequest, RoutingClient};

    /// Answers every request with a tiny feature collection, except for the
    /// pairs listed in `fail`.
    #[derive(Default)]
    pub struct MockClient {
        pub fail:  HashSet<u32>,
        pub calls: RefCell<Vec<RouteRequest>>,
    }

    impl MockClient {
        pub fn failing(ids: &[u32]) -> Self {
            Self { fail: ids.iter().copied().collect(), ..Default::default() }
        }
    }

    impl RoutingClient for MockClient {
        fn directions(&self, request: &RouteRequest) -> FetchResult<String> {
            self.calls.borrow_mut().push(request.clone());
            if self.fail.contains(&request.key.pair_id.0) {
                return Err(FetchError::Status { status: 500, body: "boom".into() });
            }
            Ok(format!(r#"{{"type":"FeatureCollection","features":[],"pair":{}}}"#, request.key.pair_id))
        }
    }

    pub fn pairs(n: u32) -> Vec<OdPair> {
        (0..n)
            .map(|i| {
                let f = i as f64 * 1e-3;
                OdPair::new(PairId(i), GeoPoint::new(8.60 + f, 49.34 + f), GeoPoint::new(8.70 + f, 49.44 + f))
            })
            .collect()
    }

    pub fn labels(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    pub fn options(pairs_per_time: usize, budget: Option<usize>) -> FetchOptions {
        FetchOptions {
            pairs_per_time,
            request_budget: budget,
            delay: Duration::ZERO,
            settings: RequestSettings::default(),
        }
    }
}

// ── Request body ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod request {
    use serde_json::json;

    use super::helpers::pairs;
    use crate::{RequestSettings, RouteRequest};

    #[test]
    fn body_matches_directions_api() {
        let pair = pairs(1)[0];
        let settings = RequestSettings { csv_factor: 0.5, ..RequestSettings::default() };
        let req = RouteRequest::new(&pair, "noon", "shortest", &settings);

        let body = serde_json::to_value(req.body()).unwrap();
        assert_eq!(
            body,
            json!({
                "coordinates": [[8.60, 49.34], [8.70, 49.44]],
                "instructions": false,
                "preference": "shortest",
                "extra_info": ["csv"],
                "elevation": true,
                "continue_straight": true,
                "options": {
                    "avoid_features": ["ferries"],
                    "profile_params": {"weightings": {"csv_factor": 0.5, "csv_column": "noon"}}
                }
            })
        );
    }

    #[test]
    fn requests_do_not_share_state() {
        let ps = pairs(2);
        let settings = RequestSettings::default();
        let a = RouteRequest::new(&ps[0], "morning", "recommended", &settings);
        let b = RouteRequest::new(&ps[1], "evening", "shortest", &settings);
        assert_eq!(a.key.time_of_day, "morning");
        assert_eq!(b.key.time_of_day, "evening");
        assert_ne!(a.origin, b.origin);
        assert_eq!(serde_json::to_value(a.body()).unwrap()["options"]["profile_params"]["weightings"]["csv_column"], "morning");
    }
}

// ── Fetch loop ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod fetch {
    use sw_core::{ArtifactKey, PairId};

    use super::helpers::{MockClient, labels, options, pairs};
    use crate::fetch_routes;

    #[test]
    fn every_combination_written() {
        let dir = tempfile::tempdir().unwrap();
        let client = MockClient::default();
        let report = fetch_routes(
            &client,
            &pairs(3),
            &labels(&["morning", "noon"]),
            &labels(&["recommended", "shortest"]),
            &options(3, None),
            dir.path(),
        );

        assert_eq!(report.attempts, 12);
        assert_eq!(report.succeeded(), 12);
        assert!(report.failures.is_empty());
        assert!(!report.budget_exhausted);
        assert_eq!(report.not_attempted, 0);
        assert!(dir.path().join("route_2_noon_shortest.geojson").is_file());

        let body = std::fs::read_to_string(dir.path().join("route_1_morning_recommended.geojson")).unwrap();
        assert!(body.contains(r#""pair":1"#));
        // No temp files left behind.
        let leftovers = std::fs::read_dir(dir.path())
            .unwrap()
            .filter(|e| e.as_ref().unwrap().path().extension().is_some_and(|x| x == "part"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn iteration_order_is_time_then_preference_then_pair() {
        let dir = tempfile::tempdir().unwrap();
        let client = MockClient::default();
        fetch_routes(
            &client,
            &pairs(2),
            &labels(&["morning", "noon"]),
            &labels(&["recommended"]),
            &options(2, None),
            dir.path(),
        );
        let keys: Vec<String> = client.calls.borrow().iter().map(|r| r.key.stem()).collect();
        assert_eq!(
            keys,
            [
                "route_0_morning_recommended",
                "route_1_morning_recommended",
                "route_0_noon_recommended",
                "route_1_noon_recommended",
            ]
        );
    }

    #[test]
    fn pairs_per_time_limits_pairs() {
        let dir = tempfile::tempdir().unwrap();
        let client = MockClient::default();
        let report = fetch_routes(&client, &pairs(10), &labels(&["noon"]), &labels(&["recommended"]), &options(4, None), dir.path());
        assert_eq!(report.attempts, 4);
        assert!(client.calls.borrow().iter().all(|r| r.key.pair_id.0 < 4));
    }

    #[test]
    fn budget_caps_requests() {
        let dir = tempfile::tempdir().unwrap();
        let client = MockClient::default();
        let report = fetch_routes(
            &client,
            &pairs(5),
            &labels(&["morning", "noon", "evening"]),
            &labels(&["recommended"]),
            &options(5, Some(7)),
            dir.path(),
        );
        assert_eq!(client.calls.borrow().len(), 7);
        assert_eq!(report.attempts, 7);
        assert!(report.budget_exhausted);
        assert_eq!(report.not_attempted, 8);
    }

    #[test]
    fn failures_count_toward_budget_and_do_not_abort() {
        let dir = tempfile::tempdir().unwrap();
        let client = MockClient::failing(&[1]);
        let report = fetch_routes(
            &client,
            &pairs(3),
            &labels(&["morning", "noon"]),
            &labels(&["recommended"]),
            &options(3, Some(5)),
            dir.path(),
        );
        assert_eq!(report.attempts, 5);
        assert_eq!(report.succeeded(), 3);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].pair_id, PairId(1));
        assert_eq!(report.failures[0].time_of_day, "morning");
        assert_eq!(report.failures[1].time_of_day, "noon");
        assert!(report.failures[0].message.contains("500"));
        assert!(!dir.path().join(ArtifactKey::new(PairId(1), "morning", "recommended").file_name()).exists());
    }

    #[test]
    fn write_failure_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does_not_exist");
        let client = MockClient::default();
        let report = fetch_routes(&client, &pairs(2), &labels(&["noon"]), &labels(&["recommended"]), &options(2, None), &missing);
        assert_eq!(report.attempts, 2);
        assert_eq!(report.failures.len(), 2);
        assert!(report.written.is_empty());
    }

    #[test]
    fn zero_budget_issues_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let client = MockClient::default();
        let report = fetch_routes(&client, &pairs(2), &labels(&["noon"]), &labels(&["recommended"]), &options(2, Some(0)), dir.path());
        assert_eq!(report.attempts, 0);
        assert!(report.budget_exhausted);
        assert!(client.calls.borrow().is_empty());
    }
}

// ── Throttling ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod throttle {
    use std::cell::RefCell;
    use std::time::{Duration, Instant};

    use super::helpers::{labels, options, pairs};
    use crate::{FetchResult, RouteRequest, RoutingClient, fetch_routes};

    /// Records when each request arrived.
    #[derive(Default)]
    struct ClockClient {
        seen: RefCell<Vec<Instant>>,
    }

    impl RoutingClient for ClockClient {
        fn directions(&self, _request: &RouteRequest) -> FetchResult<String> {
            self.seen.borrow_mut().push(Instant::now());
            Ok(r#"{"type":"FeatureCollection","features":[]}"#.to_string())
        }
    }

    #[test]
    fn fixed_delay_between_requests() {
        let dir = tempfile::tempdir().unwrap();
        let client = ClockClient::default();
        let delay = Duration::from_millis(20);
        let opts = crate::FetchOptions { delay, ..options(3, None) };

        let start = Instant::now();
        let report = fetch_routes(&client, &pairs(3), &labels(&["noon"]), &labels(&["recommended"]), &opts, dir.path());
        assert_eq!(report.attempts, 3);
        assert!(start.elapsed() >= delay * 2);

        let seen = client.seen.borrow();
        for gap in seen.windows(2).map(|w| w[1] - w[0]) {
            assert!(gap >= delay, "gap {gap:?} shorter than {delay:?}");
        }
    }

    #[test]
    fn first_request_is_not_delayed() {
        let dir = tempfile::tempdir().unwrap();
        let client = ClockClient::default();
        let opts = crate::FetchOptions { delay: Duration::from_secs(30), ..options(1, None) };

        let start = Instant::now();
        let report = fetch_routes(&client, &pairs(1), &labels(&["noon"]), &labels(&["recommended"]), &opts, dir.path());
        assert_eq!(report.attempts, 1);
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn no_delay_after_budget_runs_out() {
        let dir = tempfile::tempdir().unwrap();
        let client = ClockClient::default();
        let opts = crate::FetchOptions { delay: Duration::from_secs(30), ..options(3, Some(1)) };

        let start = Instant::now();
        let report = fetch_routes(&client, &pairs(3), &labels(&["noon"]), &labels(&["recommended"]), &opts, dir.path());
        assert_eq!(report.attempts, 1);
        assert!(report.budget_exhausted);
        assert!(start.elapsed() < Duration::from_secs(5));
    }
}

// ── Failure log & client ──────────────────────────────────────────────────────

#[cfg(test)]
mod report {
    use std::time::Duration;

    use sw_core::{ArtifactKey, PairId};

    use crate::{FAILURE_COLUMNS, FetchFailure, OrsClient, write_failures_csv};

    #[test]
    fn failures_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("failed_requests.csv");
        let failures = vec![FetchFailure::new(
            &ArtifactKey::new(PairId(4), "noon", "shortest"),
            "timeout, retry later".into(),
        )];
        write_failures_csv(&path, &failures).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["pair_id", "time_of_day", "preference", "message"]);
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "4");
        assert_eq!(&rows[0][3], "timeout, retry later");
    }

    #[test]
    fn failure_rows_follow_struct_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("failed_requests.csv");
        let failures = vec![
            FetchFailure::new(&ArtifactKey::new(PairId(1), "morning", "recommended"), "status 500".into()),
            FetchFailure::new(&ArtifactKey::new(PairId(9), "evening", "shortest"), "quoted \"body\", with comma".into()),
        ];
        write_failures_csv(&path, &failures).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, FAILURE_COLUMNS);
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][0], "9");
        assert_eq!(&rows[1][2], "shortest");
        assert_eq!(&rows[1][3], "quoted \"body\", with comma");
    }

    #[test]
    fn empty_failures_still_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("failed_requests.csv");
        write_failures_csv(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "pair_id,time_of_day,preference,message\n");
    }

    #[test]
    fn directions_url_strips_trailing_slash() {
        let client = OrsClient::new("http://localhost:8080/ors/", None, Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.directions_url("foot-walking"),
            "http://localhost:8080/ors/v2/directions/foot-walking/geojson"
        );
    }
}
