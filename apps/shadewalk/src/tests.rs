//! Stage-level tests: the whole pipeline against a canned routing client.

#[cfg(test)]
mod helpers {
    use std::path::{Path, PathBuf};

    use sw_core::RunConfig;
    use sw_fetch::{FetchError, FetchResult, RouteRequest, RoutingClient};

    const AOI: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {"name": "heidelberg"},
            "geometry": {"type": "Polygon", "coordinates": [[
                [8.598690, 49.339503], [8.755589, 49.339503], [8.755589, 49.456632],
                [8.598690, 49.456632], [8.598690, 49.339503]
            ]]}
        }]
    }"#;

    /// Write an area file and a config into `dir`; returns the config path.
    pub fn write_run(dir: &Path, extra_yaml: &str) -> PathBuf {
        std::fs::write(dir.join("aoi.geojson"), AOI).unwrap();
        let yaml = format!(
            "output_dir: {out}\n\
             run_name: test_run\n\
             ors_url: http://localhost:8080/ors\n\
             times_of_day: [morning, noon]\n\
             preferences: [recommended]\n\
             n_pairs: 3\n\
             aoi: aoi.geojson\n\
             n_points: 40\n\
             seed: 11\n\
             request_delay_ms: 0\n\
             output_format: csv\n\
             {extra_yaml}",
            out = dir.join("output").display(),
        );
        let path = dir.join("config.yml");
        std::fs::write(&path, yaml).unwrap();
        path
    }

    pub fn load(path: &Path) -> RunConfig {
        RunConfig::load(path).unwrap()
    }

    /// Answers every request with a two-class `csv` summary, except for the
    /// pairs listed in `fail`.
    pub struct CannedClient {
        pub fail: Vec<u32>,
    }

    impl RoutingClient for CannedClient {
        fn directions(&self, request: &RouteRequest) -> FetchResult<String> {
            if self.fail.contains(&request.key.pair_id.0) {
                return Err(FetchError::Status { status: 500, body: "upstream error".to_string() });
            }
            let o = request.origin;
            let d = request.destination;
            Ok(format!(
                r#"{{"type": "FeatureCollection", "features": [{{
                    "type": "Feature",
                    "geometry": {{"type": "LineString", "coordinates": [[{}, {}, 110.0], [{}, {}, 120.0]]}},
                    "properties": {{"extras": {{"csv": {{
                        "values": [[0, 1, 1]],
                        "summary": [
                            {{"value": 1.0, "distance": 300.0, "amount": 75.0}},
                            {{"value": 5.0, "distance": 100.0, "amount": 25.0}}
                        ]
                    }}}}}}
                }}]}}"#,
                o.lon, o.lat, d.lon, d.lat
            ))
        }
    }
}

// ── Stages ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stage_tests {
    use super::helpers::*;
    use crate::stages;

    #[test]
    fn sample_stage_writes_od_table_and_config_copy() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_run(dir.path(), "");
        let config = load(&config_path);

        let table = stages::sample_pairs(&config, &config_path).unwrap();
        assert_eq!(table.len(), 3);
        assert!(table.iter().all(|r| r.distance_km > 0.0));

        let paths = config.run_paths();
        assert!(paths.config_copy().is_file());
        let read_back = sw_sampling::read_od_csv(&paths.od_pairs_file()).unwrap();
        assert_eq!(read_back.len(), 3);
        assert_eq!(read_back[2].id.0, 2);
    }

    #[test]
    fn same_seed_same_pairs() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        let ca = write_run(a.path(), "");
        let cb = write_run(b.path(), "");

        let ta = stages::sample_pairs(&load(&ca), &ca).unwrap();
        let tb = stages::sample_pairs(&load(&cb), &cb).unwrap();
        assert_eq!(ta, tb);
    }

    #[test]
    fn fetch_without_od_table_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(&write_run(dir.path(), ""));
        let err = stages::fetch_routes(&config, &CannedClient { fail: vec![] }).unwrap_err();
        assert!(err.to_string().contains("od_pairs.csv"));
    }

    #[test]
    fn pipeline_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_run(dir.path(), "");
        let config = load(&config_path);

        stages::sample_pairs(&config, &config_path).unwrap();

        let report = stages::fetch_routes(&config, &CannedClient { fail: vec![1] }).unwrap();
        assert_eq!(report.attempts, 6);
        assert_eq!(report.succeeded(), 4);
        assert_eq!(report.failures.len(), 2);
        assert!(config.run_paths().failures_file().is_file());

        let (aggregation, table) = stages::route_metrics(&config).unwrap();
        assert_eq!(aggregation.routes, 4);
        assert_eq!(aggregation.rows.len(), 8);
        assert!(aggregation.skipped.is_empty());
        for row in &aggregation.rows {
            assert!((row.exposure - 2.0).abs() < 1e-12);
            assert_ne!(row.pair_id, 1);
        }

        assert!(table.ends_with("03_final/all.csv"));
        let mut rdr = csv::Reader::from_path(&table).unwrap();
        assert_eq!(rdr.records().count(), 8);
    }

    #[test]
    fn budget_limits_fetch_stage() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_run(dir.path(), "request_budget: 4\n");
        let config = load(&config_path);

        stages::sample_pairs(&config, &config_path).unwrap();
        let report = stages::fetch_routes(&config, &CannedClient { fail: vec![] }).unwrap();
        assert_eq!(report.attempts, 4);
        assert_eq!(report.not_attempted, 2);
        assert!(report.budget_exhausted);
    }

    #[test]
    fn metrics_go_to_separate_directory() {
        let dir = tempfile::tempdir().unwrap();
        let metrics = dir.path().join("metrics");
        let extra = format!("output_dir_metrics: {}\n", metrics.display());
        let config_path = write_run(dir.path(), &extra);
        let config = load(&config_path);

        stages::sample_pairs(&config, &config_path).unwrap();
        stages::fetch_routes(&config, &CannedClient { fail: vec![] }).unwrap();
        let (_, table) = stages::route_metrics(&config).unwrap();
        assert!(table.starts_with(&metrics));
        assert!(table.is_file());
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod log_tests {
    use ::log::LevelFilter;

    use crate::log::{parse_level, resolve_level};

    #[test]
    fn environment_overrides_config() {
        assert_eq!(resolve_level(Some("debug"), Some("warn")).unwrap(), LevelFilter::Debug);
        assert_eq!(resolve_level(None, Some("warn")).unwrap(), LevelFilter::Warn);
        assert_eq!(resolve_level(None, None).unwrap(), LevelFilter::Info);
    }

    #[test]
    fn level_names_are_case_insensitive() {
        assert_eq!(parse_level("TRACE").unwrap(), LevelFilter::Trace);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::Off);
        assert!(parse_level("verbose").is_err());
    }
}
