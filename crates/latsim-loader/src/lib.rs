//! Calibration files: one JSON document per route, named `<route>.json`.

pub mod route;

use anyhow::{Context, Result};
use latsim_abstract::CalibrationData;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub use route::{ExpectedPaths, Overlays, build_route_topology, expected_paths, ms_to_seconds, route_hops};

/// Directory searched when none is given, relative to the working directory.
pub const DEFAULT_CALIBRATION_DIR: &str = "calibration";

/// Reads route calibrations from a directory of JSON files.
#[derive(Debug, Clone)]
pub struct CalibrationLoader {
    dir: PathBuf,
}

impl Default for CalibrationLoader {
    fn default() -> Self {
        Self::new(DEFAULT_CALIBRATION_DIR)
    }
}

impl CalibrationLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file that holds `route`.
    pub fn route_path(&self, route: &str) -> Result<PathBuf> {
        if route.is_empty() || route.contains(['/', '\\']) || route.starts_with('.') {
            anyhow::bail!("Invalid route name '{route}'");
        }
        Ok(self.dir.join(format!("{route}.json")))
    }

    pub fn load(&self, route: &str) -> Result<CalibrationData> {
        let path = self.route_path(route)?;
        if !path.exists() {
            anyhow::bail!(
                "Calibration file not found: {} (available: {})",
                path.display(),
                self.available_routes().unwrap_or_default().join(", ")
            );
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read calibration file {}", path.display()))?;
        let data = parse_calibration(&content)
            .with_context(|| format!("Failed to parse calibration file {}", path.display()))?;
        debug!("Loaded calibration for route '{}' from {}", data.route, path.display());
        Ok(data)
    }

    /// Sorted names of every `*.json` file in the directory.
    pub fn available_routes(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.dir).with_context(|| {
            format!("Failed to list calibration directory {}", self.dir.display())
        })?;

        let mut routes = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                routes.push(stem.to_string());
            }
        }
        routes.sort();
        Ok(routes)
    }
}

/// Parses a calibration document. Missing required fields are an error; only
/// the `vpn` and `directConnect` overlays may be absent.
pub fn parse_calibration(text: &str) -> Result<CalibrationData> {
    let data: CalibrationData =
        serde_json::from_str(text).context("Calibration JSON does not match the expected schema")?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) const SAMPLE: &str = r#"{
        "route": "test-route",
        "description": "Test client to test region",
        "source": "unit test",
        "network": { "oneWayLatency": { "mean": 40, "stddev": 5 }, "packetLoss": 0.01 },
        "lambda": {
            "coldStart": { "p50": 250, "p95": 400, "p99": 600 },
            "warm": { "p50": 8, "p95": 15, "p99": 25 },
            "coldStartProbability": 0.05
        },
        "dynamodb": { "getItem": { "p50": 4, "p95": 9, "p99": 15 } },
        "vpn": { "additionalLatency": { "mean": 6, "stddev": 2 } },
        "directConnect": { "latencyReduction": { "percent": 20 } }
    }"#;

    fn bundled_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../calibration")
    }

    #[test]
    fn parses_full_document() {
        let data = parse_calibration(SAMPLE).unwrap();
        assert_eq!(data.route, "test-route");
        assert_eq!(data.network.one_way_latency.mean, 40.0);
        assert_eq!(data.compute.cold_start.p50, 250.0);
        assert_eq!(data.database.get_item.p99, 15.0);
        assert_eq!(data.vpn.unwrap().additional_latency.stddev, 2.0);
        assert_eq!(data.direct_connect.unwrap().latency_reduction.percent, 20.0);
    }

    #[test]
    fn overlays_are_optional() {
        let mut value: serde_json::Value = serde_json::from_str(SAMPLE).unwrap();
        let doc = value.as_object_mut().unwrap();
        doc.remove("vpn");
        doc.remove("directConnect");

        let data = parse_calibration(&value.to_string()).unwrap();
        assert!(data.vpn.is_none());
        assert!(data.direct_connect.is_none());
    }

    #[test]
    fn missing_required_field_is_an_error() {
        let broken = SAMPLE.replace(r#""packetLoss": 0.01"#, r#""jitter": 0.01"#);
        let err = parse_calibration(&broken).unwrap_err();
        assert!(format!("{err:#}").contains("packetLoss"));
    }

    #[test]
    fn rejects_path_like_route_names() {
        let loader = CalibrationLoader::new("/tmp");
        assert!(loader.route_path("../etc/passwd").is_err());
        assert!(loader.route_path("").is_err());
        assert!(loader.route_path("ok-route").is_ok());
    }

    #[test]
    fn missing_route_file_is_fatal() {
        let loader = CalibrationLoader::new(bundled_dir());
        let err = loader.load("no-such-route").unwrap_err();
        assert!(err.to_string().contains("Calibration file not found"));
    }

    #[test]
    fn loads_bundled_route() {
        let loader = CalibrationLoader::new(bundled_dir());
        let routes = loader.available_routes().unwrap();
        assert!(routes.contains(&"manila-aws-singapore".to_string()));

        let data = loader.load("manila-aws-singapore").unwrap();
        assert_eq!(data.route, "manila-aws-singapore");
        assert!(data.compute.cold_start_probability > 0.0);
    }
}
