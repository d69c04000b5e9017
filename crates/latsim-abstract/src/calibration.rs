//! Measured latency figures for a named route, as stored in calibration files.
//!
//! Every latency here is in milliseconds; consumers convert to seconds before
//! building components.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MeanStddev {
    pub mean: f64,
    pub stddev: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PercentileTriple {
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkCalibration {
    pub one_way_latency: MeanStddev,
    pub packet_loss: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComputeCalibration {
    pub cold_start: PercentileTriple,
    pub warm: PercentileTriple,
    pub cold_start_probability: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseCalibration {
    pub get_item: PercentileTriple,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VpnCalibration {
    pub additional_latency: MeanStddev,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DirectConnectCalibration {
    pub latency_reduction: LatencyReduction,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LatencyReduction {
    pub percent: f64,
}

/// Calibration for one route. The serverless and database sections keep the
/// key names used by the benchmark exports (`lambda`, `dynamodb`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationData {
    pub route: String,
    pub description: String,
    pub source: String,
    pub network: NetworkCalibration,
    #[serde(rename = "lambda")]
    pub compute: ComputeCalibration,
    #[serde(rename = "dynamodb")]
    pub database: DatabaseCalibration,
    #[serde(default)]
    pub vpn: Option<VpnCalibration>,
    #[serde(default)]
    pub direct_connect: Option<DirectConnectCalibration>,
}
