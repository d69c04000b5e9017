//! Assembles the standard route topology from a calibration record:
//! network out, serverless compute, database, network back.

use anyhow::{Context, Result};
use latsim_abstract::{
    CalibrationData, ComponentConfig, ComputeConfig, DatabaseConfig, NetworkConfig,
};
use latsim_core::{Component, Topology};
use tracing::debug;

/// Database spread is not in the calibration export; it is taken as this
/// fraction of the p50.
const DATABASE_STDDEV_FRACTION: f64 = 0.5;

pub fn ms_to_seconds(ms: f64) -> f64 {
    ms / 1000.0
}

/// Optional adjustments to the network hops of a route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overlays {
    /// Add the route's VPN latency to every network hop.
    pub vpn: bool,
    /// Shrink every network hop by the route's Direct Connect reduction.
    pub direct_connect: bool,
}

/// Mean and stddev of one network hop in milliseconds, overlays applied.
fn network_ms(calibration: &CalibrationData, overlays: Overlays) -> Result<(f64, f64)> {
    let base = calibration.network.one_way_latency;
    let (mut mean, mut stddev) = (base.mean, base.stddev);

    if overlays.direct_connect {
        let dc = calibration.direct_connect.as_ref().with_context(|| {
            format!("Route '{}' has no directConnect calibration", calibration.route)
        })?;
        mean *= 1.0 - dc.latency_reduction.percent / 100.0;
    }
    if overlays.vpn {
        let vpn = calibration
            .vpn
            .as_ref()
            .with_context(|| format!("Route '{}' has no vpn calibration", calibration.route))?;
        mean += vpn.additional_latency.mean;
        stddev = stddev.hypot(vpn.additional_latency.stddev);
    }
    Ok((mean, stddev))
}

/// Hop configurations, in seconds, in traversal order.
pub fn route_hops(calibration: &CalibrationData, overlays: Overlays) -> Result<Vec<ComponentConfig>> {
    let (net_mean, net_stddev) = network_ms(calibration, overlays)?;
    let network = NetworkConfig {
        mean_latency: ms_to_seconds(net_mean),
        stddev: ms_to_seconds(net_stddev),
        packet_loss_rate: calibration.network.packet_loss,
    };

    let compute = &calibration.compute;
    let db_p50 = calibration.database.get_item.p50;

    Ok(vec![
        ComponentConfig::Network(network.clone()),
        ComponentConfig::Compute(ComputeConfig {
            warm_latency: ms_to_seconds(compute.warm.p50),
            warm_stddev: None,
            cold_start_latency: ms_to_seconds(compute.cold_start.p50),
            cold_start_stddev: None,
            cold_start_probability: compute.cold_start_probability,
        }),
        ComponentConfig::Database(DatabaseConfig {
            mean_latency: ms_to_seconds(db_p50),
            stddev: ms_to_seconds(db_p50 * DATABASE_STDDEV_FRACTION),
        }),
        ComponentConfig::Network(network),
    ])
}

pub fn build_route_topology(calibration: &CalibrationData, overlays: Overlays) -> Result<Topology> {
    let hops = route_hops(calibration, overlays)?;
    debug!(
        "Building topology for route '{}' ({:?})",
        calibration.route, overlays
    );
    hops.iter()
        .map(Component::from_config)
        .collect::<latsim_core::Result<Topology>>()
        .with_context(|| format!("Invalid calibration for route '{}'", calibration.route))
}

/// Round-trip latency in milliseconds when the function is warm or cold,
/// ignoring jitter and loss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpectedPaths {
    pub warm_ms: f64,
    pub cold_ms: f64,
}

pub fn expected_paths(calibration: &CalibrationData, overlays: Overlays) -> Result<ExpectedPaths> {
    let (net_mean, _) = network_ms(calibration, overlays)?;
    let fixed = 2.0 * net_mean + calibration.database.get_item.p50;
    Ok(ExpectedPaths {
        warm_ms: fixed + calibration.compute.warm.p50,
        cold_ms: fixed + calibration.compute.cold_start.p50,
    })
}
