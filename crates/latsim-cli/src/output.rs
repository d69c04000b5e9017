//! Human-readable reports printed to stdout.

use latsim_abstract::{CalibrationData, Mm1Config};
use latsim_core::{RunReport, queueing};
use latsim_loader::ExpectedPaths;

fn ms(secs: f64) -> f64 {
    secs * 1000.0
}

pub fn print_mm1_report(config: &Mm1Config, report: &RunReport) {
    println!("M/M/1 Queue Simulation");
    println!("======================");
    println!("λ (arrival rate):  {}/sec", config.arrival_rate);
    println!("μ (service rate):  {}/sec", config.service_rate);
    println!("Requests:          {}", config.request_count);
    println!("Seed:              {}", report.seed);
    println!();

    println!("Results");
    println!("-------");
    if let Some(rho) = report.result.utilization {
        println!("Utilization (ρ):   {:.1}%", rho * 100.0);
    }
    if let Ok(w) = queueing::average_wait(config.arrival_rate, config.service_rate) {
        println!("Mean time (W):     {:.2}ms (theory)", ms(w));
    }
    if let Ok(l) = queueing::average_queue_length(config.arrival_rate, config.service_rate) {
        println!("Mean in system (L): {l:.2} (theory)");
    }
    println!();

    let p = report.result.percentiles;
    println!("Latency (simulated vs theoretical):");
    match report.theoretical {
        Some(t) => {
            println!("  p50: {:.2}ms (theory: {:.2}ms)", ms(p.p50), ms(t.p50));
            println!("  p95: {:.2}ms (theory: {:.2}ms)", ms(p.p95), ms(t.p95));
            println!("  p99: {:.2}ms (theory: {:.2}ms)", ms(p.p99), ms(t.p99));
        }
        None => {
            println!("  p50: {:.2}ms", ms(p.p50));
            println!("  p95: {:.2}ms", ms(p.p95));
            println!("  p99: {:.2}ms", ms(p.p99));
        }
    }
}

pub fn print_route_header(calibration: &CalibrationData) {
    let net = &calibration.network;
    let compute = &calibration.compute;

    println!("Route: {}", calibration.description);
    println!("Calibration: {}", calibration.source);
    println!();
    println!("Configuration (from calibration):");
    println!(
        "  Network (one-way): {}ms ± {}ms, {}% packet loss",
        net.one_way_latency.mean,
        net.one_way_latency.stddev,
        net.packet_loss * 100.0
    );
    println!(
        "  Compute: {}ms warm, {}ms cold ({}% cold start rate)",
        compute.warm.p50,
        compute.cold_start.p50,
        compute.cold_start_probability * 100.0
    );
    println!("  Database: {}ms (p50)", calibration.database.get_item.p50);
    println!();
}

/// Percentile report for any run; `paths` adds the warm/cold path estimates
/// of a calibrated route.
pub fn print_run_report(report: &RunReport, paths: Option<ExpectedPaths>) {
    if report.components.is_empty() {
        println!("Model: {}", report.model);
    } else {
        println!("Topology: {}", report.components.join(" → "));
    }
    println!("Requests: {}  Seed: {}", report.result.sample_count, report.seed);
    println!();

    let p = report.result.percentiles;
    println!("Results");
    println!("-------");
    println!("  p50: {:.1}ms", ms(p.p50));
    println!("  p95: {:.1}ms", ms(p.p95));
    println!("  p99: {:.1}ms", ms(p.p99));
    if let Some(mean) = report.expected_mean {
        println!("  expected mean: {:.1}ms", ms(mean));
    }

    if let Some(paths) = paths {
        println!();
        println!("Expected (theoretical):");
        println!("  Warm path:  ~{:.1}ms", paths.warm_ms);
        println!("  Cold path:  ~{:.1}ms", paths.cold_ms);
    }
}
