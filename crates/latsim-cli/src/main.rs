use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use latsim_abstract::Mm1Config;
use latsim_cli::output::{print_mm1_report, print_route_header, print_run_report};
use latsim_cli::runner::{load_scenario, run_mm1, run_scenario, run_topology};
use latsim_core::RunReport;
use latsim_loader::{
    CalibrationLoader, DEFAULT_CALIBRATION_DIR, Overlays, build_route_topology, expected_paths,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Latency distribution simulator for request hop chains")]
struct Args {
    /// Write a JSON trace of the finished run.
    #[arg(long, global = true)]
    trace_out: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Event-driven M/M/1 queue, compared with closed-form theory.
    Mm1 {
        #[arg(long, default_value_t = 800.0)]
        arrival_rate: f64,
        #[arg(long, default_value_t = 1000.0)]
        service_rate: f64,
        #[arg(long, default_value_t = 5000)]
        requests: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Monte Carlo run of a calibrated route: network, compute, database, network.
    Topology {
        #[arg(long, default_value = "manila-aws-singapore")]
        route: String,
        #[arg(long, default_value_t = 10_000)]
        requests: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Add the route's VPN overhead to each network hop.
        #[arg(long, default_value_t = false)]
        vpn: bool,
        /// Apply the route's Direct Connect latency reduction.
        #[arg(long, default_value_t = false)]
        direct_connect: bool,
        #[command(flatten)]
        calibration: CalibrationArgs,
    },
    /// List routes with calibration data.
    Routes {
        #[command(flatten)]
        calibration: CalibrationArgs,
    },
    /// Run a TOML scenario file and check its assertions.
    Scenario { path: PathBuf },
}

#[derive(ClapArgs, Debug)]
struct CalibrationArgs {
    /// Directory holding `<route>.json` calibration files.
    #[arg(long, default_value = DEFAULT_CALIBRATION_DIR)]
    calibration_dir: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();
    info!("latsim starting…");

    let report = match args.command {
        Command::Mm1 {
            arrival_rate,
            service_rate,
            requests,
            seed,
        } => {
            let config = Mm1Config {
                arrival_rate,
                service_rate,
                request_count: requests,
                seed,
            };
            let report = run_mm1(&config)?;
            print_mm1_report(&config, &report);
            Some(report)
        }
        Command::Topology {
            route,
            requests,
            seed,
            vpn,
            direct_connect,
            calibration,
        } => {
            let loader = CalibrationLoader::new(calibration.calibration_dir);
            let data = loader.load(&route)?;
            let overlays = Overlays {
                vpn,
                direct_connect,
            };
            let topology = build_route_topology(&data, overlays)?;

            print_route_header(&data);
            info!("Simulating {requests} requests…");
            let report = run_topology(&topology, requests, seed)?;
            print_run_report(&report, Some(expected_paths(&data, overlays)?));
            Some(report)
        }
        Command::Routes { calibration } => {
            let loader = CalibrationLoader::new(calibration.calibration_dir);
            for route in loader.available_routes()? {
                println!("{route}");
            }
            None
        }
        Command::Scenario { path } => {
            let scenario = load_scenario(&path)?;
            let report = run_scenario(&scenario)?;
            print_run_report(&report, None);
            println!();
            println!("Scenario '{}' passed.", scenario.name);
            Some(report)
        }
    };

    if let (Some(trace_path), Some(report)) = (&args.trace_out, &report) {
        write_trace(trace_path, report)?;
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn write_trace(path: &Path, report: &RunReport) -> Result<()> {
    let data = serde_json::to_vec_pretty(report).context("Failed to serialize run report")?;
    fs::write(path, &data)
        .with_context(|| format!("Failed to write trace file {}", path.display()))?;
    Ok(())
}
