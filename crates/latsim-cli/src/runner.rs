use anyhow::{Context, Result, anyhow};
use latsim_abstract::{LatencyAssertion, LatencyScenario, Mm1Config, ScenarioModel};
use latsim_core::{Component, LatencyModel, Mm1Model, RunReport, Topology};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub fn run_mm1(config: &Mm1Config) -> Result<RunReport> {
    let model = Mm1Model::new(config.clone()).context("Invalid M/M/1 configuration")?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let result = model.summarize(config.request_count, &mut rng)?;
    Ok(RunReport {
        model: model.label(),
        components: Vec::new(),
        seed: config.seed,
        result,
        theoretical: Some(model.theoretical()?),
        expected_mean: None,
    })
}

pub fn run_topology(topology: &Topology, requests: usize, seed: u64) -> Result<RunReport> {
    let mut rng = StdRng::seed_from_u64(seed);
    let result = topology.summarize(requests, &mut rng)?;
    Ok(RunReport {
        model: topology.label(),
        components: topology
            .component_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        seed,
        result,
        theoretical: None,
        expected_mean: Some(topology.expected_latency()),
    })
}

pub fn load_scenario(path: &Path) -> Result<LatencyScenario> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
    let scenario: LatencyScenario =
        toml::from_str(&content).context("Failed to parse scenario file")?;
    Ok(scenario)
}

/// Runs the scenario's model and checks every assertion against the result.
pub fn run_scenario(scenario: &LatencyScenario) -> Result<RunReport> {
    info!("Running Scenario: {}", scenario.name);
    info!("Description: {}", scenario.description);

    let report = match &scenario.model {
        ScenarioModel::Mm1(overrides) => {
            let mut config = Mm1Config::default();
            overrides.apply_to(&mut config);
            run_mm1(&config)?
        }
        ScenarioModel::Topology {
            requests,
            seed,
            hops,
        } => {
            let topology = hops
                .iter()
                .map(Component::from_config)
                .collect::<latsim_core::Result<Topology>>()
                .context("Invalid topology in scenario")?;
            run_topology(&topology, *requests, *seed)?
        }
    };

    for assertion in &scenario.assertions {
        if let Err(err) = check_assertion(assertion, &report) {
            warn!("{err}");
            return Err(err);
        }
    }

    info!("Scenario '{}' passed", scenario.name);
    Ok(report)
}

fn check_assertion(assertion: &LatencyAssertion, report: &RunReport) -> Result<()> {
    let p = report.result.percentiles;
    let to_ms = |secs: f64| secs * 1000.0;

    match assertion {
        LatencyAssertion::MaxP50 { ms } => check_max("p50", to_ms(p.p50), *ms),
        LatencyAssertion::MaxP95 { ms } => check_max("p95", to_ms(p.p95), *ms),
        LatencyAssertion::MaxP99 { ms } => check_max("p99", to_ms(p.p99), *ms),
        LatencyAssertion::MinP50 { ms } => {
            // NaN fails this comparison too
            if to_ms(p.p50) >= *ms {
                Ok(())
            } else {
                Err(anyhow!(
                    "Assertion Failed: p50 {:.3}ms is below expected min {}ms",
                    to_ms(p.p50),
                    ms
                ))
            }
        }
        LatencyAssertion::WithinTheory { tolerance } => {
            let theory = report
                .theoretical
                .ok_or_else(|| anyhow!("within_theory only applies to mm1 scenarios"))?;
            for (name, simulated, expected) in [
                ("p50", p.p50, theory.p50),
                ("p95", p.p95, theory.p95),
                ("p99", p.p99, theory.p99),
            ] {
                let error = (simulated - expected).abs() / expected;
                if !(error <= *tolerance) {
                    return Err(anyhow!(
                        "Assertion Failed: {} {:.3}ms is {:.1}% from theory {:.3}ms (tolerance {:.1}%)",
                        name,
                        to_ms(simulated),
                        error * 100.0,
                        to_ms(expected),
                        tolerance * 100.0
                    ));
                }
            }
            Ok(())
        }
        LatencyAssertion::OrderedPercentiles => {
            if p.p50 <= p.p95 && p.p95 <= p.p99 {
                Ok(())
            } else {
                Err(anyhow!(
                    "Assertion Failed: percentiles out of order (p50={}, p95={}, p99={})",
                    p.p50,
                    p.p95,
                    p.p99
                ))
            }
        }
    }
}

fn check_max(name: &str, actual_ms: f64, max_ms: f64) -> Result<()> {
    if actual_ms <= max_ms {
        Ok(())
    } else {
        Err(anyhow!(
            "Assertion Failed: {} {:.3}ms exceeds expected max {}ms",
            name,
            actual_ms,
            max_ms
        ))
    }
}
