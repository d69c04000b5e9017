use crate::config::{ComponentConfig, Mm1Override};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct LatencyScenario {
    pub name: String,
    pub description: String,
    pub model: ScenarioModel,
    #[serde(default)]
    pub assertions: Vec<LatencyAssertion>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioModel {
    /// Event-driven single-server queue, starting from `Mm1Config::default()`.
    Mm1(Mm1Override),
    /// Hops traversed in order by every simulated request.
    Topology {
        requests: usize,
        #[serde(default)]
        seed: u64,
        hops: Vec<ComponentConfig>,
    },
}

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LatencyAssertion {
    /// Simulated p50 must not exceed `ms` milliseconds
    MaxP50 { ms: f64 },
    MaxP95 { ms: f64 },
    MaxP99 { ms: f64 },
    /// Simulated p50 must be at least `ms` milliseconds
    MinP50 { ms: f64 },
    /// Every simulated percentile is within `tolerance` (relative) of the
    /// closed-form M/M/1 value. Only meaningful for `mm1` scenarios.
    WithinTheory { tolerance: f64 },
    /// p50 <= p95 <= p99
    OrderedPercentiles,
}
