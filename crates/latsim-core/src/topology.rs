use crate::components::Component;
use crate::stats::Percentiles;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TopologyResult {
    #[serde(flatten)]
    pub percentiles: Percentiles,
    pub sample_count: usize,
}

/// Hops traversed in order by every request. End-to-end latency is the sum of
/// one independent draw per hop.
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    components: Vec<Component>,
}

impl Topology {
    pub fn new(components: Vec<Component>) -> Self {
        debug!(
            "Topology built: {}",
            components
                .iter()
                .map(Component::name)
                .collect::<Vec<_>>()
                .join(" -> ")
        );
        Self { components }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// One end-to-end latency in seconds.
    pub fn process_once<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.components.iter().map(|c| c.sample(rng)).sum()
    }

    pub fn sample_latencies<R: Rng + ?Sized>(&self, requests: usize, rng: &mut R) -> Vec<f64> {
        (0..requests).map(|_| self.process_once(rng)).collect()
    }

    pub fn simulate<R: Rng + ?Sized>(&self, requests: usize, rng: &mut R) -> TopologyResult {
        let latencies = self.sample_latencies(requests, rng);
        let result = TopologyResult {
            percentiles: Percentiles::from_samples(&latencies),
            sample_count: requests,
        };
        info!(
            "Topology run complete: {} requests, p50={:.6}s p95={:.6}s p99={:.6}s",
            requests, result.percentiles.p50, result.percentiles.p95, result.percentiles.p99
        );
        result
    }

    pub fn component_names(&self) -> Vec<&'static str> {
        self.components.iter().map(Component::name).collect()
    }

    /// Sum of per-hop expected latencies.
    pub fn expected_latency(&self) -> f64 {
        self.components.iter().map(Component::expected_latency).sum()
    }
}

impl FromIterator<Component> for Topology {
    fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
        Topology::new(iter.into_iter().collect())
    }
}
