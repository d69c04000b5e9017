//! A common face for the two simulation strategies, so one can be checked
//! against the other.

use crate::error::Result;
use crate::mm1;
use crate::queueing;
use crate::stats::Percentiles;
use crate::topology::Topology;
use latsim_abstract::Mm1Config;
use rand::RngCore;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatencySummary {
    #[serde(flatten)]
    pub percentiles: Percentiles,
    pub sample_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilization: Option<f64>,
}

pub trait LatencyModel {
    fn label(&self) -> String;

    /// Simulates `requests` requests and returns each one's latency in seconds.
    fn latencies(&self, requests: usize, rng: &mut dyn RngCore) -> Result<Vec<f64>>;

    fn utilization(&self) -> Option<f64> {
        None
    }

    fn summarize(&self, requests: usize, rng: &mut dyn RngCore) -> Result<LatencySummary> {
        let samples = self.latencies(requests, rng)?;
        Ok(LatencySummary {
            percentiles: Percentiles::from_samples(&samples),
            sample_count: requests,
            utilization: self.utilization(),
        })
    }
}

/// M/M/1 queue parameters viewed as a latency model. The request count given
/// to `latencies` replaces `Mm1Config::request_count`.
#[derive(Debug, Clone)]
pub struct Mm1Model {
    config: Mm1Config,
}

impl Mm1Model {
    /// Validates the rates up front so a model can never be unstable.
    pub fn new(config: Mm1Config) -> Result<Self> {
        queueing::utilization(config.arrival_rate, config.service_rate)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Mm1Config {
        &self.config
    }

    /// Closed-form p50/p95/p99 for these rates.
    pub fn theoretical(&self) -> Result<Percentiles> {
        let (lambda, mu) = (self.config.arrival_rate, self.config.service_rate);
        Ok(Percentiles {
            p50: queueing::percentile_latency(lambda, mu, 0.5)?,
            p95: queueing::percentile_latency(lambda, mu, 0.95)?,
            p99: queueing::percentile_latency(lambda, mu, 0.99)?,
        })
    }
}

impl LatencyModel for Mm1Model {
    fn label(&self) -> String {
        format!(
            "M/M/1 (lambda={}/s, mu={}/s)",
            self.config.arrival_rate, self.config.service_rate
        )
    }

    fn latencies(&self, requests: usize, rng: &mut dyn RngCore) -> Result<Vec<f64>> {
        let config = Mm1Config {
            request_count: requests,
            ..self.config.clone()
        };
        Ok(mm1::run_latencies(&config, rng))
    }

    fn utilization(&self) -> Option<f64> {
        Some(self.config.arrival_rate / self.config.service_rate)
    }
}

impl LatencyModel for Topology {
    fn label(&self) -> String {
        self.component_names().join(" -> ")
    }

    fn latencies(&self, requests: usize, rng: &mut dyn RngCore) -> Result<Vec<f64>> {
        Ok(self.sample_latencies(requests, rng))
    }
}
