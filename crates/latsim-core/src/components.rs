//! Per-hop latency models. Each call to `sample` is independent and touches
//! no state besides the random source.

use crate::error::{Result, check_non_negative, check_probability};
use crate::probability::{bernoulli, sample_normal};
use latsim_abstract::{ComponentConfig, ComputeConfig, DatabaseConfig, NetworkConfig};
use rand::Rng;

/// Smallest latency a single network attempt can take (0.1 ms).
pub const NETWORK_FLOOR_SECS: f64 = 0.0001;
/// Smallest latency a compute or database call can take (1 ms).
pub const SERVICE_FLOOR_SECS: f64 = 0.001;

const WARM_STDDEV_FRACTION: f64 = 0.1;
const COLD_STDDEV_FRACTION: f64 = 0.2;

fn clamped_normal<R: Rng + ?Sized>(floor: f64, mean: f64, stddev: f64, rng: &mut R) -> f64 {
    sample_normal(mean, stddev, rng).max(floor)
}

/// A network hop with Gaussian jitter. A lost attempt is retried and costs a
/// full fresh latency draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    mean_latency: f64,
    stddev: f64,
    packet_loss_rate: f64,
}

impl Network {
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        Ok(Self {
            mean_latency: check_non_negative("network.mean_latency", config.mean_latency)?,
            stddev: check_non_negative("network.stddev", config.stddev)?,
            // A loss rate of 1 would never deliver.
            packet_loss_rate: check_probability(
                "network.packet_loss_rate",
                config.packet_loss_rate,
                false,
            )?,
        })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let mut total = 0.0;
        loop {
            total += clamped_normal(NETWORK_FLOOR_SECS, self.mean_latency, self.stddev, rng);
            if !bernoulli(self.packet_loss_rate, rng) {
                return total;
            }
        }
    }

    /// Mean latency including retries, ignoring the floor.
    pub fn expected_latency(&self) -> f64 {
        self.mean_latency / (1.0 - self.packet_loss_rate)
    }
}

/// A serverless function: warm invocations are fast, a cold start is a rare
/// slow branch.
#[derive(Debug, Clone, PartialEq)]
pub struct Compute {
    warm_latency: f64,
    warm_stddev: f64,
    cold_start_latency: f64,
    cold_start_stddev: f64,
    cold_start_probability: f64,
}

impl Compute {
    pub fn new(config: &ComputeConfig) -> Result<Self> {
        let warm_latency = check_non_negative("compute.warm_latency", config.warm_latency)?;
        let cold_start_latency =
            check_non_negative("compute.cold_start_latency", config.cold_start_latency)?;
        let warm_stddev = check_non_negative(
            "compute.warm_stddev",
            config
                .warm_stddev
                .unwrap_or(warm_latency * WARM_STDDEV_FRACTION),
        )?;
        let cold_start_stddev = check_non_negative(
            "compute.cold_start_stddev",
            config
                .cold_start_stddev
                .unwrap_or(cold_start_latency * COLD_STDDEV_FRACTION),
        )?;

        Ok(Self {
            warm_latency,
            warm_stddev,
            cold_start_latency,
            cold_start_stddev,
            cold_start_probability: check_probability(
                "compute.cold_start_probability",
                config.cold_start_probability,
                true,
            )?,
        })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if bernoulli(self.cold_start_probability, rng) {
            clamped_normal(
                SERVICE_FLOOR_SECS,
                self.cold_start_latency,
                self.cold_start_stddev,
                rng,
            )
        } else {
            clamped_normal(SERVICE_FLOOR_SECS, self.warm_latency, self.warm_stddev, rng)
        }
    }

    pub fn warm_stddev(&self) -> f64 {
        self.warm_stddev
    }

    pub fn cold_start_stddev(&self) -> f64 {
        self.cold_start_stddev
    }

    pub fn expected_latency(&self) -> f64 {
        let p = self.cold_start_probability;
        (1.0 - p) * self.warm_latency + p * self.cold_start_latency
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Database {
    mean_latency: f64,
    stddev: f64,
}

impl Database {
    pub fn new(config: &DatabaseConfig) -> Result<Self> {
        Ok(Self {
            mean_latency: check_non_negative("database.mean_latency", config.mean_latency)?,
            stddev: check_non_negative("database.stddev", config.stddev)?,
        })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        clamped_normal(SERVICE_FLOOR_SECS, self.mean_latency, self.stddev, rng)
    }

    pub fn expected_latency(&self) -> f64 {
        self.mean_latency
    }
}

/// One hop of a topology.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Network(Network),
    Compute(Compute),
    Database(Database),
}

impl Component {
    pub fn from_config(config: &ComponentConfig) -> Result<Self> {
        Ok(match config {
            ComponentConfig::Network(c) => Component::Network(Network::new(c)?),
            ComponentConfig::Compute(c) => Component::Compute(Compute::new(c)?),
            ComponentConfig::Database(c) => Component::Database(Database::new(c)?),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Component::Network(_) => "Network",
            Component::Compute(_) => "Compute",
            Component::Database(_) => "Database",
        }
    }

    /// One latency draw in seconds, always strictly positive.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Component::Network(c) => c.sample(rng),
            Component::Compute(c) => c.sample(rng),
            Component::Database(c) => c.sample(rng),
        }
    }

    pub fn expected_latency(&self) -> f64 {
        match self {
            Component::Network(c) => c.expected_latency(),
            Component::Compute(c) => c.expected_latency(),
            Component::Database(c) => c.expected_latency(),
        }
    }
}

impl From<Network> for Component {
    fn from(value: Network) -> Self {
        Component::Network(value)
    }
}

impl From<Compute> for Component {
    fn from(value: Compute) -> Self {
        Component::Compute(value)
    }
}

impl From<Database> for Component {
    fn from(value: Database) -> Self {
        Component::Database(value)
    }
}
