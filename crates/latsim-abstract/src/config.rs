use serde::{Deserialize, Serialize};

/// Parameters of a single-server FIFO queue with Poisson arrivals and
/// exponential service times. Rates are in requests per second.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mm1Config {
    pub arrival_rate: f64,
    pub service_rate: f64,
    pub request_count: usize,
    pub seed: u64,
}

impl Default for Mm1Config {
    fn default() -> Self {
        Self {
            arrival_rate: 800.0,
            service_rate: 1000.0,
            request_count: 5000,
            seed: 0,
        }
    }
}

/// Partial M/M/1 configuration, applied field by field over a base config.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Mm1Override {
    pub arrival_rate: Option<f64>,
    pub service_rate: Option<f64>,
    pub request_count: Option<usize>,
    pub seed: Option<u64>,
}

impl Mm1Override {
    pub fn apply_to(&self, config: &mut Mm1Config) {
        if let Some(v) = self.arrival_rate {
            config.arrival_rate = v;
        }
        if let Some(v) = self.service_rate {
            config.service_rate = v;
        }
        if let Some(v) = self.request_count {
            config.request_count = v;
        }
        if let Some(v) = self.seed {
            config.seed = v;
        }
    }
}

/// One network hop. All latencies are in seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkConfig {
    pub mean_latency: f64,
    pub stddev: f64,
    /// Probability that an attempt is lost and must be repeated, in [0, 1).
    #[serde(default)]
    pub packet_loss_rate: f64,
}

/// A serverless function with a warm and a cold latency mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComputeConfig {
    pub warm_latency: f64,
    /// Defaults to 10% of `warm_latency`.
    #[serde(default)]
    pub warm_stddev: Option<f64>,
    pub cold_start_latency: f64,
    /// Defaults to 20% of `cold_start_latency`.
    #[serde(default)]
    pub cold_start_stddev: Option<f64>,
    pub cold_start_probability: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatabaseConfig {
    pub mean_latency: f64,
    pub stddev: f64,
}

/// Configuration of one hop in a topology.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComponentConfig {
    Network(NetworkConfig),
    Compute(ComputeConfig),
    Database(DatabaseConfig),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_only_touches_present_fields() {
        let mut config = Mm1Config::default();
        let patch = Mm1Override {
            arrival_rate: Some(500.0),
            seed: Some(7),
            ..Default::default()
        };
        patch.apply_to(&mut config);

        assert_eq!(config.arrival_rate, 500.0);
        assert_eq!(config.service_rate, 1000.0);
        assert_eq!(config.request_count, 5000);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn component_config_is_tagged_by_type() {
        let json = r#"{"type":"network","mean_latency":0.1,"stddev":0.01}"#;
        let parsed: ComponentConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed,
            ComponentConfig::Network(NetworkConfig {
                mean_latency: 0.1,
                stddev: 0.01,
                packet_loss_rate: 0.0,
            })
        );
    }

    #[test]
    fn compute_spreads_are_optional() {
        let json = r#"{"type":"compute","warm_latency":0.01,"cold_start_latency":0.3,"cold_start_probability":0.1}"#;
        let ComponentConfig::Compute(compute) = serde_json::from_str::<ComponentConfig>(json).unwrap() else {
            panic!("expected compute config");
        };
        assert_eq!(compute.warm_stddev, None);
        assert_eq!(compute.cold_start_stddev, None);
    }
}
