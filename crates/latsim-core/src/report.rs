use crate::model::LatencySummary;
use crate::stats::Percentiles;
use serde::Serialize;

/// Serializable record of one finished run, written by `--trace-out`.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub model: String,
    pub components: Vec<String>,
    pub seed: u64,
    pub result: LatencySummary,
    /// Closed-form percentiles, when the model has them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theoretical: Option<Percentiles>,
    /// Sum of per-hop expected latencies, for topologies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_mean: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_flat_percentiles() {
        let report = RunReport {
            model: "Network".to_string(),
            components: vec!["Network".to_string()],
            seed: 1,
            result: LatencySummary {
                percentiles: Percentiles {
                    p50: 0.1,
                    p95: 0.2,
                    p99: 0.3,
                },
                sample_count: 10,
                utilization: None,
            },
            theoretical: None,
            expected_mean: Some(0.1),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["result"]["p95"], 0.2);
        assert_eq!(value["result"]["sample_count"], 10);
        assert!(value["result"].get("utilization").is_none());
        assert!(value.get("theoretical").is_none());
    }
}
