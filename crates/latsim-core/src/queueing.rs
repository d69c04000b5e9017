//! Closed-form M/M/1 results used to validate the event-driven simulator.
//!
//! λ is the arrival rate and μ the service rate, both in requests per second.
//! Every formula rejects λ ≥ μ, where the queue has no steady state.

use crate::error::{Result, SimError, check_probability, check_rate};

fn stable_rates(arrival_rate: f64, service_rate: f64) -> Result<(f64, f64)> {
    let lambda = check_rate("arrival_rate", arrival_rate)?;
    let mu = check_rate("service_rate", service_rate)?;
    if lambda >= mu {
        return Err(SimError::UnstableQueue {
            arrival_rate,
            service_rate,
        });
    }
    Ok((lambda, mu))
}

/// ρ = λ/μ
pub fn utilization(arrival_rate: f64, service_rate: f64) -> Result<f64> {
    let (lambda, mu) = stable_rates(arrival_rate, service_rate)?;
    Ok(lambda / mu)
}

/// Mean time in system, W = 1/(μ − λ).
pub fn average_wait(arrival_rate: f64, service_rate: f64) -> Result<f64> {
    let (lambda, mu) = stable_rates(arrival_rate, service_rate)?;
    Ok(1.0 / (mu - lambda))
}

/// Mean number in system, L = ρ/(1 − ρ).
pub fn average_queue_length(arrival_rate: f64, service_rate: f64) -> Result<f64> {
    let rho = utilization(arrival_rate, service_rate)?;
    Ok(rho / (1.0 - rho))
}

/// Time in system at percentile `p`: t(p) = −ln(1 − p)/(μ − λ).
///
/// Time in system is exponential with rate μ − λ, so this is its inverse CDF.
pub fn percentile_latency(arrival_rate: f64, service_rate: f64, p: f64) -> Result<f64> {
    let (lambda, mu) = stable_rates(arrival_rate, service_rate)?;
    let p = check_probability("percentile", p, false)?;
    Ok(-(1.0 - p).ln() / (mu - lambda))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(actual: f64, expected: f64, tol: f64) -> bool {
        (actual - expected).abs() < tol
    }

    #[test]
    fn utilization_is_ratio_of_rates() {
        assert!(close(utilization(800.0, 1000.0).unwrap(), 0.8, 1e-12));
        assert!(close(utilization(500.0, 1000.0).unwrap(), 0.5, 1e-12));
        assert!(close(utilization(950.0, 1000.0).unwrap(), 0.95, 1e-12));
    }

    #[test]
    fn average_wait_and_queue_length() {
        assert!(close(average_wait(800.0, 1000.0).unwrap(), 0.005, 1e-12));
        assert!(close(average_wait(500.0, 1000.0).unwrap(), 0.002, 1e-12));
        assert!(close(average_queue_length(800.0, 1000.0).unwrap(), 4.0, 1e-9));
        assert!(close(average_queue_length(500.0, 1000.0).unwrap(), 1.0, 1e-9));
    }

    #[test]
    fn percentile_latency_at_standard_points() {
        assert!(close(percentile_latency(800.0, 1000.0, 0.5).unwrap(), 0.00347, 5e-6));
        assert!(close(percentile_latency(800.0, 1000.0, 0.95).unwrap(), 0.01498, 5e-6));
        assert!(close(percentile_latency(800.0, 1000.0, 0.99).unwrap(), 0.02303, 5e-6));
    }

    #[test]
    fn busier_server_has_longer_tail() {
        let low = percentile_latency(500.0, 1000.0, 0.99).unwrap();
        let high = percentile_latency(900.0, 1000.0, 0.99).unwrap();
        assert!(high > low);
    }

    #[test]
    fn unstable_rates_are_rejected() {
        for (lambda, mu) in [(1000.0, 1000.0), (1200.0, 1000.0)] {
            let expected = SimError::UnstableQueue {
                arrival_rate: lambda,
                service_rate: mu,
            };
            assert_eq!(utilization(lambda, mu), Err(expected.clone()));
            assert_eq!(average_wait(lambda, mu), Err(expected.clone()));
            assert_eq!(average_queue_length(lambda, mu), Err(expected.clone()));
            assert_eq!(percentile_latency(lambda, mu, 0.5), Err(expected));
        }
    }

    #[test]
    fn non_positive_rates_are_rejected() {
        assert!(matches!(
            average_wait(0.0, 1000.0),
            Err(SimError::InvalidRate { name: "arrival_rate", .. })
        ));
        assert!(matches!(
            average_wait(10.0, f64::NAN),
            Err(SimError::InvalidRate { name: "service_rate", .. })
        ));
    }

    #[test]
    fn percentile_one_has_no_finite_latency() {
        assert!(matches!(
            percentile_latency(800.0, 1000.0, 1.0),
            Err(SimError::InvalidProbability { .. })
        ));
    }
}
