//! Percentile reduction of latency samples.

use serde::Serialize;

/// Linearly interpolated order statistic (the R-7 rule).
///
/// `p` is clamped to `[0, 1]`. An empty sample set yields `NaN`, which callers
/// must read as "no data".
pub fn percentile(samples: &[f64], p: f64) -> f64 {
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentile_sorted(&sorted, p)
}

fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let index = p.clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = index.floor() as usize;
            let upper = index.ceil() as usize;
            if lower == upper {
                sorted[lower]
            } else {
                let fraction = index - lower as f64;
                sorted[lower] + fraction * (sorted[upper] - sorted[lower])
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Percentiles {
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
}

impl Percentiles {
    /// Sorts once and reads all three percentiles from the same order.
    pub fn from_samples(samples: &[f64]) -> Self {
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self {
            p50: percentile_sorted(&sorted, 0.5),
            p95: percentile_sorted(&sorted, 0.95),
            p99: percentile_sorted(&sorted, 0.99),
        }
    }

    pub fn is_defined(&self) -> bool {
        !(self.p50.is_nan() || self.p95.is_nan() || self.p99.is_nan())
    }
}

pub fn percentiles(samples: &[f64]) -> Percentiles {
    Percentiles::from_samples(samples)
}

pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return f64::NAN;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_of_one_to_ten_interpolates() {
        let data: Vec<f64> = (1..=10).map(f64::from).collect();
        assert_eq!(percentile(&data, 0.5), 5.5);
    }

    #[test]
    fn exact_index_needs_no_interpolation() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&data, 0.5), 3.0);
        assert_eq!(percentile(&data, 0.0), 1.0);
        assert_eq!(percentile(&data, 1.0), 5.0);
    }

    #[test]
    fn single_sample_is_every_percentile() {
        for p in [0.0, 0.25, 0.5, 0.99, 1.0] {
            assert_eq!(percentile(&[42.0], p), 42.0);
        }
    }

    #[test]
    fn empty_samples_are_undefined() {
        assert!(percentile(&[], 0.5).is_nan());
        let triple = percentiles(&[]);
        assert!(!triple.is_defined());
    }

    #[test]
    fn two_samples_interpolate_halfway() {
        assert_eq!(percentile(&[10.0, 20.0], 0.5), 15.0);
    }

    #[test]
    fn input_order_does_not_matter() {
        let data = [9.0, 1.0, 7.0, 3.0, 5.0, 2.0, 8.0, 4.0, 6.0, 10.0];
        assert_eq!(percentile(&data, 0.5), 5.5);
    }

    #[test]
    fn triple_matches_individual_calls() {
        let data: Vec<f64> = (1..=200).map(|i| f64::from(i) * 0.5).collect();
        let triple = percentiles(&data);
        assert_eq!(triple.p50, percentile(&data, 0.5));
        assert_eq!(triple.p95, percentile(&data, 0.95));
        assert_eq!(triple.p99, percentile(&data, 0.99));
        assert!(triple.p50 <= triple.p95 && triple.p95 <= triple.p99);
    }

    #[test]
    fn p99_of_hundred_points() {
        let data: Vec<f64> = (1..=100).map(f64::from).collect();
        // index = 0.99 * 99 = 98.01
        let expected = 99.0 + 0.01 * (100.0 - 99.0);
        assert!((percentile(&data, 0.99) - expected).abs() < 1e-9);
    }
}
