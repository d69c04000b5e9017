//! Random samplers. Each takes the uniform source explicitly so runs are
//! reproducible under a seeded generator.

use rand::Rng;
use rand::distr::{Distribution, Open01};
use std::f64::consts::PI;

/// Draws from Exp(`rate`) by inversion. Always strictly positive.
pub fn sample_exponential<R: Rng + ?Sized>(rate: f64, rng: &mut R) -> f64 {
    let u: f64 = Open01.sample(rng);
    -u.ln() / rate
}

/// Draws from N(`mean`, `stddev`²) with the Box–Muller transform.
///
/// The result is unbounded; callers that need a positive latency clamp it.
pub fn sample_normal<R: Rng + ?Sized>(mean: f64, stddev: f64, rng: &mut R) -> f64 {
    let u1: f64 = Open01.sample(rng);
    let u2: f64 = Open01.sample(rng);
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    mean + stddev * z
}

/// Returns `high` with probability `high_probability`, otherwise `low`.
pub fn sample_bimodal<R: Rng + ?Sized>(
    low: f64,
    high: f64,
    high_probability: f64,
    rng: &mut R,
) -> f64 {
    if bernoulli(high_probability, rng) {
        high
    } else {
        low
    }
}

/// True with probability `p`. `p <= 0` never fires, `p >= 1` always does.
pub(crate) fn bernoulli<R: Rng + ?Sized>(p: f64, rng: &mut R) -> bool {
    rng.random::<f64>() < p
}
