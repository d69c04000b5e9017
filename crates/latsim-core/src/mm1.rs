//! Event-driven simulation of a single FIFO server.

use crate::error::Result;
use crate::event_queue::{EventKind, EventQueue, SimulationEvent};
use crate::probability::sample_exponential;
use crate::queueing;
use crate::stats::Percentiles;
use latsim_abstract::Mm1Config;
use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, trace};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationResult {
    #[serde(flatten)]
    pub percentiles: Percentiles,
    pub sample_count: usize,
    pub utilization: f64,
}

/// Runs `config.request_count` requests through an M/M/1 queue and reduces
/// their time in system to percentiles.
///
/// Fails before sampling anything when λ ≥ μ or either rate is not positive.
/// `config.seed` is ignored; randomness comes only from `rng`.
pub fn simulate_mm1<R: Rng + ?Sized>(config: &Mm1Config, rng: &mut R) -> Result<SimulationResult> {
    let utilization = queueing::utilization(config.arrival_rate, config.service_rate)?;
    let latencies = run_latencies(config, rng);

    let result = SimulationResult {
        percentiles: Percentiles::from_samples(&latencies),
        sample_count: config.request_count,
        utilization,
    };
    info!(
        "M/M/1 run complete: {} requests, rho={:.3}, p50={:.6}s p95={:.6}s p99={:.6}s",
        result.sample_count,
        result.utilization,
        result.percentiles.p50,
        result.percentiles.p95,
        result.percentiles.p99
    );
    Ok(result)
}

/// Raw time-in-system samples, in departure order. Rates must already be validated.
pub(crate) fn run_latencies<R: Rng + ?Sized>(config: &Mm1Config, rng: &mut R) -> Vec<f64> {
    let mut run = Mm1Run::new(config, rng);
    run.run_until_complete();
    run.latencies
}

/// State owned by one simulation run. Nothing here outlives `run_latencies`.
struct Mm1Run<'a, R: ?Sized> {
    clock: f64,
    event_queue: EventQueue,
    // request_id -> arrival time, for requests that have not departed yet
    in_flight: HashMap<u64, f64>,
    server_busy_until: f64,
    latencies: Vec<f64>,
    processed_events: usize,

    arrival_rate: f64,
    service_rate: f64,
    request_count: usize,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> Mm1Run<'a, R> {
    fn new(config: &Mm1Config, rng: &'a mut R) -> Self {
        Self {
            clock: 0.0,
            event_queue: EventQueue::with_capacity(config.request_count * 2),
            in_flight: HashMap::with_capacity(config.request_count),
            server_busy_until: 0.0,
            latencies: Vec::with_capacity(config.request_count),
            processed_events: 0,
            arrival_rate: config.arrival_rate,
            service_rate: config.service_rate,
            request_count: config.request_count,
            rng,
        }
    }

    /// Pre-generates every arrival as a Poisson process starting at t = 0.
    fn seed_arrivals(&mut self) {
        let mut arrival_clock = 0.0;
        for request_id in 0..self.request_count as u64 {
            arrival_clock += sample_exponential(self.arrival_rate, &mut *self.rng);
            self.event_queue
                .push(SimulationEvent::arrival(arrival_clock, request_id));
        }
        debug!(
            "Seeded {} arrivals, last at {:.6}s",
            self.request_count, arrival_clock
        );
    }

    /// Process the next event. Returns false once the queue is drained.
    fn step(&mut self) -> bool {
        let event = match self.event_queue.pop() {
            Some(e) => e,
            None => return false,
        };

        self.clock = event.time;
        self.processed_events += 1;
        trace!(
            "t={:.6} {:?} request={}",
            self.clock, event.kind, event.request_id
        );

        match event.kind {
            EventKind::Arrival => {
                self.in_flight.insert(event.request_id, self.clock);

                let service_start = self.clock.max(self.server_busy_until);
                let service_time = sample_exponential(self.service_rate, &mut *self.rng);
                let departure = service_start + service_time;
                self.server_busy_until = departure;

                self.event_queue
                    .push(SimulationEvent::departure(departure, event.request_id));
            }
            EventKind::Departure => {
                // Every departure was scheduled by the matching arrival.
                if let Some(arrived_at) = self.in_flight.remove(&event.request_id) {
                    self.latencies.push(self.clock - arrived_at);
                }
            }
        }
        true
    }

    fn run_until_complete(&mut self) {
        self.seed_arrivals();
        while self.step() {}

        debug_assert!(self.in_flight.is_empty());
        debug_assert_eq!(self.processed_events, 2 * self.request_count);
        debug!(
            "Drained {} events, final clock {:.6}s",
            self.processed_events, self.clock
        );
    }
}
