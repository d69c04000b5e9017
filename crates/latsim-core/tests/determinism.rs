use latsim_abstract::{ComponentConfig, ComputeConfig, DatabaseConfig, Mm1Config, NetworkConfig};
use latsim_core::{Component, LatencyModel, Mm1Model, Topology, simulate_mm1};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn route_topology() -> Topology {
    let hops = [
        ComponentConfig::Network(NetworkConfig {
            mean_latency: 0.035,
            stddev: 0.006,
            packet_loss_rate: 0.01,
        }),
        ComponentConfig::Compute(ComputeConfig {
            warm_latency: 0.008,
            warm_stddev: None,
            cold_start_latency: 0.250,
            cold_start_stddev: None,
            cold_start_probability: 0.05,
        }),
        ComponentConfig::Database(DatabaseConfig {
            mean_latency: 0.004,
            stddev: 0.002,
        }),
        ComponentConfig::Network(NetworkConfig {
            mean_latency: 0.035,
            stddev: 0.006,
            packet_loss_rate: 0.01,
        }),
    ];
    hops.iter()
        .map(Component::from_config)
        .collect::<Result<Topology, _>>()
        .unwrap()
}

#[test]
fn same_seed_same_mm1_result() {
    let config = Mm1Config {
        request_count: 4000,
        ..Default::default()
    };
    let a = simulate_mm1(&config, &mut StdRng::seed_from_u64(77)).unwrap();
    let b = simulate_mm1(&config, &mut StdRng::seed_from_u64(77)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn different_seeds_diverge() {
    let config = Mm1Config {
        request_count: 4000,
        ..Default::default()
    };
    let a = simulate_mm1(&config, &mut StdRng::seed_from_u64(1)).unwrap();
    let b = simulate_mm1(&config, &mut StdRng::seed_from_u64(2)).unwrap();
    assert_ne!(a.percentiles, b.percentiles);
}

#[test]
fn same_seed_same_topology_samples() {
    let topology = route_topology();
    let a = topology.sample_latencies(2000, &mut StdRng::seed_from_u64(5));
    let b = topology.sample_latencies(2000, &mut StdRng::seed_from_u64(5));
    assert_eq!(a, b);
}

#[test]
fn independent_models_do_not_share_randomness() {
    let topology = route_topology();
    let queue = Mm1Model::new(Mm1Config::default()).unwrap();

    let alone = topology.summarize(1000, &mut StdRng::seed_from_u64(10)).unwrap();

    let mut queue_rng = StdRng::seed_from_u64(99);
    let _ = queue.summarize(1000, &mut queue_rng).unwrap();
    let after_queue = topology.summarize(1000, &mut StdRng::seed_from_u64(10)).unwrap();

    assert_eq!(alone, after_queue);
}

#[test]
fn cold_starts_dominate_the_tail() {
    let topology = route_topology();
    let result = topology.simulate(10_000, &mut StdRng::seed_from_u64(3));
    // warm path is ~82 ms, cold path ~324 ms, 5% of requests are cold
    assert!(result.percentiles.p50 < 0.120);
    assert!(result.percentiles.p99 > 0.200);
}
