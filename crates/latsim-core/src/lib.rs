pub mod components;
pub mod error;
pub mod event_queue;
pub mod mm1;
pub mod model;
pub mod probability;
pub mod queueing;
pub mod report;
pub mod stats;
pub mod topology;

pub use components::{Component, Compute, Database, Network};
pub use error::{Result, SimError};
pub use event_queue::{EventKind, EventQueue, SimulationEvent};
pub use mm1::{SimulationResult, simulate_mm1};
pub use model::{LatencyModel, LatencySummary, Mm1Model};
pub use probability::{sample_bimodal, sample_exponential, sample_normal};
pub use queueing::{average_queue_length, average_wait, percentile_latency, utilization};
pub use report::RunReport;
pub use stats::{Percentiles, percentile, percentiles};
pub use topology::{Topology, TopologyResult};
