pub mod calibration;
pub mod config;
pub mod scenario;

pub use calibration::{
    CalibrationData, ComputeCalibration, DatabaseCalibration, DirectConnectCalibration,
    LatencyReduction, MeanStddev, NetworkCalibration, PercentileTriple, VpnCalibration,
};
pub use config::{
    ComponentConfig, ComputeConfig, DatabaseConfig, Mm1Config, Mm1Override, NetworkConfig,
};
pub use scenario::{LatencyAssertion, LatencyScenario, ScenarioModel};
