//! Acoustic backscatter physics core for ADCP calibration.
//!
//! Raw profiler counts (echo amplitude, thermistor temperature, transmit
//! current and voltage) are converted into calibrated quantities through
//! stateless sonar-equation functions, then applied column-wise by the
//! processing stages.

pub mod constants;
pub mod interface;
pub mod math;
pub mod physics;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use constants::PhysicalConstants;
pub use physics::{BackscatterModel, BackscatterResult, PhysicalEnvironment, TransmitPower};
pub use prelude::{PhysicsError, PhysicsResult, ProcessingStage, RowOutcome};
