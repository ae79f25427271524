use serde::{Deserialize, Serialize};

/// One (time, depth-bin) reading handed over by the table layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleInput {
    /// Bin-centre depth, m.
    pub cell_depth: f64,
    /// Raw echo amplitude, counts.
    pub amplitude: f64,
    /// Measured water temperature, °C.
    pub measured_temperature: f64,
    pub attitude_temperature: f64,
    pub ambient_temperature: f64,
}

/// Raw transmit current and voltage counts for one ensemble.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransmitSample {
    pub current_counts: f64,
    pub voltage_counts: f64,
}
