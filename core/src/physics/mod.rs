pub mod backscatter;
pub mod environment;
pub mod thermistor;
pub mod transmit;

pub use backscatter::{BackscatterModel, BackscatterResult};
pub use environment::PhysicalEnvironment;
pub use transmit::{TransmitPower, TransmitReading};
