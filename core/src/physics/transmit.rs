use crate::interface::TransmitSample;
use crate::math::Decibel;
use crate::prelude::{ensure_finite, PhysicsError, PhysicsResult};
use serde::{Deserialize, Serialize};

/// Transmit current conversion, amps per count.
pub const COUNTS_TO_AMPS: f64 = 11451.0 / 1_000_000.0;
/// Transmit voltage conversion, volts per count.
pub const COUNTS_TO_VOLTS: f64 = 380667.0 / 1_000_000.0;

/// Transmit current and voltage counts, referenced to 1 W.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransmitPower {
    current_counts: f64,
    voltage_counts: f64,
}

/// Physical transmit quantities for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransmitReading {
    pub current_amps: f64,
    pub voltage_volts: f64,
    pub power_dbw: f64,
    pub power_watts: f64,
}

impl TransmitPower {
    pub fn new(current_counts: f64, voltage_counts: f64) -> Self {
        Self {
            current_counts,
            voltage_counts,
        }
    }

    pub fn current_amps(counts: f64) -> f64 {
        counts * COUNTS_TO_AMPS
    }

    pub fn voltage_volts(counts: f64) -> f64 {
        counts * COUNTS_TO_VOLTS
    }

    pub fn current(&self) -> f64 {
        Self::current_amps(self.current_counts)
    }

    pub fn voltage(&self) -> f64 {
        Self::voltage_volts(self.voltage_counts)
    }

    /// Transmitted power in dBW.
    ///
    /// A non-positive (or non-finite) current·voltage product is an error,
    /// never a NaN or -inf.
    pub fn power_dbw(&self) -> PhysicsResult<f64> {
        let watts = self.current() * self.voltage();
        if !watts.is_finite() || watts <= 0.0 {
            return Err(PhysicsError::InvalidInput(format!(
                "transmit current·voltage must be positive, got {}",
                watts
            )));
        }
        Ok(Decibel::from_power_ratio(watts))
    }

    pub fn power_watts(&self) -> PhysicsResult<f64> {
        Ok(Decibel::to_power_ratio(self.power_dbw()?))
    }

    pub fn power_dbm(&self) -> PhysicsResult<f64> {
        Ok(Decibel::dbw_to_dbm(self.power_dbw()?))
    }

    pub fn reading(&self) -> PhysicsResult<TransmitReading> {
        let power_dbw = self.power_dbw()?;
        Ok(TransmitReading {
            current_amps: self.current(),
            voltage_volts: self.voltage(),
            power_dbw,
            power_watts: ensure_finite("transmit power", Decibel::to_power_ratio(power_dbw))?,
        })
    }
}

impl From<TransmitSample> for TransmitPower {
    fn from(sample: TransmitSample) -> Self {
        Self::new(sample.current_counts, sample.voltage_counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn thousand_counts_convert_to_physical_units() {
        let xmit = TransmitPower::new(1000.0, 1000.0);
        assert_relative_eq!(xmit.current(), 11.451, max_relative = 1e-12);
        assert_relative_eq!(xmit.voltage(), 380.667, max_relative = 1e-12);
        let dbw = xmit.power_dbw().unwrap();
        assert_relative_eq!(dbw, 36.39388644151653, max_relative = 1e-12);
        assert!((dbw - 36.37).abs() < 0.05);
    }

    #[test]
    fn watts_round_trip_through_dbw() {
        let xmit = TransmitPower::new(742.0, 118.0);
        let dbw = xmit.power_dbw().unwrap();
        let watts = xmit.power_watts().unwrap();
        assert_relative_eq!(10.0 * watts.log10(), dbw, max_relative = 1e-9);
        assert_relative_eq!(watts, xmit.current() * xmit.voltage(), max_relative = 1e-9);
    }

    #[test]
    fn zero_current_is_invalid_input() {
        let xmit = TransmitPower::new(0.0, 1000.0);
        assert!(matches!(xmit.power_dbw(), Err(PhysicsError::InvalidInput(_))));
        assert!(xmit.reading().is_err());
        assert!(TransmitPower::new(f64::NAN, 1.0).power_watts().is_err());
    }

    #[test]
    fn dbm_is_offset_by_thirty() {
        let xmit = TransmitPower::from(TransmitSample {
            current_counts: 1000.0,
            voltage_counts: 1000.0,
        });
        assert_relative_eq!(
            xmit.power_dbm().unwrap(),
            xmit.power_dbw().unwrap() + 30.0,
            max_relative = 1e-12
        );
    }
}
