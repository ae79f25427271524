//! Workhorse thermistor counts to degrees Celsius.

use crate::math::Polynomial;

/// Thermistor polynomial, ascending order in raw counts.
pub const THERMISTOR_COEFFICIENTS: [f64; 4] = [
    9.82697464e1,
    -5.86074151382e-3,
    1.60433886495e-7,
    -2.32924716883e-12,
];

/// Offset applied to the Workhorse polynomial, °C.
pub const DEFAULT_THERMISTOR_OFFSET: f64 = -87.0;

pub fn thermistor_temperature(counts: f64, offset: f64) -> f64 {
    offset + Polynomial::horner(&THERMISTOR_COEFFICIENTS, counts)
}

/// Offset recovered from a paired measured temperature and raw count reading.
pub fn thermistor_offset(measured_temperature: f64, counts: f64) -> f64 {
    measured_temperature - Polynomial::horner(&THERMISTOR_COEFFICIENTS, counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_counts_give_offset_plus_constant_term() {
        assert_relative_eq!(
            thermistor_temperature(0.0, DEFAULT_THERMISTOR_OFFSET),
            11.2697464,
            epsilon = 1e-9
        );
    }

    #[test]
    fn temperature_falls_as_counts_rise() {
        let warm = thermistor_temperature(5000.0, DEFAULT_THERMISTOR_OFFSET);
        let cold = thermistor_temperature(10000.0, DEFAULT_THERMISTOR_OFFSET);
        assert!(cold < warm);
        assert_relative_eq!(warm, -14.314269902828741, epsilon = 1e-9);
    }

    #[test]
    fn offset_inverts_temperature() {
        let counts = 7321.0;
        let temperature = thermistor_temperature(counts, -85.5);
        assert_relative_eq!(thermistor_offset(temperature, counts), -85.5, epsilon = 1e-9);
    }
}
