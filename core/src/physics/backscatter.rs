//! Measured backscatter following the Teledyne WinRiver sonar equation.
//!
//! `Mb = Sl + 20·log10(R·ψ) + 2·αw·R − 10·log10(L / cos θ)` where the source
//! level `Sl` is the raw echo amplitude scaled by the electronics-temperature
//! dependent count-to-dB factor.

use crate::interface::SampleInput;
use crate::math::Decibel;
#[cfg(feature = "experimental")]
use crate::physics::environment::RELAXATION_EXPONENT;
use crate::physics::environment::{PhysicalEnvironment, KELVIN_OFFSET};
use crate::prelude::{ensure_finite, PhysicsError, PhysicsResult};
use crate::PhysicalConstants;
use serde::{Deserialize, Serialize};

/// Numerator of the echo-intensity scale, dB·K per count.
pub const AMPLITUDE_SCALE_NUMERATOR: f64 = 127.3;

/// Every term of one backscatter evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BackscatterResult {
    pub amp_scale_factor: f64,
    pub electronics_temperature: f64,
    pub source_level: f64,
    pub beam_spreading_loss: f64,
    pub water_absorption_loss: f64,
    pub correction_term: f64,
    pub measured_backscatter: f64,
}

/// Raw amplitude plus companion temperatures, evaluated in one environment.
#[derive(Debug, Clone, Copy)]
pub struct BackscatterModel<'a> {
    environment: PhysicalEnvironment<'a>,
    amplitude: f64,
    attitude_temperature: f64,
    ambient_temperature: f64,
}

impl<'a> BackscatterModel<'a> {
    /// The environment's temperature is the measured water temperature.
    pub fn new(
        environment: PhysicalEnvironment<'a>,
        amplitude: f64,
        attitude_temperature: f64,
        ambient_temperature: f64,
    ) -> PhysicsResult<Self> {
        Ok(Self {
            environment,
            amplitude: ensure_finite("amplitude", amplitude)?,
            attitude_temperature: ensure_finite("attitude temperature", attitude_temperature)?,
            ambient_temperature: ensure_finite("ambient temperature", ambient_temperature)?,
        })
    }

    pub fn from_sample(
        constants: &'a PhysicalConstants,
        sample: &SampleInput,
    ) -> PhysicsResult<Self> {
        let environment =
            PhysicalEnvironment::new(constants, sample.cell_depth, sample.measured_temperature)?;
        Self::new(
            environment,
            sample.amplitude,
            sample.attitude_temperature,
            sample.ambient_temperature,
        )
    }

    pub fn environment(&self) -> &PhysicalEnvironment<'a> {
        &self.environment
    }

    /// Proportional electronics-temperature estimate `(Tc / Tamb) · Tatt`.
    ///
    /// Zero ambient temperature is rejected rather than clamped.
    pub fn attitude_temperature(
        measured_temperature: f64,
        ambient_temperature: f64,
        attitude_temperature: f64,
    ) -> PhysicsResult<f64> {
        if ambient_temperature == 0.0 {
            return Err(PhysicsError::InvalidInput(
                "ambient temperature is zero in the attitude-temperature ratio".into(),
            ));
        }
        ensure_finite(
            "electronics temperature",
            measured_temperature / ambient_temperature * attitude_temperature,
        )
    }

    /// Echo-intensity scale in dB per count; 0.43 dB/count is nominal near 23 °C.
    pub fn amplitude_scale_factor(electronics_temperature: f64) -> PhysicsResult<f64> {
        ensure_finite(
            "amplitude scale factor",
            AMPLITUDE_SCALE_NUMERATOR / (electronics_temperature + KELVIN_OFFSET),
        )
    }

    pub fn source_level(amp_scale_factor: f64, raw_amplitude: f64) -> f64 {
        amp_scale_factor * raw_amplitude
    }

    pub fn electronics_temperature(&self) -> PhysicsResult<f64> {
        Self::attitude_temperature(
            self.environment.temperature(),
            self.ambient_temperature,
            self.attitude_temperature,
        )
    }

    pub fn beam_spreading_loss(&self) -> PhysicsResult<f64> {
        let spread = self.environment.slant_range() * self.environment.near_field_correction();
        if spread <= 0.0 {
            return Err(PhysicsError::InvalidInput(format!(
                "beam spreading argument must be positive, got {}",
                spread
            )));
        }
        Ok(Decibel::from_amplitude_ratio(spread))
    }

    pub fn water_absorption_loss(&self) -> f64 {
        2.0 * self.environment.water_absorption_coefficient() * self.environment.slant_range()
    }

    pub fn geometry_correction(&self) -> f64 {
        self.environment.constants().geometry_correction()
    }

    pub fn measured_backscatter(&self) -> PhysicsResult<f64> {
        Ok(self.compute()?.measured_backscatter)
    }

    /// Evaluates every term and the final measured backscatter in dB.
    pub fn compute(&self) -> PhysicsResult<BackscatterResult> {
        let electronics_temperature = self.electronics_temperature()?;
        let amp_scale_factor = Self::amplitude_scale_factor(electronics_temperature)?;
        let source_level = Self::source_level(amp_scale_factor, self.amplitude);
        let beam_spreading_loss = self.beam_spreading_loss()?;
        let water_absorption_loss =
            ensure_finite("water absorption loss", self.water_absorption_loss())?;
        let correction_term = self.geometry_correction();
        let measured_backscatter = ensure_finite(
            "measured backscatter",
            source_level + beam_spreading_loss + water_absorption_loss - correction_term,
        )?;

        Ok(BackscatterResult {
            amp_scale_factor,
            electronics_temperature,
            source_level,
            beam_spreading_loss,
            water_absorption_loss,
            correction_term,
            measured_backscatter,
        })
    }

    /// Unstable inversion of the sonar equation for water temperature.
    ///
    /// The log arguments go negative for realistic profiles; an empirical
    /// fit is the supported route.
    #[cfg(feature = "experimental")]
    pub fn temperature_from_backscatter(&self) -> PhysicsResult<f64> {
        let result = self.compute()?;
        let range = self.environment.slant_range();
        let pressure = self.environment.pressure();
        let beta = self.environment.constants().beta();

        let spreading = 10.0 * range.log10();
        let delta = ((result.source_level - result.measured_backscatter) / 4.0).abs();
        let numerator_arg = delta - spreading;
        let denominator_arg = range * beta * pressure;
        if numerator_arg <= 0.0 || denominator_arg <= 0.0 {
            return Err(PhysicsError::Divergent(format!(
                "log argument not positive ({}, {})",
                numerator_arg, denominator_arg
            )));
        }

        let a = numerator_arg.log10();
        let b = denominator_arg.log10();
        let temperature = RELAXATION_EXPONENT / (a - b) - KELVIN_OFFSET;
        if temperature.is_finite() {
            Ok(temperature)
        } else {
            Err(PhysicsError::Divergent(format!(
                "inverse temperature is not finite ({})",
                temperature
            )))
        }
    }
}
