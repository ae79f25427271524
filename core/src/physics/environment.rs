//! Depth- and temperature-dependent propagation terms for one measurement.

use crate::constants::{PhysicalConstants, PASCAL_TO_ATMOSPHERE};
use crate::math::Polynomial;
use crate::prelude::{ensure_finite, PhysicsError, PhysicsResult};

/// Sound-speed polynomial in temperature (°C), ascending order, salinity ignored.
pub const SOUND_SPEED_COEFFICIENTS: [f64; 6] = [
    1.402385e3,
    5.038813,
    -5.799136e-2,
    3.287156e-4,
    -1.398845e-6,
    2.787860e-9,
];

/// Kelvin offset used by the relaxation-frequency and amplitude-scale terms.
pub const KELVIN_OFFSET: f64 = 273.0;

/// Exponent numerator of the relaxation frequency.
pub const RELAXATION_EXPONENT: f64 = 1520.0;

/// Propagation quantities for a single (depth, temperature) pair.
///
/// Every accessor is a pure function of the two inputs and the borrowed
/// constants table; nothing is cached.
#[derive(Debug, Clone, Copy)]
pub struct PhysicalEnvironment<'a> {
    constants: &'a PhysicalConstants,
    cell_depth: f64,
    temperature: f64,
}

impl<'a> PhysicalEnvironment<'a> {
    pub fn new(
        constants: &'a PhysicalConstants,
        cell_depth: f64,
        temperature: f64,
    ) -> PhysicsResult<Self> {
        let cell_depth = ensure_finite("cell depth", cell_depth)?;
        let temperature = ensure_finite("temperature", temperature)?;
        if cell_depth < 0.0 {
            return Err(PhysicsError::InvalidInput(format!(
                "cell depth must not be negative, got {}",
                cell_depth
            )));
        }
        if temperature <= -KELVIN_OFFSET {
            return Err(PhysicsError::InvalidInput(format!(
                "temperature {} °C is below the relaxation-frequency pole",
                temperature
            )));
        }
        Ok(Self {
            constants,
            cell_depth,
            temperature,
        })
    }

    pub fn constants(&self) -> &'a PhysicalConstants {
        self.constants
    }

    pub fn cell_depth(&self) -> f64 {
        self.cell_depth
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn cosine_beam_angle(&self) -> f64 {
        self.constants.cosine_beam_angle()
    }

    /// Hydrostatic pressure term in atmosphere-like units.
    pub fn pressure(&self) -> f64 {
        let c = self.constants;
        let pascals = c.water_density * c.gravity * self.cell_depth;
        1.0 - c.pressure_scale * pascals * PASCAL_TO_ATMOSPHERE
    }

    /// Sound speed in m/s.
    pub fn sound_speed(&self) -> f64 {
        Polynomial::horner(&SOUND_SPEED_COEFFICIENTS, self.temperature)
    }

    /// Distance along the beam from the transducer to the middle of the bin.
    pub fn slant_range(&self) -> f64 {
        (self.cell_depth + 0.5 * self.constants.transmit_length) / self.cosine_beam_angle()
    }

    pub fn wavelength(&self) -> f64 {
        self.sound_speed() / self.constants.frequency_khz
    }

    pub fn rayleigh_distance(&self) -> f64 {
        self.constants.transducer_area / self.wavelength()
    }

    /// Near-field correction ψ, never below unity.
    pub fn near_field_correction(&self) -> f64 {
        let r = self.slant_range();
        let r_n = self.rayleigh_distance();
        let x = 1.35 * r / r_n;
        let y = 2.5 * r / r_n;
        let psi = 1.0 + 1.0 / (x + y.powf(3.2));
        debug_assert!(psi >= 1.0, "near-field correction {} below unity", psi);
        psi
    }

    pub fn relaxation_frequency(&self) -> f64 {
        let exponent = -RELAXATION_EXPONENT / (self.temperature + KELVIN_OFFSET);
        self.constants.kelvin_scale * 10f64.powf(exponent)
    }

    /// Water absorption coefficient, pressure corrected.
    pub fn water_absorption_coefficient(&self) -> f64 {
        let c = self.constants;
        let alpha = c.neper_scale * c.water_viscosity * c.frequency_khz.powi(2)
            / self.relaxation_frequency();
        alpha * (1.0 - c.pressure_scale * self.pressure())
    }
}
