use crate::prelude::{PhysicsError, PhysicsResult};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Water viscosity (N·s/m²).
pub const WATER_VISCOSITY: f64 = 3.38e-6;
/// Emitted acoustic frequency (kHz).
pub const FREQUENCY_KHZ: f64 = 614.4;
/// Fresh-water density (kg/m³).
pub const WATER_DENSITY: f64 = 1e3;
/// Gravitational acceleration (m/s²).
pub const GRAVITY: f64 = 9.81;
/// Neper to decibel scale.
pub const NEPER_SCALE: f64 = 8.687;
/// Relaxation-frequency scale, Hz per kelvin term.
pub const KELVIN_SCALE: f64 = 21.9e6;
/// Pressure scale factor from USGS TM 3-C5.
pub const PRESSURE_SCALE: f64 = 6.54e-4;
/// Transmit pulse length (m); equals the bin size for the Finger Lakes deployments.
pub const TRANSMIT_LENGTH: f64 = 1.0;
/// Beam angle from the transducer head (degrees).
pub const BEAM_ANGLE_DEG: f64 = 20.0;
/// Transducer area (m²).
pub const TRANSDUCER_AREA: f64 = 0.000707;
/// Blanking distance (m).
pub const BLANKING_DISTANCE: f64 = 0.5;

/// Pascal to atmosphere conversion used by the hydrostatic pressure term.
///
/// Pinned to the published reference value; not re-derived here.
pub const PASCAL_TO_ATMOSPHERE: f64 = 0.00000987;

/// Immutable physical constants threaded into every computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalConstants {
    /// N·s/m²
    pub water_viscosity: f64,
    /// kHz
    pub frequency_khz: f64,
    /// kg/m³
    pub water_density: f64,
    /// m/s²
    pub gravity: f64,
    /// dB per neper
    pub neper_scale: f64,
    /// Hz scale of the relaxation frequency
    pub kelvin_scale: f64,
    pub pressure_scale: f64,
    /// m
    pub transmit_length: f64,
    /// degrees
    pub beam_angle_deg: f64,
    /// m²
    pub transducer_area: f64,
    /// m
    pub blanking_distance: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            water_viscosity: WATER_VISCOSITY,
            frequency_khz: FREQUENCY_KHZ,
            water_density: WATER_DENSITY,
            gravity: GRAVITY,
            neper_scale: NEPER_SCALE,
            kelvin_scale: KELVIN_SCALE,
            pressure_scale: PRESSURE_SCALE,
            transmit_length: TRANSMIT_LENGTH,
            beam_angle_deg: BEAM_ANGLE_DEG,
            transducer_area: TRANSDUCER_AREA,
            blanking_distance: BLANKING_DISTANCE,
        }
    }
}

impl PhysicalConstants {
    /// Default constants bound once for the whole process.
    pub fn shared() -> &'static PhysicalConstants {
        static SHARED: OnceLock<PhysicalConstants> = OnceLock::new();
        SHARED.get_or_init(PhysicalConstants::default)
    }

    /// Checks every field against the domain its formulas require.
    pub fn validate(&self) -> PhysicsResult<()> {
        let fields = [
            ("water_viscosity", self.water_viscosity),
            ("frequency_khz", self.frequency_khz),
            ("water_density", self.water_density),
            ("gravity", self.gravity),
            ("neper_scale", self.neper_scale),
            ("kelvin_scale", self.kelvin_scale),
            ("pressure_scale", self.pressure_scale),
            ("transmit_length", self.transmit_length),
            ("beam_angle_deg", self.beam_angle_deg),
            ("transducer_area", self.transducer_area),
            ("blanking_distance", self.blanking_distance),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(PhysicsError::Configuration(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }

        let strictly_positive = [
            ("water_viscosity", self.water_viscosity),
            ("frequency_khz", self.frequency_khz),
            ("water_density", self.water_density),
            ("gravity", self.gravity),
            ("neper_scale", self.neper_scale),
            ("kelvin_scale", self.kelvin_scale),
            ("transmit_length", self.transmit_length),
            ("transducer_area", self.transducer_area),
        ];
        if let Some((name, value)) = strictly_positive.iter().find(|(_, value)| *value <= 0.0) {
            return Err(PhysicsError::Configuration(format!(
                "{} must be positive, got {}",
                name, value
            )));
        }

        if self.pressure_scale < 0.0 {
            return Err(PhysicsError::Configuration(format!(
                "pressure_scale must not be negative, got {}",
                self.pressure_scale
            )));
        }
        if self.blanking_distance < 0.0 {
            return Err(PhysicsError::Configuration(format!(
                "blanking_distance must not be negative, got {}",
                self.blanking_distance
            )));
        }
        if !(0.0..90.0).contains(&self.beam_angle_deg) {
            return Err(PhysicsError::Configuration(format!(
                "beam_angle_deg must lie in [0, 90), got {}",
                self.beam_angle_deg
            )));
        }
        Ok(())
    }

    /// Returns the constants if they pass [`validate`](Self::validate).
    pub fn validated(self) -> PhysicsResult<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Collected water-absorption constant: neper · viscosity · F² / kelvin.
    pub fn beta(&self) -> f64 {
        self.neper_scale * self.water_viscosity * self.frequency_khz.powi(2) / self.kelvin_scale
    }

    pub fn cosine_beam_angle(&self) -> f64 {
        self.beam_angle_deg.to_radians().cos()
    }

    /// Pulse-length correction 10·log10(L / cos θ), in dB.
    pub fn geometry_correction(&self) -> f64 {
        10.0 * (self.transmit_length / self.cosine_beam_angle()).log10()
    }
}
