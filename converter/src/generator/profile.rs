use crate::workflow::input::{BeamAmplitude, EnsembleDocument};
use adcpcore::interface::TimeSeriesTable;
use adcpcore::PhysicalConstants;
use anyhow::Context;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::PI;

/// Name of the beam-averaged amplitude table.
pub const AVERAGE_BEAM: &str = "avg";

/// Configuration for generating synthetic ensembles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub ensembles: usize,
    pub bins: usize,
    /// Transducer face depth below the surface, m.
    pub transducer_depth: f64,
    /// Ensembles per daily temperature cycle.
    pub ensembles_per_day: usize,
    pub base_temperature: f64,
    pub temperature_swing: f64,
    pub ambient_temperature: f64,
    /// Echo amplitude at the first bin, counts.
    pub amplitude_peak: f64,
    /// Amplitude decay per metre of depth, counts.
    pub amplitude_decay: f64,
    pub transmit_counts: f64,
    pub noise: f64,
    pub seed: u64,
    pub beams: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            ensembles: 144,
            bins: 12,
            transducer_depth: 0.61,
            ensembles_per_day: 144,
            base_temperature: 18.0,
            temperature_swing: 2.5,
            ambient_temperature: 23.0465,
            amplitude_peak: 140.0,
            amplitude_decay: 4.0,
            transmit_counts: 1000.0,
            noise: 1.5,
            seed: 0,
            beams: ["beam1", "beam2", "beam3", "beam4"]
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

impl GeneratorConfig {
    fn normalized_ensembles(&self) -> usize {
        self.ensembles.max(1)
    }

    fn normalized_bins(&self) -> usize {
        self.bins.max(1)
    }

    fn jitter(&self, rng: &mut StdRng) -> f64 {
        if self.noise > 0.0 {
            rng.gen_range(-self.noise..self.noise)
        } else {
            0.0
        }
    }
}

/// Bin-centre depths: transducer depth, blanking, then one transmit length per bin.
pub fn bin_depths(config: &GeneratorConfig, constants: &PhysicalConstants) -> Vec<f64> {
    (0..config.normalized_bins())
        .map(|bin| {
            config.transducer_depth
                + constants.blanking_distance
                + constants.transmit_length * (bin as f64 + 0.5)
        })
        .collect()
}

fn build_time_series(config: &GeneratorConfig, rng: &mut StdRng) -> TimeSeriesTable {
    let ensembles = config.normalized_ensembles();
    let per_day = config.ensembles_per_day.max(1) as f64;
    let mut table = TimeSeriesTable::default();

    for index in 0..ensembles {
        let phase = 2.0 * PI * index as f64 / per_day;
        let temperature = config.base_temperature + config.temperature_swing * phase.sin();
        table.time.push(format!("ENS{:05}", index));
        table.temperature.push(temperature + 0.1 * config.jitter(rng));
        table.ambient_temperature.push(config.ambient_temperature);
        table
            .attitude_temperature
            .push(config.ambient_temperature + 0.05 * config.jitter(rng));
        table
            .transmit_current
            .push(config.transmit_counts + config.jitter(rng));
        table
            .transmit_voltage
            .push(config.transmit_counts + config.jitter(rng));
    }
    table
}

/// Builds a deterministic ensemble document, including a beam-averaged table.
pub fn build_ensemble_document(
    config: &GeneratorConfig,
    constants: &PhysicalConstants,
) -> anyhow::Result<EnsembleDocument> {
    let ensembles = config.normalized_ensembles();
    let depths = bin_depths(config, constants);
    let cells = ensembles
        .checked_mul(depths.len())
        .context("overflow computing cell count for generator")?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let time_series = build_time_series(config, &mut rng);

    let mut beams = BTreeMap::new();
    let mut sum = vec![vec![0.0; depths.len()]; ensembles];
    for (beam_index, name) in config.beams.iter().enumerate() {
        let offset = beam_index as f64 * 0.5;
        let mut rows = Vec::with_capacity(ensembles);
        for (ensemble, totals) in sum.iter_mut().enumerate() {
            let warmth = time_series.temperature[ensemble] - config.base_temperature;
            let row: Vec<f64> = depths
                .iter()
                .map(|&depth| {
                    let counts = config.amplitude_peak - config.amplitude_decay * depth
                        + warmth
                        + offset
                        + config.jitter(&mut rng);
                    counts.clamp(0.0, 255.0).round()
                })
                .collect();
            for (total, value) in totals.iter_mut().zip(&row) {
                *total += value;
            }
            rows.push(row);
        }
        beams.insert(
            name.clone(),
            BeamAmplitude {
                depths: depths.clone(),
                rows,
            },
        );
    }

    if !config.beams.is_empty() {
        let count = config.beams.len() as f64;
        let rows: Vec<Vec<f64>> = sum
            .into_iter()
            .map(|row| row.into_iter().map(|total| total / count).collect::<Vec<f64>>())
            .collect();
        beams.insert(
            AVERAGE_BEAM.to_string(),
            BeamAmplitude {
                depths: depths.clone(),
                rows,
            },
        );
    }

    log::debug!(
        "generated {} ensembles x {} bins ({} cells per beam)",
        ensembles,
        depths.len(),
        cells
    );

    Ok(EnsembleDocument { time_series, beams })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn generator_builds_expected_shape() {
        let config = GeneratorConfig {
            ensembles: 10,
            bins: 3,
            ..Default::default()
        };
        let document = build_ensemble_document(&config, &PhysicalConstants::default()).unwrap();
        assert_eq!(document.time_series.len(), 10);
        assert!(document.time_series.validate().is_ok());
        assert_eq!(document.beams.len(), 5);
        assert_eq!(document.beams["beam1"].rows.len(), 10);
        assert_eq!(document.beams[AVERAGE_BEAM].rows[0].len(), 3);
    }

    #[test]
    fn bin_depths_start_past_blanking() {
        let depths = bin_depths(&GeneratorConfig::default(), &PhysicalConstants::default());
        assert_relative_eq!(depths[0], 1.61, epsilon = 1e-12);
        assert_relative_eq!(depths[7], 8.61, epsilon = 1e-12);
    }

    #[test]
    fn same_seed_reproduces_document() {
        let config = GeneratorConfig {
            ensembles: 8,
            bins: 4,
            seed: 42,
            ..Default::default()
        };
        let a = build_ensemble_document(&config, &PhysicalConstants::default()).unwrap();
        let b = build_ensemble_document(&config, &PhysicalConstants::default()).unwrap();
        assert_eq!(a.time_series, b.time_series);
        assert_eq!(a.beams["beam3"].rows, b.beams["beam3"].rows);
    }

    #[test]
    fn zero_noise_generator_is_noise_free() {
        let config = GeneratorConfig {
            ensembles: 2,
            bins: 2,
            noise: 0.0,
            ..Default::default()
        };
        let document = build_ensemble_document(&config, &PhysicalConstants::default()).unwrap();
        assert_eq!(document.time_series.transmit_current, vec![1000.0, 1000.0]);
    }
}
