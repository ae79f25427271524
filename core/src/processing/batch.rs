use crate::constants::PhysicalConstants;
use crate::interface::{ElectronicsReading, SampleInput, TimeSeriesTable, TransmitSample};
use crate::physics::{
    BackscatterModel, BackscatterResult, PhysicalEnvironment, TransmitPower, TransmitReading,
};
use crate::prelude::{PhysicsResult, RowOutcome, StageError, StageResult};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Element-wise application of the physics models over ordered columns.
///
/// Output always has one outcome per input row, in input order, whether or
/// not the map runs in parallel.
#[derive(Debug, Clone, Copy)]
pub struct BatchProcessor<'a> {
    constants: &'a PhysicalConstants,
    parallel: bool,
}

impl<'a> BatchProcessor<'a> {
    pub fn new(constants: &'a PhysicalConstants) -> PhysicsResult<Self> {
        constants.validate()?;
        Ok(Self {
            constants,
            parallel: false,
        })
    }

    /// Requests the rayon map; ignored unless the `parallel` feature is enabled.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn is_parallel(&self) -> bool {
        cfg!(feature = "parallel") && self.parallel
    }

    pub fn backscatter(&self, samples: &[SampleInput]) -> Vec<RowOutcome<BackscatterResult>> {
        let constants = self.constants;
        self.map_rows(samples, |sample| {
            BackscatterModel::from_sample(constants, sample)?.compute()
        })
    }

    /// Measured backscatter for one depth bin across the ensemble time series.
    pub fn backscatter_column(
        &self,
        depth: f64,
        amplitudes: &[f64],
        series: &TimeSeriesTable,
    ) -> StageResult<Vec<RowOutcome<f64>>> {
        series.validate()?;
        if amplitudes.len() != series.len() {
            return Err(StageError::InvalidInput(format!(
                "amplitude column at depth {} has {} rows, time series has {}",
                depth,
                amplitudes.len(),
                series.len()
            )));
        }

        let rows: Vec<usize> = (0..amplitudes.len()).collect();
        let constants = self.constants;
        Ok(self.map_rows(&rows, |&row| {
            let environment = PhysicalEnvironment::new(constants, depth, series.temperature[row])?;
            BackscatterModel::new(
                environment,
                amplitudes[row],
                series.attitude_temperature[row],
                series.ambient_temperature[row],
            )?
            .measured_backscatter()
        }))
    }

    pub fn electronics(
        &self,
        series: &TimeSeriesTable,
    ) -> StageResult<Vec<RowOutcome<ElectronicsReading>>> {
        series.validate()?;
        let rows: Vec<usize> = (0..series.len()).collect();
        Ok(self.map_rows(&rows, |&row| {
            let electronics_temperature = BackscatterModel::attitude_temperature(
                series.temperature[row],
                series.ambient_temperature[row],
                series.attitude_temperature[row],
            )?;
            let amp_scale_factor = BackscatterModel::amplitude_scale_factor(electronics_temperature)?;
            Ok(ElectronicsReading {
                electronics_temperature,
                amp_scale_factor,
            })
        }))
    }

    pub fn transmit(&self, samples: &[TransmitSample]) -> Vec<RowOutcome<TransmitReading>> {
        self.map_rows(samples, |&sample| TransmitPower::from(sample).reading())
    }

    #[cfg(feature = "parallel")]
    fn map_rows<I, T, F>(&self, rows: &[I], f: F) -> Vec<RowOutcome<T>>
    where
        I: Sync,
        T: Send,
        F: Fn(&I) -> PhysicsResult<T> + Sync + Send,
    {
        if self.parallel {
            rows.par_iter().map(|row| f(row).into()).collect()
        } else {
            rows.iter().map(|row| f(row).into()).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn map_rows<I, T, F>(&self, rows: &[I], f: F) -> Vec<RowOutcome<T>>
    where
        F: Fn(&I) -> PhysicsResult<T>,
    {
        rows.iter().map(|row| f(row).into()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::PhysicsError;

    fn series(ambient: Vec<f64>) -> TimeSeriesTable {
        let rows = ambient.len();
        TimeSeriesTable {
            time: (0..rows).map(|i| format!("t{}", i)).collect(),
            temperature: vec![20.0; rows],
            attitude_temperature: vec![23.0465; rows],
            ambient_temperature: ambient,
            transmit_current: vec![1000.0; rows],
            transmit_voltage: vec![1000.0; rows],
        }
    }

    #[test]
    fn failed_row_does_not_abort_siblings() {
        let batch = BatchProcessor::new(PhysicalConstants::shared()).unwrap();
        let table = series(vec![23.0465, 0.0, 23.0465]);
        let outcomes = batch
            .backscatter_column(8.61, &[100.0, 100.0, 120.0], &table)
            .unwrap();
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_ok());
        assert!(matches!(outcomes[1].error(), Some(PhysicsError::InvalidInput(_))));
        assert!(outcomes[2].value().unwrap() > outcomes[0].value().unwrap());
    }

    #[test]
    fn mismatched_column_is_rejected() {
        let batch = BatchProcessor::new(PhysicalConstants::shared()).unwrap();
        let table = series(vec![23.0465, 23.0465]);
        assert!(batch.backscatter_column(2.0, &[100.0], &table).is_err());
    }

    #[test]
    fn invalid_constants_fail_before_any_row() {
        let constants = PhysicalConstants {
            transducer_area: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            BatchProcessor::new(&constants),
            Err(PhysicsError::Configuration(_))
        ));
    }

    #[test]
    fn transmit_batch_flags_zero_counts() {
        let batch = BatchProcessor::new(PhysicalConstants::shared()).unwrap();
        let outcomes = batch.transmit(&[
            TransmitSample {
                current_counts: 1000.0,
                voltage_counts: 1000.0,
            },
            TransmitSample {
                current_counts: 0.0,
                voltage_counts: 1000.0,
            },
        ]);
        assert!(outcomes[0].is_ok());
        assert!(!outcomes[1].is_ok());
    }

    #[test]
    fn electronics_column_matches_scalar_model() {
        let batch = BatchProcessor::new(PhysicalConstants::shared()).unwrap();
        let readings = batch.electronics(&series(vec![23.0465])).unwrap();
        let reading = readings[0].value().unwrap();
        assert!((reading.amp_scale_factor - 127.3 / 293.0).abs() < 1e-9);
    }
}
