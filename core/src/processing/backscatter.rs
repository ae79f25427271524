use crate::constants::PhysicalConstants;
use crate::interface::{AmplitudeTable, BackscatterTable, CellFailure, TimeSeriesTable};
use crate::prelude::{ProcessingStage, RowOutcome, StageError, StageResult};
use crate::processing::batch::BatchProcessor;
use crate::telemetry::{LogManager, MetricsRecorder, MetricsSnapshot};
use ndarray::Array2;
use std::sync::Arc;

/// One beam's amplitude table with the ensemble time series it aligns to.
#[derive(Debug, Clone)]
pub struct BackscatterInput {
    pub amplitude: AmplitudeTable,
    pub time_series: Arc<TimeSeriesTable>,
}

/// Builds a measured-backscatter table, one depth column at a time.
pub struct BackscatterStage {
    constants: Option<PhysicalConstants>,
    parallel: bool,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl BackscatterStage {
    pub fn new(parallel: bool) -> Self {
        Self {
            constants: None,
            parallel,
            logger: LogManager::new("backscatter"),
            metrics: MetricsRecorder::new(),
        }
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl ProcessingStage for BackscatterStage {
    type Input = BackscatterInput;
    type Output = BackscatterTable;

    fn initialize(&mut self, constants: &PhysicalConstants) -> StageResult<()> {
        constants.validate()?;
        self.constants = Some(constants.clone());
        Ok(())
    }

    fn execute(&mut self, input: &BackscatterInput) -> StageResult<BackscatterTable> {
        let constants = self
            .constants
            .as_ref()
            .ok_or_else(|| StageError::Internal("stage not initialized".into()))?;

        let amplitude = &input.amplitude;
        let series = input.time_series.as_ref();
        amplitude.validate()?;
        if amplitude.time.len() != series.len() {
            return Err(StageError::InvalidInput(format!(
                "amplitude table has {} ensembles, time series has {}",
                amplitude.time.len(),
                series.len()
            )));
        }

        let batch = BatchProcessor::new(constants)?.with_parallel(self.parallel);
        let mut values = Array2::from_elem(amplitude.counts.dim(), f64::NAN);
        let mut failures = Vec::new();

        for (bin, &depth) in amplitude.depths.iter().enumerate() {
            let column = amplitude.counts.column(bin).to_vec();
            let outcomes = batch.backscatter_column(depth, &column, series)?;
            for (row, outcome) in outcomes.into_iter().enumerate() {
                match outcome {
                    RowOutcome::Ok { value } => values[[row, bin]] = value,
                    RowOutcome::Failed { error } => {
                        failures.push(CellFailure { row, depth, error })
                    }
                }
            }
        }

        let cells = amplitude.counts.len();
        self.metrics.record_batch(cells, failures.len());
        self.logger.rejected(failures.len(), cells);
        self.logger.record(&format!(
            "backscatter table {} ensembles x {} bins",
            amplitude.time.len(),
            amplitude.depths.len()
        ));

        Ok(BackscatterTable {
            time: amplitude.time.clone(),
            depths: amplitude.depths.clone(),
            values,
            failures,
        })
    }

    fn cleanup(&mut self) {
        self.constants = None;
    }
}
