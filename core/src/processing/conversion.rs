use crate::constants::PhysicalConstants;
use crate::interface::{ConvertedTimeSeries, TimeSeriesTable, TransmitSample};
use crate::prelude::{ProcessingStage, StageError, StageResult};
use crate::processing::batch::BatchProcessor;
use crate::telemetry::{LogManager, MetricsRecorder, MetricsSnapshot};

/// Converts the ensemble time series into electronics and transmit quantities.
pub struct ConversionStage {
    constants: Option<PhysicalConstants>,
    parallel: bool,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl ConversionStage {
    pub fn new(parallel: bool) -> Self {
        Self {
            constants: None,
            parallel,
            logger: LogManager::new("conversion"),
            metrics: MetricsRecorder::new(),
        }
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl ProcessingStage for ConversionStage {
    type Input = TimeSeriesTable;
    type Output = ConvertedTimeSeries;

    fn initialize(&mut self, constants: &PhysicalConstants) -> StageResult<()> {
        constants.validate()?;
        self.constants = Some(constants.clone());
        Ok(())
    }

    fn execute(&mut self, input: &TimeSeriesTable) -> StageResult<ConvertedTimeSeries> {
        let constants = self
            .constants
            .as_ref()
            .ok_or_else(|| StageError::Internal("stage not initialized".into()))?;

        input.validate()?;
        let batch = BatchProcessor::new(constants)?.with_parallel(self.parallel);

        let electronics = batch.electronics(input)?;
        let samples: Vec<TransmitSample> = input
            .transmit_current
            .iter()
            .zip(&input.transmit_voltage)
            .map(|(&current_counts, &voltage_counts)| TransmitSample {
                current_counts,
                voltage_counts,
            })
            .collect();
        let transmit = batch.transmit(&samples);

        let converted = ConvertedTimeSeries {
            time: input.time.clone(),
            electronics,
            transmit,
        };

        let failed = converted.failed_rows();
        self.metrics.record_batch(input.len(), failed);
        self.logger.rejected(failed, input.len());
        self.logger
            .detail(&format!("converted {} ensembles", input.len()));

        Ok(converted)
    }

    fn cleanup(&mut self) {
        self.constants = None;
    }
}
