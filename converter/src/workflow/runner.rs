use crate::workflow::config::WorkflowConfig;
use crate::workflow::input::EnsembleDocument;
use adcpcore::interface::{BackscatterTable, ConvertedTimeSeries};
use adcpcore::prelude::ProcessingStage;
use adcpcore::processing::{BackscatterInput, BackscatterStage, ConversionStage};
use adcpcore::telemetry::MetricsSnapshot;
use anyhow::Context;
use std::collections::BTreeMap;
use std::sync::Arc;

pub struct WorkflowResult {
    pub converted: ConvertedTimeSeries,
    pub backscatter: BTreeMap<String, BackscatterTable>,
    pub conversion_metrics: MetricsSnapshot,
    pub backscatter_metrics: MetricsSnapshot,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, document: &EnsembleDocument) -> anyhow::Result<WorkflowResult> {
        let constants = &self.config.constants;

        let mut conversion_stage = ConversionStage::new(self.config.parallel);
        conversion_stage
            .initialize(constants)
            .context("initializing conversion stage")?;
        let converted = conversion_stage
            .execute(&document.time_series)
            .context("executing conversion stage")?;
        let conversion_metrics = conversion_stage.metrics();
        conversion_stage.cleanup();

        let time_series = Arc::new(document.time_series.clone());
        let tables = document.amplitude_tables()?;

        let mut backscatter_stage = BackscatterStage::new(self.config.parallel);
        backscatter_stage
            .initialize(constants)
            .context("initializing backscatter stage")?;
        let mut backscatter = BTreeMap::new();
        for (beam, amplitude) in tables {
            let table = backscatter_stage
                .execute(&BackscatterInput {
                    amplitude,
                    time_series: Arc::clone(&time_series),
                })
                .with_context(|| format!("executing backscatter stage for {}", beam))?;
            backscatter.insert(beam, table);
        }
        let backscatter_metrics = backscatter_stage.metrics();
        backscatter_stage.cleanup();

        Ok(WorkflowResult {
            converted,
            backscatter,
            conversion_metrics,
            backscatter_metrics,
        })
    }
}
