use crate::workflow::runner::WorkflowResult;
use adcpcore::interface::{BackscatterTable, ConvertedTimeSeries};
use adcpcore::math::StatsHelper;
use adcpcore::telemetry::MetricsSnapshot;
use adcpcore::PhysicalConstants;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Backscatter statistics for one depth bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthSummary {
    pub depth: f64,
    pub mean_db: Option<f64>,
    pub min_db: Option<f64>,
    pub max_db: Option<f64>,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamReport {
    pub profile: Vec<DepthSummary>,
    pub table: BackscatterTable,
}

impl BeamReport {
    pub fn from_table(table: BackscatterTable) -> Self {
        let profile = table
            .depths
            .iter()
            .enumerate()
            .map(|(bin, &depth)| {
                let column = table.column(bin);
                DepthSummary {
                    depth,
                    mean_db: StatsHelper::mean(&column),
                    min_db: StatsHelper::min(&column),
                    max_db: StatsHelper::max(&column),
                    failed: column.iter().filter(|value| value.is_nan()).count(),
                }
            })
            .collect();
        Self { profile, table }
    }
}

/// JSON report written back for the table layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    pub constants: PhysicalConstants,
    pub parallel: bool,
    pub conversion_metrics: MetricsSnapshot,
    pub backscatter_metrics: MetricsSnapshot,
    pub time_series: ConvertedTimeSeries,
    pub beams: BTreeMap<String, BeamReport>,
}

impl ConversionReport {
    pub fn new(constants: PhysicalConstants, parallel: bool, result: WorkflowResult) -> Self {
        let beams = result
            .backscatter
            .into_iter()
            .map(|(name, table)| (name, BeamReport::from_table(table)))
            .collect();
        Self {
            constants,
            parallel,
            conversion_metrics: result.conversion_metrics,
            backscatter_metrics: result.backscatter_metrics,
            time_series: result.converted,
            beams,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "ensembles={} beams={} cells={} failed_cells={} failed_ensembles={}",
            self.time_series.time.len(),
            self.beams.len(),
            self.backscatter_metrics.processed,
            self.backscatter_metrics.failed,
            self.conversion_metrics.failed
        )
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path_ref = path.as_ref();
        if let Some(parent) = path_ref.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating report directory {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("serializing conversion report")?;
        fs::write(path_ref, json)
            .with_context(|| format!("writing conversion report {}", path_ref.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adcpcore::interface::CellFailure;
    use adcpcore::PhysicsError;
    use ndarray::array;

    fn table() -> BackscatterTable {
        BackscatterTable {
            time: vec!["t0".into(), "t1".into()],
            depths: vec![1.61, 2.61],
            values: array![[40.0, 42.0], [44.0, f64::NAN]],
            failures: vec![CellFailure {
                row: 1,
                depth: 2.61,
                error: PhysicsError::InvalidInput("ambient temperature is zero".into()),
            }],
        }
    }

    #[test]
    fn beam_report_summarizes_each_depth() {
        let report = BeamReport::from_table(table());
        assert_eq!(report.profile[0].mean_db, Some(42.0));
        assert_eq!(report.profile[1].max_db, Some(42.0));
        assert_eq!(report.profile[1].failed, 1);
    }

    #[test]
    fn report_saves_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.json");
        let report = ConversionReport {
            constants: PhysicalConstants::default(),
            parallel: false,
            conversion_metrics: MetricsSnapshot::default(),
            backscatter_metrics: MetricsSnapshot {
                processed: 4,
                failed: 1,
            },
            time_series: ConvertedTimeSeries {
                time: vec!["t0".into(), "t1".into()],
                electronics: Vec::new(),
                transmit: Vec::new(),
            },
            beams: BTreeMap::from([("beam1".to_string(), BeamReport::from_table(table()))]),
        };
        report.save(&path).unwrap();
        let saved: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["backscatter_metrics"]["failed"], 1);
        assert!(report.summary().contains("failed_cells=1"));
    }
}
