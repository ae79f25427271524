use adcpcore::interface::{AmplitudeTable, TimeSeriesTable};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Raw amplitude for one beam: bin-centre depths and one row per ensemble.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BeamAmplitude {
    pub depths: Vec<f64>,
    pub rows: Vec<Vec<f64>>,
}

/// Already-parsed ensemble columns handed over by the table layer.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EnsembleDocument {
    pub time_series: TimeSeriesTable,
    #[serde(default)]
    pub beams: BTreeMap<String, BeamAmplitude>,
}

impl EnsembleDocument {
    /// Reads JSON, or YAML when the extension says so.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading ensemble document {}", path_ref.display()))?;
        let is_yaml = matches!(
            path_ref.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        );
        let document: EnsembleDocument = if is_yaml {
            serde_yaml::from_str(&contents)
                .with_context(|| format!("parsing ensemble document {}", path_ref.display()))?
        } else {
            serde_json::from_str(&contents)
                .with_context(|| format!("parsing ensemble document {}", path_ref.display()))?
        };
        Ok(document)
    }

    pub fn amplitude_tables(&self) -> anyhow::Result<BTreeMap<String, AmplitudeTable>> {
        self.beams
            .iter()
            .map(|(name, beam)| {
                let table = AmplitudeTable::from_rows(
                    self.time_series.time.clone(),
                    beam.depths.clone(),
                    beam.rows.clone(),
                )
                .with_context(|| format!("building amplitude table for {}", name))?;
                Ok((name.clone(), table))
            })
            .collect()
    }
}
