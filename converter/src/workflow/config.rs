use crate::generator::profile::GeneratorConfig;
use adcpcore::PhysicalConstants;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub constants: PhysicalConstants,
    pub parallel: bool,
    pub generator: GeneratorConfig,
}

impl WorkflowConfig {
    /// Reads a YAML workflow and validates its constants before any sample runs.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        config
            .constants
            .validate()
            .with_context(|| format!("validating constants in {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn with_overrides(
        mut self,
        frequency_khz: Option<f64>,
        beam_angle_deg: Option<f64>,
    ) -> Self {
        if let Some(frequency_khz) = frequency_khz {
            self.constants.frequency_khz = frequency_khz;
        }
        if let Some(beam_angle_deg) = beam_angle_deg {
            self.constants.beam_angle_deg = beam_angle_deg;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_load_reads_yaml_subset() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"parallel: true\nconstants:\n  transmit_length: 0.5\ngenerator:\n  bins: 6\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert!(cfg.parallel);
        assert_eq!(cfg.constants.transmit_length, 0.5);
        assert_eq!(cfg.constants.frequency_khz, 614.4);
        assert_eq!(cfg.generator.bins, 6);
    }

    #[test]
    fn config_load_rejects_invalid_constants() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"constants:\n  frequency_khz: 0.0\n").unwrap();
        let path = temp.into_temp_path();
        let err = WorkflowConfig::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("frequency_khz"));
    }

    #[test]
    fn cli_overrides_replace_loaded_values() {
        let cfg = WorkflowConfig::default().with_overrides(None, Some(25.0));
        assert_eq!(cfg.constants.beam_angle_deg, 25.0);
        assert_eq!(cfg.constants.frequency_khz, 614.4);
    }

    #[test]
    fn demo_workflow_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../demos/workflow.yaml");
        let cfg = WorkflowConfig::load(path).unwrap();
        assert!(cfg.parallel);
        assert_eq!(cfg.generator.ensembles, 288);
        assert_eq!(cfg.constants, PhysicalConstants::default());
    }
}
