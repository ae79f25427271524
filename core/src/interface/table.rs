use crate::physics::TransmitReading;
use crate::prelude::{PhysicsError, RowOutcome, StageError, StageResult};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Ensemble time series aligned by row index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesTable {
    pub time: Vec<String>,
    #[serde(alias = "temp")]
    pub temperature: Vec<f64>,
    #[serde(alias = "ambient_T")]
    pub ambient_temperature: Vec<f64>,
    #[serde(alias = "attitude_T")]
    pub attitude_temperature: Vec<f64>,
    #[serde(alias = "xmit_i")]
    pub transmit_current: Vec<f64>,
    #[serde(alias = "xmit_v")]
    pub transmit_voltage: Vec<f64>,
}

impl TimeSeriesTable {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Every column must carry one entry per time label.
    pub fn validate(&self) -> StageResult<()> {
        let rows = self.len();
        let columns = [
            ("temperature", self.temperature.len()),
            ("ambient_temperature", self.ambient_temperature.len()),
            ("attitude_temperature", self.attitude_temperature.len()),
            ("transmit_current", self.transmit_current.len()),
            ("transmit_voltage", self.transmit_voltage.len()),
        ];
        match columns.iter().find(|(_, len)| *len != rows) {
            Some((name, len)) => Err(StageError::InvalidInput(format!(
                "time series column {} has {} rows, expected {}",
                name, len, rows
            ))),
            None => Ok(()),
        }
    }
}

/// Raw echo amplitude, one row per ensemble and one column per depth bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmplitudeTable {
    pub time: Vec<String>,
    pub depths: Vec<f64>,
    pub counts: Array2<f64>,
}

impl AmplitudeTable {
    pub fn new(time: Vec<String>, depths: Vec<f64>, counts: Array2<f64>) -> StageResult<Self> {
        let table = Self {
            time,
            depths,
            counts,
        };
        table.validate()?;
        Ok(table)
    }

    /// Builds the table from row-major nested vectors.
    pub fn from_rows(
        time: Vec<String>,
        depths: Vec<f64>,
        rows: Vec<Vec<f64>>,
    ) -> StageResult<Self> {
        let width = depths.len();
        if let Some(index) = rows.iter().position(|row| row.len() != width) {
            return Err(StageError::InvalidInput(format!(
                "amplitude row {} has {} bins, expected {}",
                index,
                rows[index].len(),
                width
            )));
        }
        let height = rows.len();
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let counts = Array2::from_shape_vec((height, width), flat)
            .map_err(|err| StageError::InvalidInput(format!("amplitude shape: {}", err)))?;
        Self::new(time, depths, counts)
    }

    pub fn validate(&self) -> StageResult<()> {
        let (rows, bins) = self.counts.dim();
        if rows != self.time.len() {
            return Err(StageError::InvalidInput(format!(
                "amplitude table has {} rows but {} time labels",
                rows,
                self.time.len()
            )));
        }
        if bins != self.depths.len() {
            return Err(StageError::InvalidInput(format!(
                "amplitude table has {} bins but {} depths",
                bins,
                self.depths.len()
            )));
        }
        Ok(())
    }
}

/// Electronics temperature and echo-intensity scale for one ensemble.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElectronicsReading {
    pub electronics_temperature: f64,
    pub amp_scale_factor: f64,
}

/// Converted time series; both columns align with `time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedTimeSeries {
    pub time: Vec<String>,
    pub electronics: Vec<RowOutcome<ElectronicsReading>>,
    pub transmit: Vec<RowOutcome<TransmitReading>>,
}

impl ConvertedTimeSeries {
    pub fn failed_rows(&self) -> usize {
        self.electronics
            .iter()
            .zip(&self.transmit)
            .filter(|(electronics, transmit)| !electronics.is_ok() || !transmit.is_ok())
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellFailure {
    pub row: usize,
    pub depth: f64,
    pub error: PhysicsError,
}

/// Measured backscatter in dB, same shape as the source amplitude table.
///
/// Cells that failed hold NaN and are each listed in `failures`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackscatterTable {
    pub time: Vec<String>,
    pub depths: Vec<f64>,
    pub values: Array2<f64>,
    pub failures: Vec<CellFailure>,
}

impl BackscatterTable {
    pub fn column(&self, bin: usize) -> Vec<f64> {
        self.values.column(bin).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_series_length_mismatch_is_rejected() {
        let table = TimeSeriesTable {
            time: vec!["t0".into(), "t1".into()],
            temperature: vec![20.0, 20.1],
            ambient_temperature: vec![23.0, 23.0],
            attitude_temperature: vec![23.0],
            transmit_current: vec![1000.0, 1000.0],
            transmit_voltage: vec![1000.0, 1000.0],
        };
        let err = table.validate().unwrap_err();
        assert!(err.to_string().contains("attitude_temperature"));
    }

    #[test]
    fn time_series_accepts_instrument_column_names() {
        let json = r#"{"time":["t0"],"temp":[20.0],"ambient_T":[23.0],"attitude_T":[23.0],"xmit_i":[1000.0],"xmit_v":[1000.0]}"#;
        let table: TimeSeriesTable = serde_json::from_str(json).unwrap();
        assert!(table.validate().is_ok());
        assert_eq!(table.temperature, vec![20.0]);
    }

    #[test]
    fn amplitude_rows_build_row_major_table() {
        let table = AmplitudeTable::from_rows(
            vec!["t0".into(), "t1".into()],
            vec![1.61, 2.61, 3.61],
            vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]],
        )
        .unwrap();
        assert_eq!(table.counts[[1, 0]], 4.0);
        assert_eq!(table.counts.column(2).to_vec(), vec![3.0, 6.0]);
    }

    #[test]
    fn ragged_amplitude_rows_are_rejected() {
        let result = AmplitudeTable::from_rows(
            vec!["t0".into(), "t1".into()],
            vec![1.61, 2.61],
            vec![vec![1.0, 2.0], vec![4.0]],
        );
        assert!(matches!(result, Err(StageError::InvalidInput(_))));
    }
}
