pub mod sample;
pub mod table;

pub use sample::{SampleInput, TransmitSample};
pub use table::{
    AmplitudeTable, BackscatterTable, CellFailure, ConvertedTimeSeries, ElectronicsReading,
    TimeSeriesTable,
};
