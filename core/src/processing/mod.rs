pub mod backscatter;
pub mod batch;
pub mod conversion;

pub use backscatter::{BackscatterInput, BackscatterStage};
pub use batch::BatchProcessor;
pub use conversion::ConversionStage;
