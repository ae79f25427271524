pub mod decibel;
pub mod polynomial;
pub mod stats;

pub use decibel::Decibel;
pub use polynomial::Polynomial;
pub use stats::StatsHelper;
