/// Decibel conversions shared by the sonar equation and transmit power.
pub struct Decibel;

impl Decibel {
    /// 10·log10 of a power ratio.
    pub fn from_power_ratio(ratio: f64) -> f64 {
        10.0 * ratio.log10()
    }

    /// 20·log10 of an amplitude (or range) ratio.
    pub fn from_amplitude_ratio(ratio: f64) -> f64 {
        20.0 * ratio.log10()
    }

    pub fn to_power_ratio(db: f64) -> f64 {
        10f64.powf(db / 10.0)
    }

    pub fn dbw_to_dbm(dbw: f64) -> f64 {
        dbw + 30.0
    }
}
