pub struct StatsHelper;

impl StatsHelper {
    /// Mean of the finite samples, `None` when there are none.
    pub fn mean(samples: &[f64]) -> Option<f64> {
        let (sum, count) = samples
            .iter()
            .filter(|v| v.is_finite())
            .fold((0.0, 0usize), |(sum, count), &v| (sum + v, count + 1));
        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }

    pub fn min(samples: &[f64]) -> Option<f64> {
        samples
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .reduce(f64::min)
    }

    pub fn max(samples: &[f64]) -> Option<f64> {
        samples
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .reduce(f64::max)
    }
}
