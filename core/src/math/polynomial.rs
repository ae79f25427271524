pub struct Polynomial;

impl Polynomial {
    /// Evaluates `c[0] + c[1]·x + c[2]·x² + …` with Horner's scheme.
    pub fn horner(coefficients: &[f64], x: f64) -> f64 {
        coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &coefficient| acc * x + coefficient)
    }
}
