/// Numeric tolerances for bend fitting and segment trimming.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Linear tolerance for distance comparisons (in model units)
    pub linear: f64,
    /// Angular tolerance for direction comparisons (dimensionless / radians)
    pub angular: f64,
}

impl Tolerance {
    pub const DEFAULT_LINEAR: f64 = 1e-10;
    pub const DEFAULT_ANGULAR: f64 = 1e-10;

    pub fn new(linear: f64, angular: f64) -> Self {
        Self { linear, angular }
    }

    pub fn default_precision() -> Self {
        Self {
            linear: Self::DEFAULT_LINEAR,
            angular: Self::DEFAULT_ANGULAR,
        }
    }

    pub fn loose() -> Self {
        Self {
            linear: 1e-4,
            angular: 1e-6,
        }
    }

    /// Check if two values are equal within linear tolerance
    pub fn linear_eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.linear
    }

    /// Check if a value is zero within linear tolerance
    pub fn is_zero(self, v: f64) -> bool {
        v.abs() < self.linear
    }

    /// Check if a squared distance is too small to separate two points.
    pub fn is_zero_squared(self, d2: f64) -> bool {
        d2 <= self.linear * self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_segment_epsilon() {
        let tol = Tolerance::default();
        assert_eq!(tol.linear, 1e-10);
        assert!(tol.is_zero_squared(1e-21));
        assert!(!tol.is_zero_squared(1e-19));
    }

    #[test]
    fn test_loose_preset() {
        assert!(Tolerance::loose().linear > Tolerance::default().linear);
        assert!(Tolerance::loose().linear_eq(1.0, 1.0 + 1e-7));
        assert!(!Tolerance::default().linear_eq(1.0, 1.0 + 1e-7));
    }
}
