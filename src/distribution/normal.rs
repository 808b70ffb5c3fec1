//! Normal (Gaussian) distribution.
//!
//! # Formulas
//!
//! ```text
//! f(x) = exp(-(x - μ)² / 2σ²) / (σ √(2π))
//! F(x) = Φ((x - μ) / σ),  Φ(z) = ½ (1 + erf(z / √2))
//! ```

use serde::{Deserialize, Serialize};
use u_numflow::special;

use crate::error::{require_finite, require_positive, Result};

/// Density and cumulative probability of a continuous distribution at one
/// point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointProbability {
    /// f(x).
    pub density: f64,
    /// P(X ≤ x).
    pub cumulative: f64,
}

/// Normal distribution N(μ, σ).
///
/// # Examples
///
/// ```
/// use u_statcalc::distribution::Normal;
///
/// let n = Normal::new(100.0, 15.0).unwrap();
/// assert!((n.cdf(100.0) - 0.5).abs() < 1e-6);
/// assert!(n.pdf(85.0) < n.pdf(100.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    mean: f64,
    std_dev: f64,
}

impl Normal {
    /// Creates N(mean, std_dev).
    ///
    /// Fails with `InvalidParameter` if `std_dev ≤ 0` or either value is
    /// non-finite.
    pub fn new(mean: f64, std_dev: f64) -> Result<Self> {
        require_finite("mean", mean)?;
        require_positive("stdDev", std_dev)?;
        Ok(Self { mean, std_dev })
    }

    /// Standard normal N(0, 1).
    pub fn standard() -> Self {
        Self {
            mean: 0.0,
            std_dev: 1.0,
        }
    }

    /// Location μ.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Scale σ.
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Probability density at `x`.
    pub fn pdf(&self, x: f64) -> f64 {
        let z = (x - self.mean) / self.std_dev;
        let norm = self.std_dev * (2.0 * std::f64::consts::PI).sqrt();
        (-0.5 * z * z).exp() / norm
    }

    /// Cumulative probability P(X ≤ x).
    pub fn cdf(&self, x: f64) -> f64 {
        if x == self.mean {
            // Φ(0) is exactly ½; skip the approximation's rounding.
            return 0.5;
        }
        special::standard_normal_cdf((x - self.mean) / self.std_dev).clamp(0.0, 1.0)
    }

    /// Density and cumulative probability at `x`.
    pub fn point(&self, x: f64) -> PointProbability {
        PointProbability {
            density: self.pdf(x),
            cumulative: self.cdf(x),
        }
    }

    /// P(lower < X ≤ upper) = F(upper) − F(lower).
    ///
    /// The difference is not sign-normalized: `lower > upper` yields a
    /// negative value.
    pub fn range(&self, lower: f64, upper: f64) -> f64 {
        self.cdf(upper) - self.cdf(lower)
    }
}

/// Density and cumulative probability of N(mean, std_dev) at `x`.
///
/// # Errors
///
/// `InvalidParameter` if `std_dev ≤ 0` or any argument is non-finite.
///
/// # Examples
///
/// ```
/// use u_statcalc::distribution::normal_point_probability;
///
/// let p = normal_point_probability(0.0, 1.0, 1.0).unwrap();
/// assert!((p.density - 0.24197072451914337).abs() < 1e-12);
/// assert!((p.cumulative - 0.8413447460685429).abs() < 1e-6);
/// ```
pub fn normal_point_probability(mean: f64, std_dev: f64, x: f64) -> Result<PointProbability> {
    let normal = Normal::new(mean, std_dev)?;
    require_finite("x", x)?;
    Ok(normal.point(x))
}

/// P(lower < X ≤ upper) for X ~ N(mean, std_dev).
///
/// Computed as `cdf(upper) − cdf(lower)`; when `lower > upper` the result
/// is negative.
///
/// # Errors
///
/// `InvalidParameter` if `std_dev ≤ 0` or any argument is non-finite.
///
/// # Examples
///
/// ```
/// use u_statcalc::distribution::normal_range_probability;
///
/// let p = normal_range_probability(0.0, 1.0, -1.0, 1.0).unwrap();
/// assert!((p - 0.6827).abs() < 1e-4);
/// ```
pub fn normal_range_probability(mean: f64, std_dev: f64, lower: f64, upper: f64) -> Result<f64> {
    let normal = Normal::new(mean, std_dev)?;
    require_finite("lower", lower)?;
    require_finite("upper", upper)?;
    Ok(normal.range(lower, upper))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn cdf_at_mean_is_half() {
        for &(mu, sigma) in &[(0.0, 1.0), (100.0, 15.0), (-3.5, 0.01), (1e6, 1e3)] {
            let p = normal_point_probability(mu, sigma, mu).expect("should compute");
            assert!((p.cumulative - 0.5).abs() < 1e-6, "μ={mu}, σ={sigma}");
        }
    }

    #[test]
    fn standard_density_at_zero() {
        let p = normal_point_probability(0.0, 1.0, 0.0).expect("should compute");
        let expected = 1.0 / (2.0 * std::f64::consts::PI).sqrt();
        assert!((p.density - expected).abs() < 1e-15);
    }

    #[test]
    fn known_cdf_values() {
        let n = Normal::standard();
        assert!((n.cdf(1.0) - 0.841_344_746).abs() < 1e-7);
        assert!((n.cdf(-1.96) - 0.024_997_895).abs() < 1e-7);
        assert!((n.cdf(2.5) - 0.993_790_335).abs() < 1e-7);
    }

    #[test]
    fn one_sigma_range() {
        let p = normal_range_probability(0.0, 1.0, -1.0, 1.0).expect("should compute");
        assert!((p - 0.6827).abs() < 1e-4, "p = {p}");
    }

    #[test]
    fn reversed_range_is_negative() {
        let forward = normal_range_probability(0.0, 1.0, -1.0, 1.0).expect("should compute");
        let reversed = normal_range_probability(0.0, 1.0, 1.0, -1.0).expect("should compute");
        assert!(reversed < 0.0);
        assert!((reversed + forward).abs() < 1e-12);
    }

    #[test]
    fn empty_range_is_zero() {
        let p = normal_range_probability(5.0, 2.0, 3.0, 3.0).expect("should compute");
        assert_eq!(p, 0.0);
    }

    #[test]
    fn invalid_std_dev() {
        for sd in [0.0, -1.0, f64::NAN] {
            let err = normal_point_probability(0.0, sd, 1.0).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidParameter);
            assert_eq!(err.field(), Some("stdDev"));
        }
        assert!(normal_range_probability(0.0, 0.0, -1.0, 1.0).is_err());
    }

    #[test]
    fn non_finite_point_rejected() {
        let err = normal_point_probability(0.0, 1.0, f64::INFINITY).unwrap_err();
        assert_eq!(err.field(), Some("x"));
        let err = normal_range_probability(0.0, 1.0, f64::NAN, 1.0).unwrap_err();
        assert_eq!(err.field(), Some("lower"));
    }
}
