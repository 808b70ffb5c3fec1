//! Poisson distribution.
//!
//! # Algorithm
//!
//! ```text
//! ln P(X = k) = k ln λ − λ − ln Γ(k+1)
//! ```
//!
//! evaluated in log space and re-exponentiated, so k! never overflows.
//! The cumulative value sums the masses over 0..=k.

use u_numflow::special;

use super::{cumulative_sum, PointMass};
use crate::error::{require_non_negative, require_positive, Result};

/// Poisson distribution Pois(λ).
///
/// # Examples
///
/// ```
/// use u_statcalc::distribution::Poisson;
///
/// let p = Poisson::new(3.0).unwrap();
/// assert!((p.pmf(0) - (-3.0_f64).exp()).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Poisson {
    rate: f64,
}

impl Poisson {
    /// Creates Pois(rate). Fails with `InvalidParameter` if `rate ≤ 0`.
    pub fn new(rate: f64) -> Result<Self> {
        require_positive("rate", rate)?;
        Ok(Self { rate })
    }

    /// Rate λ.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// P(X = k).
    pub fn pmf(&self, k: u64) -> f64 {
        let kf = k as f64;
        let ln_mass = kf * self.rate.ln() - self.rate - special::ln_gamma(kf + 1.0);
        ln_mass.exp()
    }

    /// P(X ≤ k).
    pub fn cdf(&self, k: u64) -> f64 {
        cumulative_sum(k, self.rate, self.rate.sqrt(), |j| self.pmf(j))
    }

    /// Mass and cumulative probability at `k`.
    ///
    /// Fails with `InvalidParameter` if `k < 0`.
    pub fn point(&self, k: i64) -> Result<PointMass> {
        let k = require_non_negative("k", k)?;
        Ok(PointMass {
            mass: self.pmf(k),
            cumulative: self.cdf(k),
        })
    }
}

/// Mass and cumulative probability of Pois(rate) at `k`.
///
/// # Errors
///
/// `InvalidParameter` if `rate ≤ 0`, `rate` is non-finite, or `k < 0`.
///
/// # Examples
///
/// ```
/// use u_statcalc::distribution::poisson_point_mass;
///
/// let r = poisson_point_mass(2.0, 2).unwrap();
/// assert!((r.mass - 0.2706705664732254).abs() < 1e-10);
/// assert!((r.cumulative - 0.6766764161830635).abs() < 1e-10);
/// ```
pub fn poisson_point_mass(rate: f64, k: i64) -> Result<PointMass> {
    Poisson::new(rate)?.point(k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn known_values() {
        // λ = 4: P(X = 4) = 4⁴e⁻⁴/24
        let r = poisson_point_mass(4.0, 4).expect("valid");
        let expected = 256.0 * (-4.0_f64).exp() / 24.0;
        assert!((r.mass - expected).abs() < 1e-10);
    }

    #[test]
    fn large_k_does_not_overflow() {
        // 200! overflows f64.
        let r = poisson_point_mass(150.0, 200).expect("valid");
        assert!(r.mass.is_finite() && r.mass > 0.0);
        assert!(r.cumulative > 0.99 && r.cumulative <= 1.0);
    }

    #[test]
    fn cumulative_tends_to_one() {
        let p = Poisson::new(5.0).expect("valid");
        assert!((p.cdf(50) - 1.0).abs() < 1e-9);
        assert!((p.cdf(1_000_000) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn large_rate_cumulative_is_fast() {
        let started = std::time::Instant::now();
        let p = Poisson::new(1e8).expect("valid");
        let at_rate = p.point(100_000_000).expect("valid");
        assert!((at_rate.cumulative - 0.5).abs() < 1e-2, "F = {}", at_rate.cumulative);
        assert_eq!(p.cdf(50_000_000), 0.0);
        assert!(
            started.elapsed() < std::time::Duration::from_secs(30),
            "took {:?}",
            started.elapsed()
        );
    }

    #[test]
    fn cumulative_non_decreasing() {
        let p = Poisson::new(7.5).expect("valid");
        let mut prev = 0.0;
        for k in 0..100 {
            let c = p.point(k).expect("valid").cumulative;
            assert!(c >= prev, "F({k}) = {c} < {prev}");
            prev = c;
        }
    }

    #[test]
    fn invalid_parameters() {
        for rate in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = poisson_point_mass(rate, 1).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidParameter);
            assert_eq!(err.field(), Some("rate"));
        }
        let err = poisson_point_mass(2.0, -1).unwrap_err();
        assert_eq!(err.field(), Some("k"));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn cumulative_monotone_towards_one(rate in 0.01_f64..100.0) {
            let p = Poisson::new(rate).expect("valid");
            let mut prev = 0.0;
            let upper = (rate * 3.0 + 40.0) as i64;
            for k in 0..=upper {
                let c = p.point(k).expect("valid").cumulative;
                prop_assert!(c >= prev - 1e-15, "F({k}) = {c} < {prev}");
                prop_assert!(c <= 1.0);
                prev = c;
            }
            prop_assert!((prev - 1.0).abs() < 1e-6, "F({upper}) = {prev}");
        }
    }
}
