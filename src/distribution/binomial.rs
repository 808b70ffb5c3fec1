//! Binomial distribution.
//!
//! # Algorithm
//!
//! The mass is evaluated in log space so that C(n, k) never overflows:
//!
//! ```text
//! ln P(X = k) = ln Γ(n+1) − ln Γ(k+1) − ln Γ(n−k+1) + k ln p + (n−k) ln(1−p)
//! ```
//!
//! and the cumulative value is the sum of the masses over 0..=k, skipping
//! the leading masses that underflow to zero.

use u_numflow::special;

use super::{cumulative_sum, PointMass};
use crate::error::{require_finite, require_non_negative, Result, StatError};

/// Binomial distribution B(n, p).
///
/// # Examples
///
/// ```
/// use u_statcalc::distribution::Binomial;
///
/// let b = Binomial::new(100, 0.3).unwrap();
/// let total: f64 = (0..=100).map(|k| b.pmf(k)).sum();
/// assert!((total - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binomial {
    trials: u64,
    p: f64,
}

impl Binomial {
    /// Creates B(trials, p).
    ///
    /// Fails with `InvalidParameter` if `trials < 0` or `p ∉ [0, 1]`.
    pub fn new(trials: i64, p: f64) -> Result<Self> {
        let trials = require_non_negative("trials", trials)?;
        require_finite("successProbability", p)?;
        if !(0.0..=1.0).contains(&p) {
            return Err(StatError::invalid(
                "successProbability",
                format!("must be in [0, 1], got {p}"),
            ));
        }
        Ok(Self { trials, p })
    }

    /// Number of trials n.
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Success probability p.
    pub fn success_probability(&self) -> f64 {
        self.p
    }

    /// P(X = k); zero for k > n.
    pub fn pmf(&self, k: u64) -> f64 {
        let n = self.trials;
        if k > n {
            return 0.0;
        }
        // Degenerate p: all mass at one end. Avoids 0 · ln 0.
        if self.p == 0.0 {
            return if k == 0 { 1.0 } else { 0.0 };
        }
        if self.p == 1.0 {
            return if k == n { 1.0 } else { 0.0 };
        }

        let kf = k as f64;
        let nf = n as f64;
        let ln_mass = ln_choose(n, k) + kf * self.p.ln() + (nf - kf) * (-self.p).ln_1p();
        ln_mass.exp()
    }

    /// P(X ≤ k); one for k ≥ n.
    pub fn cdf(&self, k: u64) -> f64 {
        if k >= self.trials {
            return 1.0;
        }
        let nf = self.trials as f64;
        let std_dev = (nf * self.p * (1.0 - self.p)).sqrt();
        cumulative_sum(k, nf * self.p, std_dev, |j| self.pmf(j))
    }

    /// Mass and cumulative probability at `k`.
    ///
    /// Fails with `InvalidParameter` if `k < 0` or `k > trials`.
    pub fn point(&self, k: i64) -> Result<PointMass> {
        let k = require_non_negative("k", k)?;
        if k > self.trials {
            return Err(StatError::invalid(
                "k",
                format!("must not exceed trials ({}), got {k}", self.trials),
            ));
        }
        Ok(PointMass {
            mass: self.pmf(k),
            cumulative: self.cdf(k),
        })
    }
}

/// ln C(n, k) via ln Γ.
fn ln_choose(n: u64, k: u64) -> f64 {
    if k == 0 || k == n {
        return 0.0;
    }
    let nf = n as f64;
    let kf = k as f64;
    special::ln_gamma(nf + 1.0) - special::ln_gamma(kf + 1.0) - special::ln_gamma(nf - kf + 1.0)
}

/// Mass and cumulative probability of B(trials, success_probability) at `k`.
///
/// # Errors
///
/// `InvalidParameter` if `trials < 0`, `success_probability ∉ [0, 1]`,
/// `k < 0`, or `k > trials`.
///
/// # Examples
///
/// ```
/// use u_statcalc::distribution::binomial_point_mass;
///
/// let r = binomial_point_mass(10, 0.5, 3).unwrap();
/// assert!((r.mass - 120.0 / 1024.0).abs() < 1e-10);
/// assert!((r.cumulative - 176.0 / 1024.0).abs() < 1e-10);
///
/// assert!(binomial_point_mass(10, 0.5, 11).is_err());
/// ```
pub fn binomial_point_mass(trials: i64, success_probability: f64, k: i64) -> Result<PointMass> {
    Binomial::new(trials, success_probability)?.point(k)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn total_mass_is_one(n in 0_i64..300, p in 0.0_f64..=1.0) {
            let total: f64 = (0..=n)
                .map(|k| binomial_point_mass(n, p, k).expect("valid").mass)
                .sum();
            prop_assert!((total - 1.0).abs() < 1e-6, "Σ = {total}");
        }

        #[test]
        fn cumulative_non_decreasing(n in 1_i64..200, p in 0.0_f64..=1.0) {
            let b = Binomial::new(n, p).expect("valid");
            let mut prev = 0.0;
            for k in 0..=n {
                let c = b.point(k).expect("valid").cumulative;
                prop_assert!(c >= prev - 1e-15, "F({k}) = {c} < {prev}");
                prop_assert!(c <= 1.0);
                prev = c;
            }
        }
    }
}
