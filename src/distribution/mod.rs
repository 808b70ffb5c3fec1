//! Probability distributions.
//!
//! Density/mass and cumulative evaluation for the Normal, Binomial, and
//! Poisson distributions, plus Normal sample generation from an injected
//! random source.
//!
//! Each evaluation returns the point value and the cumulative value
//! together; callers always need both.
//!
//! # Distributions
//!
//! - [`Normal`] — Gaussian N(μ, σ), CDF via the error function
//! - [`Binomial`] — B(n, p), mass in log space via ln Γ
//! - [`Poisson`] — Pois(λ), mass in log space via ln Γ
//!
//! # Examples
//!
//! ```
//! use u_statcalc::distribution::{binomial_point_mass, normal_point_probability};
//!
//! let p = normal_point_probability(0.0, 1.0, 0.0).unwrap();
//! assert!((p.cumulative - 0.5).abs() < 1e-6);
//!
//! let b = binomial_point_mass(10, 0.5, 5).unwrap();
//! assert!((b.mass - 0.24609375).abs() < 1e-9);
//! ```

mod binomial;
mod normal;
mod poisson;
mod sampling;

pub use binomial::{binomial_point_mass, Binomial};
pub use normal::{normal_point_probability, normal_range_probability, Normal, PointProbability};
pub use poisson::{poisson_point_mass, Poisson};
pub use sampling::{generate_normal_samples, sample_standard_normal};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Mass and cumulative probability of a discrete distribution at one point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointMass {
    /// P(X = k).
    pub mass: f64,
    /// P(X ≤ k).
    pub cumulative: f64,
}

/// Parameters of one of the supported distributions, tagged by kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DistributionParameters {
    /// N(mean, standardDeviation).
    Normal {
        /// Location μ.
        mean: f64,
        /// Scale σ > 0.
        #[serde(rename = "standardDeviation")]
        standard_deviation: f64,
    },
    /// B(trials, successProbability).
    Binomial {
        /// Number of trials n ≥ 0.
        trials: i64,
        /// Success probability p ∈ [0, 1].
        #[serde(rename = "successProbability")]
        success_probability: f64,
    },
    /// Pois(rate).
    Poisson {
        /// Rate λ > 0.
        rate: f64,
    },
}

impl DistributionParameters {
    /// Checks the parameter invariants of the tagged distribution.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_statcalc::distribution::DistributionParameters;
    ///
    /// let ok = DistributionParameters::Poisson { rate: 2.0 };
    /// assert!(ok.validate().is_ok());
    ///
    /// let bad = DistributionParameters::Binomial { trials: 10, success_probability: 1.5 };
    /// assert!(bad.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        match *self {
            DistributionParameters::Normal {
                mean,
                standard_deviation,
            } => Normal::new(mean, standard_deviation).map(|_| ()),
            DistributionParameters::Binomial {
                trials,
                success_probability,
            } => Binomial::new(trials, success_probability).map(|_| ()),
            DistributionParameters::Poisson { rate } => Poisson::new(rate).map(|_| ()),
        }
    }

    /// Lowercase name of the distribution.
    pub fn name(&self) -> &'static str {
        match self {
            DistributionParameters::Normal { .. } => "normal",
            DistributionParameters::Binomial { .. } => "binomial",
            DistributionParameters::Poisson { .. } => "poisson",
        }
    }
}

/// Sums `term(0..=k)` for a unimodal, log-concave sequence of masses
/// peaking near `mode` with spread `std_dev`.
///
/// Terms below the mode increase, so the sum starts at the first index
/// whose term is still representable; everything before it underflows to
/// zero. Past the mode the ratio of successive terms is non-increasing,
/// which bounds the remaining tail by `t · r / (1 − r)`; the sum stops once
/// that bound is below f64 resolution. The work is proportional to the
/// spread, not to `k`.
fn cumulative_sum(k: u64, mode: f64, std_dev: f64, term: impl Fn(u64) -> f64) -> f64 {
    let start = summation_start(mode, std_dev, &term);
    if k < start {
        return 0.0;
    }

    let mut acc = 0.0_f64;
    let mut prev = 0.0_f64;
    for j in start..=k {
        let t = term(j);
        acc += t;
        if t < prev {
            let ratio = t / prev;
            if t * ratio / (1.0 - ratio) <= f64::EPSILON * acc {
                break;
            }
        }
        prev = t;
    }
    acc.min(1.0)
}

/// Lowest index whose term can be nonzero: 40σ below the mode, widened
/// until the term there underflows.
fn summation_start(mode: f64, std_dev: f64, term: &impl Fn(u64) -> f64) -> u64 {
    let mut margin = 40.0 * std_dev.max(1.0);
    loop {
        let lo = (mode - margin).floor();
        if lo <= 0.0 {
            return 0;
        }
        let lo = lo as u64;
        if term(lo) == 0.0 {
            return lo;
        }
        margin *= 2.0;
    }
}
