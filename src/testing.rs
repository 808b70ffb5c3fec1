//! Hypothesis testing.
//!
//! One-sample Z-test of a sample mean against a hypothesized population
//! mean with known population standard deviation.
//!
//! # Examples
//!
//! ```
//! use u_statcalc::testing::{one_sample_z_test, Alternative};
//!
//! let r = one_sample_z_test(105.0, 100.0, 15.0, 30, Alternative::TwoTailed).unwrap();
//! assert!((r.z_score - 1.826).abs() < 1e-3);
//! assert!((r.p_value - 0.068).abs() < 1e-3);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use u_numflow::special;

use crate::error::{require_finite, require_positive, Result, StatError};

/// Alternative hypothesis H₁.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alternative {
    /// H₁: μ ≠ μ₀.
    #[serde(rename = "two-tailed")]
    TwoTailed,
    /// H₁: μ > μ₀.
    #[serde(rename = "greater")]
    Greater,
    /// H₁: μ < μ₀.
    #[serde(rename = "less")]
    Less,
}

impl Alternative {
    /// Wire name of the alternative.
    pub fn as_str(&self) -> &'static str {
        match self {
            Alternative::TwoTailed => "two-tailed",
            Alternative::Greater => "greater",
            Alternative::Less => "less",
        }
    }
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Alternative {
    type Err = StatError;

    /// Parses `"two-tailed"`, `"greater"`, or `"less"`. Anything else is
    /// rejected rather than falling back to a default branch.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "two-tailed" => Ok(Alternative::TwoTailed),
            "greater" => Ok(Alternative::Greater),
            "less" => Ok(Alternative::Less),
            other => Err(StatError::invalid(
                "alternative",
                format!("expected one of \"two-tailed\", \"greater\", \"less\", got {other:?}"),
            )),
        }
    }
}

/// Result of a Z-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HypothesisResult {
    /// Standardized distance of the sample mean from μ₀.
    pub z_score: f64,
    /// p-value under H₀, in [0, 1].
    pub p_value: f64,
}

impl HypothesisResult {
    /// Whether H₀ is rejected at significance level `alpha`.
    pub fn rejects_at(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// One-sample Z-test: H₀: μ = μ₀.
///
/// # Algorithm
///
/// z = (x̄ − μ₀) / (σ / √n), with the p-value from the standard normal CDF Φ:
///
/// - two-tailed: 2·(1 − Φ(|z|))
/// - greater: 1 − Φ(z)
/// - less: Φ(z)
///
/// Upper tails are evaluated as Φ(−z).
///
/// # Errors
///
/// - `InvalidParameter` if `std_dev ≤ 0`, `n ≤ 0`, or a mean is non-finite.
/// - `ComputationError` if z is not finite: the mean difference overflows,
///   or `std_dev` is so small that the standard error underflows.
///
/// # Examples
///
/// ```
/// use u_statcalc::testing::{one_sample_z_test, Alternative};
///
/// let r = one_sample_z_test(52.0, 50.0, 4.0, 16, Alternative::Greater).unwrap();
/// assert!((r.z_score - 2.0).abs() < 1e-12);
/// assert!(r.rejects_at(0.05));
/// ```
pub fn one_sample_z_test(
    sample_mean: f64,
    population_mean: f64,
    std_dev: f64,
    n: i64,
    alternative: Alternative,
) -> Result<HypothesisResult> {
    require_finite("sampleMean", sample_mean)?;
    require_finite("populationMean", population_mean)?;
    require_positive("stdDev", std_dev)?;
    if n <= 0 {
        return Err(StatError::invalid("n", format!("must be > 0, got {n}")));
    }

    let difference = sample_mean - population_mean;
    if !difference.is_finite() {
        return Err(StatError::computation(
            "sampleMean",
            "difference from the population mean overflows",
        ));
    }
    let standard_error = std_dev / (n as f64).sqrt();
    let z_score = difference / standard_error;
    if !z_score.is_finite() {
        return Err(StatError::computation(
            "stdDev",
            format!("standard error {standard_error:e} gives a non-finite z-score"),
        ));
    }

    let p_value = match alternative {
        Alternative::TwoTailed => 2.0 * phi(-z_score.abs()),
        Alternative::Greater => phi(-z_score),
        Alternative::Less => phi(z_score),
    }
    .clamp(0.0, 1.0);

    Ok(HypothesisResult { z_score, p_value })
}

fn phi(z: f64) -> f64 {
    if z == 0.0 {
        return 0.5;
    }
    special::standard_normal_cdf(z)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn p_value_in_unit_interval(
            xbar in -1e3_f64..1e3,
            mu in -1e3_f64..1e3,
            sigma in 0.01_f64..100.0,
            n in 1_i64..10_000,
        ) {
            for alt in [Alternative::TwoTailed, Alternative::Greater, Alternative::Less] {
                let r = one_sample_z_test(xbar, mu, sigma, n, alt).expect("valid");
                prop_assert!((0.0..=1.0).contains(&r.p_value), "{alt}: p = {}", r.p_value);
            }
        }

        #[test]
        fn z_sign_follows_mean_difference(
            xbar in -1e3_f64..1e3,
            mu in -1e3_f64..1e3,
            sigma in 0.01_f64..100.0,
            n in 1_i64..1_000,
        ) {
            let r = one_sample_z_test(xbar, mu, sigma, n, Alternative::TwoTailed).expect("valid");
            prop_assert_eq!(r.z_score > 0.0, xbar > mu);
        }
    }
}
