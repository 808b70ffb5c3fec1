//! Descriptive statistics.
//!
//! Central tendency, dispersion, and shape of a numeric sample.
//!
//! # Conventions
//!
//! - Variance and standard deviation use the population formulas (divide
//!   by N). A single observation therefore has variance 0.
//! - Skewness is the third standardized moment m₃ / m₂^(3/2).
//! - Kurtosis is the fourth standardized moment m₄ / m₂² without the −3
//!   excess correction; a normal sample gives ≈ 3.
//! - Skewness and kurtosis are `None` when every observation is equal,
//!   since both divide by a zero variance.
//!
//! # Examples
//!
//! ```
//! use u_statcalc::descriptive::{describe, Mode};
//!
//! let r = describe(&[2.0, 4.0, 4.0, 5.0, 7.0]).unwrap();
//! assert!((r.mean - 4.4).abs() < 1e-12);
//! assert_eq!(r.median, 4.0);
//! assert_eq!(r.mode, Mode::Single(4.0));
//! assert_eq!(r.range, 5.0);
//! ```

use serde::{Deserialize, Serialize};
use u_numflow::stats;

use crate::error::{require_sample, Result, StatError};

/// Most frequent value(s) of a sample.
///
/// Serializes as a bare number for [`Mode::Single`] and as an array for
/// [`Mode::Tied`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Mode {
    /// Exactly one value has the highest frequency.
    Single(f64),
    /// Several values share the highest frequency, in ascending order.
    ///
    /// When every distinct value occurs equally often (e.g. all values
    /// distinct), every distinct value is listed: the whole sample is modal.
    Tied(Vec<f64>),
}

impl Mode {
    /// The modal values, ascending.
    pub fn values(&self) -> &[f64] {
        match self {
            Mode::Single(v) => std::slice::from_ref(v),
            Mode::Tied(vs) => vs,
        }
    }

    /// Whether more than one value is modal.
    pub fn is_tied(&self) -> bool {
        matches!(self, Mode::Tied(_))
    }
}

/// Summary statistics of a sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptiveResult {
    /// Number of observations.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Middle value (mean of the two middle values for even length).
    pub median: f64,
    /// Most frequent value(s).
    pub mode: Mode,
    /// Population variance Σ(x − x̄)² / N.
    pub variance: f64,
    /// Population standard deviation.
    pub standard_deviation: f64,
    /// Smallest observation.
    pub min: f64,
    /// Largest observation.
    pub max: f64,
    /// max − min.
    pub range: f64,
    /// Third standardized moment; `None` for zero variance.
    pub skewness: Option<f64>,
    /// Fourth standardized moment (not excess); `None` for zero variance.
    pub kurtosis: Option<f64>,
}

/// Computes the descriptive statistics of `sample`.
///
/// Skewness and kurtosis are taken from the sample divided by its largest
/// magnitude. Both are scale-free, and the scaled deviations lie in
/// [−2, 2], so their fourth powers cannot overflow.
///
/// # Errors
///
/// - `InvalidParameter` if the sample is empty or holds a non-finite value.
/// - `ComputationError` if a statistic of finite inputs overflows `f64`
///   (e.g. the variance of `[1e200, -1e200]`).
///
/// # Examples
///
/// ```
/// use u_statcalc::descriptive::{describe, Mode};
///
/// let r = describe(&[5.0]).unwrap();
/// assert_eq!(r.mean, 5.0);
/// assert_eq!(r.variance, 0.0);
/// assert_eq!(r.mode, Mode::Single(5.0));
/// assert!(r.skewness.is_none());
/// ```
pub fn describe(sample: &[f64]) -> Result<DescriptiveResult> {
    require_sample("sample", sample)?;

    let n = sample.len();
    let min = stats::min(sample).ok_or_else(|| undefined("min"))?;
    let max = stats::max(sample).ok_or_else(|| undefined("max"))?;
    let mean = finite("mean", stats::mean(sample).ok_or_else(|| undefined("mean"))?)?;
    let median = finite(
        "median",
        stats::median(sample).ok_or_else(|| undefined("median"))?,
    )?;

    let mut sorted = sample.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mode = mode_sorted(&sorted);

    // All observations equal: the moments are exactly zero and the shape
    // statistics are undefined.
    if min == max {
        return Ok(DescriptiveResult {
            count: n,
            mean,
            median,
            mode,
            variance: 0.0,
            standard_deviation: 0.0,
            min,
            max,
            range: 0.0,
            skewness: None,
            kurtosis: None,
        });
    }

    let variance = finite(
        "variance",
        stats::population_variance(sample).ok_or_else(|| undefined("variance"))?,
    )?;
    let range = finite("range", max - min)?;
    let (skewness, kurtosis) = shape(sample, mean);

    Ok(DescriptiveResult {
        count: n,
        mean,
        median,
        mode,
        variance,
        standard_deviation: variance.sqrt(),
        min,
        max,
        range,
        skewness: Some(finite("skewness", skewness)?),
        kurtosis: Some(finite("kurtosis", kurtosis)?),
    })
}

fn undefined(statistic: &str) -> StatError {
    StatError::computation("sample", format!("{statistic} is undefined"))
}

fn finite(statistic: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StatError::computation(
            "sample",
            format!("{statistic} is not representable as a finite f64"),
        ))
    }
}

/// Third and fourth standardized moments. The sample must not be constant.
fn shape(sample: &[f64], mean: f64) -> (f64, f64) {
    let scale = sample.iter().fold(0.0_f64, |m, x| m.max(x.abs()));
    let centre = mean / scale;
    let nf = sample.len() as f64;

    let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
    for &x in sample {
        let d = x / scale - centre;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    m2 /= nf;
    m3 /= nf;
    m4 /= nf;

    (m3 / m2.powf(1.5), m4 / (m2 * m2))
}

fn mode_sorted(sorted: &[f64]) -> Mode {
    // Run-length count over the sorted sample.
    let mut runs: Vec<(f64, usize)> = Vec::new();
    for &x in sorted {
        match runs.last_mut() {
            Some((v, count)) if *v == x => *count += 1,
            _ => runs.push((x, 1)),
        }
    }

    let top = runs.iter().map(|&(_, c)| c).max().unwrap_or(0);
    let mut modal: Vec<f64> = runs
        .into_iter()
        .filter(|&(_, c)| c == top)
        .map(|(v, _)| v)
        .collect();

    if modal.len() == 1 {
        Mode::Single(modal.remove(0))
    } else {
        Mode::Tied(modal)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn order_statistics_consistent(
            data in proptest::collection::vec(-1e6_f64..1e6, 1..=60)
        ) {
            let r = describe(&data).expect("valid");
            prop_assert!(r.min <= r.median && r.median <= r.max);
            prop_assert!(r.min <= r.mean + 1e-6 && r.mean <= r.max + 1e-6);
            prop_assert!((r.range - (r.max - r.min)).abs() < 1e-9);
            prop_assert!(r.variance >= 0.0);
            prop_assert!((r.standard_deviation.powi(2) - r.variance).abs()
                <= 1e-9 * r.variance.max(1.0));
        }

        #[test]
        fn modal_values_come_from_sample(
            data in proptest::collection::vec(0_i32..10, 1..=40)
        ) {
            let data: Vec<f64> = data.into_iter().map(f64::from).collect();
            let r = describe(&data).expect("valid");
            let values = r.mode.values();
            prop_assert!(!values.is_empty());
            prop_assert!(values.windows(2).all(|w| w[0] < w[1]));
            for v in values {
                prop_assert!(data.contains(v));
            }
        }

        #[test]
        fn kurtosis_at_least_one(
            data in proptest::collection::vec(-1e3_f64..1e3, 2..=60)
        ) {
            // m₄ / m₂² ≥ 1 for any distribution (Jensen).
            let r = describe(&data).expect("valid");
            if let Some(k) = r.kurtosis {
                prop_assert!(k >= 1.0 - 1e-9, "kurtosis = {k}");
            }
        }
    }
}
