//! Regression analysis.
//!
//! Ordinary least-squares simple linear regression and the Pearson
//! correlation coefficient it reports fit quality with.
//!
//! # Examples
//!
//! ```
//! use u_statcalc::regression::fit_linear;
//!
//! let x = [1.0, 2.0, 3.0, 4.0];
//! let y = [2.0, 4.0, 6.0, 8.0];
//! let r = fit_linear(&x, &y).unwrap();
//! assert_eq!(r.slope, 2.0);
//! assert_eq!(r.intercept, 0.0);
//! assert_eq!(r.r_squared, 1.0);
//! assert_eq!(r.equation_text, "y = 2.0000x + 0.0000");
//! ```

use serde::{Deserialize, Serialize};
use u_numflow::stats;

use crate::error::{require_sample, Result, StatError};

/// Result of a simple linear regression y = intercept + slope · x.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegressionResult {
    /// Slope coefficient (β₁).
    pub slope: f64,
    /// Intercept (β₀).
    pub intercept: f64,
    /// Coefficient of determination: the squared Pearson correlation.
    pub r_squared: f64,
    /// `"y = {slope}x + {intercept}"`, both rounded to 4 decimals.
    pub equation_text: String,
    /// Number of (x, y) pairs.
    pub n: usize,
}

/// Sums of squared deviations and cross-deviations about the means.
struct Moments {
    x_mean: f64,
    y_mean: f64,
    sxx: f64,
    syy: f64,
    sxy: f64,
}

fn validate_pair(x: &[f64], y: &[f64]) -> Result<()> {
    require_sample("x", x)?;
    require_sample("y", y)?;
    if x.len() != y.len() {
        return Err(StatError::invalid(
            "y",
            format!("length {} does not match x length {}", y.len(), x.len()),
        ));
    }
    Ok(())
}

fn moments(x: &[f64], y: &[f64]) -> Result<Moments> {
    let x_mean =
        stats::mean(x).ok_or_else(|| StatError::computation("x", "mean is undefined"))?;
    let y_mean =
        stats::mean(y).ok_or_else(|| StatError::computation("y", "mean is undefined"))?;

    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    Ok(Moments {
        x_mean,
        y_mean,
        sxx,
        syy,
        sxy,
    })
}

fn all_equal(data: &[f64]) -> bool {
    data.windows(2).all(|w| w[0] == w[1])
}

// ---------------------------------------------------------------------------
// Pearson
// ---------------------------------------------------------------------------

/// Pearson product-moment correlation coefficient.
///
/// # Algorithm
///
/// r = Sxy / √(Sxx · Syy), clamped to [−1, 1].
///
/// # Errors
///
/// - `InvalidParameter` if either slice is empty, holds a non-finite value,
///   or the lengths differ.
/// - `ComputationError` if either variable has zero variance.
///
/// # Examples
///
/// ```
/// use u_statcalc::regression::pearson_correlation;
///
/// let r = pearson_correlation(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap();
/// assert!((r + 1.0).abs() < 1e-12);
/// ```
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Result<f64> {
    validate_pair(x, y)?;
    if all_equal(x) {
        return Err(StatError::computation("x", "zero variance"));
    }
    if all_equal(y) {
        return Err(StatError::computation("y", "zero variance"));
    }
    let m = moments(x, y)?;
    Ok(correlation(&m))
}

fn correlation(m: &Moments) -> f64 {
    (m.sxy / (m.sxx * m.syy).sqrt()).clamp(-1.0, 1.0)
}

// ---------------------------------------------------------------------------
// Simple Linear Regression
// ---------------------------------------------------------------------------

/// Fits y = β₀ + β₁·x by ordinary least squares.
///
/// # Algorithm
///
/// β₁ = Sxy / Sxx
/// β₀ = ȳ − β₁·x̄
/// R² = r², with r the Pearson correlation of x and y
///
/// The sums are taken about the means, which is algebraically the same as
/// the raw-sum form (nΣxy − ΣxΣy) / (nΣx² − (Σx)²) but does not cancel
/// catastrophically for large offsets.
///
/// If y is constant the fitted line is exact (β₁ = 0) and R² is reported
/// as 1.
///
/// # Errors
///
/// - `InvalidParameter` if either slice is empty, holds a non-finite value,
///   or the lengths differ.
/// - `ComputationError` if x has zero variance (all x equal, including a
///   single observation): the slope is undefined.
///
/// # References
///
/// Draper & Smith (1998). "Applied Regression Analysis", 3rd edition.
///
/// # Examples
///
/// ```
/// use u_statcalc::regression::fit_linear;
///
/// let err = fit_linear(&[1.0, 1.0, 1.0], &[2.0, 3.0, 4.0]).unwrap_err();
/// assert_eq!(err.kind(), u_statcalc::error::ErrorKind::Computation);
/// ```
pub fn fit_linear(x: &[f64], y: &[f64]) -> Result<RegressionResult> {
    validate_pair(x, y)?;
    if all_equal(x) {
        return Err(StatError::computation(
            "x",
            "zero variance in x; slope and intercept are undefined",
        ));
    }

    let m = moments(x, y)?;
    let slope = m.sxy / m.sxx;
    let intercept = m.y_mean - slope * m.x_mean;
    if !slope.is_finite() || !intercept.is_finite() {
        return Err(StatError::computation("x", "least-squares solution overflowed"));
    }

    let r_squared = if all_equal(y) {
        1.0
    } else {
        correlation(&m).powi(2)
    };

    Ok(RegressionResult {
        slope,
        intercept,
        r_squared,
        equation_text: equation_text(slope, intercept),
        n: x.len(),
    })
}

/// Evaluates a fitted line at each of `x_new`.
///
/// # Examples
///
/// ```
/// use u_statcalc::regression::{fit_linear, predict};
///
/// let model = fit_linear(&[1.0, 2.0, 3.0], &[3.0, 5.0, 7.0]).unwrap();
/// let pred = predict(&model, &[4.0, 10.0]);
/// assert!((pred[0] - 9.0).abs() < 1e-10);
/// assert!((pred[1] - 21.0).abs() < 1e-10);
/// ```
pub fn predict(model: &RegressionResult, x_new: &[f64]) -> Vec<f64> {
    x_new
        .iter()
        .map(|&xi| model.intercept + model.slope * xi)
        .collect()
}

fn equation_text(slope: f64, intercept: f64) -> String {
    format!("y = {}x + {}", fixed4(slope), fixed4(intercept))
}

/// Four-decimal fixed notation with JavaScript `toFixed(4)` semantics:
/// exact halfway values round away from zero, and `-0.0` prints unsigned
/// while small negatives keep their sign (`-0.0000`).
fn fixed4(v: f64) -> String {
    if v == 0.0 {
        return "0.0000".to_string();
    }
    // A value lies exactly halfway between two 4-decimal neighbours only if
    // it is a multiple of 1/32; both products below are then exact.
    let scaled = v * 1e4;
    if v.abs() < 1e11 && (v * 32.0).fract() == 0.0 && scaled.fract().abs() == 0.5 {
        let rounded = scaled.round() / 1e4;
        return format!("{rounded:.4}");
    }
    format!("{v:.4}")
}
