//! Flat request and response records for the service operations.
//!
//! Field names are camelCase on the wire. The binomial, poisson, and
//! descriptive requests also accept the short names `n`/`p`, `lambda`,
//! and `data`.

use serde::{Deserialize, Serialize};

use crate::descriptive::DescriptiveResult;
use crate::distribution::PointProbability;

/// Normal distribution request. At least one of `x`, `lower`+`upper`, or
/// `generateData` must be present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalRequest {
    /// Location μ.
    pub mean: f64,
    /// Scale σ.
    pub std_dev: f64,
    /// Point at which to evaluate density and CDF.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Lower bound of the range probability.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
    /// Upper bound of the range probability.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
    /// Generate a sample and describe it.
    #[serde(default)]
    pub generate_data: bool,
    /// Size of the generated sample.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_size: Option<usize>,
}

impl NormalRequest {
    /// Request with only the distribution parameters set.
    pub fn new(mean: f64, std_dev: f64) -> Self {
        Self {
            mean,
            std_dev,
            x: None,
            lower: None,
            upper: None,
            generate_data: false,
            data_size: None,
        }
    }

    /// Adds a point evaluation at `x`.
    pub fn at(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }

    /// Adds a range probability over (lower, upper].
    pub fn between(mut self, lower: f64, upper: f64) -> Self {
        self.lower = Some(lower);
        self.upper = Some(upper);
        self
    }

    /// Adds sample generation; `None` uses the configured default size.
    pub fn generate(mut self, data_size: Option<usize>) -> Self {
        self.generate_data = true;
        self.data_size = data_size;
        self
    }
}

/// Normal distribution response; only the requested parts are present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalResponse {
    /// Density and CDF at `x`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point: Option<PointProbability>,
    /// P(lower < X ≤ upper).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<f64>,
    /// Generated sample.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<f64>>,
    /// Descriptive statistics of the generated sample.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<DescriptiveResult>,
}

/// Binomial point-mass request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinomialRequest {
    /// Number of trials.
    #[serde(alias = "n")]
    pub trials: i64,
    /// Success probability.
    #[serde(alias = "p")]
    pub success_probability: f64,
    /// Number of successes.
    pub k: i64,
}

/// Poisson point-mass request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoissonRequest {
    /// Rate λ.
    #[serde(alias = "lambda")]
    pub rate: f64,
    /// Number of events.
    pub k: i64,
}

/// Descriptive statistics request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptiveRequest {
    /// Observations.
    #[serde(alias = "data")]
    pub sample: Vec<f64>,
}

/// One-sample Z-test request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZTestRequest {
    /// Observed sample mean.
    pub sample_mean: f64,
    /// Hypothesized population mean.
    pub population_mean: f64,
    /// Known population standard deviation.
    pub std_dev: f64,
    /// Sample size.
    pub n: i64,
    /// `"two-tailed"` (default), `"greater"`, or `"less"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative: Option<String>,
}

/// Linear regression request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegressionRequest {
    /// Predictor values.
    pub x: Vec<f64>,
    /// Response values.
    pub y: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_request_optional_fields() {
        let r: NormalRequest =
            serde_json::from_str(r#"{"mean": 0, "stdDev": 1, "x": 0.5}"#).expect("parse");
        assert_eq!(r, NormalRequest::new(0.0, 1.0).at(0.5));
        assert!(!r.generate_data);
    }

    #[test]
    fn binomial_accepts_short_names() {
        let long: BinomialRequest =
            serde_json::from_str(r#"{"trials": 10, "successProbability": 0.5, "k": 3}"#)
                .expect("parse");
        let short: BinomialRequest =
            serde_json::from_str(r#"{"n": 10, "p": 0.5, "k": 3}"#).expect("parse");
        assert_eq!(long, short);
    }

    #[test]
    fn poisson_and_descriptive_aliases() {
        let p: PoissonRequest = serde_json::from_str(r#"{"lambda": 2.5, "k": 1}"#).expect("parse");
        assert_eq!(p.rate, 2.5);
        let d: DescriptiveRequest =
            serde_json::from_str(r#"{"data": [1, 2, 3]}"#).expect("parse");
        assert_eq!(d.sample, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn empty_response_serializes_to_empty_object() {
        let json = serde_json::to_string(&NormalResponse::default()).expect("serialize");
        assert_eq!(json, "{}");
    }
}
