//! Service operations.
//!
//! [`Calculator`] is the caller the engine modules are written for: it
//! takes flat request records, runs the matching computation, and stores
//! every successful result in a [`HistoryStore`]. Failed requests are not
//! stored.
//!
//! # Examples
//!
//! ```
//! use u_statcalc::config::EngineConfig;
//! use u_statcalc::service::{BinomialRequest, Calculator, CalculationKind};
//!
//! let calc = Calculator::new(EngineConfig::default()).unwrap();
//! let r = calc
//!     .binomial(&BinomialRequest { trials: 10, success_probability: 0.5, k: 5 })
//!     .unwrap();
//! assert!((r.mass - 0.24609375).abs() < 1e-9);
//!
//! let history = calc.history().unwrap();
//! assert_eq!(history.len(), 1);
//! assert_eq!(history[0].kind, CalculationKind::Binomial);
//! ```

mod history;
mod request;

pub use history::{CalculationKind, CalculationRecord, HistoryStore, InMemoryHistory};
pub use request::{
    BinomialRequest, DescriptiveRequest, NormalRequest, NormalResponse, PoissonRequest,
    RegressionRequest, ZTestRequest,
};

use log::{debug, warn};
use rand::Rng;
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::EngineConfig;
use crate::descriptive::{describe, DescriptiveResult};
use crate::distribution::{
    binomial_point_mass, generate_normal_samples, normal_point_probability,
    normal_range_probability, poisson_point_mass, Normal, PointMass,
};
use crate::error::{Result, StatError};
use crate::regression::{fit_linear, RegressionResult};
use crate::testing::{one_sample_z_test, Alternative, HypothesisResult};

/// Runs the service operations and records their results.
#[derive(Debug)]
pub struct Calculator<H = InMemoryHistory> {
    config: EngineConfig,
    history: H,
}

impl Calculator<InMemoryHistory> {
    /// Creates a calculator with an in-memory history sized from `config`.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let history = InMemoryHistory::with_capacity(config.history_capacity);
        Self::with_history(config, history)
    }
}

impl<H: HistoryStore> Calculator<H> {
    /// Creates a calculator backed by `history`.
    pub fn with_history(config: EngineConfig, history: H) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, history })
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The history store.
    pub fn history_store(&self) -> &H {
        &self.history
    }

    /// Normal distribution: point probability when `x` is given, range
    /// probability when both `lower` and `upper` are given, and a generated
    /// sample with its descriptive statistics when `generateData` is set.
    ///
    /// Samples are drawn from `rng`.
    pub fn normal<R: Rng + ?Sized>(
        &self,
        request: &NormalRequest,
        rng: &mut R,
    ) -> Result<NormalResponse> {
        debug!(
            "normal: x={:?} range={:?}..{:?} generate={}",
            request.x, request.lower, request.upper, request.generate_data
        );
        let parameters = json!({
            "mean": request.mean,
            "stdDev": request.std_dev,
            "x": request.x,
            "lower": request.lower,
            "upper": request.upper,
        });
        let outcome = self.compute_normal(request, rng);
        self.finish(CalculationKind::Normal, parameters, outcome)
    }

    fn compute_normal<R: Rng + ?Sized>(
        &self,
        request: &NormalRequest,
        rng: &mut R,
    ) -> Result<NormalResponse> {
        Normal::new(request.mean, request.std_dev)?;

        let range_requested = request.lower.is_some() && request.upper.is_some();
        if request.x.is_none() && !range_requested && !request.generate_data {
            return Err(StatError::invalid(
                "x",
                "request needs `x`, both `lower` and `upper`, or `generateData`",
            ));
        }

        let data_size = if request.generate_data {
            let size = request.data_size.unwrap_or(self.config.default_sample_size);
            if size == 0 || size > self.config.max_sample_size {
                return Err(StatError::invalid(
                    "dataSize",
                    format!(
                        "must be in 1..={}, got {size}",
                        self.config.max_sample_size
                    ),
                ));
            }
            Some(size)
        } else {
            None
        };

        let point = request
            .x
            .map(|x| normal_point_probability(request.mean, request.std_dev, x))
            .transpose()?;

        let range = match (request.lower, request.upper) {
            (Some(lower), Some(upper)) => Some(normal_range_probability(
                request.mean,
                request.std_dev,
                lower,
                upper,
            )?),
            _ => None,
        };

        let (data, statistics) = match data_size {
            Some(size) => {
                let data = generate_normal_samples(request.mean, request.std_dev, size, rng)?;
                let statistics = describe(&data)?;
                (Some(data), Some(statistics))
            }
            None => (None, None),
        };

        Ok(NormalResponse {
            point,
            range,
            data,
            statistics,
        })
    }

    /// Binomial point mass and cumulative probability.
    pub fn binomial(&self, request: &BinomialRequest) -> Result<PointMass> {
        debug!(
            "binomial: trials={} p={} k={}",
            request.trials, request.success_probability, request.k
        );
        let outcome =
            binomial_point_mass(request.trials, request.success_probability, request.k);
        self.finish(CalculationKind::Binomial, serde_json::to_value(request)?, outcome)
    }

    /// Poisson point mass and cumulative probability.
    pub fn poisson(&self, request: &PoissonRequest) -> Result<PointMass> {
        debug!("poisson: rate={} k={}", request.rate, request.k);
        let outcome = poisson_point_mass(request.rate, request.k);
        self.finish(CalculationKind::Poisson, serde_json::to_value(request)?, outcome)
    }

    /// Descriptive statistics of a sample.
    pub fn descriptive(&self, request: &DescriptiveRequest) -> Result<DescriptiveResult> {
        debug!("descriptive: n={}", request.sample.len());
        let parameters = json!({ "dataSize": request.sample.len() });
        let outcome = describe(&request.sample);
        self.finish(CalculationKind::Descriptive, parameters, outcome)
    }

    /// One-sample Z-test. A missing `alternative` means two-tailed; an
    /// unrecognized one is rejected.
    pub fn z_test(&self, request: &ZTestRequest) -> Result<HypothesisResult> {
        debug!(
            "z-test: n={} alternative={:?}",
            request.n, request.alternative
        );
        let outcome = request
            .alternative
            .as_deref()
            .map_or(Ok(Alternative::TwoTailed), str::parse::<Alternative>)
            .and_then(|alternative| {
                one_sample_z_test(
                    request.sample_mean,
                    request.population_mean,
                    request.std_dev,
                    request.n,
                    alternative,
                )
            });
        self.finish(CalculationKind::ZTest, serde_json::to_value(request)?, outcome)
    }

    /// Ordinary least-squares simple linear regression.
    pub fn regression(&self, request: &RegressionRequest) -> Result<RegressionResult> {
        debug!("regression: n={}", request.x.len());
        let parameters = json!({ "dataSize": request.x.len() });
        let outcome = fit_linear(&request.x, &request.y);
        self.finish(CalculationKind::Regression, parameters, outcome)
    }

    /// The most recent records, newest first, up to the configured limit.
    pub fn history(&self) -> Result<Vec<CalculationRecord>> {
        self.history.recent(self.config.history_limit)
    }

    fn finish<T: Serialize>(
        &self,
        kind: CalculationKind,
        parameters: Value,
        outcome: Result<T>,
    ) -> Result<T> {
        match outcome {
            Ok(result) => {
                let record = CalculationRecord::now(kind, parameters, serde_json::to_value(&result)?);
                self.history.append(record)?;
                Ok(result)
            }
            Err(e) => {
                warn!("{kind} rejected ({:?}): {e}", e.kind());
                Err(e)
            }
        }
    }
}
