//! # u-statcalc
//!
//! Probability distributions, descriptive statistics, Z-tests, and simple
//! linear regression, with a thin service layer that keeps a history of
//! computed results.
//!
//! The engine modules are pure functions over `f64` inputs. They validate
//! their arguments and report failures as [`StatError`] values naming the
//! offending field.
//!
//! ## Modules
//!
//! - [`distribution`]: Normal, binomial, and Poisson probabilities; normal sample generation
//! - [`descriptive`]: Mean, median, mode, population variance, skewness, kurtosis
//! - [`testing`]: One-sample Z-test with two-tailed, greater, and less alternatives
//! - [`regression`]: Ordinary least-squares line fit, R², Pearson correlation
//! - [`service`]: Request/response records, [`service::Calculator`], calculation history
//! - [`config`]: Engine limits and defaults
//! - [`error`]: Error type shared by every module
//!
//! ## Design Philosophy
//!
//! - **Reject, don't guess**: Invalid input is an error, never a NaN in the output
//! - **Numerical stability**: Log-space probability masses and centered sums
//! - **Reproducible sampling**: Random draws come from a caller-supplied RNG

pub mod config;
pub mod descriptive;
pub mod distribution;
pub mod error;
pub mod regression;
pub mod service;
pub mod testing;

pub use error::{Result, StatError};
