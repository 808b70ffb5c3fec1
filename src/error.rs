//! Error types.
//!
//! Every engine operation validates its numeric preconditions before doing
//! any work and reports failures through [`StatError`]. The service layer
//! adds two variants of its own for the history store.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StatError>;

/// Coarse failure category, for callers that map errors to responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A shape or domain precondition on the inputs was violated.
    InvalidParameter,
    /// Valid inputs led to an undefined numeric result.
    Computation,
    /// The history store failed.
    History,
    /// A result could not be serialized for the history store.
    Serialization,
}

/// Errors produced by the engine and the service layer.
#[derive(Debug, Error)]
pub enum StatError {
    /// An input violates its domain (non-positive scale, probability
    /// outside [0, 1], out-of-range count, empty or mismatched sample).
    #[error("invalid parameter `{field}`: {message}")]
    InvalidParameter {
        /// Name of the offending input.
        field: &'static str,
        /// Human-readable description.
        message: String,
    },

    /// The inputs were individually valid but the result is undefined
    /// (e.g. zero variance in the regression predictor).
    #[error("computation error on `{field}`: {message}")]
    Computation {
        /// Name of the input that made the result undefined.
        field: &'static str,
        /// Human-readable description.
        message: String,
    },

    /// The history store could not be read or written.
    #[error("history store error: {0}")]
    History(String),

    /// A record could not be converted to JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StatError {
    /// Shorthand for [`StatError::InvalidParameter`].
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        StatError::InvalidParameter {
            field,
            message: message.into(),
        }
    }

    /// Shorthand for [`StatError::Computation`].
    pub fn computation(field: &'static str, message: impl Into<String>) -> Self {
        StatError::Computation {
            field,
            message: message.into(),
        }
    }

    /// Returns the failure category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StatError::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            StatError::Computation { .. } => ErrorKind::Computation,
            StatError::History(_) => ErrorKind::History,
            StatError::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// Name of the offending input, when the error concerns one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            StatError::InvalidParameter { field, .. } | StatError::Computation { field, .. } => {
                Some(field)
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

/// Rejects NaN and infinities.
pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StatError::invalid(field, format!("must be finite, got {value}")))
    }
}

/// Rejects non-finite and non-positive values.
pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<f64> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(StatError::invalid(field, format!("must be > 0, got {value}")))
    }
}

/// Rejects negative counts and returns the value as `u64`.
pub(crate) fn require_non_negative(field: &'static str, value: i64) -> Result<u64> {
    u64::try_from(value)
        .map_err(|_| StatError::invalid(field, format!("must be >= 0, got {value}")))
}

/// Rejects empty slices and slices holding non-finite values.
pub(crate) fn require_sample(field: &'static str, data: &[f64]) -> Result<()> {
    if data.is_empty() {
        return Err(StatError::invalid(field, "sample must not be empty"));
    }
    if let Some(pos) = data.iter().position(|v| !v.is_finite()) {
        return Err(StatError::invalid(
            field,
            format!("value at index {pos} is not finite"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_and_field() {
        let e = StatError::invalid("stdDev", "must be > 0");
        assert_eq!(e.kind(), ErrorKind::InvalidParameter);
        assert_eq!(e.field(), Some("stdDev"));

        let e = StatError::computation("x", "zero variance");
        assert_eq!(e.kind(), ErrorKind::Computation);
        assert_eq!(e.field(), Some("x"));

        let e = StatError::History("lock poisoned".into());
        assert_eq!(e.kind(), ErrorKind::History);
        assert_eq!(e.field(), None);
    }

    #[test]
    fn message_names_field() {
        let e = StatError::invalid("rate", "must be > 0, got -1");
        assert_eq!(e.to_string(), "invalid parameter `rate`: must be > 0, got -1");
    }

    #[test]
    fn finite_checks() {
        assert!(require_finite("x", 1.0).is_ok());
        assert!(require_finite("x", f64::NAN).is_err());
        assert!(require_positive("x", 0.0).is_err());
        assert!(require_positive("x", f64::INFINITY).is_err());
        assert_eq!(require_non_negative("k", 3).unwrap(), 3);
        assert!(require_non_negative("k", -1).is_err());
    }

    #[test]
    fn sample_checks() {
        assert!(require_sample("data", &[]).is_err());
        let err = require_sample("data", &[1.0, f64::NAN]).unwrap_err();
        assert!(err.to_string().contains("index 1"));
        assert!(require_sample("data", &[1.0, 2.0]).is_ok());
    }
}
