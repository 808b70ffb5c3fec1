//! Engine configuration.
//!
//! # Examples
//!
//! ```
//! use u_statcalc::config::EngineConfig;
//!
//! let config = EngineConfig::from_json_str(r#"{ "historyLimit": 20 }"#).unwrap();
//! assert_eq!(config.history_limit, 20);
//! assert_eq!(config.default_sample_size, 100);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, StatError};

/// Tunables for the service layer. Engine functions take no configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Number of normal samples generated when a request omits `dataSize`.
    pub default_sample_size: usize,
    /// Upper bound on `dataSize`.
    pub max_sample_size: usize,
    /// Number of records returned by a history query.
    pub history_limit: usize,
    /// Records retained by the in-memory history before eviction.
    pub history_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_sample_size: 100,
            max_sample_size: 100_000,
            history_limit: 50,
            history_capacity: 1_000,
        }
    }
}

impl EngineConfig {
    /// Parses a JSON object; missing keys take their default values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every limit is positive and the history limit fits in
    /// the retained capacity.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("defaultSampleSize", self.default_sample_size),
            ("maxSampleSize", self.max_sample_size),
            ("historyLimit", self.history_limit),
            ("historyCapacity", self.history_capacity),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(StatError::invalid(field, "must be > 0"));
            }
        }
        if self.default_sample_size > self.max_sample_size {
            return Err(StatError::invalid(
                "defaultSampleSize",
                format!("must not exceed maxSampleSize ({})", self.max_sample_size),
            ));
        }
        if self.history_limit > self.history_capacity {
            return Err(StatError::invalid(
                "historyLimit",
                format!("must not exceed historyCapacity ({})", self.history_capacity),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn defaults() {
        let c = EngineConfig::default();
        assert_eq!(c.default_sample_size, 100);
        assert_eq!(c.history_limit, 50);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn empty_object_is_default() {
        let c = EngineConfig::from_json_str("{}").expect("should parse");
        assert_eq!(c, EngineConfig::default());
    }

    #[test]
    fn zero_limit_rejected() {
        let err = EngineConfig::from_json_str(r#"{"historyLimit": 0}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert_eq!(err.field(), Some("historyLimit"));
    }

    #[test]
    fn limit_above_capacity_rejected() {
        let err =
            EngineConfig::from_json_str(r#"{"historyLimit": 10, "historyCapacity": 5}"#)
                .unwrap_err();
        assert_eq!(err.field(), Some("historyLimit"));
    }

    #[test]
    fn malformed_json() {
        let err = EngineConfig::from_json_str("not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Serialization);
    }
}
