//! Calculation history.
//!
//! After each successful computation the [`Calculator`](super::Calculator)
//! appends a [`CalculationRecord`] to a [`HistoryStore`]. Queries return the
//! most recent records, newest first.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, StatError};

/// Which operation produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculationKind {
    /// Normal point, range, or sample generation.
    Normal,
    /// Binomial point mass.
    Binomial,
    /// Poisson point mass.
    Poisson,
    /// Descriptive statistics.
    Descriptive,
    /// One-sample Z-test.
    ZTest,
    /// Simple linear regression.
    Regression,
}

impl CalculationKind {
    /// Wire name, e.g. `"z-test"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationKind::Normal => "normal",
            CalculationKind::Binomial => "binomial",
            CalculationKind::Poisson => "poisson",
            CalculationKind::Descriptive => "descriptive",
            CalculationKind::ZTest => "z-test",
            CalculationKind::Regression => "regression",
        }
    }
}

impl fmt::Display for CalculationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One stored calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRecord {
    /// Operation that produced the result.
    pub kind: CalculationKind,
    /// Input parameters as received (samples are summarized by size).
    pub parameters: Value,
    /// The computed result.
    pub result: Value,
    /// When the result was computed.
    pub timestamp: DateTime<Utc>,
}

impl CalculationRecord {
    /// Creates a record stamped with the current time.
    pub fn now(kind: CalculationKind, parameters: Value, result: Value) -> Self {
        Self {
            kind,
            parameters,
            result,
            timestamp: Utc::now(),
        }
    }
}

/// Storage for calculation records.
pub trait HistoryStore {
    /// Stores a record.
    fn append(&self, record: CalculationRecord) -> Result<()>;

    /// Returns at most `limit` records, newest first.
    fn recent(&self, limit: usize) -> Result<Vec<CalculationRecord>>;
}

impl<T: HistoryStore + ?Sized> HistoryStore for Arc<T> {
    fn append(&self, record: CalculationRecord) -> Result<()> {
        (**self).append(record)
    }

    fn recent(&self, limit: usize) -> Result<Vec<CalculationRecord>> {
        (**self).recent(limit)
    }
}

/// Bounded in-memory history. The oldest record is evicted once
/// `capacity` is reached.
#[derive(Debug)]
pub struct InMemoryHistory {
    records: Mutex<VecDeque<CalculationRecord>>,
    capacity: usize,
}

impl InMemoryHistory {
    /// Creates an empty history retaining at most `capacity` records
    /// (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity,
        }
    }

    /// Maximum number of retained records.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of retained records.
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    /// Whether no record is retained.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, VecDeque<CalculationRecord>>> {
        self.records
            .lock()
            .map_err(|_| StatError::History("history lock poisoned".to_string()))
    }
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::with_capacity(1_000)
    }
}

impl HistoryStore for InMemoryHistory {
    fn append(&self, record: CalculationRecord) -> Result<()> {
        let mut records = self.lock()?;
        trace!("storing {} record", record.kind);
        records.push_back(record);
        while records.len() > self.capacity {
            if let Some(evicted) = records.pop_front() {
                trace!("evicted {} record from {}", evicted.kind, evicted.timestamp);
            }
        }
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<CalculationRecord>> {
        let records = self.lock()?;
        Ok(records.iter().rev().take(limit).cloned().collect())
    }
}
