use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

/// Time coordinate shared by every entity (calendar year).
pub type Year = i32;

/// One cleaned row: a metric for an entity, a selector category and a year.
///
/// `metric` may be NaN, meaning "no value at this time point".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub entity_key: String,
    pub selector_value: String,
    pub time: Year,
    pub metric: f64,
}

impl Record {
    pub fn new(entity_key: impl Into<String>, selector_value: impl Into<String>, time: Year, metric: f64) -> Self {
        Self {
            entity_key: entity_key.into(),
            selector_value: selector_value.into(),
            time,
            metric,
        }
    }
}

/// Immutable table of records, populated once at load time.
///
/// Cloning shares the underlying rows.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Arc<[Record]>,
}

impl RecordStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records: records.into() }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct selector values in first-seen order.
    pub fn selector_values(&self) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut out = Vec::new();
        for r in self.records.iter() {
            if seen.insert(r.selector_value.as_str()) {
                out.push(r.selector_value.clone());
            }
        }
        out
    }
}

impl From<Vec<Record>> for RecordStore {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}
