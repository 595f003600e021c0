//! Execution Context: per-valuation settings shared by every stage
use chrono::{Datelike, Utc};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct ValuationContext {
    /// Calendar year the crane's age is measured against
    pub valuation_year: i32,
    pub trace_id: String,
    pub metadata: HashMap<String, Value>,
}

impl ValuationContext {
    /// Context pinned to an explicit valuation year.
    pub fn for_year(valuation_year: i32) -> Self {
        Self {
            valuation_year,
            trace_id: uuid::Uuid::new_v4().to_string(),
            metadata: HashMap::new(),
        }
    }

    /// Context for the current UTC calendar year.
    pub fn now() -> Self {
        Self::for_year(Utc::now().year())
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}
