//! Ordered threshold tables
//!
//! Piecewise rules (depreciation bands, condition steps, classification
//! cut-offs) are written as rows checked top to bottom. The first row whose
//! bound admits the input wins; otherwise the fallback applies.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    /// `x < limit`
    Below,
    /// `x <= limit`
    AtMost,
    /// `x >= limit`
    AtLeast,
    /// `x > limit`
    Above,
}

impl Bound {
    pub fn admits(&self, x: f64, limit: f64) -> bool {
        match self {
            Bound::Below => x < limit,
            Bound::AtMost => x <= limit,
            Bound::AtLeast => x >= limit,
            Bound::Above => x > limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold<T> {
    pub bound: Bound,
    pub limit: f64,
    pub value: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable<T> {
    rows: Vec<Threshold<T>>,
    fallback: T,
}

impl<T: Clone> ThresholdTable<T> {
    pub fn new(fallback: T) -> Self {
        Self {
            rows: Vec::new(),
            fallback,
        }
    }

    pub fn row(mut self, bound: Bound, limit: f64, value: T) -> Self {
        self.rows.push(Threshold { bound, limit, value });
        self
    }

    pub fn below(self, limit: f64, value: T) -> Self {
        self.row(Bound::Below, limit, value)
    }

    pub fn at_most(self, limit: f64, value: T) -> Self {
        self.row(Bound::AtMost, limit, value)
    }

    pub fn at_least(self, limit: f64, value: T) -> Self {
        self.row(Bound::AtLeast, limit, value)
    }

    pub fn above(self, limit: f64, value: T) -> Self {
        self.row(Bound::Above, limit, value)
    }

    /// Value of the first admitting row, or the fallback. NaN matches no row.
    pub fn lookup(&self, x: f64) -> T {
        self.rows
            .iter()
            .find(|row| row.bound.admits(x, row.limit))
            .map(|row| row.value.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }

    pub fn rows(&self) -> &[Threshold<T>] {
        &self.rows
    }

    pub fn fallback(&self) -> &T {
        &self.fallback
    }
}
