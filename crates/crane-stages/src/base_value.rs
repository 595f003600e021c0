//! Base value and itemized adjustments
//!
//! ```text
//! capacity × rate/ton ─┬─ + manufacturer premium ─┬─ base value
//!                      └─ + model premium ────────┘      │
//!   age depreciation, hours, regional factor, market,    │
//!   condition (each a fraction of base value) ───────────┴─ final value
//! ```

use crate::state::ValuationState;
use crane_core::{Stage, StageError, ValuationContext};
use crane_tables::ThresholdTable;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Per-year depreciation rate by age; multiplied by age, not compounded.
static AGE_DEPRECIATION: Lazy<ThresholdTable<f64>> = Lazy::new(|| {
    ThresholdTable::new(0.12)
        .at_most(2.0, 0.0)
        .at_most(5.0, 0.05)
        .at_most(10.0, 0.08)
});

/// Adjustment by usage ratio (hours / expected hours).
static HOURS_ADJUSTMENT: Lazy<ThresholdTable<f64>> =
    Lazy::new(|| ThresholdTable::new(-0.03).below(0.7, 0.05).at_most(1.3, 0.0));

/// A crane reporting zero hours is treated as a red flag.
pub const ZERO_HOURS_PENALTY: f64 = -0.10;

static CONDITION_ADJUSTMENT: Lazy<ThresholdTable<f64>> = Lazy::new(|| {
    ThresholdTable::new(-0.05)
        .at_least(0.9, 0.05)
        .at_least(0.8, 0.03)
        .at_least(0.7, 0.01)
        .at_least(0.6, -0.02)
});

pub fn age_depreciation_rate(age: u32) -> f64 {
    AGE_DEPRECIATION.lookup(age as f64)
}

pub fn hours_adjustment_rate(hours: u32, expected_hours: f64) -> f64 {
    if hours == 0 {
        return ZERO_HOURS_PENALTY;
    }
    // Any hours on a crane expected to have none count as heavy use.
    if expected_hours <= 0.0 {
        return *HOURS_ADJUSTMENT.fallback();
    }
    HOURS_ADJUSTMENT.lookup(hours as f64 / expected_hours)
}

pub fn condition_adjustment_rate(condition: f64) -> f64 {
    CONDITION_ADJUSTMENT.lookup(condition)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseValueBreakdown {
    pub capacity_base_price: f64,
    pub manufacturer_premium: f64,
    pub model_premium: f64,
    /// Zero or negative
    pub age_depreciation: f64,
    pub hours_adjustment: f64,
    pub regional_factor: f64,
    pub market_conditions: f64,
    pub condition_adjustment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseValueResult {
    pub base_value: f64,
    /// Sum of the age, hours, regional, market and condition terms
    pub adjustments: f64,
    /// `max(0, base_value + adjustments)`
    pub final_value: f64,
    pub breakdown: BaseValueBreakdown,
}

#[derive(Default)]
pub struct BaseValueStage;

impl Stage<ValuationState> for BaseValueStage {
    fn id(&self) -> &'static str {
        "base.value.v1"
    }

    fn run(&self, state: &mut ValuationState, _ctx: &ValuationContext) -> Result<(), StageError> {
        let inputs = state.inputs()?;
        let record = &state.record;

        let capacity_base_price = record.capacity * inputs.base_rate_per_ton;
        let manufacturer_premium = capacity_base_price * inputs.manufacturer.premium;
        let model_premium = capacity_base_price * inputs.model_premium_rate;
        let base_value = capacity_base_price + manufacturer_premium + model_premium;

        let age_depreciation = -age_depreciation_rate(inputs.age) * inputs.age as f64 * base_value;
        let hours_adjustment = hours_adjustment_rate(record.hours, inputs.expected_hours) * base_value;
        let regional_factor = base_value * inputs.regional.factor;
        let market_conditions = base_value * (inputs.trend.demand - 1.0);
        let condition_adjustment = condition_adjustment_rate(record.condition) * base_value;

        let adjustments = age_depreciation
            + hours_adjustment
            + regional_factor
            + market_conditions
            + condition_adjustment;
        let final_value = (base_value + adjustments).max(0.0);

        tracing::debug!(base_value, adjustments, final_value, "base value computed");

        state.base_value = Some(BaseValueResult {
            base_value,
            adjustments,
            final_value,
            breakdown: BaseValueBreakdown {
                capacity_base_price,
                manufacturer_premium,
                model_premium,
                age_depreciation,
                hours_adjustment,
                regional_factor,
                market_conditions,
                condition_adjustment,
            },
        });
        Ok(())
    }
}
