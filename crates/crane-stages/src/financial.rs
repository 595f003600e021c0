//! Fair market value packaging: confidence, valuation range and residual value

use crate::labels::ConfidenceLevel;
use crate::state::ValuationState;
use crane_core::{Stage, StageError, ValuationContext};
use serde::{Deserialize, Serialize};

/// Residual value never drops below this fraction of fair value
pub const RESIDUAL_FLOOR: f64 = 0.5;

pub fn confidence_for(deal_score: u32) -> ConfidenceLevel {
    if deal_score >= 90 {
        ConfidenceLevel::High
    } else if deal_score >= 80 {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationRange {
    pub low: f64,
    pub high: f64,
}

impl ValuationRange {
    pub fn around(value: f64, variance: f64) -> Self {
        Self {
            low: value * (1.0 - variance),
            high: value * (1.0 + variance),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialAnalysis {
    pub fair_market_value: f64,
    pub valuation_range: ValuationRange,
    pub confidence: ConfidenceLevel,
    pub variance: f64,
    pub residual_value: f64,
}

#[derive(Default)]
pub struct FinancialStage;

impl Stage<ValuationState> for FinancialStage {
    fn id(&self) -> &'static str {
        "financial.analysis.v1"
    }

    fn run(&self, state: &mut ValuationState, _ctx: &ValuationContext) -> Result<(), StageError> {
        let fair_market_value = state.final_value()?;
        let scoring = state.scoring()?;

        let confidence = confidence_for(scoring.deal_score);
        let variance = confidence.variance();
        let residual_share = (scoring.wear_score as f64 / 100.0).max(RESIDUAL_FLOOR);

        state.financial = Some(FinancialAnalysis {
            fair_market_value,
            valuation_range: ValuationRange::around(fair_market_value, variance),
            confidence,
            variance,
            residual_value: fair_market_value * residual_share,
        });
        Ok(())
    }
}
