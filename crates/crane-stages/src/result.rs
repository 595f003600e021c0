//! Valuation result snapshot

use crate::base_value::BaseValueResult;
use crate::deal_score::DealScoreResult;
use crate::financial::{FinancialAnalysis, ValuationRange};
use crate::financing::FinancingAnalysis;
use crate::labels::{ConfidenceLevel, MarketClassification, Recommendation, RentOrBuy};
use crate::market::MarketIntelligence;
use crate::rent_vs_buy::RentVsBuyAnalysis;
use crane_core::{hash_state, ValuationError};
use crane_risk::RiskAssessment;
use serde::{Deserialize, Serialize};

/// Everything computed for one crane. Headline figures sit at the top level;
/// each stage's full sub-result follows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResult {
    pub fair_market_value: f64,
    pub valuation_range: ValuationRange,
    pub confidence_level: ConfidenceLevel,
    pub deal_score: u32,
    pub wear_score: u32,
    pub overall_recommendation: Recommendation,
    pub market_classification: MarketClassification,
    pub rent_or_buy: RentOrBuy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asking_price: Option<f64>,

    pub base_value: BaseValueResult,
    pub scoring: DealScoreResult,
    pub market: MarketIntelligence,
    pub financial: FinancialAnalysis,
    pub risk: RiskAssessment,
    pub financing: FinancingAnalysis,
    pub rent_vs_buy: RentVsBuyAnalysis,
}

impl ValuationResult {
    /// Content hash of the serialized result. Equal inputs give equal fingerprints.
    pub fn fingerprint(&self) -> Result<String, ValuationError> {
        hash_state(self)
    }

    /// Asking price minus fair market value, when an asking price was given.
    pub fn asking_premium(&self) -> Option<f64> {
        self.asking_price.map(|ask| ask - self.fair_market_value)
    }

    pub fn to_json(&self) -> Result<String, ValuationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
