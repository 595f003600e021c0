//! Pipeline state: the record plus every sub-result computed so far

use crate::base_value::BaseValueResult;
use crate::deal_score::DealScoreResult;
use crate::financial::FinancialAnalysis;
use crate::financing::FinancingAnalysis;
use crate::market::MarketIntelligence;
use crate::rent_vs_buy::RentVsBuyAnalysis;
use crate::result::ValuationResult;
use crane_core::{CraneRecord, StageError};
use crane_risk::RiskAssessment;
use crane_tables::{ManufacturerProfile, MarketTrend, RegionalFactor};
use serde::Serialize;

/// Table lookups resolved for one record by the validation stage
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedInputs {
    /// Whole years between manufacture and valuation
    pub age: u32,
    /// `age × expected hours per year`, zero for a crane built this year
    pub expected_hours: f64,
    pub manufacturer: ManufacturerProfile,
    /// Default profile substituted for an unknown manufacturer
    pub manufacturer_fallback: bool,
    pub regional: RegionalFactor,
    pub trend: MarketTrend,
    pub base_rate_per_ton: f64,
    pub base_rate_fallback: bool,
    pub model_premium_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationState {
    pub record: CraneRecord,
    pub inputs: Option<ResolvedInputs>,
    pub base_value: Option<BaseValueResult>,
    pub scoring: Option<DealScoreResult>,
    pub market: Option<MarketIntelligence>,
    pub financial: Option<FinancialAnalysis>,
    pub risk: Option<RiskAssessment>,
    pub financing: Option<FinancingAnalysis>,
    pub rent_vs_buy: Option<RentVsBuyAnalysis>,
}

impl ValuationState {
    pub fn new(record: CraneRecord) -> Self {
        Self {
            record,
            inputs: None,
            base_value: None,
            scoring: None,
            market: None,
            financial: None,
            risk: None,
            financing: None,
            rent_vs_buy: None,
        }
    }

    pub fn inputs(&self) -> Result<&ResolvedInputs, StageError> {
        self.inputs.as_ref().ok_or(StageError::MissingInput("resolved inputs"))
    }

    pub fn base_value(&self) -> Result<&BaseValueResult, StageError> {
        self.base_value.as_ref().ok_or(StageError::MissingInput("base value"))
    }

    pub fn scoring(&self) -> Result<&DealScoreResult, StageError> {
        self.scoring.as_ref().ok_or(StageError::MissingInput("deal and wear scores"))
    }

    pub fn final_value(&self) -> Result<f64, StageError> {
        Ok(self.base_value()?.final_value)
    }

    /// Assembles the final snapshot once every stage has run.
    pub fn into_result(self) -> Result<ValuationResult, StageError> {
        let base_value = self.base_value.ok_or(StageError::MissingInput("base value"))?;
        let scoring = self.scoring.ok_or(StageError::MissingInput("deal and wear scores"))?;
        let market = self.market.ok_or(StageError::MissingInput("market intelligence"))?;
        let financial = self.financial.ok_or(StageError::MissingInput("financial analysis"))?;
        let risk = self.risk.ok_or(StageError::MissingInput("risk assessment"))?;
        let financing = self.financing.ok_or(StageError::MissingInput("financing analysis"))?;
        let rent_vs_buy = self.rent_vs_buy.ok_or(StageError::MissingInput("rent vs buy"))?;

        Ok(ValuationResult {
            fair_market_value: financial.fair_market_value,
            valuation_range: financial.valuation_range,
            confidence_level: financial.confidence,
            deal_score: scoring.deal_score,
            wear_score: scoring.wear_score,
            overall_recommendation: scoring.recommendation,
            market_classification: market.classification,
            rent_or_buy: rent_vs_buy.recommendation,
            asking_price: self.record.asking_price,
            base_value,
            scoring,
            market,
            financial,
            risk,
            financing,
            rent_vs_buy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::scenario_record;

    #[test]
    fn test_missing_sub_results_are_reported() {
        let state = ValuationState::new(scenario_record());
        assert_eq!(state.inputs().unwrap_err(), StageError::MissingInput("resolved inputs"));
        assert_eq!(state.final_value().unwrap_err(), StageError::MissingInput("base value"));
        assert_eq!(
            state.into_result().unwrap_err(),
            StageError::MissingInput("base value")
        );
    }
}
