//! Deal score (is this a good purchase) and wear score (physical condition proxy)

use crate::labels::Recommendation;
use crate::state::ValuationState;
use crane_core::{Stage, StageError, ValuationContext};
use crane_tables::MarketTables;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// (min deal score, min wear score, recommendation), first match wins
const RECOMMENDATION_BANDS: [(u32, u32, Recommendation); 4] = [
    (90, 70, Recommendation::StrongBuy),
    (80, 60, Recommendation::Buy),
    (70, 50, Recommendation::Hold),
    (60, 40, Recommendation::Caution),
];

pub fn recommend(deal_score: u32, wear_score: u32) -> Recommendation {
    RECOMMENDATION_BANDS
        .iter()
        .find(|(deal, wear, _)| deal_score >= *deal && wear_score >= *wear)
        .map(|(_, _, rec)| *rec)
        .unwrap_or(Recommendation::Avoid)
}

/// `round(max(0, 100 − usage_ratio × 30 − (100 − condition × 100) × 0.5))`
pub fn wear_score(usage_ratio: f64, condition: f64) -> u32 {
    let score = 100.0 - usage_ratio * 30.0 - (100.0 - condition * 100.0) * 0.5;
    score.max(0.0).round() as u32
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealScoreBreakdown {
    /// Benchmark-to-value ratio, clamped to 0..=100
    pub price_value: f64,
    pub market_timing: f64,
    /// Reported for display; not part of the deal score average
    pub condition: u32,
    pub liquidity: u32,
    pub risk: u32,
    /// hours / expected hours
    pub usage_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealScoreResult {
    pub deal_score: u32,
    pub wear_score: u32,
    pub recommendation: Recommendation,
    pub breakdown: DealScoreBreakdown,
}

pub struct DealScoreStage {
    tables: Arc<MarketTables>,
}

impl DealScoreStage {
    pub fn new(tables: Arc<MarketTables>) -> Self {
        Self { tables }
    }
}

impl Stage<ValuationState> for DealScoreStage {
    fn id(&self) -> &'static str {
        "score.deal_wear.v1"
    }

    fn run(&self, state: &mut ValuationState, _ctx: &ValuationContext) -> Result<(), StageError> {
        let inputs = state.inputs()?;
        let final_value = state.final_value()?;
        let record = &state.record;
        let scoring = &self.tables.scoring;

        let benchmark = record.capacity * scoring.benchmark_rate_per_ton;
        let price_value = if final_value > 0.0 {
            (benchmark / final_value * 100.0).clamp(0.0, 100.0)
        } else {
            100.0
        };
        let market_timing = (inputs.trend.demand * scoring.market_timing_factor).clamp(0.0, 100.0);
        let condition = (record.condition * 100.0).round() as u32;
        let liquidity =
            ((inputs.manufacturer.resale_value + inputs.regional.liquidity) / 2.0 * 100.0).round() as u32;
        let risk = ((inputs.manufacturer.reliability + (1.0 - inputs.regional.risk)) / 2.0 * 100.0)
            .round() as u32;

        // Condition feeds the wear score only; the deal score averages four components.
        let deal_score =
            ((price_value + market_timing + liquidity as f64 + risk as f64) / 4.0).round() as u32;

        // At least one year of expected use so new cranes get a finite ratio
        let wear_basis = inputs.expected_hours.max(scoring.expected_hours_per_year);
        let usage_ratio = record.hours as f64 / wear_basis;
        let wear_score = wear_score(usage_ratio, record.condition);
        let recommendation = recommend(deal_score, wear_score);

        state.scoring = Some(DealScoreResult {
            deal_score,
            wear_score,
            recommendation,
            breakdown: DealScoreBreakdown {
                price_value,
                market_timing,
                condition,
                liquidity,
                risk,
                usage_ratio,
            },
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base_value::BaseValueStage;
    use crate::test_support::{resolved_state, scenario_record, SCENARIO_YEAR};

    fn score(record: crane_core::CraneRecord) -> DealScoreResult {
        let ctx = ValuationContext::for_year(SCENARIO_YEAR);
        let mut state = resolved_state(record);
        BaseValueStage.run(&mut state, &ctx).unwrap();
        DealScoreStage::new(crane_tables::shared())
            .run(&mut state, &ctx)
            .unwrap();
        state.scoring.unwrap()
    }

    #[test]
    fn test_scenario_scores() {
        let result = score(scenario_record());
        let b = &result.breakdown;

        assert!((b.price_value - 85.0822).abs() < 1e-3);
        assert!((b.market_timing - 93.6).abs() < 1e-9);
        assert_eq!(b.liquidity, 91);
        assert_eq!(b.risk, 90);
        assert_eq!(b.condition, 85);
        assert_eq!(result.deal_score, 90);
        // 100 − 0.8 × 30 − 15 × 0.5 = 68.5
        assert_eq!(result.wear_score, 69);
        assert_eq!(result.recommendation, Recommendation::Buy);
    }

    #[test]
    fn test_condition_component_is_excluded_from_average() {
        // Two records differing only in condition within the same adjustment band
        // keep the same final value, so any deal score change would come from
        // the condition component.
        let a = score(scenario_record().with_condition(0.80));
        let b = score(scenario_record().with_condition(0.89));
        assert_ne!(a.breakdown.condition, b.breakdown.condition);
        assert_eq!(a.deal_score, b.deal_score);
        assert!(b.wear_score > a.wear_score);
    }

    #[test]
    fn test_recommendation_bands() {
        assert_eq!(recommend(95, 80), Recommendation::StrongBuy);
        assert_eq!(recommend(95, 69), Recommendation::Buy);
        assert_eq!(recommend(85, 65), Recommendation::Buy);
        assert_eq!(recommend(75, 55), Recommendation::Hold);
        assert_eq!(recommend(65, 45), Recommendation::Caution);
        assert_eq!(recommend(100, 39), Recommendation::Avoid);
        assert_eq!(recommend(59, 100), Recommendation::Avoid);
        assert_eq!(recommend(0, 0), Recommendation::Avoid);
    }

    #[test]
    fn test_wear_score_bounds() {
        assert_eq!(wear_score(0.0, 1.0), 100);
        assert_eq!(wear_score(10.0, 0.0), 0);
        assert_eq!(wear_score(1.0, 0.5), 45);
    }

    #[test]
    fn test_new_crane_wear_uses_one_year_of_hours() {
        let result = score(scenario_record().with_year(SCENARIO_YEAR).with_hours(500));
        assert_eq!(result.breakdown.usage_ratio, 0.625);
        // 100 − 0.625 × 30 − 15 × 0.5 = 73.75
        assert_eq!(result.wear_score, 74);
    }

    #[test]
    fn test_zero_value_scores_full_price_value() {
        let result = score(scenario_record().with_year(SCENARIO_YEAR - 20));
        assert_eq!(result.breakdown.price_value, 100.0);
    }
}
