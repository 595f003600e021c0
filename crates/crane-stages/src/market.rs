//! Market intelligence: capacity segment, demand trend and liquidity outlook

use crate::labels::{DemandTrend, LiquidityOutlook, MarketClassification};
use crate::state::ValuationState;
use crane_core::{Stage, StageError, ValuationContext};
use crane_tables::ThresholdTable;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static CAPACITY_CLASS: Lazy<ThresholdTable<MarketClassification>> = Lazy::new(|| {
    ThresholdTable::new(MarketClassification::LightDuty)
        .at_least(500.0, MarketClassification::HeavyDuty)
        .at_least(250.0, MarketClassification::MidRange)
        .at_least(100.0, MarketClassification::Standard)
});

static DEMAND_TREND: Lazy<ThresholdTable<DemandTrend>> = Lazy::new(|| {
    ThresholdTable::new(DemandTrend::Declining)
        .above(1.05, DemandTrend::StrongGrowth)
        .above(1.02, DemandTrend::ModerateGrowth)
        .above(0.98, DemandTrend::Stable)
});

static LIQUIDITY_OUTLOOK: Lazy<ThresholdTable<LiquidityOutlook>> = Lazy::new(|| {
    ThresholdTable::new(LiquidityOutlook::Poor)
        .at_least(0.85, LiquidityOutlook::Excellent)
        .at_least(0.75, LiquidityOutlook::Good)
        .at_least(0.65, LiquidityOutlook::Fair)
});

pub fn classify_capacity(capacity: f64) -> MarketClassification {
    CAPACITY_CLASS.lookup(capacity)
}

pub fn demand_trend(demand: f64) -> DemandTrend {
    DEMAND_TREND.lookup(demand)
}

pub fn liquidity_outlook(liquidity_index: f64) -> LiquidityOutlook {
    LIQUIDITY_OUTLOOK.lookup(liquidity_index)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketIntelligence {
    pub classification: MarketClassification,
    pub trend: DemandTrend,
    pub liquidity_outlook: LiquidityOutlook,
    /// Mean of manufacturer resale value and regional liquidity
    pub liquidity_index: f64,
    pub demand: f64,
    pub supply: f64,
    pub volatility: f64,
    pub manufacturer_reputation: String,
    pub market_share: f64,
}

#[derive(Default)]
pub struct MarketStage;

impl Stage<ValuationState> for MarketStage {
    fn id(&self) -> &'static str {
        "market.intelligence.v1"
    }

    fn run(&self, state: &mut ValuationState, _ctx: &ValuationContext) -> Result<(), StageError> {
        let inputs = state.inputs()?;
        let liquidity_index = (inputs.manufacturer.resale_value + inputs.regional.liquidity) / 2.0;

        let market = MarketIntelligence {
            classification: classify_capacity(state.record.capacity),
            trend: demand_trend(inputs.trend.demand),
            liquidity_outlook: liquidity_outlook(liquidity_index),
            liquidity_index,
            demand: inputs.trend.demand,
            supply: inputs.trend.supply,
            volatility: inputs.trend.volatility,
            manufacturer_reputation: inputs.manufacturer.reputation.clone(),
            market_share: inputs.manufacturer.market_share,
        };
        state.market = Some(market);
        Ok(())
    }
}
