//! Rent-vs-buy comparison over the ownership horizon
//!
//! The horizon ownership cost is itemized (maintenance, insurance, storage,
//! depreciation), while the break-even period uses the flat annual ownership
//! rate from the tables.

use crate::labels::RentOrBuy;
use crate::state::ValuationState;
use crane_core::{Stage, StageError, ValuationContext};
use crane_tables::MarketTables;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Years until buying beats renting, or `None` when it never does.
pub fn break_even_years(value: f64, annual_rental: f64, annual_ownership: f64) -> Option<u32> {
    let yearly_gap = annual_rental - annual_ownership;
    if value <= 0.0 || yearly_gap <= 0.0 {
        return None;
    }
    Some((value / yearly_gap).ceil() as u32)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipCost {
    pub purchase_price: f64,
    pub maintenance: f64,
    pub insurance: f64,
    pub storage: f64,
    /// Recovered on resale, subtracted from the total
    pub depreciation: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentVsBuyAnalysis {
    pub horizon_years: u32,
    pub monthly_rental: f64,
    pub annual_rental: f64,
    pub rental_cost: f64,
    pub ownership_cost: OwnershipCost,
    pub annual_ownership_cost: f64,
    /// Positive when buying is cheaper over the horizon
    pub savings_by_buying: f64,
    pub recommendation: RentOrBuy,
    pub break_even_years: Option<u32>,
}

pub struct RentVsBuyStage {
    tables: Arc<MarketTables>,
}

impl RentVsBuyStage {
    pub fn new(tables: Arc<MarketTables>) -> Self {
        Self { tables }
    }
}

impl Stage<ValuationState> for RentVsBuyStage {
    fn id(&self) -> &'static str {
        "rent.vs_buy.v1"
    }

    fn run(&self, state: &mut ValuationState, _ctx: &ValuationContext) -> Result<(), StageError> {
        let value = state.final_value()?;
        let regional_factor = state.inputs()?.regional.factor;
        let a = &self.tables.rent_vs_buy;
        let months = a.horizon_years as f64 * 12.0;

        let monthly_rental = value * a.monthly_rental_rate * (1.0 + regional_factor);
        let annual_rental = monthly_rental * 12.0;
        let rental_cost = monthly_rental * months;

        let maintenance = value * a.maintenance_rate;
        let insurance = value * a.insurance_rate;
        let storage = a.storage_per_year * a.horizon_years as f64;
        let depreciation = value * a.depreciation_rate;
        let ownership_cost = OwnershipCost {
            purchase_price: value,
            maintenance,
            insurance,
            storage,
            depreciation,
            total: value + maintenance + insurance + storage - depreciation,
        };

        let annual_ownership_cost = value * a.annual_ownership_rate;
        let savings_by_buying = rental_cost - ownership_cost.total;
        let recommendation = if savings_by_buying > 0.0 {
            RentOrBuy::Buy
        } else {
            RentOrBuy::Rent
        };

        state.rent_vs_buy = Some(RentVsBuyAnalysis {
            horizon_years: a.horizon_years,
            monthly_rental,
            annual_rental,
            rental_cost,
            break_even_years: break_even_years(value, annual_rental, annual_ownership_cost),
            ownership_cost,
            annual_ownership_cost,
            savings_by_buying,
            recommendation,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base_value::BaseValueStage;
    use crate::test_support::{resolved_state, scenario_record, SCENARIO_YEAR};

    fn analyze(record: crane_core::CraneRecord) -> RentVsBuyAnalysis {
        let ctx = ValuationContext::for_year(SCENARIO_YEAR);
        let mut state = resolved_state(record);
        BaseValueStage.run(&mut state, &ctx).unwrap();
        RentVsBuyStage::new(crane_tables::shared()).run(&mut state, &ctx).unwrap();
        state.rent_vs_buy.unwrap()
    }

    #[test]
    fn test_scenario_recommends_renting() {
        let analysis = analyze(scenario_record());

        assert!((analysis.monthly_rental - 24_752.52).abs() < 1e-6);
        assert!((analysis.rental_cost - 1_485_151.2).abs() < 1e-6);
        assert!((analysis.ownership_cost.total - 1_527_697.5).abs() < 1e-6);
        assert_eq!(analysis.ownership_cost.storage, 60_000.0);
        assert!((analysis.savings_by_buying + 42_546.3).abs() < 1e-6);
        assert_eq!(analysis.recommendation, RentOrBuy::Rent);
        assert!((analysis.annual_ownership_cost - 317_340.0).abs() < 1e-6);
        // annual rental 297,030.24 never overtakes 317,340
        assert_eq!(analysis.break_even_years, None);
    }

    #[test]
    fn test_break_even() {
        assert_eq!(break_even_years(1_000_000.0, 216_000.0, 200_000.0), Some(63));
        assert_eq!(break_even_years(1_000_000.0, 300_000.0, 200_000.0), Some(10));
        assert_eq!(break_even_years(1_000_000.0, 200_000.0, 200_000.0), None);
        assert_eq!(break_even_years(0.0, 10.0, 0.0), None);
    }

    #[test]
    fn test_large_crane_recommends_buying() {
        // Storage is a flat cost, so a high-value crane in a pricey region
        // tips towards buying once the rental premium outweighs it.
        let record = scenario_record()
            .in_region("Middle East")
            .with_capacity(1200.0)
            .with_year(SCENARIO_YEAR - 1);
        let analysis = analyze(record);
        assert!(analysis.savings_by_buying > 0.0);
        assert_eq!(analysis.recommendation, RentOrBuy::Buy);
    }
}
