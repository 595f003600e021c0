//! Per-manufacturer, per-region and per-model reference data

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufacturerProfile {
    /// Fraction of the capacity base price added as brand premium
    pub premium: f64,
    /// 0.0 to 1.0
    pub reliability: f64,
    /// Resale strength, 0.0 to 1.0
    pub resale_value: f64,
    /// Informational only
    pub market_share: f64,
    pub reputation: String,
    /// Informational baseline deal score, 0.0 to 1.0
    pub deal_score: f64,
}

impl ManufacturerProfile {
    pub fn new(
        premium: f64,
        reliability: f64,
        resale_value: f64,
        market_share: f64,
        reputation: impl Into<String>,
        deal_score: f64,
    ) -> Self {
        Self {
            premium,
            reliability,
            resale_value,
            market_share,
            reputation: reputation.into(),
            deal_score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionalFactor {
    /// Price adjustment fraction, may be negative
    pub factor: f64,
    pub liquidity: f64,
    pub risk: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketTrend {
    /// Multiplier around 1.0
    pub demand: f64,
    /// Multiplier around 1.0
    pub supply: f64,
    pub volatility: f64,
}

/// Model-name fragments sharing one premium rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelTier {
    pub premium: f64,
    pub fragments: Vec<String>,
}

impl ModelTier {
    pub fn new(premium: f64, fragments: &[&str]) -> Self {
        Self {
            premium,
            fragments: fragments.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Case-insensitive match of any fragment at the start of a word in
    /// `model` ("RT" matches "RT 890E" and "Grove RT9150E", not "Sturdy 50").
    pub fn matches(&self, model: &str) -> bool {
        let model = model.to_uppercase();
        self.fragments.iter().any(|fragment| {
            let fragment = fragment.to_uppercase();
            !fragment.is_empty()
                && model.match_indices(fragment.as_str()).any(|(at, _)| {
                    model[..at]
                        .chars()
                        .next_back()
                        .map_or(true, |prev| !prev.is_alphanumeric())
                })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingTerms {
    /// Stable key (ex: "standardFinance")
    pub key: String,
    /// Fraction of the price paid up front
    pub down_payment: f64,
    pub term_months: u32,
    pub annual_rate: f64,
    /// Fixed informational ROI
    pub roi: f64,
}

impl FinancingTerms {
    pub fn new(key: &str, down_payment: f64, term_months: u32, annual_rate: f64, roi: f64) -> Self {
        Self {
            key: key.to_string(),
            down_payment,
            term_months,
            annual_rate,
            roi,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringAssumptions {
    /// Industry flat-rate benchmark used by the price/value score
    pub benchmark_rate_per_ton: f64,
    pub expected_hours_per_year: f64,
    /// Demand multiplier to market-timing score
    pub market_timing_factor: f64,
}

impl Default for ScoringAssumptions {
    fn default() -> Self {
        Self {
            benchmark_rate_per_ton: 4500.0,
            expected_hours_per_year: 800.0,
            market_timing_factor: 90.0,
        }
    }
}

/// Cost model behind the rent-vs-buy comparison.
///
/// `annual_ownership_rate` is the simplified proxy used for the break-even
/// period; the five-year ownership total uses the itemized rates instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentVsBuyAssumptions {
    pub monthly_rental_rate: f64,
    pub horizon_years: u32,
    pub maintenance_rate: f64,
    pub insurance_rate: f64,
    pub storage_per_year: f64,
    pub depreciation_rate: f64,
    pub annual_ownership_rate: f64,
}

impl Default for RentVsBuyAssumptions {
    fn default() -> Self {
        Self {
            monthly_rental_rate: 0.015,
            horizon_years: 5,
            maintenance_rate: 0.15,
            insurance_rate: 0.075,
            storage_per_year: 12_000.0,
            depreciation_rate: 0.30,
            annual_ownership_rate: 0.20,
        }
    }
}
