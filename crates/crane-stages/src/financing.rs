//! Financing scenarios and expected ROI

use crate::options::FinancingStrategy;
use crate::state::ValuationState;
use crane_core::{Stage, StageError, ValuationContext};
use crane_tables::{FinancingTerms, MarketTables};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Standard amortized monthly payment for `principal` over `months`.
pub fn monthly_payment(principal: f64, annual_rate: f64, months: u32) -> f64 {
    if principal <= 0.0 || months == 0 {
        return 0.0;
    }
    let n = months as f64;
    let r = annual_rate / 12.0;
    if r == 0.0 {
        return principal / n;
    }
    let growth = (1.0 + r).powf(n);
    principal * (r * growth) / (growth - 1.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingOption {
    pub key: String,
    pub down_payment: f64,
    pub financed_amount: f64,
    pub term_months: u32,
    pub annual_rate: f64,
    pub monthly_payment: f64,
    /// Down payment plus every installment
    pub total_paid: f64,
    pub total_interest: f64,
    pub roi: f64,
}

impl FinancingOption {
    fn price(terms: &FinancingTerms, value: f64) -> Self {
        let down_payment = value * terms.down_payment;
        let financed_amount = value - down_payment;
        let monthly_payment = monthly_payment(financed_amount, terms.annual_rate, terms.term_months);
        let total_paid = down_payment + monthly_payment * terms.term_months as f64;

        Self {
            key: terms.key.clone(),
            down_payment,
            financed_amount,
            term_months: terms.term_months,
            annual_rate: terms.annual_rate,
            monthly_payment,
            total_paid,
            total_interest: (total_paid - value).max(0.0),
            roi: terms.roi,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingAnalysis {
    /// In table order
    pub options: Vec<FinancingOption>,
    pub recommended: String,
    /// ROI of the recommended option
    pub expected_roi: f64,
}

impl FinancingAnalysis {
    pub fn option(&self, key: &str) -> Option<&FinancingOption> {
        self.options.iter().find(|o| o.key == key)
    }
}

pub struct FinancingStage {
    tables: Arc<MarketTables>,
    strategy: FinancingStrategy,
    fixed_key: String,
}

impl FinancingStage {
    pub fn new(tables: Arc<MarketTables>, strategy: FinancingStrategy, fixed_key: impl Into<String>) -> Self {
        Self {
            tables,
            strategy,
            fixed_key: fixed_key.into(),
        }
    }

    fn select<'a>(&self, options: &'a [FinancingOption]) -> Result<&'a FinancingOption, StageError> {
        match self.strategy {
            FinancingStrategy::Fixed => options
                .iter()
                .find(|o| o.key == self.fixed_key)
                .ok_or_else(|| {
                    StageError::ExecutionFailed(format!("no financing option named {}", self.fixed_key))
                }),
            FinancingStrategy::HighestRoi => options
                .iter()
                .reduce(|best, o| if o.roi > best.roi { o } else { best })
                .ok_or_else(|| StageError::ExecutionFailed("no financing options".to_string())),
        }
    }
}

impl Stage<ValuationState> for FinancingStage {
    fn id(&self) -> &'static str {
        "financing.roi.v1"
    }

    fn run(&self, state: &mut ValuationState, _ctx: &ValuationContext) -> Result<(), StageError> {
        let value = state.final_value()?;

        let options: Vec<FinancingOption> = self
            .tables
            .financing
            .iter()
            .map(|terms| FinancingOption::price(terms, value))
            .collect();

        let chosen = self.select(&options)?;
        let recommended = chosen.key.clone();
        let expected_roi = chosen.roi;

        state.financing = Some(FinancingAnalysis {
            options,
            recommended,
            expected_roi,
        });
        Ok(())
    }
}
