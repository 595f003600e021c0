//! Crane Stages: the valuation pipeline
//!
//! Each stage reads the sub-results before it from [`ValuationState`] and
//! adds its own. [`ValuationEngine`] chains them in a fixed order:
//!
//! ```text
//! validate → base → score → market → financial → risk → financing → rent
//! ```
//!
//! ```no_run
//! use crane_core::CraneRecord;
//!
//! let record = CraneRecord::new("Liebherr", "Crawler Crane", "LR 1800")
//!     .with_capacity(300.0)
//!     .with_year(2019)
//!     .with_hours(3200)
//!     .with_condition(0.85)
//!     .in_region("North America");
//!
//! let result = crane_stages::valuate(&record).unwrap();
//! println!("{} ({})", result.fair_market_value, result.overall_recommendation);
//! ```

pub mod base_value;
pub mod deal_score;
pub mod engine;
pub mod financial;
pub mod financing;
pub mod labels;
pub mod market;
pub mod options;
pub mod rent_vs_buy;
pub mod result;
pub mod risk_stage;
pub mod state;
pub mod validate;

pub use base_value::{BaseValueBreakdown, BaseValueResult, BaseValueStage};
pub use deal_score::{DealScoreBreakdown, DealScoreResult, DealScoreStage};
pub use engine::{standard_stages, valuate, TracedValuation, ValuationEngine};
pub use financial::{FinancialAnalysis, FinancialStage, ValuationRange};
pub use financing::{FinancingAnalysis, FinancingOption, FinancingStage};
pub use labels::{
    ConfidenceLevel, DemandTrend, LiquidityOutlook, MarketClassification, Recommendation,
    RentOrBuy,
};
pub use market::{MarketIntelligence, MarketStage};
pub use options::{EngineOptions, FallbackPolicy, FinancingStrategy};
pub use rent_vs_buy::{OwnershipCost, RentVsBuyAnalysis, RentVsBuyStage};
pub use result::ValuationResult;
pub use risk_stage::RiskStage;
pub use state::{ResolvedInputs, ValuationState};
pub use validate::ValidateStage;
