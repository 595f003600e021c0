//! Engine options
//!
//! Loaded from YAML next to the market tables, or built in code:
//!
//! ```yaml
//! fallback: lenient
//! financing_strategy: highest_roi
//! ```

use serde::{Deserialize, Serialize};

/// What to do with a manufacturer or crane type missing from the tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Reject the record
    #[default]
    Strict,
    /// Substitute the default profile or base rate and log a warning
    Lenient,
}

/// How the recommended financing option is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FinancingStrategy {
    /// Always recommend `recommended_financing`
    #[default]
    Fixed,
    /// Recommend the option with the largest ROI, first wins on ties
    HighestRoi,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    pub fallback: FallbackPolicy,
    pub financing_strategy: FinancingStrategy,
    /// Financing key used by the fixed strategy
    pub recommended_financing: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            fallback: FallbackPolicy::Strict,
            financing_strategy: FinancingStrategy::Fixed,
            recommended_financing: "standardFinance".to_string(),
        }
    }
}

impl EngineOptions {
    pub fn lenient() -> Self {
        Self {
            fallback: FallbackPolicy::Lenient,
            ..Self::default()
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}
