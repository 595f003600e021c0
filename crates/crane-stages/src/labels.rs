//! Categorical outputs of a valuation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall purchase recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Strong Buy")]
    StrongBuy,
    Buy,
    Hold,
    Caution,
    Avoid,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Recommendation::StrongBuy => write!(f, "Strong Buy"),
            Recommendation::Buy => write!(f, "Buy"),
            Recommendation::Hold => write!(f, "Hold"),
            Recommendation::Caution => write!(f, "Caution"),
            Recommendation::Avoid => write!(f, "Avoid"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// Half-width of the valuation range as a fraction of fair value
    pub fn variance(&self) -> f64 {
        match self {
            ConfidenceLevel::High => 0.10,
            ConfidenceLevel::Medium => 0.15,
            ConfidenceLevel::Low => 0.20,
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfidenceLevel::Low => write!(f, "LOW"),
            ConfidenceLevel::Medium => write!(f, "MEDIUM"),
            ConfidenceLevel::High => write!(f, "HIGH"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RentOrBuy {
    Buy,
    Rent,
}

impl fmt::Display for RentOrBuy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RentOrBuy::Buy => write!(f, "BUY"),
            RentOrBuy::Rent => write!(f, "RENT"),
        }
    }
}

/// Capacity segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketClassification {
    #[serde(rename = "Heavy Duty")]
    HeavyDuty,
    #[serde(rename = "Mid Range")]
    MidRange,
    Standard,
    #[serde(rename = "Light Duty")]
    LightDuty,
}

impl fmt::Display for MarketClassification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MarketClassification::HeavyDuty => write!(f, "Heavy Duty"),
            MarketClassification::MidRange => write!(f, "Mid Range"),
            MarketClassification::Standard => write!(f, "Standard"),
            MarketClassification::LightDuty => write!(f, "Light Duty"),
        }
    }
}

/// Direction of regional demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DemandTrend {
    #[serde(rename = "Strong Growth")]
    StrongGrowth,
    #[serde(rename = "Moderate Growth")]
    ModerateGrowth,
    Stable,
    Declining,
}

impl fmt::Display for DemandTrend {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DemandTrend::StrongGrowth => write!(f, "Strong Growth"),
            DemandTrend::ModerateGrowth => write!(f, "Moderate Growth"),
            DemandTrend::Stable => write!(f, "Stable"),
            DemandTrend::Declining => write!(f, "Declining"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiquidityOutlook {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl fmt::Display for LiquidityOutlook {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LiquidityOutlook::Excellent => write!(f, "Excellent"),
            LiquidityOutlook::Good => write!(f, "Good"),
            LiquidityOutlook::Fair => write!(f, "Fair"),
            LiquidityOutlook::Poor => write!(f, "Poor"),
        }
    }
}
