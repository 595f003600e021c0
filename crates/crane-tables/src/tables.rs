//! Market tables: every lookup the valuation stages consult
//!
//! Built once (either [`MarketTables::builtin`] or loaded from YAML) and then
//! shared read-only across valuations.

use crate::error::TablesError;
use crate::profiles::{
    FinancingTerms, ManufacturerProfile, MarketTrend, ModelTier, RegionalFactor,
    RentVsBuyAssumptions, ScoringAssumptions,
};
use crane_core::ValidationError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

static BUILTIN: Lazy<Arc<MarketTables>> = Lazy::new(|| Arc::new(MarketTables::builtin()));

/// Process-wide built-in tables.
pub fn shared() -> Arc<MarketTables> {
    Arc::clone(&BUILTIN)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketTables {
    /// Table set version (ex: "2024.1")
    pub version: String,
    pub manufacturers: BTreeMap<String, ManufacturerProfile>,
    /// Explicit profile for unrecognized brands under the lenient policy
    pub default_manufacturer: ManufacturerProfile,
    pub regions: BTreeMap<String, RegionalFactor>,
    pub trends: BTreeMap<String, MarketTrend>,
    /// Price per ton of capacity, by crane type
    pub base_rates: BTreeMap<String, f64>,
    pub default_base_rate: f64,
    /// Checked in order, first matching tier wins
    pub model_tiers: Vec<ModelTier>,
    pub default_model_premium: f64,
    pub financing: Vec<FinancingTerms>,
    #[serde(default)]
    pub scoring: ScoringAssumptions,
    #[serde(default)]
    pub rent_vs_buy: RentVsBuyAssumptions,
}

impl MarketTables {
    pub fn builtin() -> Self {
        let manufacturers = [
            ("Liebherr", ManufacturerProfile::new(0.15, 0.95, 0.92, 0.25, "Premium", 0.90)),
            ("Grove", ManufacturerProfile::new(0.10, 0.90, 0.88, 0.18, "Excellent", 0.85)),
            ("Tadano", ManufacturerProfile::new(0.12, 0.92, 0.90, 0.15, "Excellent", 0.87)),
            ("Manitowoc", ManufacturerProfile::new(0.08, 0.88, 0.85, 0.12, "Very Good", 0.82)),
            ("Terex", ManufacturerProfile::new(0.05, 0.85, 0.80, 0.10, "Good", 0.78)),
            ("Link-Belt", ManufacturerProfile::new(0.06, 0.87, 0.82, 0.08, "Very Good", 0.80)),
            ("Kobelco", ManufacturerProfile::new(0.07, 0.89, 0.84, 0.07, "Very Good", 0.81)),
            ("Sany", ManufacturerProfile::new(0.00, 0.80, 0.72, 0.05, "Good", 0.75)),
        ];

        let regions = [
            ("North America", RegionalFactor { factor: 0.04, liquidity: 0.90, risk: 0.15 }),
            ("Europe", RegionalFactor { factor: 0.02, liquidity: 0.85, risk: 0.20 }),
            ("Asia Pacific", RegionalFactor { factor: -0.02, liquidity: 0.75, risk: 0.30 }),
            ("Middle East", RegionalFactor { factor: 0.06, liquidity: 0.70, risk: 0.35 }),
            ("Africa", RegionalFactor { factor: -0.08, liquidity: 0.55, risk: 0.50 }),
            ("South America", RegionalFactor { factor: -0.05, liquidity: 0.60, risk: 0.45 }),
        ];

        let trends = [
            ("North America", MarketTrend { demand: 1.04, supply: 0.98, volatility: 0.15 }),
            ("Europe", MarketTrend { demand: 1.02, supply: 1.00, volatility: 0.18 }),
            ("Asia Pacific", MarketTrend { demand: 1.06, supply: 0.95, volatility: 0.25 }),
            ("Middle East", MarketTrend { demand: 1.08, supply: 0.92, volatility: 0.30 }),
            ("Africa", MarketTrend { demand: 0.97, supply: 1.05, volatility: 0.40 }),
            ("South America", MarketTrend { demand: 0.99, supply: 1.02, volatility: 0.35 }),
        ];

        let base_rates = [
            ("Crawler Crane", 5000.0),
            ("All-Terrain Crane", 6000.0),
            ("Rough Terrain Crane", 4500.0),
            ("Truck-Mounted Crane", 4000.0),
            ("Telescopic Crawler Crane", 5500.0),
        ];

        Self {
            version: "2024.1".to_string(),
            manufacturers: manufacturers
                .into_iter()
                .map(|(name, profile)| (name.to_string(), profile))
                .collect(),
            default_manufacturer: ManufacturerProfile::new(0.05, 0.85, 0.80, 0.0, "Unrated", 0.78),
            regions: regions.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
            trends: trends.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
            base_rates: base_rates.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
            default_base_rate: 5000.0,
            model_tiers: vec![
                ModelTier::new(0.08, &["LR 1800", "LTM 1500", "LR 11000", "CC 8800"]),
                ModelTier::new(0.06, &["LTM 1300", "LR 1600", "GMK 6400", "ATF 400", "CC 2800"]),
                ModelTier::new(0.04, &["GMK", "ATF", "TMS", "LTM", "RT"]),
            ],
            default_model_premium: 0.05,
            financing: vec![
                FinancingTerms::new("cashPurchase", 1.0, 0, 0.0, 0.27),
                FinancingTerms::new("standardFinance", 0.20, 60, 0.065, 0.18),
                FinancingTerms::new("lowDownFinance", 0.10, 72, 0.075, 0.16),
                FinancingTerms::new("extendedTerm", 0.15, 84, 0.085, 0.15),
            ],
            scoring: ScoringAssumptions::default(),
            rent_vs_buy: RentVsBuyAssumptions::default(),
        }
    }

    /// Load tables from YAML and check them for consistency.
    pub fn from_yaml(yaml: &str) -> Result<Self, TablesError> {
        let tables: Self = serde_yaml::from_str(yaml)?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, TablesError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| TablesError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    pub fn to_yaml(&self) -> Result<String, TablesError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), TablesError> {
        let regions: BTreeSet<&String> = self.regions.keys().collect();
        let trends: BTreeSet<&String> = self.trends.keys().collect();
        if regions != trends {
            return Err(TablesError::Inconsistent(format!(
                "regions {:?} and trends {:?} must name the same markets",
                regions, trends
            )));
        }

        if let Some((name, rate)) = self.base_rates.iter().find(|(_, rate)| **rate <= 0.0) {
            return Err(TablesError::Inconsistent(format!(
                "base rate for {} must be positive, got {}",
                name, rate
            )));
        }
        if self.default_base_rate <= 0.0 {
            return Err(TablesError::Inconsistent(
                "default base rate must be positive".to_string(),
            ));
        }

        if self.financing.is_empty() {
            return Err(TablesError::Inconsistent(
                "at least one financing option is required".to_string(),
            ));
        }
        let mut keys = BTreeSet::new();
        for terms in &self.financing {
            if !keys.insert(terms.key.as_str()) {
                return Err(TablesError::Inconsistent(format!(
                    "duplicate financing key {}",
                    terms.key
                )));
            }
            if !(0.0..=1.0).contains(&terms.down_payment) {
                return Err(TablesError::Inconsistent(format!(
                    "{}: down payment must be within [0, 1]",
                    terms.key
                )));
            }
            if terms.down_payment < 1.0 && terms.term_months == 0 {
                return Err(TablesError::Inconsistent(format!(
                    "{}: a financed option needs a term",
                    terms.key
                )));
            }
        }

        if self.scoring.expected_hours_per_year <= 0.0 {
            return Err(TablesError::Inconsistent(
                "expected hours per year must be positive".to_string(),
            ));
        }

        Ok(())
    }

    pub fn manufacturer(&self, name: &str) -> Result<&ManufacturerProfile, ValidationError> {
        find(&self.manufacturers, name)
            .ok_or_else(|| ValidationError::UnknownManufacturer(name.to_string()))
    }

    pub fn base_rate(&self, crane_type: &str) -> Result<f64, ValidationError> {
        find(&self.base_rates, crane_type)
            .copied()
            .ok_or_else(|| ValidationError::UnknownCraneType(crane_type.to_string()))
    }

    /// Regional factor and market trend for a region.
    pub fn region(&self, name: &str) -> Result<(RegionalFactor, MarketTrend), ValidationError> {
        match (find(&self.regions, name), find(&self.trends, name)) {
            (Some(factor), Some(trend)) => Ok((*factor, *trend)),
            _ => Err(ValidationError::UnknownRegion(name.to_string())),
        }
    }

    /// Premium rate for a model designation; the default rate when no tier matches.
    pub fn model_premium(&self, model: &str) -> f64 {
        self.model_tiers
            .iter()
            .find(|tier| tier.matches(model))
            .map(|tier| tier.premium)
            .unwrap_or(self.default_model_premium)
    }

    pub fn financing_terms(&self, key: &str) -> Option<&FinancingTerms> {
        self.financing.iter().find(|terms| terms.key == key)
    }
}

impl Default for MarketTables {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Case-insensitive, whitespace-tolerant key lookup.
fn find<'a, T>(map: &'a BTreeMap<String, T>, name: &str) -> Option<&'a T> {
    let name = name.trim();
    map.get(name).or_else(|| {
        map.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}
