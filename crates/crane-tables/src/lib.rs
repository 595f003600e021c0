//! Crane Tables: static reference data for valuations
//!
//! Manufacturer profiles, regional factors, market trends, base rates per
//! ton, model premium tiers, financing templates and cost assumptions. The
//! built-in set can be replaced by a YAML file at startup.
//!
//! # Example
//!
//! ```
//! use crane_tables::MarketTables;
//!
//! let tables = MarketTables::builtin();
//! let liebherr = tables.manufacturer("Liebherr").unwrap();
//! assert_eq!(liebherr.premium, 0.15);
//! assert!(tables.region("Atlantis").is_err());
//! ```

pub mod bands;
pub mod error;
pub mod profiles;
pub mod tables;

pub use bands::{Bound, Threshold, ThresholdTable};
pub use error::TablesError;
pub use profiles::{
    FinancingTerms, ManufacturerProfile, MarketTrend, ModelTier, RegionalFactor,
    RentVsBuyAssumptions, ScoringAssumptions,
};
pub use tables::{shared, MarketTables};
