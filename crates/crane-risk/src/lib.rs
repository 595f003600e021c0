//! Crane Risk: sub-risk scoring for crane acquisitions
//!
//! # Example
//!
//! ```
//! use crane_risk::{calculate_risk, RiskInput, RiskLevel};
//!
//! let input = RiskInput::new()
//!     .with_volatility(0.15)
//!     .with_wear_score(69)
//!     .with_age(5)
//!     .with_regional_risk(0.15);
//!
//! let assessment = calculate_risk(&input);
//! assert_eq!(assessment.overall_score, 20);
//! assert_eq!(assessment.level, RiskLevel::Low);
//! ```

pub mod risk;

pub use risk::{
    calculate_risk, RiskAssessment, RiskCalculator, RiskCategory, RiskFactor, RiskInput,
    RiskLevel,
};
