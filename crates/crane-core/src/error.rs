//! Unified Error Model
use thiserror::Error;

/// Input rejected at the valuation boundary, before any stage computes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("capacity must be greater than zero, got {value}")]
    InvalidCapacity { value: f64 },

    #[error("condition must be within [0, 1], got {value}")]
    InvalidCondition { value: f64 },

    #[error("year {year} is after the valuation year {valuation_year}")]
    InvalidYear { year: i32, valuation_year: i32 },

    #[error("unknown manufacturer '{0}'")]
    UnknownManufacturer(String),

    #[error("unknown crane type '{0}'")]
    UnknownCraneType(String),

    #[error("unknown region '{0}'")]
    UnknownRegion(String),
}

impl ValidationError {
    /// Name of the offending `CraneRecord` field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidCapacity { .. } => "capacity",
            Self::InvalidCondition { .. } => "condition",
            Self::InvalidYear { .. } => "year",
            Self::UnknownManufacturer(_) => "manufacturer",
            Self::UnknownCraneType(_) => "craneType",
            Self::UnknownRegion(_) => "region",
        }
    }
}

#[derive(Error, Debug)]
pub enum ValuationError {
    #[error("VALIDATION/{0}")]
    Validation(#[from] ValidationError),

    #[error("STAGE/{stage}: {message}")]
    Stage { stage: String, message: String },

    #[error("SERIALIZE/{0}")]
    Serialization(#[from] serde_json::Error),
}

impl ValuationError {
    /// The validation failure, if that is what stopped the valuation.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names() {
        assert_eq!(ValidationError::InvalidCapacity { value: 0.0 }.field(), "capacity");
        assert_eq!(ValidationError::UnknownCraneType("Tower".into()).field(), "craneType");
        assert_eq!(ValidationError::UnknownRegion("Mars".into()).field(), "region");
    }

    #[test]
    fn test_display_prefix() {
        let err: ValuationError = ValidationError::InvalidCondition { value: 1.2 }.into();
        assert_eq!(err.to_string(), "VALIDATION/condition must be within [0, 1], got 1.2");
        assert!(err.validation().is_some());
    }
}
