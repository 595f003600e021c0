//! Data Model: CraneRecord input and StageProof trace records
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Equipment attributes submitted for valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CraneRecord {
    /// Manufacturer name (ex: "Liebherr")
    pub manufacturer: String,
    /// Crane category (ex: "Crawler Crane")
    pub crane_type: String,
    /// Free-text model designation (ex: "LR 1800-1.0")
    pub model: String,
    /// Lifting capacity in tons
    pub capacity: f64,
    /// Year of manufacture
    pub year: i32,
    /// Usage hours on the meter
    pub hours: u32,
    /// Normalized condition score in [0, 1]
    pub condition: f64,
    pub region: String,
    /// Seller's asking price, reporting only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asking_price: Option<f64>,
}

impl CraneRecord {
    pub fn new(
        manufacturer: impl Into<String>,
        crane_type: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            crane_type: crane_type.into(),
            model: model.into(),
            capacity: 0.0,
            year: 0,
            hours: 0,
            condition: 0.0,
            region: String::new(),
            asking_price: None,
        }
    }

    pub fn with_capacity(mut self, tons: f64) -> Self {
        self.capacity = tons;
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn with_hours(mut self, hours: u32) -> Self {
        self.hours = hours;
        self
    }

    pub fn with_condition(mut self, condition: f64) -> Self {
        self.condition = condition;
        self
    }

    pub fn in_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn asking(mut self, price: f64) -> Self {
        self.asking_price = Some(price);
        self
    }

    /// Checks the numeric fields and returns the crane's age in whole years.
    ///
    /// Category fields (manufacturer, type, region) are checked against the
    /// lookup tables by the validation stage.
    pub fn validate(&self, valuation_year: i32) -> Result<u32, ValidationError> {
        // NaN fails both comparisons
        if !(self.capacity > 0.0 && self.capacity.is_finite()) {
            return Err(ValidationError::InvalidCapacity { value: self.capacity });
        }
        if !(0.0..=1.0).contains(&self.condition) {
            return Err(ValidationError::InvalidCondition { value: self.condition });
        }
        let invalid_year = || ValidationError::InvalidYear {
            year: self.year,
            valuation_year,
        };
        let age = valuation_year.checked_sub(self.year).ok_or_else(invalid_year)?;
        u32::try_from(age).map_err(|_| invalid_year())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageProof {
    pub id: String,
    pub in_hash: String,
    pub out_hash: String,
    pub deterministic: bool,
    pub latency_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CraneRecord {
        CraneRecord::new("Grove", "All-Terrain Crane", "GMK 5250L")
            .with_capacity(250.0)
            .with_year(2018)
            .with_hours(4200)
            .with_condition(0.8)
            .in_region("Europe")
    }

    #[test]
    fn test_validate_returns_age() {
        assert_eq!(record().validate(2024), Ok(6));
        assert_eq!(record().validate(2018), Ok(0));
    }

    #[test]
    fn test_rejects_non_positive_capacity() {
        for capacity in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = record().with_capacity(capacity).validate(2024).unwrap_err();
            assert_eq!(err.field(), "capacity");
        }
    }

    #[test]
    fn test_rejects_condition_out_of_range() {
        assert!(record().with_condition(1.0).validate(2024).is_ok());
        assert!(record().with_condition(0.0).validate(2024).is_ok());
        let err = record().with_condition(1.01).validate(2024).unwrap_err();
        assert_eq!(err, ValidationError::InvalidCondition { value: 1.01 });
        assert!(record().with_condition(-0.1).validate(2024).is_err());
        assert!(record().with_condition(f64::NAN).validate(2024).is_err());
    }

    #[test]
    fn test_rejects_future_year() {
        let err = record().with_year(2026).validate(2024).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidYear {
                year: 2026,
                valuation_year: 2024
            }
        );
    }

    #[test]
    fn test_rejects_year_too_old_to_age() {
        let err = record().with_year(i32::MIN).validate(2024).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidYear {
                year: i32::MIN,
                valuation_year: 2024
            }
        );
        assert_eq!(record().with_year(1).validate(2024), Ok(2023));
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = serde_json::to_value(record().asking(1_200_000.0)).unwrap();
        assert_eq!(json["craneType"], "All-Terrain Crane");
        assert_eq!(json["askingPrice"], 1_200_000.0);

        let parsed: CraneRecord = serde_json::from_value(serde_json::json!({
            "manufacturer": "Tadano",
            "craneType": "Rough Terrain Crane",
            "model": "GR-1000XL",
            "capacity": 100.0,
            "year": 2020,
            "hours": 0,
            "condition": 0.9,
            "region": "Asia Pacific"
        }))
        .unwrap();
        assert_eq!(parsed.asking_price, None);
        assert_eq!(parsed.hours, 0);
    }
}
