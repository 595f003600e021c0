use crate::options::FallbackPolicy;
use crate::state::{ResolvedInputs, ValuationState};
use crane_core::{Stage, StageError, ValuationContext};
use crane_tables::MarketTables;
use std::sync::Arc;

/// Boundary check: rejects bad records and resolves every table lookup
/// before any monetary stage runs.
pub struct ValidateStage {
    tables: Arc<MarketTables>,
    fallback: FallbackPolicy,
}

impl ValidateStage {
    pub fn new(tables: Arc<MarketTables>, fallback: FallbackPolicy) -> Self {
        Self { tables, fallback }
    }
}

impl Stage<ValuationState> for ValidateStage {
    fn id(&self) -> &'static str {
        "validate.record.v1"
    }

    fn run(&self, state: &mut ValuationState, ctx: &ValuationContext) -> Result<(), StageError> {
        let record = &state.record;
        let age = record.validate(ctx.valuation_year)?;

        let (manufacturer, manufacturer_fallback) = match self.tables.manufacturer(&record.manufacturer) {
            Ok(profile) => (profile.clone(), false),
            Err(err) if self.fallback == FallbackPolicy::Strict => return Err(err.into()),
            Err(_) => {
                tracing::warn!(
                    manufacturer = %record.manufacturer,
                    "unknown manufacturer, using default profile"
                );
                (self.tables.default_manufacturer.clone(), true)
            }
        };

        let (base_rate_per_ton, base_rate_fallback) = match self.tables.base_rate(&record.crane_type) {
            Ok(rate) => (rate, false),
            Err(err) if self.fallback == FallbackPolicy::Strict => return Err(err.into()),
            Err(_) => {
                tracing::warn!(
                    crane_type = %record.crane_type,
                    rate = self.tables.default_base_rate,
                    "unknown crane type, using default base rate"
                );
                (self.tables.default_base_rate, true)
            }
        };

        let (regional, trend) = self.tables.region(&record.region)?;
        let model_premium_rate = self.tables.model_premium(&record.model);
        let expected_hours = age as f64 * self.tables.scoring.expected_hours_per_year;

        state.inputs = Some(ResolvedInputs {
            age,
            expected_hours,
            manufacturer,
            manufacturer_fallback,
            regional,
            trend,
            base_rate_per_ton,
            base_rate_fallback,
            model_premium_rate,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{scenario_record, SCENARIO_YEAR};
    use crane_core::ValidationError;

    fn run(record: crane_core::CraneRecord, fallback: FallbackPolicy) -> Result<ValuationState, StageError> {
        let stage = ValidateStage::new(crane_tables::shared(), fallback);
        let mut state = ValuationState::new(record);
        stage.run(&mut state, &ValuationContext::for_year(SCENARIO_YEAR))?;
        Ok(state)
    }

    #[test]
    fn test_resolves_scenario_inputs() {
        let state = run(scenario_record(), FallbackPolicy::Strict).unwrap();
        let inputs = state.inputs().unwrap();
        assert_eq!(inputs.age, 5);
        assert_eq!(inputs.expected_hours, 4000.0);
        assert_eq!(inputs.manufacturer.premium, 0.15);
        assert_eq!(inputs.base_rate_per_ton, 5000.0);
        assert_eq!(inputs.model_premium_rate, 0.08);
        assert_eq!(inputs.regional.factor, 0.04);
        assert_eq!(inputs.trend.demand, 1.04);
        assert!(!inputs.manufacturer_fallback);
    }

    #[test]
    fn test_new_crane_expects_no_hours() {
        let state = run(scenario_record().with_year(SCENARIO_YEAR), FallbackPolicy::Strict).unwrap();
        assert_eq!(state.inputs().unwrap().age, 0);
        assert_eq!(state.inputs().unwrap().expected_hours, 0.0);
    }

    #[test]
    fn test_strict_rejects_unknown_categories() {
        let mut record = scenario_record();
        record.manufacturer = "Acme".to_string();
        assert_eq!(
            run(record, FallbackPolicy::Strict).unwrap_err(),
            StageError::Invalid(ValidationError::UnknownManufacturer("Acme".to_string()))
        );

        let mut record = scenario_record();
        record.crane_type = "Tower Crane".to_string();
        assert_eq!(
            run(record, FallbackPolicy::Strict).unwrap_err(),
            StageError::Invalid(ValidationError::UnknownCraneType("Tower Crane".to_string()))
        );
    }

    #[test]
    fn test_lenient_substitutes_defaults() {
        let mut record = scenario_record();
        record.manufacturer = "Acme".to_string();
        record.crane_type = "Tower Crane".to_string();
        let state = run(record, FallbackPolicy::Lenient).unwrap();
        let inputs = state.inputs().unwrap();

        assert!(inputs.manufacturer_fallback);
        assert_eq!(inputs.manufacturer.reputation, "Unrated");
        assert!(inputs.base_rate_fallback);
        assert_eq!(inputs.base_rate_per_ton, 5000.0);
    }

    #[test]
    fn test_unknown_region_is_rejected_even_when_lenient() {
        let record = scenario_record().in_region("Antarctica");
        assert_eq!(
            run(record, FallbackPolicy::Lenient).unwrap_err(),
            StageError::Invalid(ValidationError::UnknownRegion("Antarctica".to_string()))
        );
    }

    #[test]
    fn test_numeric_checks_run_first() {
        let mut record = scenario_record().with_capacity(-1.0);
        record.manufacturer = "Acme".to_string();
        let err = run(record, FallbackPolicy::Strict).unwrap_err();
        assert!(matches!(err, StageError::Invalid(ValidationError::InvalidCapacity { .. })));
    }
}
