//! Risk assessment: market, condition, age and location sub-scores

use crate::state::ValuationState;
use crane_core::{Stage, StageError, ValuationContext};
use crane_risk::{RiskCalculator, RiskInput};

/// Scores market, condition, age and location risk for the record.
#[derive(Default)]
pub struct RiskStage {
    calculator: RiskCalculator,
}

impl RiskStage {
    pub fn new(calculator: RiskCalculator) -> Self {
        Self { calculator }
    }
}

impl Stage<ValuationState> for RiskStage {
    fn id(&self) -> &'static str {
        "risk.assessment.v1"
    }

    fn run(&self, state: &mut ValuationState, _ctx: &ValuationContext) -> Result<(), StageError> {
        let inputs = state.inputs()?;
        let scoring = state.scoring()?;

        let input = RiskInput::new()
            .with_volatility(inputs.trend.volatility)
            .with_wear_score(scoring.wear_score)
            .with_age(inputs.age)
            .with_regional_risk(inputs.regional.risk);

        let assessment = self.calculator.calculate(&input);
        if assessment.level.requires_review() {
            tracing::debug!(
                score = assessment.overall_score,
                level = %assessment.level,
                "risk review suggested"
            );
        }
        state.risk = Some(assessment);
        Ok(())
    }
}
