//! Valuation Engine: wires the stage pipeline to the market tables

use crate::base_value::BaseValueStage;
use crate::deal_score::DealScoreStage;
use crate::financial::FinancialStage;
use crate::financing::FinancingStage;
use crate::market::MarketStage;
use crate::options::EngineOptions;
use crate::rent_vs_buy::RentVsBuyStage;
use crate::result::ValuationResult;
use crate::risk_stage::RiskStage;
use crate::state::ValuationState;
use crate::validate::ValidateStage;
use crane_core::{
    CraneRecord, PipelineRunner, Stage, StageProof, ValuationContext, ValuationError,
    ENGINE_VERSION,
};
use crane_tables::MarketTables;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

static DEFAULT_ENGINE: Lazy<ValuationEngine> = Lazy::new(ValuationEngine::default);

/// Values `record` with the built-in tables and default options.
pub fn valuate(record: &CraneRecord) -> Result<ValuationResult, ValuationError> {
    DEFAULT_ENGINE.valuate(record)
}

/// The stages in execution order.
pub fn standard_stages(
    tables: &Arc<MarketTables>,
    options: &EngineOptions,
) -> Vec<Box<dyn Stage<ValuationState>>> {
    vec![
        Box::new(ValidateStage::new(tables.clone(), options.fallback)),
        Box::new(BaseValueStage),
        Box::new(DealScoreStage::new(tables.clone())),
        Box::new(MarketStage),
        Box::new(FinancialStage),
        Box::new(RiskStage::default()),
        Box::new(FinancingStage::new(
            tables.clone(),
            options.financing_strategy,
            options.recommended_financing.clone(),
        )),
        Box::new(RentVsBuyStage::new(tables.clone())),
    ]
}

/// A result together with the proof of how it was produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracedValuation {
    pub result: ValuationResult,
    pub proofs: Vec<StageProof>,
    pub pipeline_id: String,
    pub trace_id: String,
    pub fingerprint: String,
    pub engine_version: String,
    pub tables_version: String,
}

pub struct ValuationEngine {
    tables: Arc<MarketTables>,
    options: EngineOptions,
    runner: PipelineRunner<ValuationState>,
}

impl Default for ValuationEngine {
    fn default() -> Self {
        Self::new(crane_tables::shared(), EngineOptions::default())
    }
}

impl ValuationEngine {
    pub fn new(tables: Arc<MarketTables>, options: EngineOptions) -> Self {
        let runner = PipelineRunner::new(standard_stages(&tables, &options));
        Self {
            tables,
            options,
            runner,
        }
    }

    pub fn tables(&self) -> &MarketTables {
        &self.tables
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn pipeline_id(&self) -> &str {
        self.runner.pipeline_id()
    }

    /// Values `record` as of the current calendar year.
    pub fn valuate(&self, record: &CraneRecord) -> Result<ValuationResult, ValuationError> {
        self.valuate_with(record, &ValuationContext::now())
    }

    pub fn valuate_with(
        &self,
        record: &CraneRecord,
        ctx: &ValuationContext,
    ) -> Result<ValuationResult, ValuationError> {
        self.execute(record, ctx).map(|(result, _)| result)
    }

    /// Like [`valuate_with`](Self::valuate_with), also returning per-stage
    /// proofs and a fingerprint of the result.
    pub fn valuate_traced(
        &self,
        record: &CraneRecord,
        ctx: &ValuationContext,
    ) -> Result<TracedValuation, ValuationError> {
        let (result, proofs) = self.execute(record, ctx)?;
        let fingerprint = result.fingerprint()?;

        Ok(TracedValuation {
            result,
            proofs,
            pipeline_id: self.pipeline_id().to_string(),
            trace_id: ctx.trace_id.clone(),
            fingerprint,
            engine_version: ENGINE_VERSION.to_string(),
            tables_version: self.tables.version.clone(),
        })
    }

    fn execute(
        &self,
        record: &CraneRecord,
        ctx: &ValuationContext,
    ) -> Result<(ValuationResult, Vec<StageProof>), ValuationError> {
        let span = tracing::info_span!(
            "valuate",
            trace_id = %ctx.trace_id,
            manufacturer = %record.manufacturer,
            region = %record.region,
        );
        let _enter = span.enter();

        let mut state = ValuationState::new(record.clone());
        let proofs = match self.runner.run(&mut state, ctx) {
            Ok(proofs) => proofs,
            Err(err) => {
                tracing::warn!(error = %err, "valuation rejected");
                return Err(err);
            }
        };

        let result = state.into_result().map_err(|err| ValuationError::Stage {
            stage: "result".to_string(),
            message: err.to_string(),
        })?;

        tracing::info!(
            fair_market_value = result.fair_market_value,
            deal_score = result.deal_score,
            recommendation = %result.overall_recommendation,
            "valuation complete"
        );
        Ok((result, proofs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{scenario_record, SCENARIO_YEAR};

    #[test]
    fn test_pipeline_id() {
        let engine = ValuationEngine::default();
        assert_eq!(
            engine.pipeline_id(),
            "validate→base→score→market→financial→risk→financing→rent"
        );
    }

    #[test]
    fn test_traced_proofs_chain() {
        let engine = ValuationEngine::default();
        let ctx = ValuationContext::for_year(SCENARIO_YEAR);
        let traced = engine.valuate_traced(&scenario_record(), &ctx).unwrap();

        assert_eq!(traced.proofs.len(), 8);
        assert_eq!(traced.trace_id, ctx.trace_id);
        assert_eq!(traced.tables_version, "2024.1");
        assert_eq!(traced.engine_version, ENGINE_VERSION);
        for pair in traced.proofs.windows(2) {
            assert_eq!(pair[0].out_hash, pair[1].in_hash);
        }
        assert!(traced.proofs.iter().all(|p| p.deterministic));
        assert_eq!(traced.fingerprint, traced.result.fingerprint().unwrap());
    }

    #[test]
    fn test_default_engine_matches_free_function() {
        let record = scenario_record().with_year(2015);
        let a = valuate(&record).unwrap();
        let b = ValuationEngine::default().valuate(&record).unwrap();
        assert_eq!(a, b);
    }
}
