//! Pipeline Runner: chains stages over a shared state and records proofs
use crate::context::ValuationContext;
use crate::data_model::StageProof;
use crate::error::ValuationError;
use crate::stage::{Stage, StageError};
use serde::Serialize;
use std::time::Instant;

pub struct PipelineRunner<S> {
    stages: Vec<Box<dyn Stage<S>>>,
    pipeline_id: String,
}

impl<S: Serialize> PipelineRunner<S> {
    pub fn new(stages: Vec<Box<dyn Stage<S>>>) -> Self {
        let pipeline_id = stages
            .iter()
            .map(|s| s.id().split('.').next().unwrap_or("?"))
            .collect::<Vec<_>>()
            .join("→");

        Self { stages, pipeline_id }
    }

    /// Runs every stage in order. The first failing stage stops the pipeline.
    pub fn run(
        &self,
        state: &mut S,
        ctx: &ValuationContext,
    ) -> Result<Vec<StageProof>, ValuationError> {
        let mut proofs = Vec::with_capacity(self.stages.len());
        let mut in_hash = hash_state(state)?;

        for stage in &self.stages {
            let start = Instant::now();

            stage.run(state, ctx).map_err(|err| {
                tracing::debug!(stage = stage.id(), error = %err, "stage failed");
                match err {
                    StageError::Invalid(validation) => ValuationError::Validation(validation),
                    other => ValuationError::Stage {
                        stage: stage.id().to_string(),
                        message: other.to_string(),
                    },
                }
            })?;

            let latency_us = start.elapsed().as_micros() as u64;
            let out_hash = hash_state(state)?;
            tracing::debug!(stage = stage.id(), latency_us, "stage complete");

            proofs.push(StageProof {
                id: stage.id().to_string(),
                in_hash: std::mem::replace(&mut in_hash, out_hash.clone()),
                out_hash,
                deterministic: stage.deterministic(),
                latency_us,
            });
        }

        Ok(proofs)
    }

    pub fn pipeline_id(&self) -> &str {
        &self.pipeline_id
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

/// `blake3:`-prefixed digest of the JSON form of `value`.
pub fn hash_state<T: Serialize>(value: &T) -> Result<String, ValuationError> {
    let bytes = serde_json::to_vec(value)?;
    Ok(format!("blake3:{}", blake3::hash(&bytes)))
}
