//! Stage Trait: the single contract every valuation stage implements
use crate::context::ValuationContext;
use crate::error::ValidationError;

/// One step of a valuation pipeline.
///
/// A stage reads what earlier stages left in the shared state `S` and
/// writes its own sub-result back into it.
pub trait Stage<S>: Send + Sync {
    /// Unique stage ID (ex: "base.value.v1")
    fn id(&self) -> &'static str;

    /// Whether the output depends only on the input (default: true)
    fn deterministic(&self) -> bool {
        true
    }

    fn run(&self, state: &mut S, ctx: &ValuationContext) -> Result<(), StageError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum StageError {
    /// Input rejected at the boundary
    Invalid(ValidationError),
    /// An upstream sub-result this stage needs has not been produced
    MissingInput(&'static str),
    ExecutionFailed(String),
}

impl From<ValidationError> for StageError {
    fn from(err: ValidationError) -> Self {
        Self::Invalid(err)
    }
}

impl std::fmt::Display for StageError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "VALIDATION/{}: {}", err.field(), err),
            Self::MissingInput(what) => write!(f, "STAGE/MISSING: {} not computed", what),
            Self::ExecutionFailed(msg) => write!(f, "STAGE/EXEC: {}", msg),
        }
    }
}

impl std::error::Error for StageError {}
