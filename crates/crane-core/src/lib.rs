//! Crane Core: Stage Trait, Runner, and Data Model
//!
//! Generic stage pipeline with declared determinism, plus the input record
//! and error model shared by every valuation crate.

pub mod context;
pub mod data_model;
pub mod error;
pub mod runner;
pub mod stage;
pub mod telemetry;

pub use context::ValuationContext;
pub use data_model::{CraneRecord, StageProof};
pub use error::{ValidationError, ValuationError};
pub use runner::{hash_state, PipelineRunner};
pub use stage::{Stage, StageError};

/// Engine version reported alongside traced valuations
pub const ENGINE_VERSION: &str = "1.0.0";
