//! coachbench core - Quality Assessment Engine
//!
//! Scores raw LLM replies against a fixed five-criterion coaching-summary
//! rubric:
//! - Parses the ground-truth prompt corpus and per-model results files
//! - Evaluates each (ground truth, reply) pair into a 0-5 score
//! - Aggregates per-model averages and per-criterion pass rates
//! - Renders the combined human-readable report

pub mod aggregate;
pub mod corpus;
pub mod domain;
pub mod error;
pub mod replies;
pub mod report;
pub mod rubric;
pub mod telemetry;
pub mod text;

// Re-export key types
pub use aggregate::summarize;
pub use corpus::load_ground_truth;
pub use domain::{
    AlignmentDiagnostic, AssessmentResult, CriterionVector, ModelSummary, PromptRecord, RawReply,
};
pub use error::{AssessError, Result};
pub use replies::load_model_replies;
pub use report::{render_report, write_report, ModelReport};
pub use rubric::{BatchAssessment, Rubric, RubricConfig};
pub use telemetry::init_tracing;
