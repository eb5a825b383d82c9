//! Domain models for the quality assessment engine.
//!
//! Canonical definitions for the core entities:
//! - `PromptRecord`: ground-truth expectation for one prompt
//! - `RawReply`: extracted model reply, positionally aligned
//! - `CriterionVector`: five pass/fail rubric outcomes
//! - `AssessmentResult`: scored (ground truth, reply) pair
//! - `ModelSummary`: aggregated per-model statistics

use serde::{Deserialize, Serialize};

/// Reply text recorded when extraction or decoding failed.
pub const EMPTY_REPLY_SENTINEL: &str = "JSON DECODE ERROR OR EMPTY REPLY";

/// Ground-truth expectation for a single prompt.
///
/// Identified by position in the corpus; index *i* in the ground truth
/// corresponds to reply *i* in every model's results file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptRecord {
    /// Expected squat classification (e.g. "back squat").
    pub expected_category: String,

    /// Expected bottom-position bias (e.g. "neutral bias").
    pub expected_bias: String,

    /// Free-text issue paragraph describing observed defects, if any.
    pub issue_text: String,
}

impl PromptRecord {
    /// The opening clause the reply's first sentence must start with.
    pub fn expected_opening(&self) -> String {
        format!("{} with {}", self.expected_category, self.expected_bias)
    }
}

/// A raw model reply recovered from a results file.
///
/// `text` is `None` when the envelope could not be decoded; the evaluator
/// turns that into an automatic zero-score outcome rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawReply {
    /// Position in the results file (aligned with the ground-truth corpus).
    pub index: usize,

    /// Extracted reply text, or `None` on decode failure.
    pub text: Option<String>,
}

/// Pass/fail outcome of each rubric criterion.
///
/// Order is significant only for report rendering; the score is the count
/// of true entries regardless of order.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CriterionVector {
    /// First sentence starts with the mandated opening clause.
    pub opening_sentence_matches: bool,

    /// Total sentence count is within the configured range.
    pub sentence_count_in_range: bool,

    /// Reply carries the literal termination marker.
    pub has_termination_marker: bool,

    /// No imperative coaching instruction appears after the first sentence.
    pub no_prescriptive_language: bool,

    /// Mentioned issues are consistent with the ground truth.
    pub facts_consistent: bool,
}

/// Criterion names in report-rendering order.
pub const CRITERION_NAMES: [&str; 5] = [
    "opening_sentence_matches",
    "sentence_count_in_range",
    "has_termination_marker",
    "no_prescriptive_language",
    "facts_consistent",
];

impl CriterionVector {
    /// Outcomes in the same order as [`CRITERION_NAMES`].
    pub fn values(&self) -> [bool; 5] {
        [
            self.opening_sentence_matches,
            self.sentence_count_in_range,
            self.has_termination_marker,
            self.no_prescriptive_language,
            self.facts_consistent,
        ]
    }

    /// (name, outcome) pairs in report order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, bool)> {
        CRITERION_NAMES.into_iter().zip(self.values())
    }

    /// Score contributed by this vector: the count of passing criteria.
    pub fn score(&self) -> u8 {
        self.values().iter().filter(|v| **v).count() as u8
    }
}

/// Scored outcome for one (ground truth, reply) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssessmentResult {
    /// Position in the corpus (shared with the ground truth and reply).
    pub index: usize,

    /// Total score, 0..=5; always equals `checks.score()`.
    pub score: u8,

    /// Per-criterion outcomes.
    pub checks: CriterionVector,

    /// The assessed reply text, or [`EMPTY_REPLY_SENTINEL`].
    pub reply_text: String,
}

/// Aggregated statistics for one model, recomputed fresh each run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelSummary {
    /// Model name as given on the command line.
    pub model_name: String,

    /// Arithmetic mean of all scores; 0.0 when nothing was assessed.
    pub average_score: f64,

    /// (criterion name, pass percentage) in report order.
    pub per_criterion_pass_rate: Vec<(String, f64)>,
}

/// Length bookkeeping for the ground-truth/reply pairing.
///
/// A shortfall on either side truncates the pairing to the shorter length;
/// that is documented behavior, surfaced here instead of silently dropped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlignmentDiagnostic {
    /// Number of ground-truth records parsed.
    pub truth_len: usize,

    /// Number of reply entries extracted.
    pub reply_len: usize,

    /// Records dropped from the longer side by truncation.
    pub truncated: usize,
}
