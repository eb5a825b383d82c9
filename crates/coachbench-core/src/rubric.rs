//! Rubric evaluation: five independent pass/fail checks per reply.
//!
//! The evaluator is deterministic and stateless. All vocabulary (the
//! termination marker, the prescriptive-language list, the recognized
//! issue phrases) is injected via [`RubricConfig`] rather than embedded in
//! the check logic, so tests can substitute fixtures.

use crate::domain::{
    AlignmentDiagnostic, AssessmentResult, CriterionVector, PromptRecord, RawReply,
    EMPTY_REPLY_SENTINEL,
};
use crate::text::{ends_with_bare_end, normalize_phrase, split_sentences, strip_termination};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

/// Configuration for the five-criterion rubric.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RubricConfig {
    /// Literal end-of-summary token models are instructed to emit.
    pub termination_marker: String,

    /// Imperative coaching instructions forbidden after the first sentence.
    /// Matched as lowercase substrings.
    pub prescriptive_keywords: Vec<String>,

    /// Recognized defect phrases used for factual-consistency checking.
    /// Matched as lowercase substrings, symmetrically on ground truth and
    /// reply text.
    pub issue_vocabulary: Vec<String>,

    /// Minimum acceptable sentence count (inclusive).
    pub min_sentences: usize,

    /// Maximum acceptable sentence count (inclusive).
    pub max_sentences: usize,

    /// Exclude index 0 of every pairing from scoring.
    ///
    /// The first prompt of a benchmark run is a warm-up sample whose
    /// latency and output are biased by model cold start.
    pub skip_warmup: bool,
}

impl Default for RubricConfig {
    fn default() -> Self {
        Self {
            termination_marker: "<END>".to_string(),
            prescriptive_keywords: [
                "widen stance",
                "bring heels in",
                "keep knees tracking",
                "straighten arms",
                "reach forward",
                "lower to at or below",
                "add a small hip hinge",
                "lift the chest",
                "brace so ribs stay stacked",
                "sit back slightly",
            ]
            .map(String::from)
            .to_vec(),
            issue_vocabulary: [
                "legs too wide",
                "legs too narrow",
                "trunk too upright",
                "trunk too forward",
                "arm not extended",
                "arms not extended",
                "left arm not extended",
                "right arm not extended",
                "arm too high",
                "arms too high",
                "left arm too high",
                "right arm too high",
            ]
            .map(String::from)
            .to_vec(),
            min_sentences: 2,
            max_sentences: 3,
            skip_warmup: true,
        }
    }
}

/// Outcome of assessing one model's full reply sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchAssessment {
    /// Per-pair results, in corpus order.
    pub results: Vec<AssessmentResult>,

    /// Length bookkeeping for the pairing.
    pub alignment: AlignmentDiagnostic,
}

/// The five-criterion rubric evaluator.
pub struct Rubric {
    config: RubricConfig,
}

impl Rubric {
    /// Create an evaluator from explicit configuration.
    pub fn new(config: RubricConfig) -> Self {
        Self { config }
    }

    /// Evaluate one (ground truth, reply) pair.
    ///
    /// Never fails: a missing or empty reply degrades to score 0 with every
    /// check false and a sentinel reply text.
    pub fn evaluate(&self, truth: &PromptRecord, reply: &RawReply) -> AssessmentResult {
        let text = reply.text.as_deref().map(str::trim).unwrap_or("");
        if text.is_empty() {
            return AssessmentResult {
                index: reply.index,
                score: 0,
                checks: CriterionVector::default(),
                reply_text: EMPTY_REPLY_SENTINEL.to_string(),
            };
        }

        let mut checks = CriterionVector::default();

        // 1. Termination marker, detected on the raw trimmed reply before
        // any segmentation. A bare trailing "end"/"end." counts as a
        // fallback form.
        checks.has_termination_marker = text
            .to_ascii_uppercase()
            .contains(&self.config.termination_marker.to_ascii_uppercase())
            || ends_with_bare_end(text);

        // Both sentence checks must see the identical segmentation.
        let body = strip_termination(text, &self.config.termination_marker);
        let sentences = split_sentences(&body);

        // 2. Opening sentence: prefix match against the mandated clause.
        // Models are allowed to append words after it.
        if let Some(first) = sentences.first() {
            let expected = normalize_phrase(&truth.expected_opening());
            checks.opening_sentence_matches = normalize_phrase(first).starts_with(&expected);
        }

        // 3. Sentence count.
        checks.sentence_count_in_range =
            (self.config.min_sentences..=self.config.max_sentences).contains(&sentences.len());

        // Everything after the opening sentence, lowercased for keyword
        // matching (no article/hyphen normalization here; the vocabulary is
        // multi-word literals).
        let summary = sentences
            .iter()
            .skip(1)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        // 4. No prescriptive language in the summary sentences.
        checks.no_prescriptive_language = !self
            .config
            .prescriptive_keywords
            .iter()
            .any(|keyword| summary.contains(&keyword.to_lowercase()));

        // 5. Factual consistency: mentioned issues must be a non-empty
        // subset of the ground-truth issues, or both sets must be empty.
        let truth_issues = self.extract_issues(&truth.issue_text);
        let reply_issues = self.extract_issues(&summary);
        checks.facts_consistent = if truth_issues.is_empty() {
            reply_issues.is_empty()
        } else {
            !reply_issues.is_empty() && reply_issues.is_subset(&truth_issues)
        };

        AssessmentResult {
            index: reply.index,
            score: checks.score(),
            checks,
            reply_text: text.to_string(),
        }
    }

    /// Assess a model's replies against the ground-truth corpus.
    ///
    /// The two sequences are zipped up to the shorter length; a shortfall on
    /// either side is reported in the returned diagnostic and logged, not
    /// treated as an error. With `skip_warmup` set, index 0 is excluded.
    pub fn assess_batch(
        &self,
        truths: &[PromptRecord],
        replies: &[RawReply],
    ) -> BatchAssessment {
        let paired = truths.len().min(replies.len());
        let truncated = truths.len().max(replies.len()) - paired;
        if truncated > 0 {
            warn!(
                truth_len = truths.len(),
                reply_len = replies.len(),
                truncated,
                "Ground-truth and reply counts differ; truncating to the shorter"
            );
        }

        let start = if self.config.skip_warmup { 1 } else { 0 };
        let results = truths
            .iter()
            .zip(replies)
            .skip(start)
            .map(|(truth, reply)| self.evaluate(truth, reply))
            .collect();

        BatchAssessment {
            results,
            alignment: AlignmentDiagnostic {
                truth_len: truths.len(),
                reply_len: replies.len(),
                truncated,
            },
        }
    }

    /// Vocabulary phrases present (as substrings) in lowercased text.
    fn extract_issues(&self, text: &str) -> BTreeSet<&str> {
        let lowered = text.to_lowercase();
        self.config
            .issue_vocabulary
            .iter()
            .map(String::as_str)
            .filter(|phrase| lowered.contains(&phrase.to_lowercase()))
            .collect()
    }
}

impl Default for Rubric {
    fn default() -> Self {
        Self::new(RubricConfig::default())
    }
}
