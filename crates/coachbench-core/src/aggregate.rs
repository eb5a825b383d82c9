//! Per-model aggregation of assessment results.

use crate::domain::{AssessmentResult, ModelSummary, CRITERION_NAMES};

/// Fold a model's results into its summary statistics.
///
/// Pure and order-insensitive. An empty input yields a 0.0 average and 0%
/// pass rates rather than a division error.
pub fn summarize(model_name: &str, results: &[AssessmentResult]) -> ModelSummary {
    let total = results.len();

    let average_score = if total == 0 {
        0.0
    } else {
        results.iter().map(|r| r.score as f64).sum::<f64>() / total as f64
    };

    let per_criterion_pass_rate = CRITERION_NAMES
        .iter()
        .enumerate()
        .map(|(slot, name)| {
            let passed = results
                .iter()
                .filter(|r| r.checks.values()[slot])
                .count();
            let rate = if total == 0 {
                0.0
            } else {
                passed as f64 / total as f64 * 100.0
            };
            (name.to_string(), rate)
        })
        .collect();

    ModelSummary {
        model_name: model_name.to_string(),
        average_score,
        per_criterion_pass_rate,
    }
}
