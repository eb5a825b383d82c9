//! Human-readable report rendering.
//!
//! Split into pure `render_*` functions returning `String` and thin
//! `write_*` wrappers that touch the filesystem.

use crate::domain::{AlignmentDiagnostic, AssessmentResult, ModelSummary};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::path::Path;

/// Everything the report needs for one model section.
#[derive(Debug, Clone)]
pub struct ModelReport {
    /// Aggregated statistics.
    pub summary: ModelSummary,

    /// Per-prompt detail, in corpus order.
    pub results: Vec<AssessmentResult>,

    /// Pairing diagnostic from batch assessment.
    pub alignment: AlignmentDiagnostic,
}

/// Render the full assessment report.
///
/// Model sections appear in input order; the trailing summary ranks models
/// by average score descending, ties broken by input order (stable sort).
/// Models with nothing assessed keep their section placeholder but are
/// excluded from the ranking.
pub fn render_report(models: &[ModelReport], generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();

    out.push_str("--- LLM Quality Assessment Results ---\n");
    let _ = writeln!(out, "Generated: {}\n", generated_at.to_rfc3339());

    for model in models {
        out.push_str("=========================================\n");
        let _ = writeln!(out, "Model: {}", model.summary.model_name);
        out.push_str("=========================================\n\n");

        if model.results.is_empty() {
            out.push_str("No results to assess.\n\n");
            continue;
        }

        let _ = writeln!(
            out,
            "Average Quality Score: {:.2} / 5.00\n",
            model.summary.average_score
        );

        if model.alignment.truncated > 0 {
            let _ = writeln!(
                out,
                "Note: {} record(s) dropped by length mismatch ({} ground truth vs {} replies)\n",
                model.alignment.truncated,
                model.alignment.truth_len,
                model.alignment.reply_len
            );
        }

        out.push_str("--- Pass Rate per Criterion ---\n");
        for (name, rate) in &model.summary.per_criterion_pass_rate {
            let _ = writeln!(out, "- {}: {:.1}%", name, rate);
        }

        out.push_str("\n--- Detailed Breakdown ---\n");
        for result in &model.results {
            let _ = writeln!(out, "\n--- Prompt #{} ---", result.index + 1);
            let _ = writeln!(out, "Score: {}/5", result.score);
            let _ = writeln!(out, "Reply: {}", result.reply_text.trim());
            out.push_str("Checks:\n");
            for (name, passed) in result.checks.entries() {
                let status = if passed { "PASS" } else { "FAIL" };
                let _ = writeln!(out, "  - {}: {}", name, status);
            }
        }

        out.push_str("\n\n");
    }

    out.push_str("=========================================\n");
    out.push_str("           FINAL SUMMARY\n");
    out.push_str("=========================================\n\n");

    // Models with nothing assessed (e.g. missing results file) were
    // skipped, not scored; they get no ranking entry.
    let mut ranked: Vec<&ModelReport> = models
        .iter()
        .filter(|m| !m.results.is_empty())
        .collect();
    ranked.sort_by(|a, b| {
        b.summary
            .average_score
            .partial_cmp(&a.summary.average_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for model in ranked {
        let _ = writeln!(
            out,
            "{}: {:.2} / 5.00",
            model.summary.model_name, model.summary.average_score
        );
    }

    out
}

/// Render and write the report to disk.
pub fn write_report(path: &Path, models: &[ModelReport]) -> Result<()> {
    let content = render_report(models, Utc::now());
    std::fs::write(path, content).with_context(|| format!("write report {:?}", path))?;
    Ok(())
}
