//! coachbench - LLM coaching-summary quality benchmark CLI
//!
//! Scores each model's recorded replies against the ground-truth prompt
//! corpus using the five-criterion rubric, then writes the combined
//! assessment report:
//!
//! ```text
//! coachbench --prompts 100SquatInputPrompt.txt \
//!     --model Qwen-1.5B=qwencoachstats.txt \
//!     --model Phi-3.5-3.8B=phicoachstats.txt \
//!     --output quality_assessment_results.txt
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};

use coachbench_core::{
    init_tracing, load_ground_truth, load_model_replies, summarize, write_report, ModelReport,
    Rubric, RubricConfig,
};

#[derive(Parser)]
#[command(name = "coachbench")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Quality assessment for LLM coaching summaries", long_about = None)]
struct Cli {
    /// Ground-truth prompt corpus (JSON header + issue paragraph per record)
    #[arg(short, long)]
    prompts: PathBuf,

    /// Model results file as NAME=PATH; repeat once per model
    #[arg(short, long = "model", value_name = "NAME=PATH", value_parser = parse_model_arg, required = true)]
    models: Vec<(String, PathBuf)>,

    /// Report output path
    #[arg(short, long, default_value = "quality_assessment_results.txt")]
    output: PathBuf,

    /// Score the warm-up sample (index 0) instead of skipping it
    #[arg(long)]
    include_warmup: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

/// Parse a `NAME=PATH` model argument.
fn parse_model_arg(s: &str) -> std::result::Result<(String, PathBuf), String> {
    match s.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => {
            Ok((name.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected NAME=PATH, got '{}'", s)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_tracing(cli.json, level);

    // Missing or empty ground truth is fatal; nothing can be assessed.
    let truths = load_ground_truth(&cli.prompts).context("Failed to load ground-truth corpus")?;
    info!(records = truths.len(), path = %cli.prompts.display(), "Loaded ground-truth corpus");

    let config = RubricConfig {
        skip_warmup: !cli.include_warmup,
        ..Default::default()
    };
    let rubric = Arc::new(Rubric::new(config));
    let truths = Arc::new(truths);

    // Per-model assessment is independent; fan out one blocking task per
    // model and join in input order so the report ordering is stable.
    let handles: Vec<_> = cli
        .models
        .iter()
        .cloned()
        .map(|(name, path)| {
            let rubric = Arc::clone(&rubric);
            let truths = Arc::clone(&truths);
            tokio::task::spawn_blocking(move || {
                info!(model = %name, path = %path.display(), "Assessing model");
                let replies = load_model_replies(&path);
                let batch = rubric.assess_batch(&truths, &replies);
                let summary = summarize(&name, &batch.results);
                ModelReport {
                    summary,
                    results: batch.results,
                    alignment: batch.alignment,
                }
            })
        })
        .collect();

    let mut models = Vec::with_capacity(handles.len());
    for joined in futures::future::join_all(handles).await {
        models.push(joined.context("Model assessment task panicked")?);
    }

    write_report(&cli.output, &models).context("Failed to write assessment report")?;
    info!(path = %cli.output.display(), models = models.len(), "Quality assessment complete");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_model_arg_valid() {
        let (name, path) = parse_model_arg("Qwen-1.5B=qwencoachstats.txt").expect("valid arg");
        assert_eq!(name, "Qwen-1.5B");
        assert_eq!(path, PathBuf::from("qwencoachstats.txt"));
    }

    #[test]
    fn test_parse_model_arg_rejects_missing_parts() {
        assert!(parse_model_arg("no-equals-sign").is_err());
        assert!(parse_model_arg("=path-only").is_err());
        assert!(parse_model_arg("name-only=").is_err());
    }

    #[test]
    fn test_cli_parses_repeated_models() {
        let cli = Cli::try_parse_from([
            "coachbench",
            "--prompts",
            "prompts.txt",
            "--model",
            "a=a.txt",
            "--model",
            "b=b.txt",
            "--include-warmup",
        ])
        .expect("parse");

        assert_eq!(cli.models.len(), 2);
        assert_eq!(cli.models[1].0, "b");
        assert!(cli.include_warmup);
        assert_eq!(cli.output, PathBuf::from("quality_assessment_results.txt"));
    }
}
