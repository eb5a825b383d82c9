//! Per-model results-file extractor.
//!
//! A results file is written by the benchmarking harness: one labeled block
//! per submitted prompt (response time, throughput, and a "Raw LLM Reply"
//! envelope), blocks separated by a delimiter line of dashes. The harness
//! guarantees one block per prompt in input order, even for failed requests,
//! which is what keeps replies positionally aligned with the ground truth.
//!
//! Extraction is a two-stage parse: tokenize into blocks on delimiter
//! lines, then decode each block's envelope with a typed decoder. A block
//! whose envelope fails to decode (e.g. an `ERROR:` sentinel from a failed
//! request) still contributes a `None` entry so alignment is preserved.

use crate::domain::RawReply;
use serde::Deserialize;
use std::path::Path;
use tracing::{error, warn};

/// Label preceding the reply envelope inside a block.
const REPLY_LABEL: &str = "Raw LLM Reply (JSON):";

/// Minimum run of dashes recognized as a block delimiter line.
const DELIMITER_MIN_LEN: usize = 10;

/// Reply envelope as produced by the model-serving endpoint.
#[derive(Debug, Default, Deserialize)]
struct ReplyEnvelope {
    #[serde(default)]
    message: ReplyMessage,
}

#[derive(Debug, Default, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: String,
}

/// Read and parse a model's results file.
///
/// A missing file is non-fatal for the whole batch: it is logged and an
/// empty sequence is returned, so that model is simply skipped downstream.
pub fn load_model_replies(path: &Path) -> Vec<RawReply> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            error!(path = %path.display(), error = %e, "Could not read model results file");
            return Vec::new();
        }
    };
    parse_model_replies(&content)
}

/// Extract every reply envelope from results-file text, in file order.
pub fn parse_model_replies(content: &str) -> Vec<RawReply> {
    let mut replies = Vec::new();

    for block in split_blocks(content) {
        let Some(pos) = block.find(REPLY_LABEL) else {
            // Header or trailing-averages block; no reply here.
            continue;
        };
        let payload = block[pos + REPLY_LABEL.len()..].trim();

        let index = replies.len();
        let text = match serde_json::from_str::<ReplyEnvelope>(payload) {
            Ok(envelope) => Some(envelope.message.content),
            Err(e) => {
                warn!(index, error = %e, "Could not decode reply envelope; keeping placeholder");
                None
            }
        };
        replies.push(RawReply { index, text });
    }

    replies
}

/// Tokenize file content into blocks separated by dash delimiter lines.
fn split_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = String::new();

    for line in content.lines() {
        if is_delimiter(line) {
            if !current.trim().is_empty() {
                blocks.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    if !current.trim().is_empty() {
        blocks.push(current);
    }

    blocks
}

/// A delimiter line is a run of dashes, at least [`DELIMITER_MIN_LEN`] long.
fn is_delimiter(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= DELIMITER_MIN_LEN && trimmed.chars().all(|c| c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_block(prompt_num: usize, raw_reply: &str) -> String {
        format!(
            "--- Prompt #{} ---\nResponse Time: 1.2345 seconds\nTokens per Second: 42.00\nRaw LLM Reply (JSON):\n{}\n\n--------------------------------------------------\n\n",
            prompt_num, raw_reply
        )
    }

    fn envelope(content: &str) -> String {
        format!(
            "{{\"model\": \"test\", \"message\": {{\"role\": \"assistant\", \"content\": \"{}\"}}, \"done\": true}}",
            content
        )
    }

    #[test]
    fn test_extracts_replies_in_file_order() {
        let mut file = String::from("--- Performance Stats for Model: test ---\n\n");
        file.push_str(&stats_block(1, &envelope("First reply. <END>")));
        file.push_str(&stats_block(2, &envelope("Second reply. <END>")));

        let replies = parse_model_replies(&file);
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0].index, 0);
        assert_eq!(replies[0].text.as_deref(), Some("First reply. <END>"));
        assert_eq!(replies[1].text.as_deref(), Some("Second reply. <END>"));
    }

    #[test]
    fn test_decode_failure_preserves_alignment() {
        let mut file = String::new();
        file.push_str(&stats_block(1, &envelope("Good reply. <END>")));
        file.push_str(&stats_block(2, "ERROR: connection refused"));
        file.push_str(&stats_block(3, &envelope("Another good one. <END>")));

        let replies = parse_model_replies(&file);
        assert_eq!(replies.len(), 3);
        assert!(replies[0].text.is_some());
        assert!(replies[1].text.is_none());
        assert_eq!(replies[2].index, 2);
        assert!(replies[2].text.is_some());
    }

    #[test]
    fn test_nested_braces_in_envelope() {
        let raw = "{\"message\": {\"role\": \"assistant\", \"content\": \"Nested is fine.\"}, \"usage\": {\"eval_count\": 7}}";
        let replies = parse_model_replies(&stats_block(1, raw));
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].text.as_deref(), Some("Nested is fine."));
    }

    #[test]
    fn test_missing_content_defaults_to_empty() {
        let replies = parse_model_replies(&stats_block(1, "{\"done\": true}"));
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].text.as_deref(), Some(""));
    }

    #[test]
    fn test_trailing_averages_block_is_ignored() {
        let mut file = String::new();
        file.push_str(&stats_block(1, &envelope("Only reply. <END>")));
        file.push_str("--- Overall Averages ---\nTotal Prompts Processed: 1\nAverage Response Time: 1.2345 seconds\n------------------------\n");

        let replies = parse_model_replies(&file);
        assert_eq!(replies.len(), 1);
    }

    #[test]
    fn test_missing_file_yields_empty_sequence() {
        let replies = load_model_replies(Path::new("/nonexistent/coachstats.txt"));
        assert!(replies.is_empty());
    }
}
