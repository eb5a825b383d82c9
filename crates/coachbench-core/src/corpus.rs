//! Ground-truth corpus loader.
//!
//! The corpus is UTF-8 text with records separated by a blank line. Each
//! record is one JSON header line carrying the expected classification,
//! followed by one or more lines of free-text issue description.

use crate::domain::PromptRecord;
use crate::error::{AssessError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Label prefixing the issue paragraph in the corpus format.
const ISSUE_LABEL: &str = "Issue paragraph:";

/// JSON header line of a ground-truth record.
#[derive(Debug, Deserialize)]
struct PromptHeader {
    #[serde(rename = "squatType")]
    squat_type: String,

    #[serde(rename = "bottomBias")]
    bottom_bias: String,
}

/// Read and parse the ground-truth corpus from disk.
///
/// A missing or unreadable file is an error; an empty or fully-malformed
/// corpus is too, since no meaningful report can be produced without
/// ground truth.
pub fn load_ground_truth(path: &Path) -> Result<Vec<PromptRecord>> {
    let content = std::fs::read_to_string(path).map_err(|source| AssessError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_ground_truth(&content);
    if records.is_empty() {
        return Err(AssessError::EmptyCorpus(path.to_path_buf()));
    }
    Ok(records)
}

/// Parse corpus text into ordered prompt records.
///
/// Malformed records (undecodable header, missing issue paragraph) are
/// warned about and skipped; the batch never aborts on a single record.
pub fn parse_ground_truth(content: &str) -> Vec<PromptRecord> {
    let mut records = Vec::new();

    for block in content.trim().split("\n\n") {
        let lines: Vec<&str> = block
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.len() < 2 {
            debug!("Skipping ground-truth block with fewer than two lines");
            continue;
        }

        let header: PromptHeader = match serde_json::from_str(lines[0]) {
            Ok(header) => header,
            Err(e) => {
                warn!(line = %lines[0], error = %e, "Skipping undecodable ground-truth header");
                continue;
            }
        };

        let issue = lines[1..].join("\n");
        let issue_text = issue
            .strip_prefix(ISSUE_LABEL)
            .unwrap_or(&issue)
            .trim()
            .to_string();

        records.push(PromptRecord {
            expected_category: header.squat_type,
            expected_bias: header.bottom_bias,
            issue_text,
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"squatType": "back squat", "bottomBias": "neutral bias"}
Issue paragraph: legs too wide during the descent.

{"squatType": "front squat", "bottomBias": "forward bias"}
Issue paragraph: no issues were present.
"#;

    #[test]
    fn test_parse_two_records() {
        let records = parse_ground_truth(SAMPLE);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].expected_category, "back squat");
        assert_eq!(records[0].expected_bias, "neutral bias");
        assert_eq!(records[0].issue_text, "legs too wide during the descent.");
        assert_eq!(records[1].expected_category, "front squat");
    }

    #[test]
    fn test_issue_label_stripped_only_when_present() {
        let content = "{\"squatType\": \"goblet squat\", \"bottomBias\": \"neutral bias\"}\ntrunk too forward at the bottom.";
        let records = parse_ground_truth(content);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].issue_text, "trunk too forward at the bottom.");
    }

    #[test]
    fn test_multiline_issue_paragraph_is_joined() {
        let content = "{\"squatType\": \"back squat\", \"bottomBias\": \"neutral bias\"}\nIssue paragraph: legs too wide.\ntrunk too upright.";
        let records = parse_ground_truth(content);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].issue_text, "legs too wide.\ntrunk too upright.");
    }

    #[test]
    fn test_malformed_header_skipped_without_aborting() {
        let content = "not json at all\nIssue paragraph: legs too wide.\n\n{\"squatType\": \"back squat\", \"bottomBias\": \"neutral bias\"}\nIssue paragraph: none.";
        let records = parse_ground_truth(content);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].expected_category, "back squat");
    }

    #[test]
    fn test_block_without_issue_lines_skipped() {
        let content = "{\"squatType\": \"back squat\", \"bottomBias\": \"neutral bias\"}";
        assert!(parse_ground_truth(content).is_empty());
    }

    #[test]
    fn test_empty_input_yields_empty_sequence() {
        assert!(parse_ground_truth("").is_empty());
        assert!(parse_ground_truth("\n\n\n").is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_ground_truth(Path::new("/nonexistent/prompts.txt"))
            .expect_err("missing file must fail");
        assert!(matches!(err, AssessError::Io { .. }));
    }
}
