//! Text normalization and sentence segmentation.
//!
//! Pure helpers shared by the rubric checks. The opening-sentence check and
//! the sentence-count check must agree on segmentation, so both consume the
//! same [`split_sentences`] output.

/// Canonicalize a phrase for opening-sentence comparison.
///
/// Lowercases, strips trailing punctuation, converts hyphens to spaces,
/// drops a leading definite article, and collapses whitespace runs.
/// Factual-keyword matching deliberately does not use this: issue phrases
/// are multi-word literals matched against plain lowercased text.
pub fn normalize_phrase(s: &str) -> String {
    let lowered = s.to_lowercase();
    let trimmed = lowered.trim().trim_end_matches(['.', ',', ';', ':']);
    let dehyphenated = trimmed.replace('-', " ");
    let without_article = dehyphenated
        .strip_prefix("the ")
        .unwrap_or(&dehyphenated);
    without_article.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Segment body text into sentences.
///
/// Splits on sentence-ending punctuation or line breaks and discards
/// fragments that are empty after trimming.
pub fn split_sentences(body: &str) -> Vec<String> {
    body.split(['.', '?', '!', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Body text before the termination marker.
///
/// Cuts at the first case-insensitive occurrence of `marker`; if the
/// remainder still ends with a bare `END` token, that is dropped along with
/// any trailing period.
pub fn strip_termination(reply: &str, marker: &str) -> String {
    let trimmed = reply.trim();
    // ASCII uppercasing keeps byte offsets aligned with the original text.
    let upper = trimmed.to_ascii_uppercase();
    let marker_upper = marker.to_ascii_uppercase();

    let body = match upper.find(&marker_upper) {
        Some(pos) => trimmed[..pos].trim_end(),
        None => trimmed,
    };

    strip_bare_end_suffix(body).to_string()
}

/// Whether text ends in a bare `end` token, optionally followed by a period.
///
/// "Bare" requires a word boundary, so e.g. "over the weekend." does not
/// count as a termination.
pub fn ends_with_bare_end(text: &str) -> bool {
    bare_end_cut(text).is_some()
}

/// Byte offset where a trailing bare `end` token starts, if there is one.
fn bare_end_cut(text: &str) -> Option<usize> {
    let candidate = text.trim_end();
    let candidate = candidate.strip_suffix('.').unwrap_or(candidate).trim_end();

    let cut = candidate.len().checked_sub(3)?;
    if !candidate.is_char_boundary(cut) || !candidate[cut..].eq_ignore_ascii_case("end") {
        return None;
    }
    let boundary_ok = candidate[..cut]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric());
    boundary_ok.then_some(cut)
}

/// Drop a trailing bare `END` token (with or without a final period).
fn strip_bare_end_suffix(body: &str) -> &str {
    match bare_end_cut(body) {
        Some(cut) => body[..cut].trim_end().trim_end_matches('.').trim_end(),
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_strips_punctuation() {
        assert_eq!(
            normalize_phrase("Back Squat with Neutral Bias."),
            "back squat with neutral bias"
        );
    }

    #[test]
    fn test_normalize_hyphens_become_spaces() {
        assert_eq!(
            normalize_phrase("back-squat with neutral-bias"),
            "back squat with neutral bias"
        );
    }

    #[test]
    fn test_normalize_drops_leading_article() {
        assert_eq!(
            normalize_phrase("The back squat with neutral bias"),
            "back squat with neutral bias"
        );
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(
            normalize_phrase("  back   squat \t with  neutral bias "),
            "back squat with neutral bias"
        );
    }

    #[test]
    fn test_split_sentences_on_punctuation_and_newlines() {
        let sentences = split_sentences("First one. Second one?\nThird one!");
        assert_eq!(sentences, vec!["First one", "Second one", "Third one"]);
    }

    #[test]
    fn test_split_sentences_drops_empty_fragments() {
        let sentences = split_sentences("One... Two.\n\n");
        assert_eq!(sentences, vec!["One", "Two"]);
    }

    #[test]
    fn test_strip_termination_cuts_at_marker() {
        assert_eq!(
            strip_termination("Summary text here. <END>", "<END>"),
            "Summary text here."
        );
    }

    #[test]
    fn test_strip_termination_is_case_insensitive() {
        assert_eq!(
            strip_termination("Summary text here. <end>", "<END>"),
            "Summary text here."
        );
    }

    #[test]
    fn test_strip_termination_bare_end_suffix() {
        assert_eq!(
            strip_termination("Summary text here. END.", "<END>"),
            "Summary text here"
        );
        assert_eq!(
            strip_termination("Summary text here. end", "<END>"),
            "Summary text here"
        );
    }

    #[test]
    fn test_strip_termination_no_marker_is_identity() {
        assert_eq!(
            strip_termination("No marker present at all", "<END>"),
            "No marker present at all"
        );
    }

    #[test]
    fn test_bare_end_requires_word_boundary() {
        assert!(ends_with_bare_end("Technique was consistent. END"));
        assert!(ends_with_bare_end("Technique was consistent. End."));
        assert!(!ends_with_bare_end("Training resumes over the weekend."));
        assert_eq!(
            strip_termination("Training resumes over the weekend.", "<END>"),
            "Training resumes over the weekend."
        );
    }
}
