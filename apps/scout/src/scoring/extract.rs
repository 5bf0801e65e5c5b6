//! Post-processing of raw oracle output: cleanup of reasoning delimiters and
//! markdown links, and extraction of the numeric fit score.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

static SCORE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Fit Score:\s*(\d+(?:\.\d+)?)/100").expect("invalid score regex")
});

static MARKDOWN_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]\(([^)]+)\)").expect("invalid link regex"));

/// Strips `<think>` reasoning delimiters, normalizes markdown links to bare
/// URLs, and trims surrounding whitespace.
pub fn clean_response(raw: &str) -> String {
    let cleaned = raw.replace("<think>", "").replace("</think>", "");
    let cleaned = MARKDOWN_LINK_RE.replace_all(&cleaned, "$1");
    cleaned.trim().to_string()
}

/// Extracts the score from a `Fit Score: <number>/100` line, case-insensitive,
/// rounding to the nearest integer. Malformed or missing scores degrade to 0
/// rather than failing the unit: the raw text is still useful to the reader.
pub fn extract_score(text: &str) -> u32 {
    if let Some(captures) = SCORE_RE.captures(text) {
        if let Ok(value) = captures[1].parse::<f64>() {
            return value.round() as u32;
        }
    }
    warn!("score not found in oracle output, defaulting to 0");
    0
}
