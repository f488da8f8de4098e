//! Engagement score extraction.
//!
//! The score is the leftmost match of `[1-9]|10` anywhere in the text. A
//! rationale that mentions a number before the score wins over the score;
//! saved histories depend on this exact behavior, so it stays.

use regex::Regex;
use std::sync::OnceLock;

const SCORE_PATTERN: &str = r"([1-9]|10)";

/// Separator between score and rationale in `predicted_engagement`.
pub const SCORE_SEPARATOR: &str = " — ";

fn score_regex() -> Option<&'static Regex> {
    static SCORE_RE: OnceLock<Option<Regex>> = OnceLock::new();
    SCORE_RE
        .get_or_init(|| Regex::new(SCORE_PATTERN).ok())
        .as_ref()
}

/// Leftmost score token in `text`, if any.
pub fn find_score(text: &str) -> Option<&str> {
    score_regex()
        .and_then(|re| re.find(text))
        .map(|m| m.as_str())
}

/// Numeric score of a saved `predicted_engagement` string.
pub fn parse_score(text: &str) -> Option<f64> {
    find_score(text).and_then(|s| s.parse().ok())
}

/// Build `"<score> — <response>"`; the score part is the whole response when no token matches.
pub fn format_engagement(response: &str) -> String {
    let score = find_score(response).unwrap_or(response);
    format!("{}{}{}", score, SCORE_SEPARATOR, response)
}
