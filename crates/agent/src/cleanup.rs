//! Turning free-form model output into clean list items.
//!
//! Headlines, CTAs, keywords and hashtags all go through [`clean_item`] so
//! they agree on what counts as a list marker.

use std::collections::HashSet;

/// Bullet characters, stripped only when followed by whitespace.
const BULLETS: &[char] = &['-', '–', '—', '•', '·', '*', '+', '>'];

/// Punctuation dropped from the end of an item.
const TRAILING: &[char] = &[',', ';', '.'];

/// Quote pairs unwrapped from around an item.
const QUOTES: &[(char, char)] = &[('"', '"'), ('“', '”'), ('\'', '\'')];

fn followed_by_space(rest: &str) -> bool {
    rest.is_empty() || rest.starts_with(char::is_whitespace)
}

fn strip_bullet(s: &str) -> &str {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if BULLETS.contains(&c) && followed_by_space(chars.as_str()) => chars.as_str(),
        _ => s,
    }
}

/// Strip `1.`, `2)` or `3:` but keep numbers that belong to the text ("3 ways", "3.5x").
fn strip_list_number(s: &str) -> &str {
    let digits = s.len() - s.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return s;
    }

    let mut chars = s[digits..].chars();
    match chars.next() {
        Some('.' | ')' | ':') if followed_by_space(chars.as_str()) => chars.as_str(),
        _ => s,
    }
}

fn strip_quotes(s: &str) -> &str {
    for &(open, close) in QUOTES {
        if s.chars().count() >= 2 && s.starts_with(open) && s.ends_with(close) {
            return &s[open.len_utf8()..s.len() - close.len_utf8()];
        }
    }
    s
}

/// Strip list markers, wrapping quotes, trailing punctuation and surrounding whitespace.
pub fn clean_item(raw: &str) -> String {
    let mut s = raw.trim();
    loop {
        let before = s;
        s = strip_bullet(s).trim_start();
        s = strip_list_number(s).trim_start();
        s = s.trim_end_matches(TRAILING).trim_end();
        s = strip_quotes(s).trim();
        if s == before {
            break;
        }
    }
    s.to_string()
}

/// [`clean_item`] that also drops leading `#` characters.
pub fn clean_keyword(raw: &str) -> String {
    clean_item(clean_item(raw).trim_start_matches('#'))
}

/// One cleaned item per non-empty line.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(clean_item)
        .filter(|item| !item.is_empty())
        .collect()
}

/// At most `n` cleaned lines; the trimmed raw text when no line survives.
pub fn candidates_or_raw(text: &str, n: usize) -> Vec<String> {
    let mut items = split_lines(text);
    if items.is_empty() {
        return vec![text.trim().to_string()];
    }
    items.truncate(n);
    items
}

/// Items separated by commas or newlines, cleaned with [`clean_keyword`].
pub fn split_list(text: &str) -> Vec<String> {
    text.split(|c: char| c == ',' || c == '\n')
        .map(clean_keyword)
        .filter(|item| !item.is_empty())
        .collect()
}

/// Drop case-insensitive duplicates, keeping the first spelling, then cap at `n`.
pub fn dedup_case_insensitive(items: Vec<String>, n: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.to_lowercase()))
        .take(n)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_item_markers() {
        assert_eq!(clean_item("1. Why Rust wins"), "Why Rust wins");
        assert_eq!(clean_item("10) Ten tips"), "Ten tips");
        assert_eq!(clean_item("  - Ship small, ship often  "), "Ship small, ship often");
        assert_eq!(clean_item("• Lead with curiosity."), "Lead with curiosity");
        assert_eq!(clean_item("* Hire slow"), "Hire slow");
    }

    #[test]
    fn test_clean_item_keeps_meaningful_numbers() {
        assert_eq!(clean_item("3 ways to grow"), "3 ways to grow");
        assert_eq!(clean_item("3.5x faster builds"), "3.5x faster builds");
        assert_eq!(clean_item("2. 5 lessons from failure"), "5 lessons from failure");
    }

    #[test]
    fn test_clean_item_quotes() {
        assert_eq!(clean_item("1. \"Quoted headline\""), "Quoted headline");
        assert_eq!(clean_item("“Curly quotes”"), "Curly quotes");
        assert_eq!(clean_item("Don't stop"), "Don't stop");
    }

    #[test]
    fn test_clean_item_only_markers() {
        assert_eq!(clean_item(" - "), "");
        assert_eq!(clean_item("3."), "");
    }

    #[test]
    fn test_clean_keyword_drops_hash() {
        assert_eq!(clean_keyword(" #AI."), "AI");
        assert_eq!(clean_keyword("- #Leadership"), "Leadership");
    }

    #[test]
    fn test_candidates_or_raw() {
        let text = "1. First\n\n2. Second\n3. Third\n4. Fourth";
        assert_eq!(candidates_or_raw(text, 3), vec!["First", "Second", "Third"]);

        assert_eq!(candidates_or_raw(" -\n•\n", 3), vec!["-\n•"]);
    }

    #[test]
    fn test_split_list_commas_and_newlines() {
        let items = split_list("AI, leadership\n- Product thinking,\n#Biotech.");
        assert_eq!(items, vec!["AI", "leadership", "Product thinking", "Biotech"]);
    }

    #[test]
    fn test_dedup_case_insensitive() {
        let items = vec![
            "AI".to_string(),
            "Leadership".to_string(),
            "ai".to_string(),
            "LEADERSHIP".to_string(),
            "Growth".to_string(),
        ];
        assert_eq!(
            dedup_case_insensitive(items.clone(), 10),
            vec!["AI", "Leadership", "Growth"]
        );
        assert_eq!(dedup_case_insensitive(items, 2), vec!["AI", "Leadership"]);
    }
}
