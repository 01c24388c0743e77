//! Text normalization helpers shared by the job-description and resume extractors.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

/// Default number of words following a match that `snippet` returns.
pub const SNIPPET_CONTEXT_WORDS: usize = 10;

/// Lowercases, collapses every whitespace run to a single space and trims.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalizes each line independently so line structure survives.
pub fn normalize_lines(text: &str) -> Vec<String> {
    text.lines().map(normalize).collect()
}

/// Distinct `\w+` tokens of the normalized text.
pub fn words(text: &str) -> HashSet<String> {
    let normalized = normalize(text);
    WORD.find_iter(&normalized)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Distinct contiguous `n`-word phrases of the normalized text.
pub fn ngrams(text: &str, n: usize) -> HashSet<String> {
    if n == 0 {
        return HashSet::new();
    }
    let normalized = normalize(text);
    let tokens: Vec<&str> = normalized.split(' ').filter(|t| !t.is_empty()).collect();
    tokens.windows(n).map(|window| window.join(" ")).collect()
}

/// Returns the words starting at the first case-insensitive occurrence of
/// `term` (the matched word plus `context_words` following words), wrapped
/// in ellipses. Empty when `term` is empty or absent.
pub fn snippet(text: &str, term: &str, context_words: usize) -> String {
    if term.is_empty() {
        return String::new();
    }
    let Ok(pattern) = RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    else {
        return String::new();
    };
    let Some(found) = pattern.find(text) else {
        return String::new();
    };

    let following = text[found.start()..]
        .split_whitespace()
        .take(context_words + 1)
        .collect::<Vec<_>>()
        .join(" ");
    format!("...{following}...")
}
