//! Numeric claim detection: currency, percentages, dates, large magnitudes.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use super::text::split_sentences;

static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // currency
        r"[$€£¥]\s?\d[\d,]*(\.\d+)?",
        r"(?i)\b\d[\d,]*(\.\d+)?\s?(usd|eur|gbp|dollars|euros|pounds)\b",
        // percentages
        r"(?i)\b\d+(\.\d+)?\s?(%|percent\b|per cent\b)",
        // dates
        r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?\s+\d{1,2}(st|nd|rd|th)?\b",
        r"(?i)\b\d{1,2}\s+(january|february|march|april|may|june|july|august|september|october|november|december)\b",
        r"\b\d{4}-\d{2}-\d{2}\b",
        r"(?i)\b(in|since|by|during|until|from)\s+(19|20)\d{2}\b",
        // magnitudes
        r"(?i)\b\d[\d,]*(\.\d+)?\s+(thousand|million|billion|trillion)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid fact regex"))
    .collect()
});

/// Whether a sentence carries a numeric claim.
pub fn is_numeric_claim(sentence: &str) -> bool {
    PATTERNS.iter().any(|re| re.is_match(sentence))
}

/// Sentences carrying numeric claims, verbatim, in order, without duplicates.
pub fn extract_facts(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    split_sentences(text)
        .into_iter()
        .filter(|s| is_numeric_claim(s))
        .filter(|s| seen.insert(*s))
        .map(str::to_string)
        .collect()
}
