//! Key point extraction.
//!
//! Sentences are ranked by position, numeric content, claim phrasing and
//! keyword overlap. The top K are returned in the order they appear in the
//! text; equal scores favour the earlier sentence.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use super::lexicon;
use super::text::{TokenText, split_sentences, top_keywords};

const NUMERIC_BONUS: f64 = 0.5;
const INDICATOR_BONUS: f64 = 0.5;
/// Keywords derived from the text itself when the document carries none.
const DERIVED_KEYWORDS: usize = 10;

static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").expect("valid digit regex"));

/// Position weight: 1 for the first sentence, decaying with index.
fn position_weight(index: usize) -> f64 {
    1.0 / (1.0 + index as f64 * 0.25)
}

pub fn extract_key_points(text: &str, keywords: &BTreeSet<String>, k: usize, min_chars: usize) -> Vec<String> {
    if k == 0 {
        return Vec::new();
    }

    let derived;
    let keywords = if keywords.is_empty() {
        derived = top_keywords(text, DERIVED_KEYWORDS);
        &derived
    } else {
        keywords
    };

    let mut ranked: Vec<(usize, f64, &str)> = split_sentences(text)
        .into_iter()
        .filter(|s| s.chars().count() >= min_chars)
        .enumerate()
        .map(|(index, sentence)| (index, score_sentence(index, sentence, keywords), sentence))
        .collect();

    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(k);
    ranked.sort_by_key(|(index, _, _)| *index);
    ranked.into_iter().map(|(_, _, s)| s.to_string()).collect()
}

fn score_sentence(index: usize, sentence: &str, keywords: &BTreeSet<String>) -> f64 {
    let words = TokenText::new(sentence);
    let mut score = position_weight(index);

    if DIGIT.is_match(sentence) {
        score += NUMERIC_BONUS;
    }
    if lexicon::KEY_INDICATORS.iter().any(|p| words.contains_phrase(p)) {
        score += INDICATOR_BONUS;
    }
    if !words.is_empty() && !keywords.is_empty() {
        let overlap = words.tokens().iter().filter(|t| keywords.contains(t.as_str())).count();
        score += overlap as f64 / (words.len() as f64).sqrt();
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = "The city opened a new transit line on Monday. \
        Riders were curious about the schedule. \
        Officials confirmed ridership rose 30% in the first week. \
        Some stations still lack elevators. \
        The weather was mild.";

    #[test]
    fn test_returns_at_most_k() {
        let points = extract_key_points(ARTICLE, &BTreeSet::new(), 2, 10);
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn test_preserves_document_order() {
        let sentences = split_sentences(ARTICLE);
        let points = extract_key_points(ARTICLE, &BTreeSet::new(), 3, 10);
        let positions: Vec<usize> = points
            .iter()
            .map(|p| sentences.iter().position(|s| s == p).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_numeric_claim_is_selected() {
        let points = extract_key_points(ARTICLE, &BTreeSet::new(), 2, 10);
        assert!(points.iter().any(|p| p.contains("30%")));
        assert!(points[0].starts_with("The city opened"));
    }

    #[test]
    fn test_keywords_steer_selection() {
        let keywords: BTreeSet<String> = ["elevators", "stations"].iter().map(|s| s.to_string()).collect();
        let points = extract_key_points(ARTICLE, &keywords, 2, 10);
        assert!(points.iter().any(|p| p.contains("elevators")));
    }

    #[test]
    fn test_ties_prefer_earlier_sentences() {
        let text = "Alpha beta gamma delta. Alpha beta gamma delta. Alpha beta gamma delta.";
        let points = extract_key_points(text, &BTreeSet::new(), 1, 5);
        assert_eq!(points.len(), 1);
        // Identical sentences: only position differs, so the first wins.
        assert_eq!(points[0], "Alpha beta gamma delta.");
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(extract_key_points("", &BTreeSet::new(), 5, 10).is_empty());
        assert!(extract_key_points(ARTICLE, &BTreeSet::new(), 0, 10).is_empty());
        assert!(extract_key_points("Short. Tiny.", &BTreeSet::new(), 5, 20).is_empty());
    }
}
