//! Credibility scoring from evidence markers.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::lexicon;
use super::text::{TokenText, saturate, split_sentences};
use crate::domain::{Credibility, Indicator};

const WEIGHT_STATISTICAL: f64 = 0.30;
const WEIGHT_QUOTES: f64 = 0.20;
const WEIGHT_EXPERTS: f64 = 0.20;
const WEIGHT_CITATIONS: f64 = 0.30;
/// Subtracted in proportion to the hedging indicator.
const HEDGING_PENALTY: f64 = 0.25;

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d[\d,]*(\.\d+)?\s*(%|percent\b|per cent\b|million\b|billion\b|thousand\b)|[$€£]\s?\d|\b\d{2,}\b")
        .expect("valid number regex")
});

static QUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[^"]{8,}"|“[^”]{8,}”"#).expect("valid quote regex"));

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+|\[\d+\]|\bdoi:\S+").expect("valid link regex"));

pub fn analyze_credibility(text: &str) -> Credibility {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return Credibility::default();
    }

    let mut statistical = 0usize;
    let mut hedges = 0usize;
    let mut experts = 0usize;
    let mut citations = 0usize;
    let mut attributions = 0usize;

    for sentence in &sentences {
        let words = TokenText::new(sentence);
        if NUMBER.is_match(sentence) && lexicon::CLAIM_VERBS.iter().any(|v| words.contains_phrase(v)) {
            statistical += 1;
        }
        hedges += words.count_any(lexicon::HEDGES);
        experts += words.count_any(lexicon::EXPERT_TERMS);
        citations += words.count_any(lexicon::CITATION_PHRASES);
        attributions += words.count_any(lexicon::ATTRIBUTION_VERBS);
    }

    citations += LINK.find_iter(text).count();
    let quotes = QUOTE.find_iter(text).count();
    // A quotation only counts when an attribution verb accompanies it.
    let attributed = quotes.min(attributions);

    let hedging = (hedges as f64 / sentences.len() as f64).min(1.0);

    let mut indicators = BTreeMap::new();
    indicators.insert(Indicator::StatisticalEvidence, saturate(statistical));
    indicators.insert(Indicator::AttributedQuotes, saturate(attributed));
    indicators.insert(Indicator::ExpertMentions, saturate(experts));
    indicators.insert(Indicator::Citations, saturate(citations));
    indicators.insert(Indicator::Hedging, hedging);

    let score = WEIGHT_STATISTICAL * indicators[&Indicator::StatisticalEvidence]
        + WEIGHT_QUOTES * indicators[&Indicator::AttributedQuotes]
        + WEIGHT_EXPERTS * indicators[&Indicator::ExpertMentions]
        + WEIGHT_CITATIONS * indicators[&Indicator::Citations]
        - HEDGING_PENALTY * hedging;

    Credibility {
        score: score.clamp(0.0, 1.0),
        indicators,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistical_claim_counts() {
        let c = analyze_credibility("Experts report a 45% increase in cases.");
        assert_eq!(c.indicators[&Indicator::StatisticalEvidence], 0.5);
        assert_eq!(c.indicators[&Indicator::ExpertMentions], 0.5);
        assert!(c.score > 0.0);
    }

    #[test]
    fn test_number_without_claim_verb_is_not_evidence() {
        let c = analyze_credibility("There were 45 chairs in the room.");
        assert_eq!(c.indicators[&Indicator::StatisticalEvidence], 0.0);
    }

    #[test]
    fn test_attributed_quote_and_citation() {
        let text = r#"Professor Lee said "the sample size was large enough to matter". According to the study by the institute, results held. See https://example.org/paper."#;
        let c = analyze_credibility(text);
        assert!(c.indicators[&Indicator::AttributedQuotes] > 0.0);
        assert!(c.indicators[&Indicator::Citations] >= 0.75);
    }

    #[test]
    fn test_hedging_lowers_score() {
        let firm = analyze_credibility("Officials confirmed a 10% rise according to the census.");
        let hedged = analyze_credibility(
            "Officials allegedly confirmed a 10% rise according to the census, reportedly from an unnamed source.",
        );
        assert!(hedged.indicators[&Indicator::Hedging] > 0.0);
        assert!(hedged.score < firm.score);
    }

    #[test]
    fn test_empty_text_is_zero() {
        let c = analyze_credibility("");
        assert_eq!(c.score, 0.0);
        assert!(c.indicators.is_empty());
    }

    #[test]
    fn test_score_is_clipped() {
        let text = "Rumor. Allegedly. Reportedly. Possibly.";
        let c = analyze_credibility(text);
        assert_eq!(c.score, 0.0);
        assert!(c.indicators[&Indicator::Hedging] <= 1.0);
    }
}
