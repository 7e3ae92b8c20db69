//! Lexicon-based sentiment scoring.
//!
//! Each sentence is scored as the mean of its matched polarity weights (a
//! negation directly before a term flips it). The document score is the mean
//! of sentence scores weighted by how many terms each sentence matched.
//! Confidence combines lexical coverage with how much the sentences agree.

use super::lexicon;
use super::text::{split_sentences, tokenize};
use crate::domain::{Sentiment, SentimentLabel};

/// Scores with magnitude at or below this are labelled neutral.
const NEUTRAL_BAND: f64 = 0.05;

/// Coverage ratio that already counts as full coverage (1 in 5 tokens matched).
const FULL_COVERAGE_RATIO: f64 = 0.2;

pub fn analyze_sentiment(text: &str) -> Sentiment {
    let mut total_tokens = 0usize;
    let mut matched_tokens = 0usize;
    // (sentence score, weight)
    let mut scored: Vec<(f64, f64)> = Vec::new();

    for sentence in split_sentences(text) {
        let tokens = tokenize(sentence);
        total_tokens += tokens.len();

        let mut sum = 0.0;
        let mut hits = 0usize;
        for (i, token) in tokens.iter().enumerate() {
            if let Some(weight) = lexicon::polarity(token) {
                let negated = i > 0 && lexicon::is_negation(&tokens[i - 1]);
                sum += if negated { -weight } else { weight };
                hits += 1;
            }
        }

        if hits > 0 {
            matched_tokens += hits;
            scored.push((sum / hits as f64, hits as f64));
        }
    }

    if matched_tokens == 0 || total_tokens == 0 {
        return Sentiment::neutral();
    }

    let total_weight: f64 = scored.iter().map(|(_, w)| w).sum();
    let mean = scored.iter().map(|(s, w)| s * w).sum::<f64>() / total_weight;
    let score = mean.clamp(-1.0, 1.0);

    let variance = scored.iter().map(|(s, w)| w * (s - mean).powi(2)).sum::<f64>() / total_weight;
    let agreement = 1.0 - variance.min(1.0);

    let coverage = (matched_tokens as f64 / total_tokens as f64 / FULL_COVERAGE_RATIO).min(1.0);
    let confidence = (coverage * agreement).clamp(0.0, 1.0);

    let label = if score > NEUTRAL_BAND {
        SentimentLabel::Positive
    } else if score < -NEUTRAL_BAND {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    };

    Sentiment {
        label,
        score,
        confidence,
    }
}
