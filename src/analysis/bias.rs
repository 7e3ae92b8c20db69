//! Bias scoring: charged language, one-sided framing, political vocabulary.

use std::collections::BTreeMap;

use super::lexicon;
use super::text::TokenText;
use crate::domain::{Bias, BiasSignal};

const WEIGHT_EMOTIONAL: f64 = 0.40;
const WEIGHT_FRAMING: f64 = 0.35;
const WEIGHT_POLITICAL: f64 = 0.25;

/// Charged-term ratio at which the emotional signal saturates (1 in 10 tokens).
const EMOTIONAL_SATURATION: f64 = 0.10;
/// Political-term ratio at which that signal saturates (1 in 20 tokens).
const POLITICAL_SATURATION: f64 = 0.05;

pub fn analyze_bias(text: &str) -> Bias {
    let words = TokenText::new(text);
    if words.is_empty() {
        return Bias::default();
    }
    let total = words.len() as f64;

    let charged = words.count_any(lexicon::CHARGED) as f64;
    let emotional = (charged / total / EMOTIONAL_SATURATION).min(1.0);

    // Each contrasting connector halves the one-sidedness signal.
    let connectors = words.count_any(lexicon::BALANCE_CONNECTORS);
    let framing = 0.5_f64.powi(connectors.min(64) as i32);

    let political_terms = words.count_any(lexicon::POLITICAL) as f64;
    let political = (political_terms / total / POLITICAL_SATURATION).min(1.0);

    let mut signals = BTreeMap::new();
    signals.insert(BiasSignal::EmotionalLanguage, emotional);
    signals.insert(BiasSignal::OneSidedFraming, framing);
    signals.insert(BiasSignal::PoliticalTerminology, political);

    let score = (WEIGHT_EMOTIONAL * emotional + WEIGHT_FRAMING * framing + WEIGHT_POLITICAL * political)
        / (WEIGHT_EMOTIONAL + WEIGHT_FRAMING + WEIGHT_POLITICAL);

    Bias {
        score: score.clamp(0.0, 1.0),
        signals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_connector_lowers_bias() {
        let one_sided = analyze_bias("Experts report a 45% increase in cases.");
        let balanced = analyze_bias("Experts report a 45% increase in cases, though some dispute the figures.");
        assert_eq!(one_sided.signals[&BiasSignal::OneSidedFraming], 1.0);
        assert!(balanced.signals[&BiasSignal::OneSidedFraming] < 1.0);
        assert!(balanced.score < one_sided.score);
    }

    #[test]
    fn test_charged_language_raises_bias() {
        let calm = analyze_bias("The council approved the budget on Monday.");
        let charged = analyze_bias("The outrageous, shocking budget is an absurd disaster.");
        assert!(charged.signals[&BiasSignal::EmotionalLanguage] > 0.9);
        assert!(charged.score > calm.score);
    }

    #[test]
    fn test_political_density() {
        let b = analyze_bias("Conservatives and liberals clashed as progressive and right-wing groups rallied.");
        assert_eq!(b.signals[&BiasSignal::PoliticalTerminology], 1.0);
    }

    #[test]
    fn test_empty_text_is_zero() {
        let b = analyze_bias("");
        assert_eq!(b.score, 0.0);
        assert!(b.signals.is_empty());
    }

    #[test]
    fn test_score_in_bounds_when_everything_fires() {
        let b = analyze_bias("Outrageous liberal scandal! Shocking conservative disaster!");
        assert!(b.score <= 1.0);
        assert!(b.score > 0.9);
    }
}
