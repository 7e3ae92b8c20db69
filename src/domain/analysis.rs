//! Analysis result types.
//!
//! Everything here is plain data derived from a document's text. Maps are
//! `BTreeMap`s so that two analyses of the same text compare and serialize
//! identically.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    /// Polarity in [-1, 1]
    pub score: f64,
    /// Confidence in [0, 1]
    pub confidence: f64,
}

impl Sentiment {
    /// No polarity evidence at all.
    pub fn neutral() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            score: 0.0,
            confidence: 0.0,
        }
    }
}

impl Default for Sentiment {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Named credibility indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    StatisticalEvidence,
    AttributedQuotes,
    ExpertMentions,
    Citations,
    Hedging,
}

impl Indicator {
    pub const ALL: [Indicator; 5] = [
        Indicator::StatisticalEvidence,
        Indicator::AttributedQuotes,
        Indicator::ExpertMentions,
        Indicator::Citations,
        Indicator::Hedging,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Indicator::StatisticalEvidence => "statistical_evidence",
            Indicator::AttributedQuotes => "attributed_quotes",
            Indicator::ExpertMentions => "expert_mentions",
            Indicator::Citations => "citations",
            Indicator::Hedging => "hedging",
        }
    }
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credibility {
    /// Weighted indicator sum clipped to [0, 1]
    pub score: f64,
    /// Each indicator's strength in [0, 1]
    pub indicators: BTreeMap<Indicator, f64>,
}

/// Named bias signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasSignal {
    EmotionalLanguage,
    OneSidedFraming,
    PoliticalTerminology,
}

impl BiasSignal {
    pub const ALL: [BiasSignal; 3] = [
        BiasSignal::EmotionalLanguage,
        BiasSignal::OneSidedFraming,
        BiasSignal::PoliticalTerminology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BiasSignal::EmotionalLanguage => "emotional_language",
            BiasSignal::OneSidedFraming => "one_sided_framing",
            BiasSignal::PoliticalTerminology => "political_terminology",
        }
    }
}

impl std::fmt::Display for BiasSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bias {
    /// Higher means more biased; always in [0, 1]
    pub score: f64,
    pub signals: BTreeMap<BiasSignal, f64>,
}

/// Full scoring output for one piece of text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    pub credibility: Credibility,
    pub bias: Bias,
    /// Highest ranked sentences, in original document order
    pub key_points: Vec<String>,
    /// Sentences carrying numeric claims, verbatim
    pub facts: Vec<String>,
}

impl AnalysisResult {
    /// Check every score against its declared range.
    pub fn is_within_bounds(&self) -> bool {
        let unit = |v: f64| (0.0..=1.0).contains(&v);
        (-1.0..=1.0).contains(&self.sentiment.score)
            && unit(self.sentiment.confidence)
            && unit(self.credibility.score)
            && unit(self.bias.score)
            && self.credibility.indicators.values().all(|v| unit(*v))
            && self.bias.signals.values().all(|v| unit(*v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_neutral_and_zero() {
        let result = AnalysisResult::default();
        assert_eq!(result.sentiment.label, SentimentLabel::Neutral);
        assert_eq!(result.sentiment.confidence, 0.0);
        assert_eq!(result.credibility.score, 0.0);
        assert_eq!(result.bias.score, 0.0);
        assert!(result.key_points.is_empty());
        assert!(result.facts.is_empty());
        assert!(result.is_within_bounds());
    }

    #[test]
    fn test_out_of_bounds_detected() {
        let mut result = AnalysisResult::default();
        result.bias.score = 1.2;
        assert!(!result.is_within_bounds());

        let mut result = AnalysisResult::default();
        result.credibility.indicators.insert(Indicator::Hedging, -0.1);
        assert!(!result.is_within_bounds());
    }

    #[test]
    fn test_indicator_serialization_as_map_key() {
        let mut credibility = Credibility::default();
        credibility.indicators.insert(Indicator::ExpertMentions, 0.5);
        let json = serde_json::to_string(&credibility).unwrap();
        assert!(json.contains("\"expert_mentions\":0.5"));
    }

    #[test]
    fn test_label_display() {
        assert_eq!(SentimentLabel::Positive.to_string(), "positive");
        assert_eq!(BiasSignal::OneSidedFraming.to_string(), "one_sided_framing");
    }
}
