//! Analysis engine - deterministic, rule-based content scoring.
//!
//! This module provides:
//! - Sentiment from a weighted polarity lexicon
//! - Credibility from evidence markers (numbers, quotes, experts, citations)
//! - Bias from charged language, one-sided framing and political vocabulary
//! - Key point ranking and numeric fact extraction
//!
//! All scorers are pure functions over text. They share no state, so the
//! engine can be cloned freely and used from any number of runs at once.

pub mod bias;
pub mod credibility;
pub mod facts;
pub mod key_points;
pub mod lexicon;
pub mod sentiment;
pub mod text;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::{AnalysisResult, Document};
use crate::error::AnalysisError;

pub use bias::analyze_bias;
pub use credibility::analyze_credibility;
pub use facts::extract_facts;
pub use key_points::extract_key_points;
pub use sentiment::analyze_sentiment;

/// One independent sub-analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Sentiment,
    Credibility,
    Bias,
    KeyPoints,
    Facts,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Sentiment,
        Dimension::Credibility,
        Dimension::Bias,
        Dimension::KeyPoints,
        Dimension::Facts,
    ];

    /// Parse a dimension name. `summary` is accepted for key points.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().replace('-', "_").as_str() {
            "sentiment" => Some(Dimension::Sentiment),
            "credibility" => Some(Dimension::Credibility),
            "bias" => Some(Dimension::Bias),
            "key_points" | "keypoints" | "summary" => Some(Dimension::KeyPoints),
            "facts" => Some(Dimension::Facts),
            _ => None,
        }
    }
}

/// Engine-wide tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// K: maximum number of key points
    pub max_key_points: usize,
    /// Sentences shorter than this are never key points
    pub min_sentence_chars: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            max_key_points: 5,
            min_sentence_chars: 20,
        }
    }
}

/// Per-call options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisOptions {
    /// Sub-analyses to run; empty means all
    pub dimensions: BTreeSet<Dimension>,
    /// Overrides the engine's K
    pub max_key_points: Option<usize>,
    /// Keywords for key point ranking; empty means derive from the text
    pub keywords: BTreeSet<String>,
}

impl AnalysisOptions {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_dimensions(mut self, dimensions: impl IntoIterator<Item = Dimension>) -> Self {
        self.dimensions.extend(dimensions);
        self
    }

    pub fn with_max_key_points(mut self, k: usize) -> Self {
        self.max_key_points = Some(k);
        self
    }

    pub fn with_keywords(mut self, keywords: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.keywords.extend(keywords.into_iter().map(|k| k.into().to_lowercase()));
        self
    }

    fn includes(&self, dimension: Dimension) -> bool {
        self.dimensions.is_empty() || self.dimensions.contains(&dimension)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisEngine {
    settings: AnalysisSettings,
}

impl AnalysisEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: AnalysisSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Analyze a fetched document using its metadata keywords.
    ///
    /// An empty body violates the document invariant and is reported as an
    /// internal error rather than scored.
    pub fn analyze(&self, document: &Document) -> Result<AnalysisResult, AnalysisError> {
        if document.is_empty() {
            return Err(AnalysisError::EmptyBody);
        }
        let options = AnalysisOptions::all().with_keywords(document.keywords.iter().cloned());
        Ok(self.analyze_text(&document.body, &options))
    }

    /// Analyze free text. Degenerate input yields neutral/zero defaults.
    pub fn analyze_text(&self, text: &str, options: &AnalysisOptions) -> AnalysisResult {
        let mut result = AnalysisResult::default();
        if text.trim().is_empty() {
            return result;
        }

        if options.includes(Dimension::Sentiment) {
            result.sentiment = analyze_sentiment(text);
        }
        if options.includes(Dimension::Credibility) {
            result.credibility = analyze_credibility(text);
        }
        if options.includes(Dimension::Bias) {
            result.bias = analyze_bias(text);
        }
        if options.includes(Dimension::KeyPoints) {
            let k = options.max_key_points.unwrap_or(self.settings.max_key_points);
            result.key_points = extract_key_points(text, &options.keywords, k, self.settings.min_sentence_chars);
        }
        if options.includes(Dimension::Facts) {
            result.facts = extract_facts(text);
        }

        tracing::debug!(
            sentiment = %result.sentiment.label,
            credibility = result.credibility.score,
            bias = result.bias.score,
            key_points = result.key_points.len(),
            facts = result.facts.len(),
            "Analysis complete"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BiasSignal, Indicator, SentimentLabel};

    const SCENARIO_A: &str = "Experts report a 45% increase in cases, though some dispute the figures.";

    #[test]
    fn test_scenario_a() {
        let engine = AnalysisEngine::new();
        let result = engine.analyze_text(SCENARIO_A, &AnalysisOptions::all());

        assert!(result.facts.iter().any(|f| f.contains("45%")));
        assert!(result.credibility.score > 0.0);
        assert!(result.credibility.indicators[&Indicator::StatisticalEvidence] > 0.0);
        assert!(result.bias.signals[&BiasSignal::OneSidedFraming] < 1.0);
        assert!(result.is_within_bounds());
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let engine = AnalysisEngine::new();
        let text = "The rollout was a great success, officials said. Critics argue costs rose 12% in 2023. \
                    However, researchers found the results promising.";
        let first = engine.analyze_text(text, &AnalysisOptions::all());
        for _ in 0..5 {
            assert_eq!(engine.analyze_text(text, &AnalysisOptions::all()), first);
        }
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&engine.analyze_text(text, &AnalysisOptions::all())).unwrap()
        );
    }

    #[test]
    fn test_degenerate_text_returns_defaults() {
        let engine = AnalysisEngine::new();
        for text in ["", "   ", "\n\n", "...", "!!!"] {
            let result = engine.analyze_text(text, &AnalysisOptions::all());
            assert_eq!(result.sentiment.label, SentimentLabel::Neutral);
            assert_eq!(result.sentiment.confidence, 0.0);
            assert!(result.is_within_bounds());
            assert!(result.key_points.is_empty());
        }
    }

    #[test]
    fn test_empty_document_is_internal_error() {
        let engine = AnalysisEngine::new();
        let doc = Document::from_text("empty", "  ");
        assert!(matches!(engine.analyze(&doc), Err(AnalysisError::EmptyBody)));
    }

    #[test]
    fn test_dimension_selection() {
        let engine = AnalysisEngine::new();
        let options = AnalysisOptions::all().with_dimensions([Dimension::Facts]);
        let result = engine.analyze_text(SCENARIO_A, &options);
        assert_eq!(result.facts.len(), 1);
        assert_eq!(result.credibility.score, 0.0);
        assert!(result.key_points.is_empty());
    }

    #[test]
    fn test_max_key_points_override() {
        let engine = AnalysisEngine::new();
        let text = "First sentence is long enough here. Second sentence is long enough too. \
                    Third sentence is also long enough.";
        let result = engine.analyze_text(text, &AnalysisOptions::all().with_max_key_points(1));
        assert_eq!(result.key_points.len(), 1);
    }

    #[test]
    fn test_dimension_parse() {
        assert_eq!(Dimension::parse("summary"), Some(Dimension::KeyPoints));
        assert_eq!(Dimension::parse("Key-Points"), Some(Dimension::KeyPoints));
        assert_eq!(Dimension::parse(" bias "), Some(Dimension::Bias));
        assert_eq!(Dimension::parse("tone"), None);
    }
}
