//! Report composition.
//!
//! Merges an analysis and the document it came from into one structured
//! report that serializes to JSON and renders to Markdown. Composition is
//! pure: the same inputs always give the same report.

pub mod assessment;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::{AnalysisResult, Document, Sentiment, SourceMethod};
pub use assessment::{bias_assessment, credibility_assessment, credibility_recommendation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSection {
    Summary,
    Sentiment,
    Credibility,
    Bias,
    KeyPoints,
    Facts,
}

impl ReportSection {
    pub const ALL: [ReportSection; 6] = [
        ReportSection::Summary,
        ReportSection::Sentiment,
        ReportSection::Credibility,
        ReportSection::Bias,
        ReportSection::KeyPoints,
        ReportSection::Facts,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().replace('-', "_").as_str() {
            "summary" => Some(ReportSection::Summary),
            "sentiment" => Some(ReportSection::Sentiment),
            "credibility" => Some(ReportSection::Credibility),
            "bias" => Some(ReportSection::Bias),
            "key_points" | "keypoints" => Some(ReportSection::KeyPoints),
            "facts" => Some(ReportSection::Facts),
            _ => None,
        }
    }

    /// Resolve requested section names.
    ///
    /// Unknown names are dropped; `all`, an empty list, or a list with no
    /// known name selects every section. Order follows `ALL`.
    pub fn resolve<S: AsRef<str>>(requested: &[S]) -> Vec<ReportSection> {
        let mut sections: Vec<ReportSection> = Vec::new();
        for name in requested {
            let name = name.as_ref();
            if name.trim().eq_ignore_ascii_case("all") {
                return Self::ALL.to_vec();
            }
            match Self::parse(name) {
                Some(section) => sections.push(section),
                None => tracing::warn!(section = name, "Ignoring unknown report section"),
            }
        }
        if sections.is_empty() {
            return Self::ALL.to_vec();
        }
        sections.sort();
        sections.dedup();
        sections
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarySection {
    pub word_count: usize,
    pub authors: Vec<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredibilitySection {
    pub score: f64,
    pub assessment: String,
    pub recommendation: String,
    pub indicators: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasSection {
    pub score: f64,
    pub assessment: String,
    pub signals: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub url: Option<String>,
    pub source_method: SourceMethod,
    pub sections: Vec<ReportSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummarySection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credibility: Option<CredibilitySection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bias: Option<BiasSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_points: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facts: Option<Vec<String>>,
}

impl Report {
    /// Render as Markdown.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.title));
        if let Some(url) = &self.url {
            out.push_str(&format!("Source: {} ({})\n\n", url, self.source_method));
        }

        if let Some(summary) = &self.summary {
            out.push_str("## Summary\n\n");
            out.push_str(&format!("- Words: {}\n", summary.word_count));
            if !summary.authors.is_empty() {
                out.push_str(&format!("- Authors: {}\n", summary.authors.join(", ")));
            }
            if let Some(date) = summary.published_at {
                out.push_str(&format!("- Published: {}\n", date.format("%Y-%m-%d")));
            }
            if !summary.keywords.is_empty() {
                out.push_str(&format!("- Keywords: {}\n", summary.keywords.join(", ")));
            }
            out.push('\n');
        }

        if let Some(sentiment) = &self.sentiment {
            out.push_str("## Sentiment\n\n");
            out.push_str(&format!(
                "{} (score {:.2}, confidence {:.2})\n\n",
                sentiment.label, sentiment.score, sentiment.confidence
            ));
        }

        if let Some(credibility) = &self.credibility {
            out.push_str("## Credibility\n\n");
            out.push_str(&format!(
                "{} ({:.2}): {}\n\n",
                credibility.assessment, credibility.score, credibility.recommendation
            ));
            for (name, value) in &credibility.indicators {
                out.push_str(&format!("- {}: {:.2}\n", name, value));
            }
            out.push('\n');
        }

        if let Some(bias) = &self.bias {
            out.push_str("## Bias\n\n");
            out.push_str(&format!("{} ({:.2})\n\n", bias.assessment, bias.score));
            for (name, value) in &bias.signals {
                out.push_str(&format!("- {}: {:.2}\n", name, value));
            }
            out.push('\n');
        }

        if let Some(points) = &self.key_points {
            out.push_str("## Key Points\n\n");
            for (i, point) in points.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", i + 1, point));
            }
            out.push('\n');
        }

        if let Some(facts) = &self.facts {
            out.push_str("## Facts\n\n");
            for fact in facts {
                out.push_str(&format!("- {}\n", fact));
            }
            out.push('\n');
        }

        out.trim_end().to_string() + "\n"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportComposer;

impl ReportComposer {
    pub fn new() -> Self {
        Self
    }

    pub fn compose<S: AsRef<str>>(&self, analysis: &AnalysisResult, document: &Document, requested: &[S]) -> Report {
        let sections = ReportSection::resolve(requested);
        let wants = |s: ReportSection| sections.contains(&s);

        let title = if document.title.trim().is_empty() {
            "Untitled".to_string()
        } else {
            document.title.clone()
        };

        Report {
            title,
            url: document.url.clone(),
            source_method: document.source_method,
            summary: wants(ReportSection::Summary).then(|| SummarySection {
                word_count: document.word_count(),
                authors: document.authors.clone(),
                published_at: document.published_at,
                keywords: document.keywords.iter().cloned().collect(),
            }),
            sentiment: wants(ReportSection::Sentiment).then(|| analysis.sentiment.clone()),
            credibility: wants(ReportSection::Credibility).then(|| CredibilitySection {
                score: analysis.credibility.score,
                assessment: credibility_assessment(analysis.credibility.score).to_string(),
                recommendation: credibility_recommendation(analysis.credibility.score).to_string(),
                indicators: analysis
                    .credibility
                    .indicators
                    .iter()
                    .map(|(k, v)| (k.to_string(), *v))
                    .collect(),
            }),
            bias: wants(ReportSection::Bias).then(|| BiasSection {
                score: analysis.bias.score,
                assessment: bias_assessment(analysis.bias.score).to_string(),
                signals: analysis.bias.signals.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            }),
            key_points: wants(ReportSection::KeyPoints).then(|| analysis.key_points.clone()),
            facts: wants(ReportSection::Facts).then(|| analysis.facts.clone()),
            sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisEngine, AnalysisOptions};

    fn sample() -> (AnalysisResult, Document) {
        let doc = Document::from_text(
            "Transit ridership",
            "Officials confirmed ridership rose 30% in the first week. However, some stations lack elevators.",
        )
        .with_url("https://news.example/transit");
        let analysis = AnalysisEngine::new().analyze_text(&doc.body, &AnalysisOptions::all());
        (analysis, doc)
    }

    #[test]
    fn test_resolve_sections() {
        assert_eq!(ReportSection::resolve(&["bias", "facts"]), vec![ReportSection::Bias, ReportSection::Facts]);
        assert_eq!(ReportSection::resolve(&["facts", "bias", "facts"]).len(), 2);
        assert_eq!(ReportSection::resolve::<&str>(&[]), ReportSection::ALL.to_vec());
        assert_eq!(ReportSection::resolve(&["all"]), ReportSection::ALL.to_vec());
        assert_eq!(ReportSection::resolve(&["nonsense"]), ReportSection::ALL.to_vec());
        assert_eq!(ReportSection::resolve(&["nonsense", "key-points"]), vec![ReportSection::KeyPoints]);
    }

    #[test]
    fn test_compose_all_sections() {
        let (analysis, doc) = sample();
        let report = ReportComposer::new().compose::<&str>(&analysis, &doc, &[]);
        assert!(report.summary.is_some());
        assert!(report.sentiment.is_some());
        assert!(report.credibility.is_some());
        assert!(report.bias.is_some());
        assert_eq!(report.facts.as_ref().unwrap().len(), 1);
        assert_eq!(report.url.as_deref(), Some("https://news.example/transit"));
    }

    #[test]
    fn test_compose_selected_sections() {
        let (analysis, doc) = sample();
        let report = ReportComposer::new().compose(&analysis, &doc, &["credibility"]);
        assert!(report.credibility.is_some());
        assert!(report.sentiment.is_none());
        assert!(report.facts.is_none());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("facts").is_none());
        assert!(json["credibility"]["assessment"].is_string());
    }

    #[test]
    fn test_compose_is_deterministic() {
        let (analysis, doc) = sample();
        let composer = ReportComposer::new();
        let a = composer.compose(&analysis, &doc, &["all"]);
        let b = composer.compose(&analysis, &doc, &["all"]);
        assert_eq!(a, b);
        assert_eq!(a.to_markdown(), b.to_markdown());
    }

    #[test]
    fn test_markdown_rendering() {
        let (analysis, doc) = sample();
        let markdown = ReportComposer::new().compose(&analysis, &doc, &["all"]).to_markdown();
        assert!(markdown.starts_with("# Transit ridership"));
        assert!(markdown.contains("## Credibility"));
        assert!(markdown.contains("## Facts"));
        assert!(markdown.contains("30%"));
    }

    #[test]
    fn test_untitled_document() {
        let (analysis, _) = sample();
        let doc = Document::from_text("  ", "Body text.");
        let report = ReportComposer::new().compose(&analysis, &doc, &["summary"]);
        assert_eq!(report.title, "Untitled");
    }
}
