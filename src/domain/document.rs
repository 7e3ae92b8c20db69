//! Document - the normalized content unit produced by acquisition.
//!
//! A Document is created once (by the fetcher, or directly from caller text)
//! and never mutated afterwards. The analysis engine only ever reads it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which acquisition strategy produced a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceMethod {
    /// Structured article extraction (semantic markup plus metadata)
    PrimaryExtractor,
    /// Generic markup heuristics (largest text block, title tag)
    SecondaryParser,
    /// Markup stripped to plain text, no metadata
    RawFetch,
    /// Text handed in directly by the caller; nothing was fetched
    Provided,
}

impl SourceMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceMethod::PrimaryExtractor => "primary_extractor",
            SourceMethod::SecondaryParser => "secondary_parser",
            SourceMethod::RawFetch => "raw_fetch",
            SourceMethod::Provided => "provided",
        }
    }
}

impl std::fmt::Display for SourceMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Where the content came from (None for caller-provided text)
    pub url: Option<String>,

    pub title: String,

    /// Normalized article text. Never empty for a fetched document.
    pub body: String,

    pub authors: Vec<String>,

    pub published_at: Option<DateTime<Utc>>,

    /// Lowercased keywords from page metadata
    pub keywords: BTreeSet<String>,

    pub source_method: SourceMethod,
}

impl Document {
    /// Wrap caller-supplied text as a document.
    pub fn from_text(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: None,
            title: title.into(),
            body: body.into(),
            authors: Vec::new(),
            published_at: None,
            keywords: BTreeSet::new(),
            source_method: SourceMethod::Provided,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_keywords(mut self, keywords: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.keywords
            .extend(keywords.into_iter().map(|k| k.into().trim().to_lowercase()));
        self.keywords.retain(|k| !k.is_empty());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.body.split_whitespace().count()
    }

    /// First `max_chars` characters of the body, cut on a word boundary.
    pub fn excerpt(&self, max_chars: usize) -> String {
        if self.body.chars().count() <= max_chars {
            return self.body.clone();
        }
        let cut: String = self.body.chars().take(max_chars).collect();
        match cut.rfind(char::is_whitespace) {
            Some(idx) if idx > 0 => format!("{}...", cut[..idx].trim_end()),
            _ => format!("{}...", cut),
        }
    }
}
