//! Content acquisition.
//!
//! This module provides:
//! - PageSource / SearchProvider seams over the network
//! - Extraction strategies (article, generic markup, raw text)
//! - Normalizer for whitespace, boilerplate and length
//! - ContentFetcher running the strategies as an ordered fallback chain

pub mod fetcher;
pub mod normalize;
pub mod source;
pub mod strategy;

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use fetcher::ContentFetcher;
pub use normalize::Normalizer;
pub use source::{DEFAULT_USER_AGENT, HttpPageSource, PageSource, SearchProvider, looks_like_url, validate_url};
pub use strategy::{ArticleExtractor, Extraction, ExtractionStrategy, MarkupParser, RawTextExtractor};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Per-request timeout
    pub timeout_ms: u64,
    /// A body must be longer than this to be accepted
    pub min_body_chars: usize,
    /// Bodies are truncated to this many characters
    pub max_body_chars: usize,
    pub user_agent: String,
    /// Candidate URLs requested from the search provider
    pub search_limit: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            min_body_chars: 200,
            max_body_chars: 3000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            search_limit: 5,
        }
    }
}

impl FetchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
