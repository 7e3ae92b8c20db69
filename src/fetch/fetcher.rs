//! ContentFetcher - ordered fallback chain from URL to Document.

use std::sync::Arc;

use crate::domain::Document;
use crate::error::FetchError;

use super::normalize::Normalizer;
use super::source::{PageSource, SearchProvider, validate_url};
use super::strategy::{ExtractionStrategy, default_strategies};
use super::FetchSettings;

pub struct ContentFetcher {
    source: Arc<dyn PageSource>,
    search: Option<Arc<dyn SearchProvider>>,
    strategies: Vec<Box<dyn ExtractionStrategy>>,
    normalizer: Normalizer,
    settings: FetchSettings,
}

impl ContentFetcher {
    pub fn new(source: Arc<dyn PageSource>, settings: FetchSettings) -> Self {
        Self {
            source,
            search: None,
            strategies: default_strategies(),
            normalizer: Normalizer::new(settings.max_body_chars),
            settings,
        }
    }

    pub fn with_search(mut self, search: Arc<dyn SearchProvider>) -> Self {
        self.search = Some(search);
        self
    }

    /// Replace the strategy chain. Order is priority order.
    pub fn with_strategies(mut self, strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    pub fn has_search(&self) -> bool {
        self.search.is_some()
    }

    /// Fetch one URL through the strategy chain.
    ///
    /// Each strategy attempt makes exactly one page request, bounded by
    /// `timeout_ms`. A strategy whose request fails or times out, that finds
    /// nothing, or whose body is no longer than `min_body_chars` after
    /// normalization falls through to the next.
    pub async fn fetch(&self, url: &str) -> Result<Document, FetchError> {
        let parsed = validate_url(url)?;
        let url = parsed.as_str();
        let mut last_reason = String::from("no extraction strategies configured");

        for strategy in &self.strategies {
            let method = strategy.method();
            let html = match self.request(url).await {
                Ok(html) => html,
                Err(e) => {
                    tracing::debug!(url = %url, method = %method, error = %e, "Page request failed");
                    last_reason = format!("{}: {}", method, e);
                    continue;
                }
            };

            let Some(extraction) = strategy.extract(&html) else {
                tracing::debug!(url = %url, method = %method, "Strategy found no content");
                last_reason = format!("{}: no content found", method);
                continue;
            };

            let body = self.normalizer.normalize(&extraction.body);
            let chars = body.chars().count();
            if chars <= self.settings.min_body_chars {
                tracing::debug!(url = %url, method = %method, chars, "Extracted body too short");
                last_reason = format!(
                    "{}: body too short ({} <= {} chars)",
                    method, chars, self.settings.min_body_chars
                );
                continue;
            }

            tracing::info!(url = %url, method = %method, chars, "Fetched document");
            return Ok(Document {
                url: Some(url.to_string()),
                title: extraction.title.trim().to_string(),
                body,
                authors: extraction.authors,
                published_at: extraction.published_at,
                keywords: extraction.keywords,
                source_method: method,
            });
        }

        tracing::warn!(url = %url, reason = %last_reason, "All extraction strategies failed");
        Err(FetchError::Exhausted {
            reason: last_reason,
            urls_tried: vec![url.to_string()],
        })
    }

    async fn request(&self, url: &str) -> Result<String, FetchError> {
        let timeout = self.settings.timeout();
        match tokio::time::timeout(timeout, self.source.get(url)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Request {
                url: url.to_string(),
                reason: format!("timed out after {:?}", timeout),
            }),
        }
    }

    /// Try each URL in order; the first success wins.
    pub async fn fetch_any(&self, urls: &[String]) -> Result<Document, FetchError> {
        let mut urls_tried = Vec::new();
        let mut last_reason = String::from("no candidate URLs");

        for url in urls {
            match self.fetch(url).await {
                Ok(document) => return Ok(document),
                Err(e) => {
                    urls_tried.extend(e.urls_tried());
                    last_reason = match e {
                        FetchError::Exhausted { reason, .. } => reason,
                        other => other.to_string(),
                    };
                }
            }
        }

        Err(FetchError::Exhausted {
            reason: last_reason,
            urls_tried,
        })
    }

    /// Resolve a topic to URLs with the search provider, then fetch the first that works.
    pub async fn fetch_for_topic(&self, topic: &str) -> Result<Document, FetchError> {
        let Some(search) = &self.search else {
            return Err(FetchError::NoSearchProvider(topic.to_string()));
        };
        let urls = search.search(topic, self.settings.search_limit).await?;
        tracing::info!(topic = %topic, candidates = urls.len(), "Search resolved topic");
        self.fetch_any(&urls).await
    }
}

impl std::fmt::Debug for ContentFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentFetcher")
            .field("strategies", &self.strategies.iter().map(|s| s.method()).collect::<Vec<_>>())
            .field("has_search", &self.search.is_some())
            .field("settings", &self.settings)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SourceMethod;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};

    const LONG_PARAGRAPH: &str = "The regional council approved the budget after a long debate about transit funding and housing.";

    /// Serves fixed pages and counts requests.
    struct StaticSource {
        pages: HashMap<String, String>,
        calls: AtomicU32,
    }

    impl StaticSource {
        fn new(pages: &[(&str, String)]) -> Self {
            Self {
                pages: pages.iter().map(|(u, h)| (u.to_string(), h.clone())).collect(),
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PageSource for StaticSource {
        async fn get(&self, url: &str) -> Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.pages.get(url).cloned().ok_or_else(|| FetchError::Request {
                url: url.to_string(),
                reason: "HTTP 404 Not Found".to_string(),
            })
        }
    }

    struct FixedSearch(Vec<String>);

    #[async_trait]
    impl SearchProvider for FixedSearch {
        async fn search(&self, _query: &str, limit: usize) -> Result<Vec<String>, FetchError> {
            Ok(self.0.iter().take(limit).cloned().collect())
        }
    }

    fn settings() -> FetchSettings {
        FetchSettings {
            min_body_chars: 40,
            ..FetchSettings::default()
        }
    }

    fn article_page() -> String {
        format!("<html><head><title>Budget</title></head><body><article><p>{}</p></article></body></html>", LONG_PARAGRAPH)
    }

    #[tokio::test]
    async fn test_primary_extractor_wins() {
        let source = Arc::new(StaticSource::new(&[("https://news.example/a", article_page())]));
        let fetcher = ContentFetcher::new(source.clone(), settings());

        let doc = fetcher.fetch("https://news.example/a").await.unwrap();
        assert_eq!(doc.source_method, SourceMethod::PrimaryExtractor);
        assert_eq!(doc.title, "Budget");
        assert_eq!(doc.url.as_deref(), Some("https://news.example/a"));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_falls_back_to_raw_fetch() {
        // No <article>, no <p>: only raw text extraction finds anything.
        let html = format!("<html><body><span>{}</span></body></html>", LONG_PARAGRAPH);
        let source = Arc::new(StaticSource::new(&[("https://news.example/raw", html)]));
        let fetcher = ContentFetcher::new(source.clone(), settings());

        let doc = fetcher.fetch("https://news.example/raw").await.unwrap();
        assert_eq!(doc.source_method, SourceMethod::RawFetch);
        assert!(doc.body.contains("regional council"));
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn test_short_bodies_fall_through() {
        let html = "<html><body><article><p>Too short.</p></article></body></html>".to_string();
        let source = Arc::new(StaticSource::new(&[("https://news.example/short", html)]));
        let fetcher = ContentFetcher::new(source.clone(), settings());

        let err = fetcher.fetch("https://news.example/short").await.unwrap_err();
        match err {
            FetchError::Exhausted { reason, urls_tried } => {
                assert!(reason.contains("too short"));
                assert_eq!(urls_tried, vec!["https://news.example/short".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn test_request_failures_exhaust_chain() {
        let source = Arc::new(StaticSource::new(&[]));
        let fetcher = ContentFetcher::new(source.clone(), settings());

        let err = fetcher.fetch("https://news.example/missing").await.unwrap_err();
        assert!(matches!(err, FetchError::Exhausted { .. }));
        assert!(err.to_string().contains("404"));
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn test_invalid_url_makes_no_request() {
        let source = Arc::new(StaticSource::new(&[]));
        let fetcher = ContentFetcher::new(source.clone(), settings());

        let err = fetcher.fetch("ftp://news.example/a").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_fetch_any_accumulates_urls() {
        let source = Arc::new(StaticSource::new(&[("https://news.example/good", article_page())]));
        let fetcher = ContentFetcher::new(source, settings());

        let urls = vec!["https://news.example/bad".to_string(), "https://news.example/good".to_string()];
        let doc = fetcher.fetch_any(&urls).await.unwrap();
        assert_eq!(doc.url.as_deref(), Some("https://news.example/good"));

        let urls = vec!["https://news.example/x".to_string(), "not a url".to_string()];
        let err = fetcher.fetch_any(&urls).await.unwrap_err();
        assert_eq!(err.urls_tried(), vec!["https://news.example/x".to_string(), "not a url".to_string()]);
    }

    #[tokio::test]
    async fn test_fetch_for_topic() {
        let source = Arc::new(StaticSource::new(&[("https://news.example/a", article_page())]));
        let fetcher = ContentFetcher::new(source, settings())
            .with_search(Arc::new(FixedSearch(vec!["https://news.example/a".to_string()])));

        let doc = fetcher.fetch_for_topic("regional budget").await.unwrap();
        assert_eq!(doc.source_method, SourceMethod::PrimaryExtractor);
    }

    #[tokio::test]
    async fn test_fetch_for_topic_without_search() {
        let fetcher = ContentFetcher::new(Arc::new(StaticSource::new(&[])), settings());
        assert!(!fetcher.has_search());
        let err = fetcher.fetch_for_topic("anything").await.unwrap_err();
        assert!(matches!(err, FetchError::NoSearchProvider(_)));
    }

    #[tokio::test]
    async fn test_custom_strategy_chain() {
        let html = format!("<html><body><span>{}</span></body></html>", LONG_PARAGRAPH);
        let source = Arc::new(StaticSource::new(&[("https://news.example/raw", html)]));
        let fetcher = ContentFetcher::new(source.clone(), settings())
            .with_strategies(vec![Box::new(super::super::strategy::RawTextExtractor::default())]);

        let doc = fetcher.fetch("https://news.example/raw").await.unwrap();
        assert_eq!(doc.source_method, SourceMethod::RawFetch);
        assert_eq!(source.calls(), 1);
    }
}
