//! Fetch and score content without drafting.

use std::sync::Arc;

use crate::analysis::{AnalysisEngine, AnalysisOptions};
use crate::config::Config;
use crate::domain::{AnalysisResult, Document};
use crate::error::{RefinrError, Result};
use crate::fetch::{ContentFetcher, HttpPageSource};
use crate::report::{Report, ReportComposer};

/// The acquisition and analysis half of the pipeline. Needs no generator.
#[derive(Debug)]
pub struct ContentAnalyzer {
    fetcher: ContentFetcher,
    engine: AnalysisEngine,
    composer: ReportComposer,
}

impl ContentAnalyzer {
    pub fn new(fetcher: ContentFetcher) -> Self {
        Self {
            fetcher,
            engine: AnalysisEngine::default(),
            composer: ReportComposer::new(),
        }
    }

    /// HTTP page source plus fetch and analysis settings from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let source = HttpPageSource::new(config.fetch.timeout(), &config.fetch.user_agent)?;
        let fetcher = ContentFetcher::new(Arc::new(source), config.fetch.clone());
        Ok(Self::new(fetcher).with_engine(AnalysisEngine::with_settings(config.analysis.clone())))
    }

    pub fn with_engine(mut self, engine: AnalysisEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn fetcher(&self) -> &ContentFetcher {
        &self.fetcher
    }

    pub fn engine(&self) -> &AnalysisEngine {
        &self.engine
    }

    /// Score standalone text. Blank text is a validation error.
    pub fn analyze(&self, text: &str, options: &AnalysisOptions) -> Result<AnalysisResult> {
        if text.trim().is_empty() {
            return Err(RefinrError::Validation("text to analyze is empty".to_string()));
        }
        Ok(self.engine.analyze_text(text, options))
    }

    /// Fetch a URL, analyze it and compose a report with the requested sections.
    pub async fn fetch_and_analyze<S: AsRef<str>>(
        &self,
        url: &str,
        sections: &[S],
    ) -> Result<(Document, AnalysisResult, Report)> {
        let document = self.fetcher.fetch(url).await?;
        let analysis = self.engine.analyze(&document)?;
        let report = self.composer.compose(&analysis, &document, sections);
        tracing::info!(url = %url, sections = report.sections.len(), "Composed report");
        Ok((document, analysis, report))
    }
}
