//! Pipeline orchestration.
//!
//! `Pipeline::run` drives one request end to end:
//!
//! ```text
//! validate -> fetch (URL) or passthrough (topic) -> draft -> check/refine loop -> analyze
//! ```
//!
//! A run never panics and never returns an error: the first failure is
//! captured in the `PipelineResult` together with whatever the run had
//! produced so far (fetched document, check history, last draft).
//!
//! A `Pipeline` holds only shared collaborators and immutable settings, so
//! one instance can serve any number of concurrent runs.

pub mod analyzer;
pub mod input;

use std::sync::Arc;

use crate::analysis::{AnalysisEngine, AnalysisOptions};
use crate::config::Config;
use crate::domain::{AnalysisResult, Document, PipelineResult, RefinementState};
use crate::error::Result;
use crate::fetch::{ContentFetcher, looks_like_url};
use crate::refine::{ProfileRegistry, RefineSettings, RefinementController, RuleEvaluator, TextGenerator};
use crate::report::Report;

pub use analyzer::ContentAnalyzer;
pub use input::RunInput;

/// Whatever a run had produced before it stopped.
#[derive(Debug, Default)]
struct RunProgress {
    document: Option<Document>,
    state: Option<RefinementState>,
}

pub struct Pipeline {
    analyzer: ContentAnalyzer,
    generator: Arc<dyn TextGenerator>,
    evaluator: Arc<dyn RuleEvaluator>,
    profiles: Arc<ProfileRegistry>,
    refine: RefineSettings,
}

impl Pipeline {
    pub fn new(fetcher: ContentFetcher, generator: Arc<dyn TextGenerator>, evaluator: Arc<dyn RuleEvaluator>) -> Self {
        Self::with_analyzer(ContentAnalyzer::new(fetcher), generator, evaluator)
    }

    pub fn with_analyzer(
        analyzer: ContentAnalyzer,
        generator: Arc<dyn TextGenerator>,
        evaluator: Arc<dyn RuleEvaluator>,
    ) -> Self {
        Self {
            analyzer,
            generator,
            evaluator,
            profiles: Arc::new(ProfileRegistry::builtin()),
            refine: RefineSettings::default(),
        }
    }

    /// Build a pipeline with an HTTP page source and settings from `config`.
    pub fn from_config(
        config: &Config,
        generator: Arc<dyn TextGenerator>,
        evaluator: Arc<dyn RuleEvaluator>,
    ) -> Result<Self> {
        Ok(Self::with_analyzer(ContentAnalyzer::from_config(config)?, generator, evaluator)
            .with_profiles(config.profile_registry())
            .with_refine_settings(config.refine.clone()))
    }

    pub fn with_profiles(mut self, profiles: ProfileRegistry) -> Self {
        self.profiles = Arc::new(profiles);
        self
    }

    pub fn with_engine(mut self, engine: AnalysisEngine) -> Self {
        self.analyzer = self.analyzer.with_engine(engine);
        self
    }

    pub fn with_refine_settings(mut self, refine: RefineSettings) -> Self {
        self.refine = refine;
        self
    }

    pub fn analyzer(&self) -> &ContentAnalyzer {
        &self.analyzer
    }

    pub fn profiles(&self) -> &ProfileRegistry {
        &self.profiles
    }

    pub fn refine_settings(&self) -> &RefineSettings {
        &self.refine
    }

    /// Run the full pipeline.
    pub async fn run(&self, input: RunInput) -> PipelineResult {
        let mut progress = RunProgress::default();
        match self.execute(&input, &mut progress).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(kind = %e.kind(), error = %e, topic = %input.topic_or_url, "Pipeline run failed");
                let mut result = PipelineResult::failure(&e);
                result.document = progress.document;
                if let Some(state) = progress.state {
                    result.iterations_used = state.iteration;
                    result.partial_draft = Some(state.draft);
                    result.history = state.history;
                }
                result
            }
        }
    }

    async fn execute(&self, input: &RunInput, progress: &mut RunProgress) -> Result<PipelineResult> {
        let budget = input.validate(self.refine.max_iterations_cap)?;
        let topic = input.topic_or_url.trim();
        let profile = self.profiles.resolve(&input.target_identifier);
        tracing::info!(topic = %topic, profile = %profile.name, budget, "Starting pipeline run");

        progress.document = self.acquire(topic).await?;

        let controller = RefinementController::new(
            self.generator.clone(),
            self.evaluator.clone(),
            self.refine.stage_timeout(),
        )
        .with_engine(self.analyzer.engine().clone());

        let draft = controller.draft(topic, &profile, progress.document.as_ref()).await?;
        let mut state = RefinementState::new(draft, budget);
        let outcome = match controller.run(&mut state, topic, &profile).await {
            Ok(outcome) => outcome,
            Err(e) => {
                progress.state = Some(state);
                return Err(e);
            }
        };

        let report = self.analyzer.engine().analyze_text(&state.draft, &AnalysisOptions::all());
        tracing::info!(
            iterations = state.iteration,
            accepted = outcome.is_accepted(),
            checks = state.checks(),
            "Pipeline run complete"
        );

        Ok(PipelineResult {
            success: true,
            final_draft: Some(state.draft),
            report: Some(report),
            error: None,
            iterations_used: state.iteration,
            meets_requirements: outcome.is_accepted(),
            history: state.history,
            partial_draft: None,
            document: progress.document.take(),
        })
    }

    /// URLs are fetched; a topic is searched when a provider exists, else passed through.
    async fn acquire(&self, topic: &str) -> Result<Option<Document>> {
        let fetcher = self.analyzer.fetcher();
        if looks_like_url(topic) {
            return Ok(Some(fetcher.fetch(topic).await?));
        }
        if !fetcher.has_search() {
            return Ok(None);
        }
        match fetcher.fetch_for_topic(topic).await {
            Ok(document) => Ok(Some(document)),
            Err(e) => {
                tracing::warn!(topic = %topic, error = %e, "Topic search failed, drafting from the topic alone");
                Ok(None)
            }
        }
    }

    /// Score standalone text without fetching or refining.
    pub fn analyze(&self, text: &str, options: &AnalysisOptions) -> Result<AnalysisResult> {
        self.analyzer.analyze(text, options)
    }

    /// Fetch a URL, analyze it and compose a report with the requested sections.
    pub async fn fetch_and_analyze<S: AsRef<str>>(
        &self,
        url: &str,
        sections: &[S],
    ) -> Result<(Document, AnalysisResult, Report)> {
        self.analyzer.fetch_and_analyze(url, sections).await
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("analyzer", &self.analyzer)
            .field("generator", &self.generator.name())
            .field("evaluator", &self.evaluator.name())
            .field("profiles", &self.profiles.names())
            .field("refine", &self.refine)
            .finish()
    }
}
