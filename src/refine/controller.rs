//! RefinementController - the bounded check/refine loop.
//!
//! ```text
//! Drafting -> Checking -> (Refining -> Checking)* -> Done
//! ```
//!
//! The loop stops when a check passes or when `iteration == max_iterations`,
//! so a run makes at most `max_iterations + 1` evaluations. External failures
//! are never retried; they end the run with the state left as it was.

use std::sync::Arc;
use std::time::Duration;

use super::profile::TargetProfile;
use super::prompt::PromptContext;
use super::traits::{RuleEvaluator, TextGenerator};
use crate::analysis::{AnalysisEngine, AnalysisOptions};
use crate::deadline::with_timeout;
use crate::domain::{Document, LoopOutcome, LoopPhase, RefinementState};
use crate::error::{GenerationError, Result};

/// Characters of source material shown to the generator.
const SOURCE_EXCERPT_CHARS: usize = 2000;

pub struct RefinementController {
    generator: Arc<dyn TextGenerator>,
    evaluator: Arc<dyn RuleEvaluator>,
    engine: AnalysisEngine,
    stage_timeout: Duration,
}

impl RefinementController {
    pub fn new(generator: Arc<dyn TextGenerator>, evaluator: Arc<dyn RuleEvaluator>, stage_timeout: Duration) -> Self {
        Self {
            generator,
            evaluator,
            engine: AnalysisEngine::default(),
            stage_timeout,
        }
    }

    pub fn with_engine(mut self, engine: AnalysisEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Drafting: produce the initial draft.
    pub async fn draft(&self, topic: &str, profile: &TargetProfile, source: Option<&Document>) -> Result<String> {
        let excerpt = source.map(|doc| {
            if doc.title.is_empty() {
                doc.excerpt(SOURCE_EXCERPT_CHARS)
            } else {
                format!("{}\n\n{}", doc.title, doc.excerpt(SOURCE_EXCERPT_CHARS))
            }
        });
        let context = PromptContext::draft(topic, profile.clone(), excerpt);
        let draft = with_timeout(self.stage_timeout, "draft", self.generator.generate(&context)).await?;
        let draft = non_empty(draft)?;
        tracing::info!(generator = self.generator.name(), chars = draft.chars().count(), "Generated initial draft");
        Ok(draft)
    }

    /// Run Checking/Refining until the draft passes or the budget is spent.
    pub async fn run(&self, state: &mut RefinementState, topic: &str, profile: &TargetProfile) -> Result<LoopOutcome> {
        loop {
            state.phase = LoopPhase::Checking;
            let verdict = with_timeout(
                self.stage_timeout,
                "evaluate",
                self.evaluator.evaluate(&state.draft, profile),
            )
            .await?;
            let analysis = self.engine.analyze_text(&state.draft, &AnalysisOptions::all());

            tracing::info!(
                evaluator = self.evaluator.name(),
                iteration = state.iteration,
                passed = verdict.meets_requirements,
                "Checked draft"
            );
            state.record_check(verdict, Some(analysis));

            if state.should_exit() {
                state.phase = LoopPhase::Done;
                if state.meets_requirements {
                    return Ok(LoopOutcome::Accepted {
                        iteration: state.iteration,
                    });
                }
                tracing::warn!(
                    iterations = state.iteration,
                    profile = %profile.name,
                    "Iteration budget spent without meeting requirements"
                );
                return Ok(LoopOutcome::Exhausted {
                    iterations: state.iteration,
                });
            }

            state.phase = LoopPhase::Refining;
            let feedback: Vec<(u32, String)> = state
                .feedback_history()
                .into_iter()
                .rev()
                .map(|(iteration, text)| (iteration, text.to_string()))
                .collect();
            let context = PromptContext::refine(topic, profile.clone(), state.draft.clone(), feedback);
            let refined = with_timeout(self.stage_timeout, "refine", self.generator.generate(&context)).await?;
            state.apply_refinement(non_empty(refined)?);
        }
    }
}

fn non_empty(draft: String) -> std::result::Result<String, GenerationError> {
    let trimmed = draft.trim();
    if trimmed.is_empty() {
        return Err(GenerationError::InvalidResponse("generator returned an empty draft".to_string()));
    }
    Ok(trimmed.to_string())
}

impl std::fmt::Debug for RefinementController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefinementController")
            .field("generator", &self.generator.name())
            .field("evaluator", &self.evaluator.name())
            .field("stage_timeout", &self.stage_timeout)
            .finish()
    }
}
