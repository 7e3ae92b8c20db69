//! Rule evaluators.
//!
//! `HeuristicRuleEvaluator` applies the profile's declared rules locally and
//! deterministically. `JudgeRuleEvaluator` asks a generator to review the
//! draft and parses the `POST_OK` / `Feedback:` protocol from its reply.

use async_trait::async_trait;
use std::sync::Arc;

use super::profile::TargetProfile;
use super::prompt::{COMPLETION_PHRASE, FEEDBACK_PREFIX, PromptContext};
use super::traits::{RuleEvaluator, TextGenerator};
use crate::analysis::{AnalysisEngine, AnalysisOptions, Dimension};
use crate::domain::RuleVerdict;
use crate::error::EvaluationError;

/// A draft split into its `Title:` line and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftParts {
    pub title: Option<String>,
    pub body: String,
}

/// Split `Title: ...` / `Body: ...` formatted text. Untagged text is all body.
pub fn split_draft(draft: &str) -> DraftParts {
    let mut title = None;
    let mut body_lines = Vec::new();

    for line in draft.lines() {
        let trimmed = line.trim_start();
        if title.is_none() && has_tag(trimmed, "title:") {
            let text = trimmed[6..].trim();
            if !text.is_empty() {
                title = Some(text.to_string());
            }
            continue;
        }
        if has_tag(trimmed, "body:") {
            body_lines.push(trimmed[5..].trim_start());
        } else {
            body_lines.push(line);
        }
    }

    DraftParts {
        title,
        body: body_lines.join("\n").trim().to_string(),
    }
}

fn has_tag(line: &str, tag: &str) -> bool {
    line.get(..tag.len()).is_some_and(|head| head.eq_ignore_ascii_case(tag))
}

/// Checks the profile's declared rules without any external call.
#[derive(Debug, Clone, Default)]
pub struct HeuristicRuleEvaluator {
    engine: AnalysisEngine,
}

impl HeuristicRuleEvaluator {
    pub fn new(engine: AnalysisEngine) -> Self {
        Self { engine }
    }

    /// All rule violations for a draft, one `Feedback:` line each.
    pub fn violations(&self, draft: &str, profile: &TargetProfile) -> Vec<String> {
        let rules = &profile.rules;
        let parts = split_draft(draft);
        let chars = draft.trim().chars().count();
        let lower = draft.to_lowercase();
        let mut items = Vec::new();

        if let Some(min) = rules.min_chars.filter(|min| chars < *min) {
            items.push(format!(
                "{} Post is too short ({} characters); expand it to at least {}.",
                FEEDBACK_PREFIX, chars, min
            ));
        }
        if let Some(max) = rules.max_chars.filter(|max| chars > *max) {
            items.push(format!(
                "{} Post exceeds character limit by {} characters.",
                FEEDBACK_PREFIX,
                chars - max
            ));
        }

        match &parts.title {
            None if rules.require_title => {
                items.push(format!("{} Add a title line in the form 'Title: ...'.", FEEDBACK_PREFIX));
            }
            Some(title) if !rules.title_prefixes.is_empty() => {
                if !rules.title_prefixes.iter().any(|p| title.starts_with(p.as_str())) {
                    items.push(format!(
                        "{} Title must start with one of: {}.",
                        FEEDBACK_PREFIX,
                        rules.title_prefixes.join(", ")
                    ));
                }
            }
            _ => {}
        }

        for phrase in &rules.required_phrases {
            if !lower.contains(&phrase.to_lowercase()) {
                items.push(format!("{} Mention '{}'; it is expected for {}.", FEEDBACK_PREFIX, phrase, profile.name));
            }
        }
        for phrase in &rules.forbidden_phrases {
            if lower.contains(&phrase.to_lowercase()) {
                items.push(format!("{} Remove '{}'; it is not allowed in {}.", FEEDBACK_PREFIX, phrase, profile.name));
            }
        }

        if rules.needs_analysis() {
            let options = AnalysisOptions::all().with_dimensions([Dimension::Bias, Dimension::Credibility]);
            let text = if parts.body.is_empty() { draft } else { parts.body.as_str() };
            let analysis = self.engine.analyze_text(text, &options);

            if let Some(max_bias) = rules.max_bias.filter(|max| analysis.bias.score > *max) {
                items.push(format!(
                    "{} Tone is too one-sided (bias {:.2} > {:.2}); use neutral wording and acknowledge other views.",
                    FEEDBACK_PREFIX, analysis.bias.score, max_bias
                ));
            }
            if let Some(min_credibility) = rules.min_credibility.filter(|min| analysis.credibility.score < *min) {
                items.push(format!(
                    "{} Support the claims with sources, figures or expert quotes (credibility {:.2} < {:.2}).",
                    FEEDBACK_PREFIX, analysis.credibility.score, min_credibility
                ));
            }
        }

        items
    }
}

#[async_trait]
impl RuleEvaluator for HeuristicRuleEvaluator {
    async fn evaluate(&self, draft: &str, profile: &TargetProfile) -> Result<RuleVerdict, EvaluationError> {
        let items = self.violations(draft, profile);
        if items.is_empty() {
            Ok(RuleVerdict::pass())
        } else {
            Ok(RuleVerdict::fail_with_items(items))
        }
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}

/// Delegates the verdict to a generator acting as reviewer.
pub struct JudgeRuleEvaluator {
    generator: Arc<dyn TextGenerator>,
}

impl JudgeRuleEvaluator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl RuleEvaluator for JudgeRuleEvaluator {
    async fn evaluate(&self, draft: &str, profile: &TargetProfile) -> Result<RuleVerdict, EvaluationError> {
        let context = PromptContext::check(profile.clone(), draft);
        let response = self.generator.generate(&context).await?;
        parse_check_response(&response)
    }

    fn name(&self) -> &str {
        "judge"
    }
}

/// Parse a reviewer reply.
///
/// Any `Feedback:` line makes the verdict a failure carrying those lines.
/// Otherwise the reply must be the completion phrase.
pub fn parse_check_response(response: &str) -> Result<RuleVerdict, EvaluationError> {
    let response = response.trim().trim_matches(|c: char| c == '`' || c == '"' || c == '\'').trim();

    let items: Vec<String> = response
        .lines()
        .map(|line| line.trim().trim_start_matches(['-', '*']).trim())
        .filter(|line| line.starts_with(FEEDBACK_PREFIX))
        .map(str::to_string)
        .collect();
    if !items.is_empty() {
        return Ok(RuleVerdict::fail_with_items(items));
    }

    if response.trim_end_matches('.') == COMPLETION_PHRASE {
        return Ok(RuleVerdict::pass());
    }

    let preview: String = response.chars().take(100).collect();
    Err(EvaluationError::Unparseable(format!(
        "expected {} or {} lines, got: {}",
        COMPLETION_PHRASE, FEEDBACK_PREFIX, preview
    )))
}
