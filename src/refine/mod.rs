//! Iterative refinement against target profiles.
//!
//! This module provides:
//! - TextGenerator / RuleEvaluator capability traits
//! - Target profiles and the profile registry
//! - Prompt construction for drafting, refining and checking
//! - Heuristic and judge-backed rule evaluators
//! - RefinementController, the bounded check/refine loop

pub mod controller;
pub mod evaluator;
pub mod profile;
pub mod prompt;
pub mod traits;

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use controller::RefinementController;
pub use evaluator::{DraftParts, HeuristicRuleEvaluator, JudgeRuleEvaluator, parse_check_response, split_draft};
pub use profile::{DEFAULT_PROFILE, ProfileRegistry, ProfileRules, TargetProfile, normalize_target};
pub use prompt::{COMPLETION_PHRASE, FEEDBACK_PREFIX, PromptContext, PromptKind};
pub use traits::{RuleEvaluator, TextGenerator};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefineSettings {
    /// Refinements allowed when the caller does not say
    pub max_iterations: u32,
    /// Largest budget a caller may ask for
    pub max_iterations_cap: u32,
    /// Deadline for each generator or evaluator call
    pub stage_timeout_ms: u64,
}

impl Default for RefineSettings {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            max_iterations_cap: 20,
            stage_timeout_ms: 120_000,
        }
    }
}

impl RefineSettings {
    pub fn stage_timeout(&self) -> Duration {
        Duration::from_millis(self.stage_timeout_ms)
    }
}
