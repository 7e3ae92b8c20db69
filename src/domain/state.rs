//! Refinement state and its audit trail.
//!
//! `RefinementState` is the one mutable record of a run. It is created after
//! the initial draft exists, handed to the controller by `&mut`, and dropped
//! when the run ends. Every rule check is appended to `history` and never
//! rewritten.

use serde::{Deserialize, Serialize};

use super::analysis::AnalysisResult;

/// Outcome of evaluating one draft against a target profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleVerdict {
    pub meets_requirements: bool,
    /// Actionable feedback when requirements are not met
    pub feedback: Option<String>,
}

impl RuleVerdict {
    /// Create a passing verdict
    pub fn pass() -> Self {
        Self {
            meets_requirements: true,
            feedback: None,
        }
    }

    /// Create a failing verdict with feedback
    pub fn fail(feedback: impl Into<String>) -> Self {
        Self {
            meets_requirements: false,
            feedback: Some(feedback.into()),
        }
    }

    /// Create a failing verdict from several feedback items, one per line
    pub fn fail_with_items(items: Vec<String>) -> Self {
        Self::fail(items.join("\n"))
    }
}

/// Phases of the refinement state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopPhase {
    Drafting,
    Checking,
    Refining,
    Done,
}

/// One rule evaluation, frozen at the time it happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckRecord {
    pub iteration: u32,
    pub draft: String,
    pub verdict: RuleVerdict,
    pub analysis: Option<AnalysisResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinementState {
    /// The current draft
    pub draft: String,

    /// Refinements applied so far (0 = initial draft)
    pub iteration: u32,

    /// Upper bound on refinements
    pub max_iterations: u32,

    pub meets_requirements: bool,

    pub last_feedback: Option<String>,

    pub phase: LoopPhase,

    /// Append-only record of every check
    pub history: Vec<CheckRecord>,
}

impl RefinementState {
    /// Start a state from the initial draft.
    pub fn new(draft: impl Into<String>, max_iterations: u32) -> Self {
        Self {
            draft: draft.into(),
            iteration: 0,
            max_iterations,
            meets_requirements: false,
            last_feedback: None,
            phase: LoopPhase::Drafting,
            history: Vec::new(),
        }
    }

    /// Whether another refinement is allowed.
    pub fn can_refine(&self) -> bool {
        !self.meets_requirements && self.iteration < self.max_iterations
    }

    /// Whether the loop may stop: the draft passed, or the budget is spent.
    pub fn should_exit(&self) -> bool {
        self.meets_requirements || self.iteration == self.max_iterations
    }

    /// Record a check of the current draft.
    pub fn record_check(&mut self, verdict: RuleVerdict, analysis: Option<AnalysisResult>) {
        self.meets_requirements = verdict.meets_requirements;
        self.last_feedback = verdict.feedback.clone();
        self.history.push(CheckRecord {
            iteration: self.iteration,
            draft: self.draft.clone(),
            verdict,
            analysis,
        });
    }

    /// Replace the draft with a refined one and advance the iteration.
    pub fn apply_refinement(&mut self, draft: impl Into<String>) {
        debug_assert!(self.can_refine());
        self.draft = draft.into();
        self.iteration += 1;
        self.meets_requirements = false;
    }

    /// Number of rule evaluations performed.
    pub fn checks(&self) -> usize {
        self.history.len()
    }

    /// Feedback from all failed checks, oldest first.
    pub fn feedback_history(&self) -> Vec<(u32, &str)> {
        self.history
            .iter()
            .filter(|r| !r.verdict.meets_requirements)
            .filter_map(|r| r.verdict.feedback.as_deref().map(|f| (r.iteration, f)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = RefinementState::new("draft", 3);
        assert_eq!(state.iteration, 0);
        assert_eq!(state.phase, LoopPhase::Drafting);
        assert!(state.can_refine());
        assert!(!state.should_exit());
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_zero_budget_exits_immediately() {
        let state = RefinementState::new("draft", 0);
        assert!(!state.can_refine());
        assert!(state.should_exit());
    }

    #[test]
    fn test_record_check_and_refine() {
        let mut state = RefinementState::new("v0", 2);
        state.record_check(RuleVerdict::fail("too short"), None);
        assert_eq!(state.last_feedback.as_deref(), Some("too short"));
        assert!(state.can_refine());

        state.apply_refinement("v1");
        assert_eq!(state.iteration, 1);
        assert_eq!(state.draft, "v1");

        state.record_check(RuleVerdict::pass(), None);
        assert!(state.meets_requirements);
        assert!(state.should_exit());
        assert!(!state.can_refine());

        assert_eq!(state.checks(), 2);
        assert_eq!(state.history[0].draft, "v0");
        assert_eq!(state.history[1].draft, "v1");
        assert_eq!(state.history[1].iteration, 1);
    }

    #[test]
    fn test_feedback_history_skips_passes() {
        let mut state = RefinementState::new("v0", 3);
        state.record_check(RuleVerdict::fail("a"), None);
        state.apply_refinement("v1");
        state.record_check(RuleVerdict::fail("b"), None);
        state.apply_refinement("v2");
        state.record_check(RuleVerdict::pass(), None);

        assert_eq!(state.feedback_history(), vec![(0, "a"), (1, "b")]);
    }

    #[test]
    fn test_fail_with_items() {
        let verdict = RuleVerdict::fail_with_items(vec!["Feedback: one".into(), "Feedback: two".into()]);
        assert!(!verdict.meets_requirements);
        assert_eq!(verdict.feedback.as_deref(), Some("Feedback: one\nFeedback: two"));
    }
}
