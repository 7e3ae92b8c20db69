//! Run outcome types.
//!
//! `LoopOutcome` is what the refinement controller reports; `PipelineResult`
//! is the terminal record handed back to callers of a full run.

use serde::{Deserialize, Serialize};

use super::analysis::AnalysisResult;
use super::document::Document;
use super::state::CheckRecord;
use crate::error::{ErrorKind, RefinrError};

/// How the refinement loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopOutcome {
    /// The draft met the target's requirements at this iteration
    Accepted { iteration: u32 },
    /// The iteration budget ran out first
    Exhausted { iterations: u32 },
}

impl LoopOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, LoopOutcome::Accepted { .. })
    }
}

/// Serializable summary of the first fatal error of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&RefinrError> for ErrorInfo {
    fn from(err: &RefinrError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<RefinrError> for ErrorInfo {
    fn from(err: RefinrError) -> Self {
        Self::from(&err)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    pub success: bool,

    pub final_draft: Option<String>,

    /// Analysis of the final draft
    pub report: Option<AnalysisResult>,

    pub error: Option<ErrorInfo>,

    pub iterations_used: u32,

    /// Whether the final draft met the target's requirements
    pub meets_requirements: bool,

    /// Every rule check of the run, kept on failure for diagnostics
    pub history: Vec<CheckRecord>,

    /// Last draft seen before a failure
    pub partial_draft: Option<String>,

    /// The fetched source document, when the input was a URL
    pub document: Option<Document>,
}

impl PipelineResult {
    pub fn failure(error: impl Into<ErrorInfo>) -> Self {
        Self {
            success: false,
            final_draft: None,
            report: None,
            error: Some(error.into()),
            iterations_used: 0,
            meets_requirements: false,
            history: Vec::new(),
            partial_draft: None,
            document: None,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(|e| e.kind)
    }
}
