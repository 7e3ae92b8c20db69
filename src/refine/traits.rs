//! External capabilities the refinement loop depends on.

use async_trait::async_trait;

use super::profile::TargetProfile;
use super::prompt::PromptContext;
use crate::domain::RuleVerdict;
use crate::error::{EvaluationError, GenerationError};

/// Produces or rewrites draft text. Each call is independent.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, context: &PromptContext) -> Result<String, GenerationError>;

    /// Name for logs
    fn name(&self) -> &str {
        "generator"
    }
}

/// Decides whether a draft satisfies a target profile.
#[async_trait]
pub trait RuleEvaluator: Send + Sync {
    async fn evaluate(&self, draft: &str, profile: &TargetProfile) -> Result<RuleVerdict, EvaluationError>;

    /// Name for logs
    fn name(&self) -> &str {
        "evaluator"
    }
}
