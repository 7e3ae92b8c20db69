//! Caller input for a pipeline run.

use serde::{Deserialize, Serialize};

use crate::error::{RefinrError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunInput {
    /// A URL to fetch, or a free-text topic
    pub topic_or_url: String,
    /// Target profile identifier, e.g. `r/python`
    pub target_identifier: String,
    /// Refinement budget; 0 means check the initial draft once
    pub max_iterations: i64,
}

impl RunInput {
    pub fn new(topic_or_url: impl Into<String>, target_identifier: impl Into<String>, max_iterations: i64) -> Self {
        Self {
            topic_or_url: topic_or_url.into(),
            target_identifier: target_identifier.into(),
            max_iterations,
        }
    }

    /// Check the input and return the refinement budget.
    pub fn validate(&self, max_iterations_cap: u32) -> Result<u32> {
        if self.topic_or_url.trim().is_empty() {
            return Err(RefinrError::Validation("topic or URL is empty".to_string()));
        }
        if self.target_identifier.trim().is_empty() {
            return Err(RefinrError::Validation("target identifier is empty".to_string()));
        }
        if self.max_iterations < 0 {
            return Err(RefinrError::Validation(format!(
                "max_iterations must not be negative (got {})",
                self.max_iterations
            )));
        }
        if self.max_iterations > i64::from(max_iterations_cap) {
            return Err(RefinrError::Validation(format!(
                "max_iterations {} exceeds the cap of {}",
                self.max_iterations, max_iterations_cap
            )));
        }
        u32::try_from(self.max_iterations)
            .map_err(|_| RefinrError::Validation(format!("max_iterations out of range: {}", self.max_iterations)))
    }
}
