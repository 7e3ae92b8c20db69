//! Error types for Refinr
//!
//! Centralized error handling using thiserror. Component errors (fetching,
//! generation, evaluation, analysis) are separate enums that all convert into
//! [`RefinrError`], whose [`ErrorKind`] is what a pipeline run reports.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Failure to turn a URL (or a topic) into a document.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// URL could not be parsed or uses an unsupported scheme
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A single outbound request failed
    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    /// Every extraction strategy (and every candidate URL) failed
    #[error("All acquisition strategies exhausted: {reason} (tried: {})", urls_tried.join(", "))]
    Exhausted { reason: String, urls_tried: Vec<String> },

    /// A topic was given but no search provider is configured
    #[error("No search provider configured to resolve topic: {0}")]
    NoSearchProvider(String),
}

impl FetchError {
    /// URLs attempted before giving up, if any.
    pub fn urls_tried(&self) -> Vec<String> {
        match self {
            FetchError::InvalidUrl { url, .. } | FetchError::Request { url, .. } => vec![url.clone()],
            FetchError::Exhausted { urls_tried, .. } => urls_tried.clone(),
            FetchError::NoSearchProvider(_) => Vec::new(),
        }
    }
}

/// Failure of the external text generation capability.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Missing API key: environment variable {env_var} not set")]
    MissingApiKey { env_var: String },
}

/// Failure of the external rule evaluation capability.
#[derive(Debug, Clone, Error)]
pub enum EvaluationError {
    #[error("Evaluator backend failed: {0}")]
    Backend(#[from] GenerationError),

    #[error("Could not parse evaluator response: {0}")]
    Unparseable(String),
}

/// Precondition violations inside the analysis engine.
///
/// These indicate a defect upstream (a document with an empty body should
/// never have been produced), not a user error.
#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    #[error("Document body is empty")]
    EmptyBody,
}

/// Coarse error classification surfaced in a pipeline result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Fetch,
    Generation,
    Evaluation,
    Validation,
    InternalAnalysis,
    Timeout,
    Config,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Fetch => "fetch",
            ErrorKind::Generation => "generation",
            ErrorKind::Evaluation => "evaluation",
            ErrorKind::Validation => "validation",
            ErrorKind::InternalAnalysis => "internal_analysis",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Config => "config",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// All error types that can occur in Refinr
#[derive(Debug, Error)]
pub enum RefinrError {
    /// Content acquisition failed
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Draft generation or refinement failed
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Rule evaluation failed
    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),

    /// Malformed caller input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Scoring precondition violated
    #[error("Internal analysis error: {0}")]
    InternalAnalysis(#[from] AnalysisError),

    /// An external call did not finish in time
    #[error("Timed out after {after:?} during {stage}")]
    Timeout { stage: String, after: Duration },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl RefinrError {
    /// Classify this error for reporting.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RefinrError::Fetch(_) => ErrorKind::Fetch,
            RefinrError::Generation(_) => ErrorKind::Generation,
            RefinrError::Evaluation(_) => ErrorKind::Evaluation,
            RefinrError::Validation(_) => ErrorKind::Validation,
            RefinrError::InternalAnalysis(_) => ErrorKind::InternalAnalysis,
            RefinrError::Timeout { .. } => ErrorKind::Timeout,
            RefinrError::Io(_) | RefinrError::Json(_) | RefinrError::Yaml(_) => ErrorKind::Config,
        }
    }
}

/// Result type alias for Refinr operations
pub type Result<T> = std::result::Result<T, RefinrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_error_lists_urls() {
        let err = FetchError::Exhausted {
            reason: "body too short".to_string(),
            urls_tried: vec!["https://a.example".to_string(), "https://b.example".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "All acquisition strategies exhausted: body too short (tried: https://a.example, https://b.example)"
        );
        assert_eq!(err.urls_tried().len(), 2);
    }

    #[test]
    fn test_validation_error() {
        let err = RefinrError::Validation("topic is empty".to_string());
        assert_eq!(err.to_string(), "Validation error: topic is empty");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_timeout_error() {
        let err = RefinrError::Timeout {
            stage: "refinement".to_string(),
            after: Duration::from_secs(2),
        };
        assert_eq!(err.to_string(), "Timed out after 2s during refinement");
        assert_eq!(err.kind(), ErrorKind::Timeout);
    }

    #[test]
    fn test_component_conversions() {
        let err: RefinrError = FetchError::NoSearchProvider("rust".to_string()).into();
        assert_eq!(err.kind(), ErrorKind::Fetch);

        let err: RefinrError = GenerationError::Network("reset".to_string()).into();
        assert_eq!(err.kind(), ErrorKind::Generation);

        let err: RefinrError = EvaluationError::Unparseable("maybe".to_string()).into();
        assert_eq!(err.kind(), ErrorKind::Evaluation);

        let err: RefinrError = AnalysisError::EmptyBody.into();
        assert_eq!(err.kind(), ErrorKind::InternalAnalysis);
    }

    #[test]
    fn test_evaluation_wraps_generation() {
        let err: EvaluationError = GenerationError::Api {
            status: 529,
            message: "overloaded".to_string(),
        }
        .into();
        assert!(err.to_string().contains("overloaded"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RefinrError = io_err.into();
        assert!(matches!(err, RefinrError::Io(_)));
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_error_kind_serialization() {
        let json = serde_json::to_string(&ErrorKind::InternalAnalysis).unwrap();
        assert_eq!(json, "\"internal_analysis\"");
        assert_eq!(ErrorKind::Fetch.to_string(), "fetch");
    }
}
