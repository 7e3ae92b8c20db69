//! Domain types for Refinr
//!
//! This module contains the core records that flow through a run:
//! - Document: normalized content produced by acquisition
//! - AnalysisResult: sentiment, credibility, bias, key points and facts
//! - RefinementState: the per-run mutable record with its check history
//! - PipelineResult / LoopOutcome: what a run hands back

pub mod analysis;
pub mod document;
pub mod outcome;
pub mod state;

pub use analysis::{AnalysisResult, Bias, BiasSignal, Credibility, Indicator, Sentiment, SentimentLabel};
pub use document::{Document, SourceMethod};
pub use outcome::{ErrorInfo, LoopOutcome, PipelineResult};
pub use state::{CheckRecord, LoopPhase, RefinementState, RuleVerdict};
