//! Refinr - a content acquisition, analysis and iterative refinement pipeline
//!
//! Refinr fetches an article (or takes a topic), scores it for sentiment,
//! credibility and bias, drafts a post for a target audience profile and
//! refines the draft in a bounded check/refine loop until it meets that
//! profile's rules.

pub mod analysis;
pub mod config;
pub mod deadline;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod llm;
pub mod pipeline;
pub mod refine;
pub mod report;

pub use error::{RefinrError, Result};
