//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - run: draft and refine a post for a target profile
//! - analyze: score standalone text
//! - fetch: fetch a URL and print a report
//! - profiles: list known target profiles

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Refinr - fetch, analyze, draft and refine content for a target audience
#[derive(Parser, Debug)]
#[command(name = "refinr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// How drafts are checked against a target profile
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvaluatorKind {
    /// Ask the model to judge the draft
    #[default]
    Judge,
    /// Check the profile's declarative rules locally
    Heuristic,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Draft a post from a topic or URL and refine it until it fits the target
    Run {
        /// Topic text or article URL
        topic_or_url: String,

        /// Target profile, e.g. r/python
        #[arg(short, long, default_value = "default")]
        target: String,

        /// Refinement budget (defaults to refine.max_iterations from config)
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        max_iterations: Option<i64>,

        /// Rule evaluator to use
        #[arg(short, long, value_enum, default_value_t = EvaluatorKind::Judge)]
        evaluator: EvaluatorKind,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Analyze text from an argument, a file, or stdin
    Analyze {
        /// Text to analyze
        text: Option<String>,

        /// Read text from this file instead
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Dimensions to compute (sentiment, credibility, bias, key_points, facts)
        #[arg(short, long, value_delimiter = ',')]
        dimensions: Vec<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch a URL and print an analysis report
    Fetch {
        /// Article URL
        url: String,

        /// Report sections (summary, sentiment, credibility, bias, key_points, facts, all)
        #[arg(short, long, value_delimiter = ',')]
        sections: Vec<String>,

        /// Print the report as JSON instead of markdown
        #[arg(long)]
        json: bool,
    },

    /// List target profiles
    Profiles,
}
