use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod cli;

use cli::Cli;
use cli::commands::{Commands, EvaluatorKind};
use refinr::analysis::{AnalysisEngine, AnalysisOptions, Dimension};
use refinr::config::Config;
use refinr::domain::{AnalysisResult, PipelineResult};
use refinr::llm::AnthropicGenerator;
use refinr::pipeline::{ContentAnalyzer, Pipeline, RunInput};
use refinr::refine::{HeuristicRuleEvaluator, JudgeRuleEvaluator, RuleEvaluator, TextGenerator};

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("refinr")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("refinr.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

/// Level the config asks for, if it should override the one set at init.
///
/// `-v` and `RUST_LOG` both win over the config file.
fn config_log_level(config: &Config, verbose: bool, rust_log_set: bool) -> Option<log::LevelFilter> {
    if verbose || rust_log_set {
        return None;
    }
    config
        .log_level
        .as_deref()
        .and_then(|l| l.parse::<log::LevelFilter>().ok())
}

fn apply_config_log_level(config: &Config, verbose: bool) {
    let rust_log_set = std::env::var_os("RUST_LOG").is_some();
    let Some(level) = config_log_level(config, verbose, rust_log_set) else {
        return;
    };
    // The logger filter was fixed at init, so the level can only be lowered here.
    if level < log::max_level() {
        log::set_max_level(level);
    }
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        Commands::Run {
            topic_or_url,
            target,
            max_iterations,
            evaluator,
            json,
        } => {
            let max_iterations = max_iterations.unwrap_or(i64::from(config.refine.max_iterations));
            handle_run_command(config, RunInput::new(topic_or_url, target, max_iterations), *evaluator, *json).await
        }
        Commands::Analyze {
            text,
            file,
            dimensions,
            json,
        } => handle_analyze_command(config, text.as_deref(), file.as_deref(), dimensions, *json),
        Commands::Fetch { url, sections, json } => handle_fetch_command(config, url, sections, *json).await,
        Commands::Profiles => handle_profiles_command(config),
    }
}

async fn handle_run_command(config: &Config, input: RunInput, evaluator: EvaluatorKind, json: bool) -> Result<()> {
    info!("Running pipeline for {:?} (target: {})", input.topic_or_url, input.target_identifier);

    let generator: Arc<dyn TextGenerator> =
        Arc::new(AnthropicGenerator::new(&config.llm).context("Failed to create text generator")?);
    let evaluator: Arc<dyn RuleEvaluator> = match evaluator {
        EvaluatorKind::Judge => Arc::new(JudgeRuleEvaluator::new(generator.clone())),
        EvaluatorKind::Heuristic => Arc::new(HeuristicRuleEvaluator::new(AnalysisEngine::with_settings(
            config.analysis.clone(),
        ))),
    };
    let pipeline = Pipeline::from_config(config, generator, evaluator).context("Failed to build pipeline")?;

    println!("{} {}", "Refining:".cyan(), input.topic_or_url);
    let result = pipeline.run(input).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_run_result(&result);
    }

    match &result.error {
        Some(error) => eyre::bail!("Run failed ({}): {}", error.kind, error.message),
        None => Ok(()),
    }
}

fn print_run_result(result: &PipelineResult) {
    if let Some(document) = &result.document {
        println!(
            "{} {} ({}, {} words)",
            "Source:".green(),
            document.title,
            document.source_method,
            document.word_count()
        );
    }

    for record in &result.history {
        let status = if record.verdict.meets_requirements {
            "pass".green()
        } else {
            "fail".red()
        };
        println!("  check {} [{}]", record.iteration, status);
        if let Some(feedback) = &record.verdict.feedback {
            for line in feedback.lines() {
                println!("    {}", line.dimmed());
            }
        }
    }

    match &result.error {
        Some(error) => {
            println!("{} {}", "Error:".red(), error.message);
            if let Some(draft) = &result.partial_draft {
                println!("\n{}\n{}", "Last draft:".yellow(), draft);
            }
        }
        None => {
            let verdict = if result.meets_requirements {
                "meets requirements".green()
            } else {
                "budget exhausted, requirements not met".yellow()
            };
            println!("{} {} after {} refinement(s)", "Result:".cyan(), verdict, result.iterations_used);
            if let Some(draft) = &result.final_draft {
                println!("\n{}", draft);
            }
            if let Some(report) = &result.report {
                println!();
                print_analysis(report);
            }
        }
    }
}

fn handle_analyze_command(
    config: &Config,
    text: Option<&str>,
    file: Option<&Path>,
    dimensions: &[String],
    json: bool,
) -> Result<()> {
    let text = match (text, file) {
        (Some(text), _) => text.to_string(),
        (None, Some(path)) => {
            fs::read_to_string(path).context(format!("Failed to read {}", path.display()))?
        }
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
            buf
        }
    };
    let mut selected = Vec::new();
    for name in dimensions {
        match Dimension::parse(name) {
            Some(dimension) => selected.push(dimension),
            None => eyre::bail!("Unknown dimension: {}", name),
        }
    }
    info!("Analyzing {} chars (dimensions: {:?})", text.len(), selected);

    let analyzer = ContentAnalyzer::from_config(config)?;
    let result = analyzer.analyze(&text, &AnalysisOptions::all().with_dimensions(selected))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_analysis(&result);
    }
    Ok(())
}

fn print_analysis(result: &AnalysisResult) {
    println!(
        "{} {} (score {:.2}, confidence {:.2})",
        "Sentiment:".cyan(),
        result.sentiment.label.as_str(),
        result.sentiment.score,
        result.sentiment.confidence
    );
    println!("{} {:.2}", "Credibility:".cyan(), result.credibility.score);
    println!("{} {:.2}", "Bias:".cyan(), result.bias.score);
    if !result.key_points.is_empty() {
        println!("{}", "Key points:".cyan());
        for point in &result.key_points {
            println!("  - {}", point);
        }
    }
    if !result.facts.is_empty() {
        println!("{}", "Facts:".cyan());
        for fact in &result.facts {
            println!("  - {}", fact);
        }
    }
}

async fn handle_fetch_command(config: &Config, url: &str, sections: &[String], json: bool) -> Result<()> {
    info!("Fetching {} (sections: {:?})", url, sections);

    let analyzer = ContentAnalyzer::from_config(config)?;
    let (_, _, report) = analyzer
        .fetch_and_analyze(url, sections)
        .await
        .context(format!("Failed to fetch {}", url))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.to_markdown());
    }
    Ok(())
}

fn handle_profiles_command(config: &Config) -> Result<()> {
    let registry = config.profile_registry();
    println!("{} {}", "Profiles:".green(), registry.len());
    for profile in registry.profiles() {
        let rules = &profile.rules;
        let mut limits = Vec::new();
        if let Some(min) = rules.min_chars {
            limits.push(format!("min {} chars", min));
        }
        if let Some(max) = rules.max_chars {
            limits.push(format!("max {} chars", max));
        }
        if !rules.title_prefixes.is_empty() {
            limits.push(format!("prefixes {}", rules.title_prefixes.join("/")));
        }
        println!("  {:<20} {}", profile.name.bold(), limits.join(", ").dimmed());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging first
    setup_logging(cli.is_verbose()).context("Failed to setup logging")?;

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    apply_config_log_level(&config, cli.is_verbose());

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_wins_over_config_level() {
        let config = Config::default();
        assert_eq!(config_log_level(&config, true, false), None);
        assert_eq!(config_log_level(&config, false, false), Some(log::LevelFilter::Info));
    }

    #[test]
    fn test_rust_log_wins_over_config_level() {
        let config = Config {
            log_level: Some("warn".to_string()),
            ..Config::default()
        };
        assert_eq!(config_log_level(&config, false, true), None);
        assert_eq!(config_log_level(&config, false, false), Some(log::LevelFilter::Warn));
    }

    #[test]
    fn test_verbose_keeps_debug_after_default_config() {
        log::set_max_level(log::LevelFilter::Debug);
        apply_config_log_level(&Config::default(), true);
        assert_eq!(log::max_level(), log::LevelFilter::Debug);
    }
}
