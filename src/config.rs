use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::AnalysisSettings;
use crate::fetch::FetchSettings;
use crate::llm::LlmSettings;
use crate::refine::{ProfileRegistry, RefineSettings, TargetProfile};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub fetch: FetchSettings,
    pub analysis: AnalysisSettings,
    pub refine: RefineSettings,
    pub llm: LlmSettings,
    /// Extra or overriding target profiles, merged over the built-in table
    pub profiles: Vec<TargetProfile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            fetch: FetchSettings::default(),
            analysis: AnalysisSettings::default(),
            refine: RefineSettings::default(),
            llm: LlmSettings::default(),
            profiles: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        if let Some(config_dir) = dirs::config_dir() {
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Reject settings no run could work with.
    pub fn validate(&self) -> Result<()> {
        if self.refine.max_iterations > self.refine.max_iterations_cap {
            eyre::bail!(
                "refine.max_iterations ({}) exceeds refine.max_iterations_cap ({})",
                self.refine.max_iterations,
                self.refine.max_iterations_cap
            );
        }
        if self.fetch.max_body_chars <= self.fetch.min_body_chars {
            eyre::bail!(
                "fetch.max_body_chars ({}) must be greater than fetch.min_body_chars ({})",
                self.fetch.max_body_chars,
                self.fetch.min_body_chars
            );
        }
        if self.refine.stage_timeout_ms == 0 || self.fetch.timeout_ms == 0 {
            eyre::bail!("timeouts must be greater than zero");
        }
        Ok(())
    }

    /// Built-in profiles with the configured ones merged on top.
    pub fn profile_registry(&self) -> ProfileRegistry {
        let mut registry = ProfileRegistry::builtin();
        registry.merge(self.profiles.iter().cloned());
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.refine.max_iterations, 5);
        assert_eq!(config.analysis.max_key_points, 5);
        assert!(config.validate().is_ok());
        assert_eq!(config.profile_registry().len(), 4);
    }

    #[test]
    fn test_partial_yaml_uses_section_defaults() {
        let yaml = "refine:\n  max_iterations: 2\nfetch:\n  min_body_chars: 50\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.refine.max_iterations, 2);
        assert_eq!(config.refine.max_iterations_cap, 20);
        assert_eq!(config.fetch.min_body_chars, 50);
        assert_eq!(config.fetch.max_body_chars, 3000);
        assert_eq!(config.llm, LlmSettings::default());
    }

    #[test]
    fn test_load_from_file_with_profiles() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "log_level: debug\nprofiles:\n  - name: rust\n    rules_and_tone: Systems programming.\n    rules:\n      min_chars: 10"
        )
        .unwrap();

        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        let registry = config.profile_registry();
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.resolve("r/rust").rules.min_chars, Some(10));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "refine:\n  max_iterations: 50\n  max_iterations_cap: 10").unwrap();
        assert!(Config::load(Some(&file.path().to_path_buf())).is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let path = PathBuf::from("/nonexistent/refinr.yml");
        assert!(Config::load(Some(&path)).is_err());
    }
}
