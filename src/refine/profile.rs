//! Target profiles - declarative rule sets for publishing destinations.
//!
//! A profile pairs free-text guidance (rules and tone, example posts) that is
//! shown to the generator with concrete, checkable rules used by the
//! heuristic evaluator. Lookups never fail: unknown targets resolve to the
//! `default` entry.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_PROFILE: &str = "default";

/// Checkable constraints on a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileRules {
    pub min_chars: Option<usize>,
    pub max_chars: Option<usize>,
    /// Draft must contain a non-empty `Title:` line
    pub require_title: bool,
    /// Title must start with one of these (empty = no constraint)
    pub title_prefixes: Vec<String>,
    /// Phrases that must all appear (case-insensitive)
    pub required_phrases: Vec<String>,
    /// Phrases that must not appear (case-insensitive)
    pub forbidden_phrases: Vec<String>,
    /// Highest acceptable bias score
    pub max_bias: Option<f64>,
    /// Lowest acceptable credibility score
    pub min_credibility: Option<f64>,
}

impl Default for ProfileRules {
    fn default() -> Self {
        Self {
            min_chars: None,
            max_chars: None,
            require_title: true,
            title_prefixes: Vec::new(),
            required_phrases: Vec::new(),
            forbidden_phrases: Vec::new(),
            max_bias: None,
            min_credibility: None,
        }
    }
}

impl ProfileRules {
    /// Whether any rule needs a content analysis of the draft.
    pub fn needs_analysis(&self) -> bool {
        self.max_bias.is_some() || self.min_credibility.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetProfile {
    pub name: String,
    #[serde(default)]
    pub rules_and_tone: String,
    #[serde(default)]
    pub good_examples: Vec<String>,
    #[serde(default)]
    pub rules: ProfileRules,
}

impl TargetProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules_and_tone: String::new(),
            good_examples: Vec::new(),
            rules: ProfileRules::default(),
        }
    }

    pub fn with_rules_and_tone(mut self, text: impl Into<String>) -> Self {
        self.rules_and_tone = text.into();
        self
    }

    pub fn with_examples(mut self, examples: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.good_examples.extend(examples.into_iter().map(Into::into));
        self
    }

    pub fn with_rules(mut self, rules: ProfileRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_PROFILE
    }
}

/// Normalize a target identifier: `python`, `/python` and `r/python` are the same target.
pub fn normalize_target(identifier: &str) -> String {
    let trimmed = identifier.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(DEFAULT_PROFILE) {
        return DEFAULT_PROFILE.to_string();
    }
    let rest = strip_prefix_ignore_case(trimmed, "/r/")
        .or_else(|| strip_prefix_ignore_case(trimmed, "r/"))
        .or_else(|| trimmed.strip_prefix('/'))
        .unwrap_or(trimmed);
    format!("r/{}", rest)
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    text.get(..prefix.len())
        .filter(|head| head.eq_ignore_ascii_case(prefix))
        .map(|_| &text[prefix.len()..])
}

fn key(identifier: &str) -> String {
    normalize_target(identifier).to_lowercase()
}

#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: BTreeMap<String, TargetProfile>,
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ProfileRegistry {
    /// A registry holding only the default profile.
    pub fn empty() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(DEFAULT_PROFILE.to_string(), default_profile());
        Self { profiles }
    }

    /// The default profile plus the predefined targets.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for profile in predefined_profiles() {
            registry.insert(profile);
        }
        registry
    }

    /// Add or replace a profile. Its name is normalized.
    pub fn insert(&mut self, mut profile: TargetProfile) {
        profile.name = normalize_target(&profile.name);
        self.profiles.insert(key(&profile.name), profile);
    }

    /// Overlay profiles (e.g. from config) on top of the current table.
    pub fn merge(&mut self, profiles: impl IntoIterator<Item = TargetProfile>) {
        for profile in profiles {
            tracing::debug!(profile = %profile.name, "Registering target profile");
            self.insert(profile);
        }
    }

    pub fn get(&self, identifier: &str) -> Option<&TargetProfile> {
        self.profiles.get(&key(identifier))
    }

    /// Resolve an identifier, falling back to the default profile.
    pub fn resolve(&self, identifier: &str) -> TargetProfile {
        match self.get(identifier) {
            Some(profile) => profile.clone(),
            None => {
                tracing::info!(target_id = identifier, "Unknown target, using default profile");
                self.default_profile()
            }
        }
    }

    pub fn default_profile(&self) -> TargetProfile {
        self.profiles
            .get(DEFAULT_PROFILE)
            .cloned()
            .unwrap_or_else(default_profile)
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.values().map(|p| p.name.as_str()).collect()
    }

    pub fn profiles(&self) -> impl Iterator<Item = &TargetProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

fn default_profile() -> TargetProfile {
    TargetProfile::new(DEFAULT_PROFILE)
        .with_rules_and_tone(
            "General audience. Clear title and body, reasonable length, no spam, basic Markdown formatting.",
        )
        .with_rules(ProfileRules {
            min_chars: Some(80),
            max_chars: Some(40_000),
            ..ProfileRules::default()
        })
}

fn predefined_profiles() -> Vec<TargetProfile> {
    vec![
        TargetProfile::new("r/python")
            .with_rules_and_tone(
                "Technical programming discussions about Python. Posts should be informative, well-formatted \
                 with code blocks, and relate to Python programming. Avoid beginner questions that belong in \
                 r/learnpython. Tone is professional and helpful.",
            )
            .with_examples([
                "Title: New Python 3.12 Feature: PEP 692 - Using TypedDict for kwargs\nBody: The new kwargs syntax in Python 3.12 allows...",
                "Title: Performance comparison: List comprehensions vs Generator expressions\nBody: I benchmarked different approaches for data processing...",
            ])
            .with_rules(ProfileRules {
                min_chars: Some(200),
                max_chars: Some(40_000),
                required_phrases: vec!["python".to_string()],
                forbidden_phrases: vec!["beginner question".to_string(), "homework help".to_string()],
                ..ProfileRules::default()
            }),
        TargetProfile::new("r/MachineLearning")
            .with_rules_and_tone(
                "Research-focused ML discussions. Posts should cite papers, include technical details, and \
                 contribute meaningfully to ML discourse. Avoid basic questions. Tone is academic and rigorous.",
            )
            .with_examples([
                "Title: [R] New SOTA on ImageNet with 0.1% fewer parameters\nBody: Paper: arxiv.org/abs/... Our method achieves...",
                "Title: [D] Why attention mechanisms work better than RNNs for sequence modeling\nBody: After implementing both approaches, I noticed...",
            ])
            .with_rules(ProfileRules {
                min_chars: Some(300),
                max_chars: Some(40_000),
                title_prefixes: ["[R]", "[D]", "[P]", "[N]"].iter().map(|s| s.to_string()).collect(),
                max_bias: Some(0.5),
                min_credibility: Some(0.2),
                ..ProfileRules::default()
            }),
        TargetProfile::new("r/webdev")
            .with_rules_and_tone(
                "Web development discussions. Posts should be practical, include code examples or live demos \
                 when relevant. Mix of questions, showcases, and discussions. Tone is casual but informative.",
            )
            .with_examples([
                "Title: Built a CSS Grid generator tool - feedback welcome!\nBody: Live demo: mydemo.com After struggling with grid layouts...",
                "Title: Should I use React or Vue for my next project?\nBody: Currently deciding between frameworks for a medium-sized SaaS...",
            ])
            .with_rules(ProfileRules {
                min_chars: Some(120),
                max_chars: Some(40_000),
                max_bias: Some(0.7),
                ..ProfileRules::default()
            }),
    ]
}
