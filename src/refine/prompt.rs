//! Prompt construction for drafting, refining and checking.
//!
//! A `PromptContext` carries everything one generator call needs. Rendering
//! is plain string building; the same context always renders identically.

use super::profile::TargetProfile;

/// Exact response a checker gives when a draft is acceptable.
pub const COMPLETION_PHRASE: &str = "POST_OK";

/// Prefix of each actionable item in a checker response.
pub const FEEDBACK_PREFIX: &str = "Feedback:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// First draft from the topic and source material
    Draft,
    /// Apply checker feedback to an existing draft
    Refine,
    /// Judge a draft against a profile
    Check,
}

impl PromptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptKind::Draft => "draft",
            PromptKind::Refine => "refine",
            PromptKind::Check => "check",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PromptContext {
    pub kind: PromptKind,
    pub topic: String,
    pub profile: TargetProfile,
    /// Excerpt of the fetched source document, if any
    pub source_excerpt: Option<String>,
    pub draft: Option<String>,
    /// Feedback from failed checks as (iteration, text), most recent first
    pub feedback: Vec<(u32, String)>,
}

impl PromptContext {
    pub fn draft(topic: impl Into<String>, profile: TargetProfile, source_excerpt: Option<String>) -> Self {
        Self {
            kind: PromptKind::Draft,
            topic: topic.into(),
            profile,
            source_excerpt,
            draft: None,
            feedback: Vec::new(),
        }
    }

    pub fn refine(
        topic: impl Into<String>,
        profile: TargetProfile,
        draft: impl Into<String>,
        feedback: Vec<(u32, String)>,
    ) -> Self {
        Self {
            kind: PromptKind::Refine,
            topic: topic.into(),
            profile,
            source_excerpt: None,
            draft: Some(draft.into()),
            feedback,
        }
    }

    pub fn check(profile: TargetProfile, draft: impl Into<String>) -> Self {
        Self {
            kind: PromptKind::Check,
            topic: String::new(),
            profile,
            source_excerpt: None,
            draft: Some(draft.into()),
            feedback: Vec::new(),
        }
    }

    pub fn system_prompt(&self) -> String {
        match self.kind {
            PromptKind::Draft => format!("You are a content creator writing posts for {}.", self.profile.name),
            PromptKind::Refine => "You are a content refinement assistant. You apply review feedback precisely.".to_string(),
            PromptKind::Check => format!(
                "You are a meticulous quality assurance reviewer for {}. You give exact verdicts.",
                self.profile.name
            ),
        }
    }

    /// Render the user prompt.
    pub fn render(&self) -> String {
        match self.kind {
            PromptKind::Draft => self.render_draft(),
            PromptKind::Refine => self.render_refine(),
            PromptKind::Check => self.render_check(),
        }
    }

    fn render_draft(&self) -> String {
        let mut prompt = String::new();
        prompt.push_str(&format!("Topic or URL: {}\n", self.topic));
        prompt.push_str(&format!("Target: {}\n\n", self.profile.name));
        self.push_guidelines(&mut prompt);

        if let Some(excerpt) = &self.source_excerpt {
            prompt.push_str("## Source Material\n\n---\n");
            prompt.push_str(excerpt);
            prompt.push_str("\n---\n\n");
        }

        prompt.push_str("## Task\n\n");
        prompt.push_str("Write a first draft of a post (title and body) about the topic");
        if self.source_excerpt.is_some() {
            prompt.push_str(", grounded in the source material");
        }
        prompt.push_str(". Follow the guidelines where they are given; otherwise write a general, high-quality post.\n\n");
        push_output_format(&mut prompt);
        prompt
    }

    fn render_refine(&self) -> String {
        let mut prompt = String::new();
        prompt.push_str(&format!("Target: {}\n\n", self.profile.name));
        prompt.push_str("## Current Draft\n\n---\n");
        prompt.push_str(self.draft.as_deref().unwrap_or_default());
        prompt.push_str("\n---\n\n");

        prompt.push_str("## Feedback\n\n");
        if self.feedback.is_empty() {
            prompt.push_str("(none)\n\n");
        } else {
            prompt.push_str(&format_feedback(&self.feedback));
            prompt.push('\n');
        }

        prompt.push_str("## Task\n\n");
        prompt.push_str("Apply ALL of the latest feedback to the current draft. Earlier feedback shows what was already asked; do not regress on it.\n\n");
        push_output_format(&mut prompt);
        prompt
    }

    fn render_check(&self) -> String {
        let mut prompt = String::new();
        prompt.push_str("## Current Draft\n\n---\n");
        prompt.push_str(self.draft.as_deref().unwrap_or_default());
        prompt.push_str("\n---\n\n");
        self.push_guidelines(&mut prompt);

        prompt.push_str("## Task\n\n");
        if self.profile.rules_and_tone.trim().is_empty() {
            prompt.push_str("Perform a general check: clear title and body, reasonable length, no spam, basic formatting.\n\n");
        } else {
            prompt.push_str("Check rule adherence, tone and style, relevance to the target, and readability.\n\n");
        }

        prompt.push_str("## Your Response\n\n");
        prompt.push_str(&format!(
            "If the draft is suitable, respond with exactly: {}\n",
            COMPLETION_PHRASE
        ));
        prompt.push_str(&format!(
            "Otherwise give concise, actionable feedback, one item per line, each prefixed with \"{} \".\n",
            FEEDBACK_PREFIX
        ));
        prompt.push_str("Output only the feedback or the exact phrase.");
        prompt
    }

    fn push_guidelines(&self, prompt: &mut String) {
        if !self.profile.rules_and_tone.trim().is_empty() {
            prompt.push_str("## Guidelines\n\n");
            prompt.push_str(self.profile.rules_and_tone.trim());
            prompt.push_str("\n\n");
        }
        if !self.profile.good_examples.is_empty() {
            prompt.push_str("## Examples of Good Posts\n\n");
            for example in &self.profile.good_examples {
                prompt.push_str(example);
                prompt.push_str("\n\n");
            }
        }
    }
}

fn push_output_format(prompt: &mut String) {
    prompt.push_str("Output only the draft, in the format:\n");
    prompt.push_str("Title: <title>\nBody: <body>\n");
}

/// Render feedback rounds, most recent first.
pub fn format_feedback(feedback: &[(u32, String)]) -> String {
    let mut out = String::new();
    for (i, (iteration, text)) in feedback.iter().enumerate() {
        let label = if i == 0 { "latest" } else { "earlier" };
        out.push_str(&format!("### Round {} ({})\n\n{}\n\n", iteration, label, text.trim()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> TargetProfile {
        TargetProfile::new("r/python")
            .with_rules_and_tone("Technical Python discussion.")
            .with_examples(["Title: Example\nBody: Example body"])
    }

    #[test]
    fn test_draft_prompt() {
        let ctx = PromptContext::draft("asyncio tips", profile(), Some("Source text here.".to_string()));
        let prompt = ctx.render();
        assert!(prompt.contains("asyncio tips"));
        assert!(prompt.contains("Technical Python discussion."));
        assert!(prompt.contains("Title: Example"));
        assert!(prompt.contains("Source text here."));
        assert!(prompt.contains("grounded in the source material"));
        assert!(ctx.system_prompt().contains("r/python"));
    }

    #[test]
    fn test_draft_prompt_without_source() {
        let prompt = PromptContext::draft("asyncio tips", profile(), None).render();
        assert!(!prompt.contains("Source Material"));
    }

    #[test]
    fn test_refine_prompt_orders_feedback() {
        let feedback = vec![(1, "Feedback: add code".to_string()), (0, "Feedback: too short".to_string())];
        let prompt = PromptContext::refine("t", profile(), "Title: A\nBody: B", feedback).render();
        let latest = prompt.find("Feedback: add code").unwrap();
        let earlier = prompt.find("Feedback: too short").unwrap();
        assert!(latest < earlier);
        assert!(prompt.contains("Round 1 (latest)"));
        assert!(prompt.contains("Body: B"));
    }

    #[test]
    fn test_check_prompt_mentions_protocol() {
        let prompt = PromptContext::check(profile(), "Title: A\nBody: B").render();
        assert!(prompt.contains(COMPLETION_PHRASE));
        assert!(prompt.contains(FEEDBACK_PREFIX));
        assert!(prompt.contains("Body: B"));
    }

    #[test]
    fn test_check_prompt_without_guidelines() {
        let prompt = PromptContext::check(TargetProfile::new("default"), "x").render();
        assert!(prompt.contains("general check"));
        assert!(!prompt.contains("## Guidelines"));
    }
}
