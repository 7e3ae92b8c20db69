//! Body normalization: boilerplate removal, whitespace collapse, length cap.

use regex::Regex;
use std::sync::LazyLock;

static BOILERPLATE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)subscribe to[^.\n]*?newsletter[^.\n]*\.?",
        r"(?i)follow us on[^.\n]*?social media[^.\n]*\.?",
        r"(?i)sign up[^.\n]*?updates[^.\n]*\.?",
        r"(?i)\badvertisement\b",
        r"(?i)related articles:?",
        r"(?i)read more:",
        r"(?i)share this article",
        r"(?i)click here to[^.\n]*\.?",
        r"(?i)download our app[^.\n]*\.?",
        r"(?i)accept (all )?cookies[^.\n]*\.?",
        r"(?i)privacy policy",
        r"(?i)terms of service",
        r"(?i)copyright \d{4}[^\n]*",
        r"©[^\n]*",
        r"(?i)all rights reserved[^\n]*",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid boilerplate regex"))
    .collect()
});

static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid blank line regex"));

#[derive(Debug, Clone)]
pub struct Normalizer {
    max_chars: usize,
}

impl Normalizer {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// Clean extracted text.
    ///
    /// Paragraph breaks (blank lines) survive so sentence splitting still
    /// sees them; every other whitespace run becomes a single space.
    pub fn normalize(&self, text: &str) -> String {
        let mut cleaned = text.replace("\r\n", "\n");
        for re in BOILERPLATE.iter() {
            cleaned = re.replace_all(&cleaned, " ").into_owned();
        }

        let paragraphs: Vec<String> = BLANK_LINES
            .replace_all(&cleaned, "\n\n")
            .split("\n\n")
            .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|p| !p.is_empty())
            .collect();

        cap_chars(&paragraphs.join("\n\n"), self.max_chars)
    }
}

/// Truncate to at most `max_chars` characters without splitting a char.
pub fn cap_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].trim_end().to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        let n = Normalizer::new(1000);
        assert_eq!(n.normalize("  Hello   world\t\tagain  "), "Hello world again");
    }

    #[test]
    fn test_keeps_paragraph_breaks() {
        let n = Normalizer::new(1000);
        assert_eq!(n.normalize("First para.\n\n\n\nSecond\npara."), "First para.\n\nSecond para.");
    }

    #[test]
    fn test_strips_boilerplate() {
        let n = Normalizer::new(1000);
        let text = "The council voted yes. Subscribe to our newsletter for more. \
                    Advertisement Accept cookies to continue. Turnout was high.\n\n© 2024 Example News";
        let out = n.normalize(text);
        assert!(out.contains("The council voted yes."));
        assert!(out.contains("Turnout was high."));
        assert!(!out.to_lowercase().contains("newsletter"));
        assert!(!out.contains("Advertisement"));
        assert!(!out.contains("cookies"));
        assert!(!out.contains("©"));
    }

    #[test]
    fn test_caps_on_char_boundary() {
        let n = Normalizer::new(3);
        assert_eq!(n.normalize("héllo"), "hél");
        assert_eq!(cap_chars("日本語テキスト", 2), "日本");
        assert_eq!(cap_chars("short", 100), "short");
    }
}
