//! Sentence splitting, tokenizing and phrase matching shared by all scorers.

use std::collections::{BTreeMap, BTreeSet};

use super::lexicon;

/// Split text into trimmed sentences.
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace (or the end of
/// the text), so decimals such as `4.5` and domains stay intact. Newlines that
/// separate paragraphs also end a sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        let boundary = match c {
            '.' | '!' | '?' => chars.peek().is_none_or(|(_, next)| next.is_whitespace()),
            '\n' => chars.peek().is_some_and(|(_, next)| *next == '\n'),
            _ => false,
        };
        if boundary {
            let end = idx + c.len_utf8();
            push_sentence(&mut sentences, &text[start..end]);
            start = end;
        }
    }
    push_sentence(&mut sentences, &text[start..]);
    sentences
}

fn push_sentence<'a>(sentences: &mut Vec<&'a str>, candidate: &'a str) {
    let trimmed = candidate.trim();
    if trimmed.chars().any(char::is_alphanumeric) {
        sentences.push(trimmed);
    }
}

/// Lowercased word tokens. Keeps inner apostrophes and hyphens
/// (`don't`, `right-wing`) and digits.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '-'))
        .map(|t| t.trim_matches(|c: char| c == '\'' || c == '-'))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

/// A lowercased, space-padded token stream for whole-word phrase lookups.
#[derive(Debug, Clone)]
pub struct TokenText {
    tokens: Vec<String>,
    padded: String,
}

impl TokenText {
    pub fn new(text: &str) -> Self {
        let tokens = tokenize(text);
        let padded = format!(" {} ", tokens.join(" "));
        Self { tokens, padded }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Occurrences of a whole-word phrase (`"according to"`).
    pub fn count_phrase(&self, phrase: &str) -> usize {
        let needle = format!(" {} ", phrase);
        let mut count = 0;
        let mut from = 0;
        while let Some(pos) = self.padded[from..].find(&needle) {
            count += 1;
            // Step past the leading space only, so adjacent matches still share a separator.
            from += pos + needle.len() - 1;
        }
        count
    }

    pub fn contains_phrase(&self, phrase: &str) -> bool {
        self.padded.contains(&format!(" {} ", phrase))
    }

    /// Total occurrences of every phrase in the list.
    pub fn count_any(&self, phrases: &[&str]) -> usize {
        phrases.iter().map(|p| self.count_phrase(p)).sum()
    }
}

/// The most frequent content words, ties broken alphabetically.
pub fn top_keywords(text: &str, limit: usize) -> BTreeSet<String> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for token in tokenize(text) {
        if token.chars().count() < 4 || lexicon::is_stopword(&token) || token.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        *counts.entry(token).or_default() += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.into_iter().take(limit).map(|(word, _)| word).collect()
}

/// Saturating map from a count to [0, 1): 0 → 0, 1 → 0.5, 2 → 0.75, ...
pub fn saturate(count: usize) -> f64 {
    1.0 - 0.5_f64.powi(count.min(64) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences_basic() {
        let sentences = split_sentences("First one. Second one! Third one? ");
        assert_eq!(sentences, vec!["First one.", "Second one!", "Third one?"]);
    }

    #[test]
    fn test_split_sentences_keeps_decimals() {
        let sentences = split_sentences("Growth hit 4.5 percent. Rates fell.");
        assert_eq!(sentences, vec!["Growth hit 4.5 percent.", "Rates fell."]);
    }

    #[test]
    fn test_split_sentences_paragraphs() {
        let sentences = split_sentences("Heading without stop\n\nBody text here.");
        assert_eq!(sentences, vec!["Heading without stop", "Body text here."]);
    }

    #[test]
    fn test_split_sentences_degenerate() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ... !!! ").is_empty());
    }

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("Don't PANIC: the right-wing 45% rise -- 'quoted'");
        assert_eq!(tokens, vec!["don't", "panic", "the", "right-wing", "45", "rise", "quoted"]);
    }

    #[test]
    fn test_count_phrase_whole_words() {
        let text = TokenText::new("According to the data, and according to critics, accordingly.");
        assert_eq!(text.count_phrase("according to"), 2);
        assert!(!text.contains_phrase("accord"));
        assert_eq!(text.count_any(&["according to", "data"]), 3);
    }

    #[test]
    fn test_count_phrase_adjacent_repeats() {
        let text = TokenText::new("very very very");
        assert_eq!(text.count_phrase("very"), 3);
    }

    #[test]
    fn test_top_keywords_skips_stopwords() {
        let keywords = top_keywords("Vaccine trial results. The vaccine trial was large. Vaccine!", 2);
        let keywords: Vec<_> = keywords.into_iter().collect();
        assert_eq!(keywords, vec!["trial", "vaccine"]);
    }

    #[test]
    fn test_saturate() {
        assert_eq!(saturate(0), 0.0);
        assert_eq!(saturate(1), 0.5);
        assert_eq!(saturate(2), 0.75);
        assert!(saturate(1000) <= 1.0);
    }
}
