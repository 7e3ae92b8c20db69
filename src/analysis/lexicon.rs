//! Fixed word lists and weights used by the scorers.
//!
//! Everything is lowercase and matched against whole tokens or whole-word
//! phrases (see `TokenText`).

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Positive polarity terms and their weights in (0, 1].
const POSITIVE: &[(&str, f64)] = &[
    ("good", 0.5),
    ("great", 0.7),
    ("excellent", 0.9),
    ("positive", 0.5),
    ("success", 0.7),
    ("successful", 0.7),
    ("achievement", 0.6),
    ("breakthrough", 0.8),
    ("improvement", 0.6),
    ("improved", 0.5),
    ("progress", 0.5),
    ("beneficial", 0.6),
    ("benefit", 0.4),
    ("advantage", 0.4),
    ("victory", 0.7),
    ("triumph", 0.8),
    ("outstanding", 0.9),
    ("remarkable", 0.7),
    ("impressive", 0.7),
    ("effective", 0.5),
    ("efficient", 0.5),
    ("innovative", 0.6),
    ("promising", 0.6),
    ("encouraging", 0.6),
    ("optimistic", 0.6),
    ("thriving", 0.7),
    ("flourishing", 0.7),
    ("helpful", 0.5),
    ("love", 0.8),
    ("happy", 0.7),
    ("win", 0.5),
    ("gain", 0.4),
    ("growth", 0.3),
    ("recovery", 0.4),
];

/// Negative polarity terms and their weights in (0, 1].
const NEGATIVE: &[(&str, f64)] = &[
    ("bad", 0.5),
    ("terrible", 0.9),
    ("negative", 0.5),
    ("failure", 0.7),
    ("failed", 0.6),
    ("problem", 0.4),
    ("issue", 0.3),
    ("crisis", 0.8),
    ("decline", 0.5),
    ("harmful", 0.7),
    ("disadvantage", 0.4),
    ("concern", 0.4),
    ("worry", 0.5),
    ("alarming", 0.7),
    ("devastating", 0.9),
    ("tragic", 0.9),
    ("catastrophic", 1.0),
    ("disappointing", 0.6),
    ("concerning", 0.5),
    ("troubling", 0.6),
    ("disturbing", 0.7),
    ("challenging", 0.3),
    ("difficult", 0.4),
    ("struggling", 0.5),
    ("loss", 0.5),
    ("losses", 0.5),
    ("hate", 0.8),
    ("angry", 0.7),
    ("death", 0.7),
    ("deaths", 0.7),
    ("danger", 0.6),
    ("dangerous", 0.6),
    ("risk", 0.3),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "without", "hardly", "don't", "doesn't", "didn't", "isn't", "wasn't",
    "aren't", "won't", "can't", "cannot",
];

/// Emotionally charged terms; presence suggests slanted writing.
pub const CHARGED: &[&str] = &[
    "outrageous",
    "ridiculous",
    "absurd",
    "shocking",
    "devastating",
    "brilliant",
    "amazing",
    "terrible",
    "horrible",
    "wonderful",
    "disgraceful",
    "insane",
    "unbelievable",
    "disaster",
    "scandal",
    "heroic",
    "evil",
    "pathetic",
    "stunning",
    "catastrophic",
];

/// Connectors that introduce a contrasting or opposing viewpoint.
pub const BALANCE_CONNECTORS: &[&str] = &[
    "however",
    "though",
    "although",
    "but",
    "on the other hand",
    "alternatively",
    "critics argue",
    "critics say",
    "supporters claim",
    "supporters say",
    "some dispute",
    "others argue",
    "both sides",
    "different perspectives",
    "in contrast",
    "nevertheless",
    "whereas",
];

pub const POLITICAL: &[&str] = &[
    "liberal",
    "liberals",
    "conservative",
    "conservatives",
    "left-wing",
    "right-wing",
    "progressive",
    "progressives",
    "traditionalist",
    "democrat",
    "democrats",
    "republican",
    "republicans",
    "socialist",
    "leftist",
    "far-right",
    "far-left",
    "partisan",
];

/// Verbs and phrases that introduce a claim.
pub const CLAIM_VERBS: &[&str] = &[
    "report",
    "reports",
    "reported",
    "found",
    "finds",
    "show",
    "shows",
    "showed",
    "increase",
    "increased",
    "decrease",
    "decreased",
    "rose",
    "fell",
    "estimate",
    "estimated",
    "according to",
    "announced",
    "revealed",
    "indicates",
    "confirmed",
];

/// Phrases that flag a sentence as a key statement.
pub const KEY_INDICATORS: &[&str] = &[
    "according to",
    "reported that",
    "announced",
    "revealed",
    "discovered",
    "found that",
    "concluded",
    "stated that",
    "research shows",
    "study found",
    "data indicates",
    "experts say",
    "officials confirmed",
    "investigation reveals",
    "sources indicate",
    "poll shows",
    "survey results",
];

pub const EXPERT_TERMS: &[&str] = &[
    "expert",
    "experts",
    "professor",
    "researcher",
    "researchers",
    "scientist",
    "scientists",
    "analyst",
    "analysts",
    "economist",
    "economists",
    "doctor",
    "doctors",
    "dr",
    "official",
    "officials",
    "spokesperson",
    "spokesman",
    "spokeswoman",
];

pub const ATTRIBUTION_VERBS: &[&str] = &["said", "says", "stated", "told", "commented", "explained", "added", "wrote"];

pub const CITATION_PHRASES: &[&str] = &[
    "according to",
    "study by",
    "research from",
    "report by",
    "published in",
    "source",
    "sources",
    "cited",
    "journal",
    "data from",
];

pub const HEDGES: &[&str] = &[
    "allegedly",
    "reportedly",
    "rumor",
    "rumour",
    "rumored",
    "unconfirmed",
    "speculation",
    "might",
    "perhaps",
    "possibly",
    "apparently",
    "supposedly",
    "unnamed source",
    "anonymous source",
    "could be",
    "may be",
];

const STOPWORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "also", "among", "because", "been", "before", "being", "below",
    "between", "both", "cannot", "could", "does", "doing", "down", "during", "each", "even", "every", "from",
    "further", "have", "having", "here", "into", "just", "like", "many", "more", "most", "much", "must", "only",
    "other", "over", "said", "same", "says", "should", "some", "such", "than", "that", "their", "them", "then",
    "there", "these", "they", "this", "those", "through", "under", "until", "very", "were", "what", "when", "where",
    "which", "while", "will", "with", "would", "your", "yours", "year", "years", "still", "well", "make", "made",
];

static POLARITY: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    POSITIVE
        .iter()
        .map(|(w, s)| (*w, *s))
        .chain(NEGATIVE.iter().map(|(w, s)| (*w, -*s)))
        .collect()
});

static STOPWORD_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| STOPWORDS.iter().copied().collect());

/// Signed polarity weight of a token, if it is in the lexicon.
pub fn polarity(token: &str) -> Option<f64> {
    POLARITY.get(token).copied()
}

pub fn is_negation(token: &str) -> bool {
    NEGATIONS.contains(&token)
}

pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}
