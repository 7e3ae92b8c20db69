//! Extraction strategies, tried in priority order by the fetcher.
//!
//! Each strategy turns raw markup into text plus whatever metadata it can
//! find. Strategies are pure: the fetcher owns the network request and the
//! length check, so a strategy only answers "what is the article here?".

use chrono::{DateTime, NaiveDate, Utc};
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::BTreeSet;

use crate::domain::SourceMethod;

/// Elements whose text is never article content.
const SKIP_TAGS: &[&str] = &[
    "script", "style", "noscript", "nav", "header", "footer", "aside", "form", "iframe", "svg", "button",
];

const ARTICLE_BODY_SELECTORS: &[&str] = &[
    "[itemprop=\"articleBody\"]",
    "article",
    ".article-body",
    ".article-content",
    ".story-body",
    ".entry-content",
    ".post-content",
    "main article",
];

const AUTHOR_SELECTORS: &[&str] = &["[rel=\"author\"]", ".byline", ".author-name", "[itemprop=\"author\"]"];

const CONTAINER_SELECTORS: &[&str] = &["main", "article", "section", "div", "td"];

/// What a strategy pulled out of a page, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub title: String,
    pub body: String,
    pub authors: Vec<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub keywords: BTreeSet<String>,
}

pub trait ExtractionStrategy: Send + Sync {
    fn method(&self) -> SourceMethod;

    /// None when the strategy finds nothing it recognizes.
    fn extract(&self, html: &str) -> Option<Extraction>;
}

/// The built-in chain: primary extractor, secondary parser, raw fetch.
pub fn default_strategies() -> Vec<Box<dyn ExtractionStrategy>> {
    vec![
        Box::new(ArticleExtractor),
        Box::new(MarkupParser),
        Box::new(RawTextExtractor::default()),
    ]
}

/// Structured article extraction: semantic body selectors plus page metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleExtractor;

impl ExtractionStrategy for ArticleExtractor {
    fn method(&self) -> SourceMethod {
        SourceMethod::PrimaryExtractor
    }

    fn extract(&self, html: &str) -> Option<Extraction> {
        let document = Html::parse_document(html);

        let body = ARTICLE_BODY_SELECTORS.iter().find_map(|selector| {
            let Ok(sel) = Selector::parse(selector) else {
                return None;
            };
            document
                .select(&sel)
                .map(paragraph_text)
                .max_by_key(|text| text.len())
                .filter(|text| !text.is_empty())
        })?;

        let title = meta_content(&document, "meta[property=\"og:title\"]")
            .or_else(|| first_text(&document, "h1"))
            .or_else(|| first_text(&document, "title"))
            .unwrap_or_default();

        Some(Extraction {
            title,
            body,
            authors: authors(&document),
            published_at: published_at(&document),
            keywords: keywords(&document),
        })
    }
}

/// Generic markup heuristics: the container with the most paragraph text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupParser;

impl ExtractionStrategy for MarkupParser {
    fn method(&self) -> SourceMethod {
        SourceMethod::SecondaryParser
    }

    fn extract(&self, html: &str) -> Option<Extraction> {
        let document = Html::parse_document(html);

        let mut best = String::new();
        for selector in CONTAINER_SELECTORS {
            let Ok(sel) = Selector::parse(selector) else {
                continue;
            };
            for container in document.select(&sel) {
                if is_skipped(container) {
                    continue;
                }
                let text = direct_paragraphs(container);
                if text.len() > best.len() {
                    best = text;
                }
            }
        }

        if best.is_empty() {
            let Ok(p) = Selector::parse("p") else {
                return None;
            };
            best = join_paragraphs(document.select(&p).filter(|el| !is_skipped(*el)));
        }
        if best.is_empty() {
            return None;
        }

        let title = first_text(&document, "title")
            .or_else(|| first_text(&document, "h1"))
            .unwrap_or_default();

        Some(Extraction {
            title,
            body: best,
            ..Default::default()
        })
    }
}

/// Strip all markup to plain text. No metadata.
#[derive(Debug, Clone, Copy)]
pub struct RawTextExtractor {
    width: usize,
}

impl Default for RawTextExtractor {
    fn default() -> Self {
        Self { width: 120 }
    }
}

impl ExtractionStrategy for RawTextExtractor {
    fn method(&self) -> SourceMethod {
        SourceMethod::RawFetch
    }

    fn extract(&self, html: &str) -> Option<Extraction> {
        let text = html2text::from_read(html.as_bytes(), self.width).unwrap_or_default();
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Extraction {
            body: text.to_string(),
            ..Default::default()
        })
    }
}

fn is_skipped(el: ElementRef<'_>) -> bool {
    el.ancestors()
        .chain(std::iter::once(*el))
        .filter_map(ElementRef::wrap)
        .any(|e| SKIP_TAGS.contains(&e.value().name()))
}

/// Visible text of an element, skipping non-content descendants.
fn visible_text(el: ElementRef<'_>) -> String {
    fn walk(el: ElementRef<'_>, out: &mut String) {
        for child in el.children() {
            match child.value() {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => {
                    if SKIP_TAGS.contains(&element.name()) {
                        continue;
                    }
                    if let Some(child_el) = ElementRef::wrap(child) {
                        out.push(' ');
                        walk(child_el, out);
                        out.push(' ');
                    }
                }
                _ => {}
            }
        }
    }

    let mut out = String::new();
    walk(el, &mut out);
    compact_ws(&out)
}

fn compact_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn join_paragraphs<'a>(paragraphs: impl Iterator<Item = ElementRef<'a>>) -> String {
    paragraphs
        .map(visible_text)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Paragraph text inside an element, or all of its visible text if it has no `<p>`.
fn paragraph_text(el: ElementRef<'_>) -> String {
    let text = match Selector::parse("p") {
        Ok(p) => join_paragraphs(el.select(&p)),
        Err(_) => String::new(),
    };
    if text.is_empty() { visible_text(el) } else { text }
}

fn direct_paragraphs(el: ElementRef<'_>) -> String {
    join_paragraphs(
        el.children()
            .filter_map(ElementRef::wrap)
            .filter(|child| child.value().name() == "p"),
    )
}

fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    document
        .select(&sel)
        .filter_map(|el| el.value().attr("content"))
        .map(str::trim)
        .find(|c| !c.is_empty())
        .map(str::to_string)
}

fn first_text(document: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    document
        .select(&sel)
        .map(visible_text)
        .find(|t| !t.is_empty())
}

fn authors(document: &Html) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let mut push = |raw: &str| {
        let name = compact_ws(raw);
        let name = name
            .strip_prefix("By ")
            .or_else(|| name.strip_prefix("by "))
            .unwrap_or(&name)
            .trim()
            .to_string();
        if !name.is_empty() && !found.contains(&name) {
            found.push(name);
        }
    };

    for selector in ["meta[name=\"author\"]", "meta[property=\"article:author\"]"] {
        if let Ok(sel) = Selector::parse(selector) {
            for el in document.select(&sel) {
                if let Some(content) = el.value().attr("content") {
                    push(content);
                }
            }
        }
    }
    for selector in AUTHOR_SELECTORS {
        if let Ok(sel) = Selector::parse(selector) {
            for el in document.select(&sel) {
                push(&visible_text(el));
            }
        }
    }
    found
}

fn published_at(document: &Html) -> Option<DateTime<Utc>> {
    meta_content(document, "meta[property=\"article:published_time\"]")
        .or_else(|| meta_content(document, "meta[name=\"date\"]"))
        .or_else(|| {
            let sel = Selector::parse("time[datetime]").ok()?;
            document
                .select(&sel)
                .find_map(|el| el.value().attr("datetime").map(str::to_string))
        })
        .and_then(|raw| parse_date(&raw))
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d").ok()?;
    date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc())
}

fn keywords(document: &Html) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    if let Some(content) = meta_content(document, "meta[name=\"keywords\"]") {
        out.extend(content.split(',').map(|k| k.trim().to_lowercase()));
    }
    if let Ok(sel) = Selector::parse("meta[property=\"article:tag\"]") {
        for el in document.select(&sel) {
            if let Some(tag) = el.value().attr("content") {
                out.insert(tag.trim().to_lowercase());
            }
        }
    }
    out.retain(|k| !k.is_empty());
    out
}
