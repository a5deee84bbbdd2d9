//! Signal Extractor — best-effort business signals from raw HTML.
//!
//! Every heuristic is a tolerant regex pass over the markup and is exposed as
//! its own pure function. Nothing here fails: a missing signal is an empty
//! string, and callers read empty as "unknown".
//!
//! Fallback chains are ordered tables (`TITLE_DELIMITERS`, `COMPANY_NAME_SOURCES`),
//! first non-empty match wins.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::email::ScrapeResult;

pub const MAX_HEADINGS: usize = 10;
pub const BODY_TEXT_LIMIT: usize = 2000;
pub const ABOUT_TEXT_LIMIT: usize = 1000;
pub const INDUSTRY_SIGNALS_LIMIT: usize = 500;
pub const RAW_TEXT_LIMIT: usize = 2000;
/// Headings used as a description when the page has no meta description.
const DESCRIPTION_HEADINGS: usize = 3;

/// Blocks removed wholesale (content included) from the home page.
pub const PAGE_STRIP_TAGS: &[&str] = &["script", "style", "nav", "footer", "header"];
/// About pages keep their `<header>`; it often carries the mission statement.
pub const ABOUT_STRIP_TAGS: &[&str] = &["script", "style", "nav", "footer"];

/// Title delimiters in priority order. The first one present splits the title.
pub const TITLE_DELIMITERS: &[&str] = &[" | ", " - ", " — ", " – ", " : "];

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title\s*>").expect("valid regex"));
static META_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("valid regex"));
static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)([a-z][a-z0-9:_-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid regex")
});
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h[12]\b[^>]*>(.*?)</h[12]\s*>").expect("valid regex"));
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static TITLE_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:home|welcome|official site|official website)\s*[|:\-–—]\s*")
        .expect("valid regex")
});
static BLOCK_RES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    PAGE_STRIP_TAGS
        .iter()
        .map(|&tag| {
            let pattern = format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>");
            (tag, Regex::new(&pattern).expect("valid regex"))
        })
        .collect()
});

/// Raw signals read from one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSignals {
    pub title: String,
    pub meta_description: String,
    pub site_name: String,
    pub headings: Vec<String>,
    pub body_text: String,
}

impl PageSignals {
    /// Company name via `COMPANY_NAME_SOURCES`, or empty when no source yields one.
    pub fn company_name(&self) -> String {
        COMPANY_NAME_SOURCES
            .iter()
            .find_map(|(_, source)| source(self))
            .unwrap_or_default()
    }
}

type NameSource = fn(&PageSignals) -> Option<String>;

/// Company-name sources in precedence order.
pub const COMPANY_NAME_SOURCES: &[(&str, NameSource)] = &[
    ("og:site_name", name_from_site_name),
    ("title", name_from_title),
    ("first heading", name_from_first_heading),
];

fn name_from_site_name(signals: &PageSignals) -> Option<String> {
    non_empty(signals.site_name.trim())
}

fn name_from_title(signals: &PageSignals) -> Option<String> {
    non_empty(&clean_title(&signals.title))
}

fn name_from_first_heading(signals: &PageSignals) -> Option<String> {
    signals.headings.first().and_then(|h| non_empty(h.trim()))
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

/// Runs every heuristic over one page.
pub fn extract(html: &str) -> PageSignals {
    PageSignals {
        title: extract_title(html),
        meta_description: extract_description(html),
        site_name: extract_site_name(html),
        headings: extract_headings(html),
        body_text: visible_text(html, PAGE_STRIP_TAGS, BODY_TEXT_LIMIT),
    }
}

pub fn extract_title(html: &str) -> String {
    TITLE_RE
        .captures(html)
        .map(|c| normalize_text(&c[1]))
        .unwrap_or_default()
}

/// `<meta name="description">`, falling back to `og:description`.
pub fn extract_description(html: &str) -> String {
    meta_content(html, "name", "description")
        .or_else(|| meta_content(html, "property", "og:description"))
        .unwrap_or_default()
}

pub fn extract_site_name(html: &str) -> String {
    meta_content(html, "property", "og:site_name").unwrap_or_default()
}

/// Text of the first `MAX_HEADINGS` non-empty `<h1>`/`<h2>` elements, in document order.
pub fn extract_headings(html: &str) -> Vec<String> {
    HEADING_RE
        .captures_iter(html)
        .map(|c| normalize_text(&TAG_RE.replace_all(&c[1], " ")))
        .filter(|text| !text.is_empty())
        .take(MAX_HEADINGS)
        .collect()
}

/// Finds the first `<meta>` whose `key` attribute equals `value` and returns its
/// non-empty `content`. Attribute order and quote style do not matter.
fn meta_content(html: &str, key: &str, value: &str) -> Option<String> {
    META_TAG_RE.find_iter(html).find_map(|tag| {
        let attributes = parse_attributes(tag.as_str());
        let is_match = attributes
            .iter()
            .any(|(name, v)| name == key && v.trim().eq_ignore_ascii_case(value));
        if !is_match {
            return None;
        }
        attributes
            .into_iter()
            .find(|(name, _)| name == "content")
            .map(|(_, content)| normalize_text(&content))
            .filter(|content| !content.is_empty())
    })
}

fn parse_attributes(tag: &str) -> Vec<(String, String)> {
    ATTRIBUTE_RE
        .captures_iter(tag)
        .map(|c| {
            let value = c.get(2).or_else(|| c.get(3)).map_or("", |m| m.as_str());
            (c[1].to_ascii_lowercase(), value.to_string())
        })
        .collect()
}

/// Strips a leading boilerplate prefix ("Home | ", "Welcome - ", ...) and keeps
/// the first non-empty segment before the highest-priority delimiter present.
pub fn clean_title(title: &str) -> String {
    let stripped = TITLE_PREFIX_RE.replace(title.trim(), "");

    for delimiter in TITLE_DELIMITERS {
        if stripped.contains(delimiter) {
            return stripped
                .split(delimiter)
                .map(str::trim)
                .find(|segment| !segment.is_empty())
                .unwrap_or_default()
                .to_string();
        }
    }

    stripped.trim().to_string()
}

/// Human-visible text: drops whole `strip_tags` blocks, strips remaining tags,
/// collapses whitespace, truncates to `limit` characters.
pub fn visible_text(html: &str, strip_tags: &[&str], limit: usize) -> String {
    let mut text = html.to_string();
    for (tag, re) in BLOCK_RES.iter() {
        if strip_tags.contains(tag) {
            text = re.replace_all(&text, " ").into_owned();
        }
    }
    let text = TAG_RE.replace_all(&text, " ");
    truncate_chars(&normalize_text(&text), limit)
}

/// Truncates on a character boundary.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

fn normalize_text(text: &str) -> String {
    let decoded = decode_entities(text);
    WHITESPACE_RE.replace_all(&decoded, " ").trim().to_string()
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Folds home-page signals and optional about-page text into a `ScrapeResult`.
pub fn build_scrape_result(signals: &PageSignals, about_text: &str) -> ScrapeResult {
    let description = if signals.meta_description.is_empty() {
        signals
            .headings
            .iter()
            .take(DESCRIPTION_HEADINGS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(". ")
    } else {
        signals.meta_description.clone()
    };

    let headings = signals.headings.join(" ");
    let combined = [
        signals.meta_description.as_str(),
        headings.as_str(),
        signals.body_text.as_str(),
        about_text,
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ");

    ScrapeResult {
        company_name: signals.company_name(),
        description,
        services: signals.headings.join(", "),
        industry_signals: truncate_chars(&combined, INDUSTRY_SIGNALS_LIMIT),
        raw_text: truncate_chars(&combined, RAW_TEXT_LIMIT),
        error: None,
    }
}
