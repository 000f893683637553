//! HTML primitives for text, link, title, and sitemap extraction
//!
//! Everything here is tolerant of malformed markup: `scraper` (html5ever)
//! repairs unmatched tags instead of failing, so none of these functions
//! return errors. Text inside `<script>`, `<style>`, `<noscript>` and
//! `<template>` never reaches extracted text.

use crate::url::normalize_url;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// Maximum characters of anchor text kept per link
pub const LINK_TEXT_CHARS: usize = 200;

/// Maximum characters of a page title
pub const TITLE_CHARS: usize = 140;

const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

static LOC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<loc[^>]*>(.*?)</loc>").expect("valid loc regex"));

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("valid anchor selector"));

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("valid title selector"));

/// An anchor resolved against its page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Absolute HTTP(S) URL
    pub url: String,

    /// Stripped anchor text, at most [`LINK_TEXT_CHARS`] characters
    pub text: String,
}

/// Everything the crawler needs from one HTML document, parsed once
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// First `<title>`, stripped and truncated; empty if absent
    pub title: String,

    /// Visible text with whitespace collapsed
    pub text: String,

    /// All followable anchors
    pub links: Vec<Link>,
}

/// Parses an HTML document and extracts its title, visible text and links
///
/// # Example
///
/// ```
/// use job_scout::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Careers</title></head><body><a href="/jobs">Open roles</a></body></html>"#;
/// let base_url = Url::parse("https://acme.com/").unwrap();
/// let parsed = parse_html(html, &base_url);
/// assert_eq!(parsed.title, "Careers");
/// assert_eq!(parsed.links[0].url, "https://acme.com/jobs");
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: title_of(&document),
        text: visible_text(&document),
        links: links_of(&document, base_url),
    }
}

/// Removes script/style blocks and every tag, then collapses whitespace
pub fn strip_html(input: &str) -> String {
    let fragment = Html::parse_fragment(input);
    visible_text(&fragment)
}

/// Extracts every followable anchor, resolved against `base_url`
///
/// `javascript:`, `mailto:`, `tel:`, `data:` and fragment-only targets are
/// skipped, as is anything that does not resolve to HTTP(S).
pub fn extract_links(html: &str, base_url: &Url) -> Vec<Link> {
    let document = Html::parse_document(html);
    links_of(&document, base_url)
}

/// Returns the first `<title>` content, stripped and truncated
///
/// Empty string if the document has no title.
pub fn extract_title(html: &str) -> String {
    let document = Html::parse_document(html);
    title_of(&document)
}

/// Extracts and normalizes every `<loc>` entry of a sitemap
///
/// CDATA wrappers and entity escapes are handled; entries that do not
/// normalize are dropped.
pub fn parse_sitemap_urls(xml: &str) -> Vec<String> {
    LOC_RE
        .captures_iter(xml)
        .filter_map(|caps| {
            let raw = caps.get(1)?.as_str().trim();
            let raw = raw
                .strip_prefix("<![CDATA[")
                .and_then(|s| s.strip_suffix("]]>"))
                .unwrap_or(raw);
            normalize_url(&strip_html(raw))
        })
        .collect()
}

/// Truncates to at most `max` characters (not bytes)
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_hidden(name: &str) -> bool {
    HIDDEN_ELEMENTS.contains(&name)
}

fn visible_text(document: &Html) -> String {
    let mut out = String::new();

    for node in document.tree.root().descendants() {
        if let Node::Text(text) = node.value() {
            let hidden = node.ancestors().any(|ancestor| match ancestor.value() {
                Node::Element(element) => is_hidden(element.name()),
                _ => false,
            });
            if !hidden {
                out.push_str(text);
                out.push(' ');
            }
        }
    }

    collapse_whitespace(&out)
}

fn element_text(element: &ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

fn title_of(document: &Html) -> String {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| truncate_chars(&element_text(&element), TITLE_CHARS))
        .unwrap_or_default()
}

fn links_of(document: &Html, base_url: &Url) -> Vec<Link> {
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| {
            let href = element.value().attr("href")?;
            let url = resolve_link(href, base_url)?;
            let text = truncate_chars(&element_text(&element), LINK_TEXT_CHARS);
            Some(Link { url, text })
        })
        .collect()
}

/// Resolves a link href to an absolute URL and validates it
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
        Some(absolute_url.to_string())
    } else {
        None
    }
}
