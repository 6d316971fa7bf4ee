//! `<title>` extraction from HTML text.

use crate::unescape::unescape_html;
use once_cell::sync::Lazy;
use regex::Regex;

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title(?:\s[^>]*)?>(.*?)</title\s*>").expect("title regex"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag regex"));
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));
static CTRL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?: *\p{Cc})+ *").expect("control char regex"));

/// Returns the cleaned text of the first `<title>` element, if any.
///
/// Markup left inside the element is dropped, whitespace runs collapse to a
/// single space, and character references are decoded last. Control
/// characters produced by decoding (`&#10;`, `&NewLine;`) become a single
/// space so the title always fits on one line.
pub fn extract_title(html: &str) -> Option<String> {
    let raw = TITLE_RE.captures(html)?.get(1)?.as_str();
    let stripped = TAG_RE.replace_all(raw, "");
    let collapsed = WS_RE.replace_all(&stripped, " ");
    let unescaped = unescape_html(collapsed.trim());
    let single_line = CTRL_RE.replace_all(&unescaped, " ");
    Some(single_line.trim().to_string())
}
