//! HTML/XML character reference decoding for extracted text.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

static ENTITY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"&#?\w+;?").expect("entity regex"));

/// Replaces numeric (`&#65;`, `&#x42;`) and named (`&amp;`) references.
///
/// Numeric references that do not form a valid code point and names missing
/// from the HTML entity table are left untouched.
pub fn unescape_html(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    ENTITY_RE.replace_all(text, |caps: &Captures| decode_reference(&caps[0]))
}

fn decode_reference(token: &str) -> String {
    if let Some(num) = token.strip_prefix("&#") {
        let num = num.strip_suffix(';').unwrap_or(num);
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => num.parse::<u32>().ok(),
        };
        return code
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| token.to_string());
    }
    if !token.ends_with(';') {
        return token.to_string();
    }
    html_escape::decode_html_entities(token).into_owned()
}
