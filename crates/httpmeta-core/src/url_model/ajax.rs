//! AJAX crawling rewrite of `#!` fragments.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left as-is inside the escaped fragment; everything else except
/// ASCII alphanumerics and `-._~` is percent-encoded.
const FRAGMENT_KEEP: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'"')
    .remove(b'$')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b',')
    .remove(b'/')
    .remove(b':')
    .remove(b';')
    .remove(b'<')
    .remove(b'=')
    .remove(b'>')
    .remove(b'?')
    .remove(b'@')
    .remove(b'[')
    .remove(b'\\')
    .remove(b']')
    .remove(b'^')
    .remove(b'`')
    .remove(b'{')
    .remove(b'|')
    .remove(b'}');

const ESCAPED_FRAGMENT: &str = "_escaped_fragment_=";

/// Turns a `#!` fragment into the `_escaped_fragment_` query parameter.
///
/// `http://x.com/#!/a/b` becomes `http://x.com/?_escaped_fragment_=/a/b`; a
/// base that already has a query string is joined with `&`. URLs without
/// `#!` are returned unchanged.
pub fn normalize_ajax_url(url: &str) -> String {
    let Some(idx) = url.find("#!") else {
        return url.to_string();
    };
    let base = &url[..idx];
    let fragment = &url[idx + 2..];
    let joiner = if base.contains('?') { '&' } else { '?' };

    let mut out = String::with_capacity(url.len() + ESCAPED_FRAGMENT.len() + 1);
    out.push_str(base);
    out.push(joiner);
    out.push_str(ESCAPED_FRAGMENT);
    out.extend(utf8_percent_encode(fragment, FRAGMENT_KEEP));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashbang_without_query() {
        assert_eq!(
            normalize_ajax_url("http://example.com/#!/user/42"),
            "http://example.com/?_escaped_fragment_=/user/42"
        );
    }

    #[test]
    fn hashbang_with_existing_query() {
        assert_eq!(
            normalize_ajax_url("http://example.com/app?lang=en#!page=2"),
            "http://example.com/app?lang=en&_escaped_fragment_=page=2"
        );
    }

    #[test]
    fn fragment_special_chars_encoded() {
        assert_eq!(
            normalize_ajax_url("http://example.com/#!a b&c+d%e#f"),
            "http://example.com/?_escaped_fragment_=a%20b%26c%2Bd%25e%23f"
        );
    }

    #[test]
    fn reserved_chars_preserved() {
        let kept = "!\"$'()*,/:;<=>?@[\\]^`{|}~";
        let out = normalize_ajax_url(&format!("http://example.com/#!{kept}"));
        assert!(out.ends_with(kept), "got {out}");
    }

    #[test]
    fn no_hashbang_is_noop() {
        let urls = [
            "http://example.com/",
            "http://example.com/page#section",
            "https://example.com/a?b=c",
        ];
        for u in urls {
            assert_eq!(normalize_ajax_url(u), u);
            assert_eq!(normalize_ajax_url(&normalize_ajax_url(u)), u);
        }
    }

    #[test]
    fn normalizing_twice_is_stable() {
        let once = normalize_ajax_url("http://example.com/#!/a#!/b");
        assert_eq!(normalize_ajax_url(&once), once);
    }
}
