//! URL modeling for display and fetching.
//!
//! Rewrites AJAX `#!` URLs into their crawlable form, validates that a URL can
//! be fetched at all, and derives the short `host/path` form shown in chat.

mod ajax;
mod pretty;

pub use ajax::normalize_ajax_url;
pub use pretty::{prettify_url, ParsedUrl};

use crate::error::MetaError;
use url::Url;

/// Parses `input` as an absolute http(s) URL with a host.
///
/// Fails with [`MetaError::InvalidUrl`] before any network call is made.
pub fn parse_http_url(input: &str) -> Result<Url, MetaError> {
    let url = Url::parse(input.trim()).map_err(|e| MetaError::InvalidUrl(format!("{input}: {e}")))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(MetaError::InvalidUrl(format!(
            "{input}: unsupported scheme {}",
            url.scheme()
        )));
    }
    match url.host_str() {
        Some(h) if !h.is_empty() => Ok(url),
        _ => Err(MetaError::InvalidUrl(format!("{input}: no host"))),
    }
}

/// Resolves a `Location` header value against the URL that produced it.
///
/// A value without an authority is a relative redirect and keeps the original
/// scheme and host.
pub fn resolve_location(base: &Url, location: &str) -> Result<Url, MetaError> {
    let location = location.trim();
    match Url::parse(location) {
        Ok(u) => Ok(u),
        Err(url::ParseError::RelativeUrlWithoutBase) => base
            .join(location)
            .map_err(|e| MetaError::InvalidUrl(format!("{location}: {e}"))),
        Err(e) => Err(MetaError::InvalidUrl(format!("{location}: {e}"))),
    }
}
