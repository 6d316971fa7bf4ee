//! Short `host/path` display form.

use crate::error::MetaError;
use url::Url;

/// Anything `prettify_url` can display: a raw string or an already parsed URL.
pub trait ParsedUrl {
    fn with_url<T>(&self, f: impl FnOnce(&Url) -> T) -> Result<T, MetaError>;
}

impl ParsedUrl for Url {
    fn with_url<T>(&self, f: impl FnOnce(&Url) -> T) -> Result<T, MetaError> {
        Ok(f(self))
    }
}

impl ParsedUrl for str {
    fn with_url<T>(&self, f: impl FnOnce(&Url) -> T) -> Result<T, MetaError> {
        let url = Url::parse(self).map_err(|e| MetaError::InvalidUrl(format!("{self}: {e}")))?;
        Ok(f(&url))
    }
}

impl ParsedUrl for String {
    fn with_url<T>(&self, f: impl FnOnce(&Url) -> T) -> Result<T, MetaError> {
        self.as_str().with_url(f)
    }
}

/// Returns `hostname + path` with one trailing `/` removed.
///
/// Not meant to be clickable. Fails with [`MetaError::InvalidUrl`] when the URL
/// has no host.
pub fn prettify_url<U: ParsedUrl + ?Sized>(url: &U) -> Result<String, MetaError> {
    let pretty = url.with_url(|u| {
        u.host_str()
            .filter(|h| !h.is_empty())
            .map(|host| format!("{}{}", host, u.path()))
    })?;
    let mut pretty =
        pretty.ok_or_else(|| MetaError::InvalidUrl("URL has no hostname".to_string()))?;
    if pretty.ends_with('/') {
        pretty.pop();
    }
    Ok(pretty)
}
