//! Resource fetching: HEAD probe, Range GET fallback, one manual redirect hop,
//! content-type classification and a conditional full GET.
//!
//! Uses the curl crate (libcurl) with a blocking `Easy` handle per request.
//! Runs in the current thread; call from `spawn_blocking` if used from async code.

mod charset;
mod parse;

pub use charset::{charset_param, decode_body};
pub use parse::Hop;

use crate::config::HttpMetaConfig;
use crate::error::MetaError;
use crate::status::is_success_or_redirect;
use crate::url_model::{normalize_ajax_url, parse_http_url, resolve_location};
use rand::seq::IndexedRandom;
use std::str;
use std::time::Duration;
use url::Url;

/// Request settings injected at construction; read-only for every request.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub user_agent: String,
    pub user_agents: Vec<String>,
    pub random_user_agent: bool,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub max_body_bytes: usize,
    pub html_types: Vec<String>,
    pub redirect_codes: Vec<u32>,
}

impl From<&HttpMetaConfig> for FetchSettings {
    fn from(cfg: &HttpMetaConfig) -> Self {
        Self {
            user_agent: cfg.user_agent.clone(),
            user_agents: cfg.user_agents.clone(),
            random_user_agent: cfg.random_user_agent,
            timeout: cfg.timeout(),
            connect_timeout: cfg.connect_timeout(),
            max_body_bytes: cfg.max_body_bytes,
            html_types: cfg.html_types.clone(),
            redirect_codes: cfg.redirect_codes.clone(),
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self::from(&HttpMetaConfig::default())
    }
}

/// Redirect resolved from the last hop of the followed chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// Absolute, AJAX-normalized target.
    pub target: Url,
    /// Target host differs from the requested host.
    pub host_changed: bool,
}

/// What the fetcher learned about one URL.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// URL the body (or probe) was finally read from.
    pub final_url: Url,
    pub status: u32,
    /// Media type without parameters, lowercased; empty if absent.
    pub content_type: String,
    pub content_length: Option<u64>,
    /// Decoded body, present only for HTML resources.
    pub body: Option<String>,
    pub redirect: Option<Redirect>,
}

impl FetchResult {
    pub fn is_html(&self) -> bool {
        self.body.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Head,
    /// GET for a few bytes only, for servers that refuse HEAD.
    RangeGet,
    Get,
}

/// Raw outcome of one curl transfer (redirects followed).
#[derive(Debug)]
struct Response {
    code: u32,
    hops: Vec<Hop>,
    body: Vec<u8>,
}

impl Response {
    fn last_hop(&self) -> Option<&Hop> {
        self.hops.last()
    }

    /// Redirect responses that preceded the final one.
    fn history(&self) -> &[Hop] {
        match self.hops.len() {
            0 => &[],
            n => &self.hops[..n - 1],
        }
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.last_hop()?.header(name)
    }

    /// Total resource length. A 206 only knows it through `Content-Range`.
    fn resource_length(&self) -> Option<u64> {
        let hop = self.last_hop()?;
        if hop.status == 206 {
            return hop.content_range_total();
        }
        hop.content_length()
    }
}

#[derive(Debug, Clone)]
pub struct Fetcher {
    settings: FetchSettings,
}

impl Fetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    /// Probes `url`, resolves one redirect hop and fetches the body of HTML pages.
    pub fn fetch(&self, url: &Url) -> Result<FetchResult, MetaError> {
        let user_agent = self.pick_user_agent();
        tracing::debug!(url = %url, user_agent, "probing resource");

        let mut probe = self.perform(url, Method::Head, user_agent)?;
        if probe.code == 405 {
            tracing::debug!(url = %url, "HEAD not allowed, retrying with ranged GET");
            probe = self.perform(url, Method::RangeGet, user_agent)?;
        }
        if !is_success_or_redirect(probe.code) {
            return Err(MetaError::http(probe.code));
        }

        let redirect = self.resolve_redirect(url, &probe)?;
        let next_url = redirect
            .as_ref()
            .map(|r| r.target.clone())
            .unwrap_or_else(|| url.clone());

        let content_type_header = probe.header("content-type").map(str::to_string);
        let content_type = media_type(content_type_header.as_deref());
        if !self.is_html_type(&content_type) {
            tracing::debug!(url = %next_url, content_type, "not an HTML page, skipping body");
            return Ok(FetchResult {
                final_url: next_url,
                status: probe.code,
                content_type,
                content_length: probe.resource_length(),
                body: None,
                redirect,
            });
        }

        let page = self.perform(&next_url, Method::Get, user_agent)?;
        if !is_success_or_redirect(page.code) {
            return Err(MetaError::http(page.code));
        }
        let page_content_type = page
            .header("content-type")
            .map(str::to_string)
            .or(content_type_header);
        let body = decode_body(&page.body, page_content_type.as_deref());
        tracing::debug!(url = %next_url, bytes = page.body.len(), "fetched page body");

        Ok(FetchResult {
            final_url: next_url,
            status: page.code,
            content_type,
            content_length: page.resource_length(),
            body: Some(body),
            redirect,
        })
    }

    fn pick_user_agent(&self) -> &str {
        if self.settings.random_user_agent {
            if let Some(ua) = self.settings.user_agents.choose(&mut rand::rng()) {
                return ua;
            }
        }
        &self.settings.user_agent
    }

    fn is_html_type(&self, media_type: &str) -> bool {
        self.settings
            .html_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(media_type))
    }

    /// Looks at the last redirect hop of `probe` only; longer chains were
    /// already followed by curl.
    fn resolve_redirect(&self, url: &Url, probe: &Response) -> Result<Option<Redirect>, MetaError> {
        let Some(hop) = probe.history().last() else {
            return Ok(None);
        };
        if !self.settings.redirect_codes.contains(&hop.status) {
            return Ok(None);
        }
        let Some(location) = hop.header("location") else {
            return Ok(None);
        };
        let resolved = resolve_location(url, location)?;
        let target = parse_http_url(&normalize_ajax_url(resolved.as_str()))?;
        let host_changed = target.host_str() != url.host_str();
        tracing::debug!(from = %url, to = %target, host_changed, "resolved redirect");
        Ok(Some(Redirect {
            target,
            host_changed,
        }))
    }

    fn perform(&self, url: &Url, method: Method, user_agent: &str) -> Result<Response, MetaError> {
        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();
        let mut truncated = false;
        let max_body = self.settings.max_body_bytes;

        let mut easy = curl::easy::Easy::new();
        easy.url(url.as_str()).map_err(MetaError::from_curl)?;
        easy.useragent(user_agent).map_err(MetaError::from_curl)?;
        easy.follow_location(true).map_err(MetaError::from_curl)?;
        easy.max_redirections(10).map_err(MetaError::from_curl)?;
        easy.connect_timeout(self.settings.connect_timeout)
            .map_err(MetaError::from_curl)?;
        easy.timeout(self.settings.timeout)
            .map_err(MetaError::from_curl)?;

        match method {
            Method::Head => easy.nobody(true).map_err(MetaError::from_curl)?,
            Method::RangeGet => {
                let mut list = curl::easy::List::new();
                list.append("Range: bytes=1-5").map_err(MetaError::from_curl)?;
                easy.http_headers(list).map_err(MetaError::from_curl)?;
            }
            Method::Get => {}
        }

        let performed = {
            let mut transfer = easy.transfer();
            transfer
                .header_function(|data| {
                    if let Ok(s) = str::from_utf8(data) {
                        header_lines.push(s.trim_end().to_string());
                    }
                    true
                })
                .map_err(MetaError::from_curl)?;
            transfer
                .write_function(|data| {
                    let room = max_body.saturating_sub(body.len());
                    if data.len() > room {
                        body.extend_from_slice(&data[..room]);
                        truncated = true;
                        return Ok(0); // abort transfer
                    }
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(MetaError::from_curl)?;
            transfer.perform()
        };

        if let Err(e) = performed {
            if !(truncated && e.is_write_error()) {
                tracing::warn!(url = %url, ?method, "request failed: {}", e);
                let connected = easy
                    .connect_time()
                    .map(|t| t > Duration::ZERO)
                    .unwrap_or(false);
                return Err(MetaError::from_transfer_failure(e, connected));
            }
            tracing::debug!(url = %url, max_body, "body truncated");
        }

        let hops = parse::parse_hops(&header_lines);
        let code = match hops.last() {
            Some(hop) if hop.status != 0 => hop.status,
            _ => easy.response_code().map_err(MetaError::from_curl)?,
        };
        tracing::debug!(url = %url, ?method, code, hops = hops.len(), "response");

        Ok(Response { code, hops, body })
    }
}

/// Media type of a `Content-Type` value without parameters, lowercased.
pub fn media_type(content_type: Option<&str>) -> String {
    content_type
        .and_then(|ct| ct.split(';').next())
        .map(|t| t.trim().to_ascii_lowercase())
        .unwrap_or_default()
}
