//! URL in, one summary line out.
//!
//! Every failure is turned into a short line here; nothing escapes to the
//! message handler that called us.

use crate::config::HttpMetaConfig;
use crate::error::MetaError;
use crate::fetch::{FetchResult, FetchSettings, Fetcher, Redirect};
use crate::size::describe_length;
use crate::summary::{Outcome, Style, Summary};
use crate::title::extract_title;
use crate::url_model::{normalize_ajax_url, parse_http_url, prettify_url};
use std::time::Instant;
use url::Url;

/// Per-request state; owned by one invocation and dropped after rendering.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub original: String,
    pub url: Url,
    pub host: String,
    pub redirect_to: Option<String>,
}

impl RequestContext {
    pub fn new(original: &str) -> Result<Self, MetaError> {
        let url = parse_http_url(&normalize_ajax_url(original.trim()))?;
        let host = url
            .host_str()
            .map(str::to_string)
            .ok_or_else(|| MetaError::InvalidUrl(original.to_string()))?;
        Ok(Self {
            original: original.to_string(),
            url,
            host,
            redirect_to: None,
        })
    }

    fn apply_redirect(&mut self, redirect: Option<&Redirect>) -> Result<(), MetaError> {
        if let Some(r) = redirect.filter(|r| r.host_changed) {
            self.redirect_to = Some(prettify_url(&r.target)?);
        }
        Ok(())
    }
}

/// Fetches a URL and builds its summary; holds only read-only settings.
#[derive(Debug, Clone)]
pub struct Summarizer {
    fetcher: Fetcher,
    style: Style,
}

impl Summarizer {
    pub fn new(fetcher: Fetcher, style: Style) -> Self {
        Self { fetcher, style }
    }

    pub fn from_config(cfg: &HttpMetaConfig) -> Self {
        let style = if cfg.irc_formatting {
            Style::Irc
        } else {
            Style::Plain
        };
        Self::new(Fetcher::new(FetchSettings::from(cfg)), style)
    }

    pub fn describe(&self, url: &str) -> Result<Summary, MetaError> {
        describe(&self.fetcher, url)
    }

    pub fn summarize(&self, url: &str) -> String {
        summarize(&self.fetcher, url, self.style)
    }
}

/// Runs the pipeline for `url` and returns the structured summary.
pub fn describe(fetcher: &Fetcher, url: &str) -> Result<Summary, MetaError> {
    let started = Instant::now();
    let mut ctx = RequestContext::new(url)?;
    let fetched = fetcher.fetch(&ctx.url)?;
    ctx.apply_redirect(fetched.redirect.as_ref())?;
    let outcome = outcome_of(&fetched);

    Ok(Summary {
        outcome,
        host: ctx.host,
        redirect_to: ctx.redirect_to,
        elapsed: Some(started.elapsed()),
    })
}

/// Runs the pipeline and renders one line; errors become their user message.
pub fn summarize(fetcher: &Fetcher, url: &str, style: Style) -> String {
    match describe(fetcher, url) {
        Ok(summary) => {
            let line = summary.render(style);
            tracing::info!(url, summary = %line, "summarized");
            line
        }
        Err(e) => {
            tracing::warn!(url, "summary failed: {}", e);
            e.user_message()
        }
    }
}

fn outcome_of(fetched: &FetchResult) -> Outcome {
    if !fetched.is_html() {
        return Outcome::Size {
            content_type: if fetched.content_type.is_empty() {
                "unknown".to_string()
            } else {
                fetched.content_type.clone()
            },
            size: describe_length(fetched.content_length),
        };
    }
    match fetched.body.as_deref().and_then(extract_title) {
        Some(title) if !title.is_empty() => Outcome::Title(title),
        _ => {
            tracing::debug!(url = %fetched.final_url, "no title found");
            Outcome::NoTitle
        }
    }
}
