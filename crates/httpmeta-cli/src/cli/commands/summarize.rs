//! `httpmeta summarize` – fetch URLs and print one line each.

use anyhow::Result;
use httpmeta_core::config::HttpMetaConfig;
use httpmeta_core::Summarizer;

#[derive(Debug, Clone, Default)]
pub struct SummarizeOptions {
    pub channel: Option<String>,
    pub random_agent: bool,
    pub irc: bool,
}

/// Applies command-line overrides on top of the loaded config.
pub(crate) fn effective_config(cfg: &HttpMetaConfig, opts: &SummarizeOptions) -> HttpMetaConfig {
    let mut cfg = cfg.clone();
    cfg.random_user_agent |= opts.random_agent;
    cfg.irc_formatting |= opts.irc;
    cfg
}

pub fn run_summarize(cfg: &HttpMetaConfig, urls: &[String], opts: &SummarizeOptions) -> Result<()> {
    let cfg = effective_config(cfg, opts);
    let blacklist = cfg.blacklist()?;
    let summarizer = Summarizer::from_config(&cfg);

    for url in urls {
        if let Some(channel) = opts.channel.as_deref() {
            if blacklist.is_blocked(channel, url) {
                tracing::info!(url = %url, channel, "blacklisted, skipping");
                continue;
            }
        }
        println!("{}", summarizer.summarize(url));
    }
    Ok(())
}
