//! `httpmeta normalize` – show how a URL is rewritten and displayed.

use anyhow::Result;
use httpmeta_core::url_model::{normalize_ajax_url, prettify_url};

pub fn run_normalize(url: &str) -> Result<()> {
    let normalized = normalize_ajax_url(url);
    let pretty = prettify_url(normalized.as_str())?;
    println!("{}", normalized);
    println!("{}", pretty);
    Ok(())
}
