//! `httpmeta config` – print where the config lives and what is in effect.

use anyhow::Result;
use httpmeta_core::config::{self, HttpMetaConfig};

pub fn run_config(cfg: &HttpMetaConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
