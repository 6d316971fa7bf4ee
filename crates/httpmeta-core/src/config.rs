use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::blacklist::Blacklist;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows; U; Windows NT 5.1; it; rv:1.8.1.11) Gecko/20071127 Firefox/2.0.0.11";

/// Browser-like agents used when `random_user_agent` is on.
pub const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows; U; Windows NT 5.1; it; rv:1.8.1.11) Gecko/20071127 Firefox/2.0.0.11",
    "Opera/9.25 (Windows NT 5.1; U; en)",
    "Mozilla/4.0 (compatible; MSIE 6.0; Windows NT 5.1; SV1; .NET CLR 1.1.4322; .NET CLR 2.0.50727)",
    "Mozilla/5.0 (compatible; Konqueror/3.5; Linux) KHTML/3.5.5 (like Gecko) (Kubuntu)",
    "Mozilla/5.0 (X11; U; Linux i686; en-US; rv:1.8.0.12) Gecko/20070731 Ubuntu/dapper-security Firefox/1.5.0.12",
    "Lynx/2.8.5rel.1 libwww-FM/2.14 SSL-MM/1.4.1 GNUTLS/1.2.9",
];

pub const DEFAULT_HTML_TYPES: &[&str] = &["text/html", "application/xhtml+xml"];

pub const DEFAULT_REDIRECT_CODES: &[u32] = &[301, 302, 303];

/// Global configuration loaded from `~/.config/httpmeta/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpMetaConfig {
    /// User agent sent when `random_user_agent` is off.
    pub user_agent: String,
    /// Pool to pick from when `random_user_agent` is on.
    pub user_agents: Vec<String>,
    pub random_user_agent: bool,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Upper bound on body bytes read for title extraction.
    pub max_body_bytes: usize,
    /// Media types treated as HTML pages.
    pub html_types: Vec<String>,
    /// Statuses whose `Location` is resolved for the redirect annotation.
    pub redirect_codes: Vec<u32>,
    /// Use mIRC colour/bold codes in summaries.
    pub irc_formatting: bool,
    /// Comma-separated `"#channel pattern"` pairs.
    pub blacklist: String,
}

impl Default for HttpMetaConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            user_agents: DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect(),
            random_user_agent: false,
            timeout_secs: 10,
            connect_timeout_secs: 5,
            max_body_bytes: 2 * 1024 * 1024,
            html_types: DEFAULT_HTML_TYPES.iter().map(|s| s.to_string()).collect(),
            redirect_codes: DEFAULT_REDIRECT_CODES.to_vec(),
            irc_formatting: false,
            blacklist: String::new(),
        }
    }
}

impl HttpMetaConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Parsed blacklist rules.
    pub fn blacklist(&self) -> Result<Blacklist> {
        Blacklist::parse(&self.blacklist)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("httpmeta")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HttpMetaConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HttpMetaConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<HttpMetaConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: HttpMetaConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = HttpMetaConfig::default();
        assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(cfg.user_agents.len(), 6);
        assert!(!cfg.random_user_agent);
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
        assert_eq!(cfg.html_types, vec!["text/html", "application/xhtml+xml"]);
        assert_eq!(cfg.redirect_codes, vec![301, 302, 303]);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = HttpMetaConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: HttpMetaConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.user_agent, cfg.user_agent);
        assert_eq!(parsed.timeout_secs, cfg.timeout_secs);
        assert_eq!(parsed.max_body_bytes, cfg.max_body_bytes);
        assert_eq!(parsed.redirect_codes, cfg.redirect_codes);
    }

    #[test]
    fn config_toml_partial_values() {
        let toml = r##"
            timeout_secs = 3
            random_user_agent = true
            irc_formatting = true
            blacklist = "#rust example\\.com, #ops \\.png$"
        "##;
        let cfg: HttpMetaConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.timeout_secs, 3);
        assert!(cfg.random_user_agent);
        assert!(cfg.irc_formatting);
        assert_eq!(cfg.connect_timeout_secs, 5);
        let bl = cfg.blacklist().unwrap();
        assert!(bl.is_blocked("#rust", "http://example.com/x"));
        assert!(bl.is_blocked("#ops", "http://host/a.png"));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "max_body_bytes = 4096\nhtml_types = [\"text/html\"]\n").unwrap();
        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.max_body_bytes, 4096);
        assert_eq!(cfg.html_types, vec!["text/html"]);
    }

    #[test]
    fn load_from_bad_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout_secs = \"soon\"").unwrap();
        let err = load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("config.toml"));
    }
}
