//! Per-channel URL blacklist.
//!
//! Rules come from a single config string of comma-separated
//! `"#channel pattern"` pairs. The message dispatcher checks them before a
//! URL reaches the summary pipeline.

use anyhow::{bail, Context, Result};
use regex::Regex;

#[derive(Debug, Clone)]
struct Rule {
    channel: String,
    pattern: Regex,
}

#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    rules: Vec<Rule>,
}

impl Blacklist {
    /// Parses `"#chan pattern, #other pattern2"`. Empty input yields no rules.
    pub fn parse(rules_text: &str) -> Result<Self> {
        let mut rules = Vec::new();
        for entry in rules_text.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let Some((channel, pattern)) = entry.split_once(char::is_whitespace) else {
                bail!("blacklist entry {:?} is missing a pattern", entry);
            };
            let pattern = pattern.trim();
            let pattern = Regex::new(pattern)
                .with_context(|| format!("blacklist entry {:?} has an invalid pattern", entry))?;
            rules.push(Rule {
                channel: channel.to_lowercase(),
                pattern,
            });
        }
        Ok(Self { rules })
    }

    /// True if `url` posted in `channel` must be ignored. Channel names match
    /// case-insensitively.
    pub fn is_blocked(&self, channel: &str, url: &str) -> bool {
        let channel = channel.to_lowercase();
        self.rules
            .iter()
            .any(|r| r.channel == channel && r.pattern.is_match(url))
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
