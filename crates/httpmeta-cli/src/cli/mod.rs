//! CLI for httpmeta URL summaries.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use httpmeta_core::config;

use commands::{run_config, run_normalize, run_summarize, SummarizeOptions};

/// Top-level CLI for httpmeta.
#[derive(Debug, Parser)]
#[command(name = "httpmeta")]
#[command(about = "httpmeta: one-line title/size summaries for URLs posted in chat", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch each URL and print its one-line summary.
    Summarize {
        /// HTTP/HTTPS URLs to summarize.
        #[arg(required = true)]
        urls: Vec<String>,
        /// Channel the URLs were posted in; blacklisted URLs are skipped.
        #[arg(long)]
        channel: Option<String>,
        /// Pick a random browser user agent for each request.
        #[arg(long)]
        random_agent: bool,
        /// Use IRC colour/bold codes in the output.
        #[arg(long)]
        irc: bool,
    },

    /// Print the AJAX-normalized URL and its short display form.
    Normalize {
        /// URL to normalize.
        url: String,
    },

    /// Show the config file path and effective settings.
    Config,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Summarize {
                urls,
                channel,
                random_agent,
                irc,
            } => {
                let opts = SummarizeOptions {
                    channel,
                    random_agent,
                    irc,
                };
                run_summarize(&cfg, &urls, &opts)?;
            }
            CliCommand::Normalize { url } => run_normalize(&url)?,
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}
