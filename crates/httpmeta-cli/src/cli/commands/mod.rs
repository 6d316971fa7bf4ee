//! CLI command handlers. Each command is in its own file.

mod config;
mod normalize;
mod summarize;

pub use config::run_config;
pub use normalize::run_normalize;
pub use summarize::{run_summarize, SummarizeOptions};
