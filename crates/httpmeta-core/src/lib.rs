pub mod blacklist;
pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod pipeline;
pub mod size;
pub mod status;
pub mod summary;
pub mod title;
pub mod unescape;
pub mod url_model;

pub use error::MetaError;
pub use pipeline::{describe, summarize, Summarizer};
pub use summary::{Outcome, Style, Summary};
