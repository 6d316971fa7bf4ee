//! One-line summary rendering.

use std::time::Duration;

/// What the pipeline found at the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// HTML page with a non-empty `<title>`.
    Title(String),
    /// Not an HTML page; described by type and size instead.
    Size { content_type: String, size: String },
    /// HTML page without a usable `<title>`; only the host is shown.
    NoTitle,
}

/// Delimiter styling of the rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Plain,
    /// mIRC colour and bold control codes.
    Irc,
}

impl Style {
    fn separator(self) -> &'static str {
        match self {
            Style::Plain => " | ",
            Style::Irc => " \x0314|\x03 ",
        }
    }

    fn arrow(self) -> &'static str {
        match self {
            Style::Plain => " -> ",
            Style::Irc => " \x0314->\x03 ",
        }
    }

    fn bold(self, text: &str) -> String {
        match self {
            Style::Plain => text.to_string(),
            Style::Irc => format!("\x02{}\x02", text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub outcome: Outcome,
    /// Hostname of the requested URL.
    pub host: String,
    /// Pretty target when a redirect moved to another host.
    pub redirect_to: Option<String>,
    pub elapsed: Option<Duration>,
}

impl Summary {
    pub fn render(&self, style: Style) -> String {
        let mut host = self.host.clone();
        if let Some(target) = &self.redirect_to {
            host.push_str(style.arrow());
            host.push_str(target);
        }
        let host = style.bold(&host);
        let sep = style.separator();

        match &self.outcome {
            Outcome::Title(title) => match self.elapsed {
                Some(elapsed) => format!(
                    "{}{}{}{}{}",
                    title,
                    sep,
                    format_elapsed(elapsed),
                    sep,
                    host
                ),
                None => format!("{}{}{}", title, sep, host),
            },
            Outcome::Size { content_type, size } => {
                format!("Type: {}, Size: {}{}{}", content_type, size, sep, host)
            }
            Outcome::NoTitle => host,
        }
    }
}

/// `"0.42 seconds"`.
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.2} seconds", elapsed.as_secs_f64())
}
