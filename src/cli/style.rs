//! Terminal styling helpers

use owo_colors::{OwoColorize, Stream, Style};
use std::fmt::Display;

/// Check mark for completed steps
pub const CHECK: &str = "✓";

/// Semantic styles for CLI output
pub trait Stylize: Display + Sized {
    /// Bold text for headings
    fn emphasis(&self) -> String {
        styled(self, Style::new().bold())
    }

    /// Highlighted values (branch names, counts)
    fn accent(&self) -> String {
        styled(self, Style::new().cyan())
    }

    /// Secondary text
    fn muted(&self) -> String {
        styled(self, Style::new().dimmed())
    }

    /// Success messages
    fn success(&self) -> String {
        styled(self, Style::new().green().bold())
    }
}

impl<T: Display> Stylize for T {}

fn styled(value: &impl Display, style: Style) -> String {
    value
        .if_supports_color(Stream::Stdout, |v| v.style(style))
        .to_string()
}

/// Arrow prefix for progress lines
pub fn arrow() -> String {
    "→".muted()
}
