//! Error message formatting with actionable suggestions.

use std::error::Error;

use npm2deb_core::error::Npm2DebError;

use super::colors::ColorSupport;

/// Error formatter with suggestions
pub struct ErrorFormatter {
    colors: ColorSupport,
}

impl ErrorFormatter {
    /// Create a new error formatter
    pub fn new() -> Self {
        Self::with_colors(ColorSupport::detect())
    }

    pub fn with_colors(colors: ColorSupport) -> Self {
        Self { colors }
    }

    /// Format an error with its suggestion and cause chain
    pub fn format_error(&self, error: &Npm2DebError) -> String {
        let mut lines = vec![format!("{}: {}", self.colors.red("error"), error)];

        if let Some(suggestion) = error.suggestion() {
            lines.push(String::new());
            lines.push(format!("{}: {}", self.colors.dim("help"), suggestion));
        }

        let mut source = error.source();
        while let Some(cause) = source {
            lines.push(format!("{}: {}", self.colors.dim("caused by"), cause));
            source = cause.source();
        }

        lines.join("\n")
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}
