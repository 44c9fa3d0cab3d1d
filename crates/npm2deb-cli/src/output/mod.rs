//! Terminal output formatting and utilities.
//!
//! Command handlers render their results to strings through these helpers
//! and hand them to `OutputHandler` for printing.

pub mod colors;
pub mod errors;
pub mod table;

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    colors: colors::ColorSupport,
}

impl OutputHandler {
    /// Create a new output handler
    pub fn new() -> Self {
        Self::with_colors(colors::ColorSupport::detect())
    }

    /// Create an output handler with fixed color support
    pub fn with_colors(colors: colors::ColorSupport) -> Self {
        Self { colors }
    }

    /// Color support used for rendering
    pub fn colors(&self) -> &colors::ColorSupport {
        &self.colors
    }

    /// Print rendered text as is
    pub fn print(&self, text: &str) {
        println!("{}", text);
    }
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new()
    }
}
