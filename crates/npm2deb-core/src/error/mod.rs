//! Error types and result aliases for npm2deb operations.
//!
//! Provides a unified error type that covers all fatal error conditions
//! across the npm2deb crates with actionable error messages. Non-fatal
//! conditions found while walking a dependency graph are not errors; they are
//! recorded as warnings on the report instead.

use thiserror::Error;

/// Unified error type for all npm2deb operations
#[derive(Error, Debug)]
pub enum Npm2DebError {
    // Input errors
    #[error("Invalid module name '{name}': {reason}")]
    InvalidModuleName { name: String, reason: String },

    #[error("Invalid Debian package name '{name}': {reason}")]
    InvalidDebianName { name: String, reason: String },

    // Registry errors
    #[error("Module '{name}' not found in registry")]
    ModuleNotFound { name: String },

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Archive errors
    #[error("{tool} failed: {message}")]
    ArchiveTool { tool: String, message: String },

    // Config errors
    #[error("Failed to parse npm2deb.toml: {message}")]
    TomlParse { message: String },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for npm2deb operations
pub type Npm2DebResult<T> = Result<T, Npm2DebError>;

impl Npm2DebError {
    /// Create a network error from any error type
    pub fn network<E>(message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Create an archive tool error
    pub fn archive_tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ArchiveTool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Npm2DebError::Network { .. } | Npm2DebError::Io { .. })
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Npm2DebError::InvalidModuleName { .. } => {
                Some(
                    "npm module names are lowercase and may only contain \
                     a-z, 0-9, '-', '.', '_' and '~'",
                )
            },
            Npm2DebError::InvalidDebianName { .. } => {
                Some(
                    "Debian package names are lowercase and may only contain \
                     a-z, 0-9, '+', '-' and '.'",
                )
            },
            Npm2DebError::ModuleNotFound { .. } => {
                Some("Check the module name spelling or search for it on the npm registry")
            },
            Npm2DebError::Network { .. } => Some("Check your internet connection and try again"),
            Npm2DebError::ArchiveTool { .. } => {
                Some("Make sure devscripts (rmadison) and apt are installed and on PATH")
            },
            Npm2DebError::TomlParse { .. } | Npm2DebError::ConfigValidation { .. } => {
                Some("Fix npm2deb.toml or remove it to fall back to the defaults")
            },
            _ => None,
        }
    }
}
