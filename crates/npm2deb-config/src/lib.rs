//! Configuration loading for npm2deb
//!
//! This crate handles parsing and validation of npm2deb.toml files and layers
//! the global file, the project file and environment overrides into a single
//! configuration for the CLI.

pub mod merge;
pub mod toml;

// Re-export main types
pub use merge::{ConfigLayering, ConfigLoader, ConfigSource, LoadedConfig};
pub use toml::{ArchiveSection, Npm2DebToml, RegistrySection, ResolveSection};

use npm2deb_core::error::Npm2DebError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, Npm2DebError>;
