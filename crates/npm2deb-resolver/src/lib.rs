//! Dependency resolution engine for npm2deb
//!
//! This crate walks the npm dependency graph of a module, classifies every
//! dependency against the Debian archive, and answers which Debian packages
//! depend on a module. Collaborators are injected through the
//! `RegistrySource` and `ArchiveLookup` traits.

pub mod forward;
pub mod graph;
pub mod report;
pub mod reverse;

// Re-export main types
pub use forward::{DependencyResolver, ResolveOptions};
pub use graph::ReportGraph;
pub use report::{DependencyReport, ReportEntry, ResolutionWarning};
pub use reverse::ReverseResolver;

use npm2deb_core::error::Npm2DebError;

/// Result type for resolver operations
pub type ResolverResult<T> = Result<T, Npm2DebError>;
