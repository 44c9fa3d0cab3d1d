//! Core data types for npm2deb.
//!
//! This module provides the fundamental types used throughout npm2deb:
//! - Module and Debian package identifiers
//! - Dependency edges and kinds
//! - Archive status of a Debian package

pub mod dependency;
pub mod name;
pub mod status;

// Re-export all public types
pub use dependency::{DependencyEdge, DependencyKind};
pub use name::{DebianName, ModuleName};
pub use status::ArchiveStatus;
