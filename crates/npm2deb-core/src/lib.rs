//! # npm2deb-core
//!
//! Core types and utilities shared across all npm2deb crates.
//!
//! This crate provides:
//! - `ModuleName` and `DebianName` identifiers with validation
//! - The NameMapper translating between the npm and Debian namespaces
//! - Dependency edges, kinds and archive status types
//! - `Npm2DebError` enum for unified error handling
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (ModuleName, DependencyEdge, ArchiveStatus, etc.)
//! - `naming`: Module name to Debian package name translation
//! - `error`: Error types and result aliases

pub mod error;
pub mod naming;
pub mod types;

// Re-export commonly used types
pub use error::{Npm2DebError, Npm2DebResult};
pub use types::{ArchiveStatus, DebianName, DependencyEdge, DependencyKind, ModuleName};
