//! npm registry client for npm2deb
//!
//! This crate provides the registry side of dependency resolution: the
//! `RegistrySource` trait the resolver consumes, an HTTP client for the npm
//! registry with retry logic and caching, and an in-memory source for tests.

pub mod api;
pub mod cache;
pub mod client;
pub mod source;

// Re-export main types
pub use api::{PackageMetadataResponse, VersionMetadata};
pub use cache::{CacheEntry, CacheStats, MetadataCache};
pub use client::{AuthConfig, RegistryClient, RetryConfig, DEFAULT_REGISTRY};
pub use source::{RegistrySource, StaticRegistry};

use npm2deb_core::error::Npm2DebError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, Npm2DebError>;
