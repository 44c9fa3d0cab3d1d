//! Debian archive lookups for npm2deb
//!
//! This crate answers the two questions the resolver asks of Debian: is a
//! package in the archive (and at which version), and which packages depend
//! on it. `DebianArchive` answers them with `rmadison` and
//! `apt-cache rdepends`; `StaticArchive` answers them from memory.

pub mod apt;
pub mod client;
pub mod lookup;
pub mod madison;

// Re-export main types
pub use client::DebianArchive;
pub use lookup::{ArchiveLookup, StaticArchive};
pub use madison::MadisonEntry;

use npm2deb_core::error::Npm2DebError;

/// Result type for archive operations
pub type ArchiveResult<T> = Result<T, Npm2DebError>;
