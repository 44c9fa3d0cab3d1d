//! The archive seam consumed by the resolvers

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use npm2deb_core::error::Npm2DebError;
use npm2deb_core::types::{ArchiveStatus, DebianName};

use crate::ArchiveResult;

/// Read-only view of the Debian archive
#[async_trait]
pub trait ArchiveLookup: Send + Sync {
    /// Whether `package` is in the archive, and at which version
    async fn status(&self, package: &DebianName) -> ArchiveResult<ArchiveStatus>;

    /// Packages declaring a dependency on `package`, in index order.
    ///
    /// A package nothing depends on, or one the archive has never heard of,
    /// yields an empty list.
    async fn reverse_dependents(&self, package: &DebianName) -> ArchiveResult<Vec<DebianName>>;
}

/// In-memory archive snapshot
#[derive(Debug, Default)]
pub struct StaticArchive {
    packages: HashMap<DebianName, String>,
    reverse: HashMap<DebianName, Vec<DebianName>>,
    broken: HashSet<DebianName>,
    status_queries: AtomicUsize,
}

impl StaticArchive {
    /// Create an empty archive
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package at the given version
    pub fn packaged(mut self, package: DebianName, version: impl Into<String>) -> Self {
        self.packages.insert(package, version.into());
        self
    }

    /// Record that `dependent` declares a dependency on `package`
    pub fn reverse_dependency(mut self, package: DebianName, dependent: DebianName) -> Self {
        self.reverse.entry(package).or_default().push(dependent);
        self
    }

    /// Make status lookups for `package` fail
    pub fn broken(mut self, package: DebianName) -> Self {
        self.broken.insert(package);
        self
    }

    /// Number of status lookups answered so far
    pub fn status_queries(&self) -> usize {
        self.status_queries.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ArchiveLookup for StaticArchive {
    async fn status(&self, package: &DebianName) -> ArchiveResult<ArchiveStatus> {
        self.status_queries.fetch_add(1, Ordering::Relaxed);

        if self.broken.contains(package) {
            return Err(Npm2DebError::archive_tool(
                "static archive",
                format!("lookup of {} failed", package),
            ));
        }

        Ok(match self.packages.get(package) {
            Some(version) => ArchiveStatus::Packaged(version.clone()),
            None => ArchiveStatus::NotPackaged,
        })
    }

    async fn reverse_dependents(&self, package: &DebianName) -> ArchiveResult<Vec<DebianName>> {
        Ok(self.reverse.get(package).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl<'a, T: ArchiveLookup> ArchiveLookup for &'a T {
    async fn status(&self, package: &DebianName) -> ArchiveResult<ArchiveStatus> {
        (**self).status(package).await
    }

    async fn reverse_dependents(&self, package: &DebianName) -> ArchiveResult<Vec<DebianName>> {
        (**self).reverse_dependents(package).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deb(s: &str) -> DebianName {
        DebianName::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_static_status() {
        let archive = StaticArchive::new().packaged(deb("node-string-fill"), "1.2-1");

        assert_eq!(
            archive.status(&deb("node-string-fill")).await.unwrap(),
            ArchiveStatus::Packaged("1.2-1".to_string())
        );
        assert_eq!(
            archive.status(&deb("node-left-pad")).await.unwrap(),
            ArchiveStatus::NotPackaged
        );
        assert_eq!(archive.status_queries(), 2);
    }

    #[tokio::test]
    async fn test_static_broken_lookup() {
        let archive = StaticArchive::new().broken(deb("node-flaky"));
        assert!(archive.status(&deb("node-flaky")).await.is_err());
    }

    #[tokio::test]
    async fn test_static_reverse_dependents_keep_order() {
        let archive = StaticArchive::new()
            .reverse_dependency(deb("node-uuid"), deb("node-request"))
            .reverse_dependency(deb("node-uuid"), deb("node-sockjs"));

        assert_eq!(
            archive.reverse_dependents(&deb("node-uuid")).await.unwrap(),
            vec![deb("node-request"), deb("node-sockjs")]
        );
        assert!(archive
            .reverse_dependents(&deb("node-unknown"))
            .await
            .unwrap()
            .is_empty());
    }
}
