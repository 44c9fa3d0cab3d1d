//! Reverse dependency resolution
//!
//! The registry cannot say who depends on a module, so this is a single
//! query against the archive's reverse index for the module's Debian name.

use tracing::info;

use npm2deb_archive::ArchiveLookup;
use npm2deb_core::naming;
use npm2deb_core::types::{DebianName, ModuleName};

use crate::ResolverResult;

/// Finds Debian packages depending on a module
#[derive(Debug)]
pub struct ReverseResolver<A> {
    archive: A,
}

impl<A: ArchiveLookup> ReverseResolver<A> {
    /// Create a resolver over the given archive
    pub fn new(archive: A) -> Self {
        Self { archive }
    }

    /// Debian packages declaring a dependency on `target`, in archive order.
    ///
    /// A module that was never packaged has no dependents and yields an
    /// empty list.
    pub async fn resolve_reverse(&self, target: &ModuleName) -> ResolverResult<Vec<DebianName>> {
        let debian_name = naming::to_debian_name(target);
        let dependents = self.archive.reverse_dependents(&debian_name).await?;

        info!("{} has {} reverse dependencies", debian_name, dependents.len());
        Ok(dependents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use npm2deb_archive::StaticArchive;

    fn name(s: &str) -> ModuleName {
        ModuleName::parse(s).unwrap()
    }

    fn deb(s: &str) -> DebianName {
        DebianName::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_dependents_in_archive_order() {
        let archive = StaticArchive::new()
            .reverse_dependency(deb("node-uuid"), deb("node-request"))
            .reverse_dependency(deb("node-uuid"), deb("node-sockjs"))
            .reverse_dependency(deb("node-uuid"), deb("node-cross-spawn"));
        let resolver = ReverseResolver::new(archive);

        let dependents = resolver.resolve_reverse(&name("uuid")).await.unwrap();
        assert_eq!(
            dependents,
            vec![deb("node-request"), deb("node-sockjs"), deb("node-cross-spawn")]
        );
    }

    #[tokio::test]
    async fn test_unpackaged_module_has_no_dependents() {
        let resolver = ReverseResolver::new(StaticArchive::new());
        let dependents = resolver.resolve_reverse(&name("left-pad")).await.unwrap();
        assert!(dependents.is_empty());
    }

    #[tokio::test]
    async fn test_scoped_module_uses_mapped_name() {
        let archive = StaticArchive::new()
            .reverse_dependency(deb("node-types-node"), deb("node-typescript-types"));
        let resolver = ReverseResolver::new(archive);

        let dependents = resolver.resolve_reverse(&name("@types/node")).await.unwrap();
        assert_eq!(dependents, vec![deb("node-typescript-types")]);
    }
}
