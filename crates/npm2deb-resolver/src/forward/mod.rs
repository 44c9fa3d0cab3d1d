//! Forward dependency resolution
//!
//! Walks the registry graph depth-first from a root module. Every dependency
//! is classified against the archive; the walk only descends into
//! dependencies Debian does not ship yet, unless forced. A module is expanded
//! at most once per run, which also makes registry cycles terminate.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

use tracing::{debug, info, warn};

use npm2deb_archive::ArchiveLookup;
use npm2deb_core::naming;
use npm2deb_core::types::{ArchiveStatus, DebianName, DependencyEdge, DependencyKind, ModuleName};
use npm2deb_registry::RegistrySource;

use crate::report::{DependencyReport, ReportEntry, ResolutionWarning};
use crate::ResolverResult;

/// How a resolution walks the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Which dependency list to follow
    pub kind: DependencyKind,
    /// Descend into dependencies of dependencies
    pub recursive: bool,
    /// Also descend into dependencies already in the archive
    pub force: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            kind: DependencyKind::Runtime,
            recursive: false,
            force: false,
        }
    }
}

impl ResolveOptions {
    /// Options following the given dependency kind, single level
    pub fn new(kind: DependencyKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Enable recursive expansion
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Enable re-inspection of packaged dependencies
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Whether a dependency with this status gets expanded
    fn descends_into(&self, status: &ArchiveStatus) -> bool {
        self.recursive && (self.force || !status.is_packaged())
    }
}

/// Bookkeeping for a single `resolve` call
struct Walk {
    /// Modules already expanded; only ever grows
    visited: HashSet<ModuleName>,
    /// Archive answers already obtained during this walk
    statuses: HashMap<DebianName, ArchiveStatus>,
    /// Edges already reported
    edges: HashSet<DependencyEdge>,
    report: DependencyReport,
}

/// Forward dependency resolver
#[derive(Debug)]
pub struct DependencyResolver<R, A> {
    registry: R,
    archive: A,
}

impl<R, A> DependencyResolver<R, A>
where
    R: RegistrySource,
    A: ArchiveLookup,
{
    /// Create a resolver over the given collaborators
    pub fn new(registry: R, archive: A) -> Self {
        Self { registry, archive }
    }

    /// Resolve the dependencies of `root`.
    ///
    /// Fails only when the registry cannot list `root` itself. Failures on
    /// transitive modules degrade their entry to `NotPackaged` and attach a
    /// warning instead.
    pub async fn resolve(
        &self,
        root: &ModuleName,
        options: ResolveOptions,
    ) -> ResolverResult<DependencyReport> {
        let start_time = Instant::now();
        info!(
            "Resolving {} dependencies of {} (recursive: {}, force: {})",
            options.kind, root, options.recursive, options.force
        );

        let mut walk = Walk {
            visited: HashSet::new(),
            statuses: HashMap::new(),
            edges: HashSet::new(),
            report: DependencyReport::new(root.clone(), options.kind),
        };

        self.expand(&mut walk, root.clone(), 0, options).await?;

        info!(
            "Resolved {} entries over {} modules in {}ms",
            walk.report.len(),
            walk.visited.len(),
            start_time.elapsed().as_millis()
        );
        Ok(walk.report)
    }

    /// Expand one module, recursing into the dependencies that qualify.
    ///
    /// Returns an error only when the registry lookup for `module` itself
    /// fails; failures further down are absorbed by the caller's entry.
    fn expand<'a>(
        &'a self,
        walk: &'a mut Walk,
        module: ModuleName,
        depth: usize,
        options: ResolveOptions,
    ) -> Pin<Box<dyn Future<Output = ResolverResult<()>> + 'a>>
    where
        R: 'a,
        A: 'a,
    {
        Box::pin(async move {
            if !walk.visited.insert(module.clone()) {
                debug!("{} already expanded", module);
                return Ok(());
            }
            walk.report.mark_expanded(module.clone());

            let dependencies = self.registry.dependencies(&module, options.kind).await?;

            for dependency in dependencies {
                let edge = DependencyEdge::new(module.clone(), dependency.clone(), options.kind);
                if !walk.edges.insert(edge.clone()) {
                    continue;
                }

                let debian_name = naming::to_debian_name(&dependency);
                let mut warnings = Vec::new();
                let status = match self.status(walk, &debian_name).await {
                    Ok(status) => status,
                    Err(e) => {
                        warn!("Archive lookup for {} failed: {}", debian_name, e);
                        warnings.push(ResolutionWarning::ArchiveLookupFailure {
                            package: debian_name.clone(),
                            reason: e.to_string(),
                        });
                        ArchiveStatus::NotPackaged
                    }
                };

                let descend = options.descends_into(&status);
                let index = walk.report.push(ReportEntry {
                    edge,
                    debian_name,
                    status,
                    depth,
                    warnings,
                });

                if descend {
                    let expanded =
                        self.expand(walk, dependency.clone(), depth + 1, options).await;
                    if let Err(e) = expanded {
                        warn!("Could not expand {}: {}", dependency, e);
                        walk.report.degrade(
                            index,
                            ResolutionWarning::TransitiveLookupFailure {
                                module: dependency,
                                reason: e.to_string(),
                            },
                        );
                    }
                }
            }

            Ok(())
        })
    }

    /// Archive status of `package`, asking the archive once per walk
    async fn status(&self, walk: &mut Walk, package: &DebianName) -> ResolverResult<ArchiveStatus> {
        if let Some(status) = walk.statuses.get(package) {
            return Ok(status.clone());
        }

        let status = self.archive.status(package).await?;
        walk.statuses.insert(package.clone(), status.clone());
        Ok(status)
    }
}
