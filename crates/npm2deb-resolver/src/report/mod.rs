//! Forward dependency report
//!
//! Entries are kept in discovery order: depth-first pre-order over the
//! registry's own dependency order at each module.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use npm2deb_core::types::{ArchiveStatus, DebianName, DependencyEdge, DependencyKind, ModuleName};

use crate::graph::ReportGraph;

/// Non-fatal problem met while building a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ResolutionWarning {
    /// The registry could not list the dependencies of a transitive module
    TransitiveLookupFailure { module: ModuleName, reason: String },
    /// The archive could not say whether a package exists
    ArchiveLookupFailure { package: DebianName, reason: String },
}

/// One discovered dependency and its Debian classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub edge: DependencyEdge,
    /// Debian package name of `edge.to`
    pub debian_name: DebianName,
    pub status: ArchiveStatus,
    /// Distance of `edge.from` from the root (0 for direct dependencies)
    pub depth: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ResolutionWarning>,
}

/// Result of a forward resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyReport {
    root: ModuleName,
    kind: DependencyKind,
    entries: Vec<ReportEntry>,
    /// Modules whose dependencies were listed, in expansion order
    expanded: Vec<ModuleName>,
}

impl DependencyReport {
    pub(crate) fn new(root: ModuleName, kind: DependencyKind) -> Self {
        Self {
            root,
            kind,
            entries: Vec::new(),
            expanded: Vec::new(),
        }
    }

    /// Append an entry, returning its index
    pub(crate) fn push(&mut self, entry: ReportEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    pub(crate) fn mark_expanded(&mut self, module: ModuleName) {
        self.expanded.push(module);
    }

    /// Downgrade an entry to `NotPackaged` and attach the warning
    pub(crate) fn degrade(&mut self, index: usize, warning: ResolutionWarning) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.status = ArchiveStatus::NotPackaged;
            entry.warnings.push(warning);
        }
    }

    /// Module the report was built for
    pub fn root(&self) -> &ModuleName {
        &self.root
    }

    /// Dependency kind that was followed
    pub fn kind(&self) -> DependencyKind {
        self.kind
    }

    /// All entries in discovery order
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// All edges in discovery order
    pub fn edges(&self) -> impl Iterator<Item = &DependencyEdge> {
        self.entries.iter().map(|entry| &entry.edge)
    }

    /// Modules whose dependencies were listed, root first
    pub fn expanded(&self) -> &[ModuleName] {
        &self.expanded
    }

    /// Distinct dependencies missing from the archive, in discovery order
    pub fn unpackaged(&self) -> Vec<&ModuleName> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter(|entry| !entry.status.is_packaged())
            .map(|entry| &entry.edge.to)
            .filter(|module| seen.insert(*module))
            .collect()
    }

    /// Every warning attached to any entry
    pub fn warnings(&self) -> impl Iterator<Item = &ResolutionWarning> {
        self.entries.iter().flat_map(|entry| entry.warnings.iter())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the root has no dependencies of this kind
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a graph view of the report for cycle and ordering analysis
    pub fn to_graph(&self) -> ReportGraph {
        ReportGraph::from_report(self)
    }
}

impl fmt::Display for ResolutionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionWarning::TransitiveLookupFailure { module, reason } => {
                write!(f, "could not list dependencies of {}: {}", module, reason)
            }
            ResolutionWarning::ArchiveLookupFailure { package, reason } => {
                write!(f, "could not check {} in the archive: {}", package, reason)
            }
        }
    }
}
