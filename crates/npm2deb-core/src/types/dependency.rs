//! Dependency edge types.
//!
//! Defines the directed edges discovered while walking the registry graph.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ModuleName;

/// Type of dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    /// Runtime dependency (npm `dependencies`)
    Runtime,
    /// Build dependency (npm `devDependencies`)
    Build,
}

/// Directed dependency between two modules.
///
/// Identity is the full `(from, to, kind)` triple; two edges that agree on all
/// three are the same edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub from: ModuleName,
    pub to: ModuleName,
    pub kind: DependencyKind,
}

impl DependencyKind {
    /// Check if this dependency is needed at runtime
    pub fn is_runtime(&self) -> bool {
        matches!(self, DependencyKind::Runtime)
    }

    /// Check if this dependency is only needed to build
    pub fn is_build(&self) -> bool {
        matches!(self, DependencyKind::Build)
    }

    /// Field name used for this kind in package.json
    pub fn manifest_field(&self) -> &'static str {
        match self {
            DependencyKind::Runtime => "dependencies",
            DependencyKind::Build => "devDependencies",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyKind::Runtime => f.write_str("runtime"),
            DependencyKind::Build => f.write_str("build"),
        }
    }
}

impl DependencyEdge {
    /// Create a new dependency edge
    pub fn new(from: ModuleName, to: ModuleName, kind: DependencyKind) -> Self {
        Self { from, to, kind }
    }

    /// Check if the edge points back at its own source
    pub fn is_self_edge(&self) -> bool {
        self.from == self.to
    }
}

impl fmt::Display for DependencyEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.from, self.to, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn name(s: &str) -> ModuleName {
        ModuleName::parse(s).unwrap()
    }

    #[test]
    fn test_dependency_kinds() {
        assert!(DependencyKind::Runtime.is_runtime());
        assert!(!DependencyKind::Runtime.is_build());
        assert!(DependencyKind::Build.is_build());
        assert_eq!(DependencyKind::Runtime.manifest_field(), "dependencies");
        assert_eq!(DependencyKind::Build.manifest_field(), "devDependencies");
    }

    #[test]
    fn test_edge_identity_collapses_duplicates() {
        let mut edges = HashSet::new();
        edges.insert(DependencyEdge::new(name("a"), name("b"), DependencyKind::Runtime));
        edges.insert(DependencyEdge::new(name("a"), name("b"), DependencyKind::Runtime));
        edges.insert(DependencyEdge::new(name("a"), name("b"), DependencyKind::Build));

        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn test_self_edge() {
        let edge = DependencyEdge::new(name("a"), name("a"), DependencyKind::Runtime);
        assert!(edge.is_self_edge());
        assert_eq!(edge.to_string(), "a -> a (runtime)");
    }
}
