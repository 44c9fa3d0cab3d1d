//! Graph view of a dependency report using petgraph
//!
//! Answers the questions a packager asks after reading a report: which
//! modules form cycles, and in which order the missing modules have to be
//! packaged so every package's dependencies are in the archive first.

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use npm2deb_core::types::{ArchiveStatus, DependencyKind, ModuleName};

use crate::report::DependencyReport;

/// Node of the report graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleNode {
    pub name: ModuleName,
    /// Archive status; `None` for the root, which is never looked up
    pub status: Option<ArchiveStatus>,
}

/// Directed module graph built from a report
#[derive(Debug)]
pub struct ReportGraph {
    graph: DiGraph<ModuleNode, DependencyKind>,
    node_map: HashMap<ModuleName, NodeIndex>,
}

impl ReportGraph {
    /// Build the graph from a report's entries
    pub fn from_report(report: &DependencyReport) -> Self {
        let mut graph = Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        };

        graph.add_module(report.root().clone(), None);
        for entry in report.entries() {
            let from = graph.add_module(entry.edge.from.clone(), None);
            let to = graph.add_module(entry.edge.to.clone(), Some(entry.status.clone()));
            if graph.graph.find_edge(from, to).is_none() {
                graph.graph.add_edge(from, to, entry.edge.kind);
            }
        }

        graph
    }

    /// Add a module or refine the status of an existing one.
    ///
    /// A module seen as `NotPackaged` anywhere stays `NotPackaged`.
    fn add_module(&mut self, name: ModuleName, status: Option<ArchiveStatus>) -> NodeIndex {
        if let Some(&index) = self.node_map.get(&name) {
            let node = &mut self.graph[index];
            let refine = matches!(
                (&node.status, &status),
                (None, Some(_))
                    | (Some(ArchiveStatus::Packaged(_)), Some(ArchiveStatus::NotPackaged))
            );
            if refine {
                node.status = status;
            }
            return index;
        }

        let index = self.graph.add_node(ModuleNode {
            name: name.clone(),
            status,
        });
        self.node_map.insert(name, index);
        index
    }

    /// Get a module node by name
    pub fn module(&self, name: &ModuleName) -> Option<&ModuleNode> {
        let index = self.node_map.get(name)?;
        self.graph.node_weight(*index)
    }

    /// Number of modules in the graph
    pub fn module_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct dependencies in the graph
    pub fn dependency_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Dependency cycles, each sorted by name.
    ///
    /// A cycle is a strongly connected component with more than one module,
    /// or a single module depending on itself.
    pub fn cycles(&self) -> Vec<Vec<ModuleName>> {
        tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || self.graph.find_edge(scc[0], scc[0]).is_some())
            .map(|scc| self.sorted_names(&scc))
            .collect()
    }

    /// Modules still to be packaged, dependencies before dependents.
    ///
    /// Members of one group depend on each other and have to be packaged
    /// together. The root is included since it is the module being
    /// packaged.
    pub fn packaging_order(&self) -> Vec<Vec<ModuleName>> {
        // tarjan_scc yields components in reverse topological order
        tarjan_scc(&self.graph)
            .into_iter()
            .map(|scc| {
                let missing: Vec<NodeIndex> = scc
                    .into_iter()
                    .filter(|&index| {
                        !matches!(self.graph[index].status, Some(ArchiveStatus::Packaged(_)))
                    })
                    .collect();
                self.sorted_names(&missing)
            })
            .filter(|group| !group.is_empty())
            .collect()
    }

    fn sorted_names(&self, indices: &[NodeIndex]) -> Vec<ModuleName> {
        let mut names: Vec<ModuleName> = indices
            .iter()
            .map(|&index| self.graph[index].name.clone())
            .collect();
        names.sort();
        names
    }

    /// Format a cycle as "a -> b -> a"
    pub fn format_cycle(cycle: &[ModuleName]) -> String {
        match cycle.first() {
            None => "No cycle".to_string(),
            Some(first) => {
                let mut names: Vec<&str> = cycle.iter().map(ModuleName::as_str).collect();
                names.push(first.as_str());
                names.join(" -> ")
            }
        }
    }
}
