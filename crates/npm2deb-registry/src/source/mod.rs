//! The registry seam consumed by the resolver
//!
//! `RegistrySource` is the only thing the resolution engine knows about the
//! registry. `RegistryClient` implements it over HTTP; `StaticRegistry` holds
//! a fixed in-memory graph for tests and benchmarks.

use std::collections::HashMap;

use async_trait::async_trait;

use npm2deb_core::error::Npm2DebError;
use npm2deb_core::types::{DependencyKind, ModuleName};

use crate::RegistryResult;

/// Source of direct dependency lists for registry modules
#[async_trait]
pub trait RegistrySource: Send + Sync {
    /// Direct dependencies of `module` of the given kind, in registry order.
    ///
    /// Fails with `ModuleNotFound` when the registry has no such module.
    async fn dependencies(
        &self,
        module: &ModuleName,
        kind: DependencyKind,
    ) -> RegistryResult<Vec<ModuleName>>;
}

/// In-memory registry snapshot
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    modules: HashMap<ModuleName, StaticModule>,
}

#[derive(Debug, Clone, Default)]
struct StaticModule {
    runtime: Vec<ModuleName>,
    build: Vec<ModuleName>,
}

impl StaticRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a module with no dependencies
    pub fn module(mut self, name: ModuleName) -> Self {
        self.modules.entry(name).or_default();
        self
    }

    /// Publish `from` with an additional runtime dependency on `to`.
    ///
    /// Only `from` is published; `to` stays missing until added itself.
    pub fn depends(self, from: ModuleName, to: ModuleName) -> Self {
        self.edge(from, to, DependencyKind::Runtime)
    }

    /// Publish `from` with an additional build dependency on `to`
    pub fn build_depends(self, from: ModuleName, to: ModuleName) -> Self {
        self.edge(from, to, DependencyKind::Build)
    }

    /// Add a dependency of the given kind
    pub fn edge(mut self, from: ModuleName, to: ModuleName, kind: DependencyKind) -> Self {
        let module = self.modules.entry(from).or_default();
        match kind {
            DependencyKind::Runtime => module.runtime.push(to),
            DependencyKind::Build => module.build.push(to),
        }
        self
    }

    /// Number of published modules
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Check if nothing is published
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[async_trait]
impl RegistrySource for StaticRegistry {
    async fn dependencies(
        &self,
        module: &ModuleName,
        kind: DependencyKind,
    ) -> RegistryResult<Vec<ModuleName>> {
        let entry = self
            .modules
            .get(module)
            .ok_or_else(|| Npm2DebError::ModuleNotFound {
                name: module.to_string(),
            })?;

        Ok(match kind {
            DependencyKind::Runtime => entry.runtime.clone(),
            DependencyKind::Build => entry.build.clone(),
        })
    }
}

#[async_trait]
impl<'a, T: RegistrySource> RegistrySource for &'a T {
    async fn dependencies(
        &self,
        module: &ModuleName,
        kind: DependencyKind,
    ) -> RegistryResult<Vec<ModuleName>> {
        (**self).dependencies(module, kind).await
    }
}
