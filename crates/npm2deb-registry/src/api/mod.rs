//! npm registry API response types
//!
//! Only the fields of the abbreviated ("corgi") metadata document that
//! npm2deb reads are modelled. Dependency maps use `IndexMap` so the order
//! published by the module author survives deserialization.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use npm2deb_core::types::DependencyKind;

/// Package metadata response from npm registry
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PackageMetadataResponse {
    /// Package name
    pub name: String,
    /// Package description
    #[serde(default)]
    pub description: Option<String>,
    /// Tags such as "latest" mapped to versions
    #[serde(rename = "dist-tags", default)]
    pub dist_tags: HashMap<String, String>,
    /// All versions metadata
    #[serde(default)]
    pub versions: HashMap<String, VersionMetadata>,
}

/// Metadata for a specific package version
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VersionMetadata {
    /// Version string
    pub version: String,
    /// Runtime dependencies, name to range
    #[serde(default)]
    pub dependencies: IndexMap<String, String>,
    /// Dev dependencies, name to range
    #[serde(rename = "devDependencies", default)]
    pub dev_dependencies: IndexMap<String, String>,
    /// Deprecation notice, if any
    #[serde(default)]
    pub deprecated: Option<String>,
}

impl PackageMetadataResponse {
    /// Metadata of the version the "latest" dist-tag points at
    pub fn latest(&self) -> Option<&VersionMetadata> {
        let latest = self.dist_tags.get("latest")?;
        self.versions.get(latest)
    }
}

impl VersionMetadata {
    /// Dependency names of the given kind, in published order
    pub fn dependency_names(&self, kind: DependencyKind) -> impl Iterator<Item = &str> {
        let map = match kind {
            DependencyKind::Runtime => &self.dependencies,
            DependencyKind::Build => &self.dev_dependencies,
        };
        map.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "name": "left-pad",
        "dist-tags": { "latest": "1.3.0" },
        "versions": {
            "1.2.0": { "version": "1.2.0" },
            "1.3.0": {
                "version": "1.3.0",
                "dependencies": { "zeta": "^1.0.0", "alpha": "~2.1.0", "mid": "*" },
                "devDependencies": { "tap": "^12.0.0" }
            }
        }
    }"#;

    #[test]
    fn test_latest_version() {
        let metadata: PackageMetadataResponse = serde_json::from_str(DOCUMENT).unwrap();
        let latest = metadata.latest().unwrap();
        assert_eq!(latest.version, "1.3.0");
    }

    #[test]
    fn test_dependency_order_is_preserved() {
        let metadata: PackageMetadataResponse = serde_json::from_str(DOCUMENT).unwrap();
        let latest = metadata.latest().unwrap();

        let runtime: Vec<_> = latest.dependency_names(DependencyKind::Runtime).collect();
        assert_eq!(runtime, vec!["zeta", "alpha", "mid"]);

        let build: Vec<_> = latest.dependency_names(DependencyKind::Build).collect();
        assert_eq!(build, vec!["tap"]);
    }

    #[test]
    fn test_missing_latest_tag() {
        let metadata: PackageMetadataResponse =
            serde_json::from_str(r#"{ "name": "gone", "versions": {} }"#).unwrap();
        assert!(metadata.latest().is_none());
    }
}
