//! npm2deb.toml parsing and validation

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use npm2deb_core::error::Npm2DebError;

use crate::ConfigResult;

/// Registry queried when no configuration says otherwise
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Complete npm2deb.toml configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Npm2DebToml {
    #[serde(default)]
    pub registry: RegistrySection,

    #[serde(default)]
    pub archive: ArchiveSection,

    #[serde(default)]
    pub resolve: ResolveSection,
}

/// npm registry access
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RegistrySection {
    /// Registry base URL
    pub url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Retries after the first failed attempt
    pub max_retries: u32,

    /// Bearer token for private registries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for RegistrySection {
    fn default() -> Self {
        Self {
            url: DEFAULT_REGISTRY_URL.to_string(),
            timeout_secs: 30,
            max_retries: 3,
            token: None,
        }
    }
}

/// Debian archive queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ArchiveSection {
    /// Archive passed to `rmadison -u`
    pub name: String,

    /// Suite whose version is reported
    pub suite: String,

    /// Madison client executable
    pub madison: String,

    /// apt-cache executable
    pub apt_cache: String,
}

impl Default for ArchiveSection {
    fn default() -> Self {
        Self {
            name: "debian".to_string(),
            suite: "unstable".to_string(),
            madison: "rmadison".to_string(),
            apt_cache: "apt-cache".to_string(),
        }
    }
}

/// Defaults for `depends` when the flags are not given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveSection {
    pub recursive: bool,
    pub force: bool,
}

/// Parse an npm2deb.toml document into a raw table.
///
/// Layering works on raw tables so a file only overrides the keys it sets.
pub fn parse_table(content: &str) -> ConfigResult<toml::Table> {
    toml::from_str(content).map_err(|e| Npm2DebError::TomlParse {
        message: format!("TOML syntax error: {}", e),
    })
}

/// Build a configuration from a merged table and validate it
pub fn from_table(table: toml::Table) -> ConfigResult<Npm2DebToml> {
    let config: Npm2DebToml = toml::Value::Table(table)
        .try_into()
        .map_err(|e| Npm2DebError::TomlParse {
            message: format!("TOML parsing error: {}", e),
        })?;

    validate_config(&config)?;
    Ok(config)
}

/// Parse an npm2deb.toml document
pub fn parse_npm2deb_toml(content: &str) -> ConfigResult<Npm2DebToml> {
    from_table(parse_table(content)?)
}

/// Serialize a configuration back to TOML
pub fn serialize_npm2deb_toml(config: &Npm2DebToml) -> ConfigResult<String> {
    toml::to_string_pretty(config).map_err(|e| Npm2DebError::TomlParse {
        message: format!("TOML serialization error: {}", e),
    })
}

/// Validate configuration values
pub fn validate_config(config: &Npm2DebToml) -> ConfigResult<()> {
    let registry =
        url::Url::parse(&config.registry.url).map_err(|e| Npm2DebError::ConfigValidation {
            field: "registry.url".to_string(),
            reason: format!("'{}' is not a valid URL: {}", config.registry.url, e),
        })?;
    if !matches!(registry.scheme(), "http" | "https") {
        return Err(Npm2DebError::ConfigValidation {
            field: "registry.url".to_string(),
            reason: format!("unsupported scheme '{}', expected http or https", registry.scheme()),
        });
    }

    if config.registry.timeout_secs == 0 {
        return Err(Npm2DebError::ConfigValidation {
            field: "registry.timeout-secs".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let tools = [
        ("archive.name", &config.archive.name),
        ("archive.suite", &config.archive.suite),
        ("archive.madison", &config.archive.madison),
        ("archive.apt-cache", &config.archive.apt_cache),
    ];
    for (field, value) in tools {
        if value.trim().is_empty() {
            return Err(Npm2DebError::ConfigValidation {
                field: field.to_string(),
                reason: "must not be empty".to_string(),
            });
        }
    }

    Ok(())
}

/// Read a file into a raw table, naming the file in errors
pub async fn load_table(path: &Utf8Path) -> ConfigResult<toml::Table> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Npm2DebError::io(format!("Failed to read {}", path), e))?;

    parse_table(&content).map_err(|e| match e {
        Npm2DebError::TomlParse { message } => Npm2DebError::TomlParse {
            message: format!("In file {}: {}", path, message),
        },
        other => other,
    })
}

/// Load and validate a single npm2deb.toml file
pub async fn load_from_file(path: &Utf8Path) -> ConfigResult<Npm2DebToml> {
    from_table(load_table(path).await?)
}
