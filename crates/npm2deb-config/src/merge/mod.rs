//! Configuration layering and environment overrides
//!
//! Layers, lowest priority first: built-in defaults, the global
//! `~/.npm2deb/config.toml`, the nearest project `npm2deb.toml` and finally
//! `NPM2DEB_*` environment variables. Files are merged key by key, so a
//! project file setting only `archive.suite` keeps the registry settings of
//! the global file.

use std::collections::HashMap;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use npm2deb_core::error::Npm2DebError;

use crate::toml::{self as config_toml, Npm2DebToml};
use crate::ConfigResult;

/// Project configuration file name
pub const PROJECT_CONFIG_FILE: &str = "npm2deb.toml";

/// Overrides `registry.url`
pub const ENV_REGISTRY: &str = "NPM2DEB_REGISTRY";
/// Overrides `registry.token`
pub const ENV_REGISTRY_TOKEN: &str = "NPM2DEB_REGISTRY_TOKEN";
/// Overrides `archive.suite`
pub const ENV_SUITE: &str = "NPM2DEB_SUITE";

/// Where a configuration layer came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Global config file
    Global(Utf8PathBuf),
    /// Project npm2deb.toml file
    Project(Utf8PathBuf),
    /// Environment variable
    Environment(String),
}

/// Merged configuration together with the layers that contributed to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub config: Npm2DebToml,
    pub sources: Vec<ConfigSource>,
}

/// Main configuration loading interface
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Directory the project search starts from
    cwd: Utf8PathBuf,
    /// Global config file location, if a home directory is known
    global_path: Option<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Create a loader searching upwards from `cwd`
    pub fn new(cwd: Utf8PathBuf) -> Self {
        Self {
            cwd,
            global_path: default_global_path(),
        }
    }

    /// Use a specific global config file instead of the one in the home
    /// directory
    pub fn with_global_path(mut self, path: Option<Utf8PathBuf>) -> Self {
        self.global_path = path;
        self
    }

    /// Find a file in `cwd` or its closest ancestor containing it
    pub fn resolve_config_path(&self, filename: &str) -> Option<Utf8PathBuf> {
        let mut current: Option<&Utf8Path> = Some(self.cwd.as_path());

        while let Some(dir) = current {
            let candidate = dir.join(filename);
            if candidate.is_file() {
                return Some(candidate);
            }
            current = dir.parent();
        }

        None
    }

    /// Global config file location
    pub fn global_path(&self) -> Option<&Utf8Path> {
        self.global_path.as_deref()
    }

    /// Load all layers, reading overrides from the process environment
    pub async fn load(&self) -> ConfigResult<LoadedConfig> {
        self.load_with_env(ConfigLayering::collect_env_overrides()).await
    }

    /// Load all layers with explicit environment overrides
    pub async fn load_with_env(
        &self,
        env_overrides: HashMap<String, String>,
    ) -> ConfigResult<LoadedConfig> {
        let mut layering = ConfigLayering::new();

        if let Some(path) = self.global_path.as_ref().filter(|path| path.is_file()) {
            debug!("Loading global config from {}", path);
            layering.push(config_toml::load_table(path).await?, ConfigSource::Global(path.clone()));
        }

        if let Some(path) = self.resolve_config_path(PROJECT_CONFIG_FILE) {
            debug!("Loading project config from {}", path);
            layering.push(config_toml::load_table(&path).await?, ConfigSource::Project(path));
        }

        layering.finish(&env_overrides)
    }
}

fn default_global_path() -> Option<Utf8PathBuf> {
    let home = dirs::home_dir()?;
    let home = Utf8PathBuf::try_from(home).ok()?;
    Some(home.join(".npm2deb").join("config.toml"))
}

/// Merges configuration layers in priority order
#[derive(Debug, Default)]
pub struct ConfigLayering {
    merged: toml::Table,
    sources: Vec<ConfigSource>,
}

impl ConfigLayering {
    /// Start from the built-in defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a layer over the ones pushed before it
    pub fn push(&mut self, layer: toml::Table, source: ConfigSource) {
        merge_tables(&mut self.merged, layer);
        self.sources.push(source);
    }

    /// Apply environment overrides and validate the result
    pub fn finish(self, env_overrides: &HashMap<String, String>) -> ConfigResult<LoadedConfig> {
        let mut config = config_toml::from_table(self.merged)?;
        let mut sources = self.sources;

        for key in Self::apply_env_overrides(&mut config, env_overrides) {
            sources.push(ConfigSource::Environment(key));
        }
        config_toml::validate_config(&config).map_err(|e| match e {
            Npm2DebError::ConfigValidation { field, reason } => Npm2DebError::ConfigValidation {
                field,
                reason: format!("{} (after environment overrides)", reason),
            },
            other => other,
        })?;

        Ok(LoadedConfig { config, sources })
    }

    /// Apply known `NPM2DEB_*` variables, returning the ones used
    fn apply_env_overrides(
        config: &mut Npm2DebToml,
        overrides: &HashMap<String, String>,
    ) -> Vec<String> {
        let mut applied = Vec::new();

        // Fixed order keeps the reported sources stable
        for key in [ENV_REGISTRY, ENV_REGISTRY_TOKEN, ENV_SUITE] {
            let Some(value) = overrides.get(key) else {
                continue;
            };
            match key {
                ENV_REGISTRY => config.registry.url = value.clone(),
                ENV_REGISTRY_TOKEN => config.registry.token = Some(value.clone()),
                _ => config.archive.suite = value.clone(),
            }
            applied.push(key.to_string());
        }

        applied
    }

    /// Collect `NPM2DEB_*` variables from the process environment
    pub fn collect_env_overrides() -> HashMap<String, String> {
        std::env::vars()
            .filter(|(key, _)| key.starts_with("NPM2DEB_"))
            .collect()
    }
}

/// Recursively merge `overlay` into `base`; tables merge, values replace
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn utf8_dir(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap()
    }

    fn table(content: &str) -> toml::Table {
        config_toml::parse_table(content).unwrap()
    }

    #[test]
    fn test_merge_keeps_unset_keys() {
        let mut layering = ConfigLayering::new();
        layering.push(
            table("[registry]\nurl = \"https://global.example.org\"\nmax-retries = 5\n"),
            ConfigSource::Global(Utf8PathBuf::from("/home/u/.npm2deb/config.toml")),
        );
        layering.push(
            table("[registry]\nmax-retries = 1\n[archive]\nsuite = \"experimental\"\n"),
            ConfigSource::Project(Utf8PathBuf::from("/src/app/npm2deb.toml")),
        );

        let loaded = layering.finish(&HashMap::new()).unwrap();
        assert_eq!(loaded.config.registry.url, "https://global.example.org");
        assert_eq!(loaded.config.registry.max_retries, 1);
        assert_eq!(loaded.config.archive.suite, "experimental");
        assert_eq!(loaded.config.archive.name, "debian");
        assert_eq!(loaded.sources.len(), 2);
    }

    #[test]
    fn test_env_overrides_win() {
        let mut layering = ConfigLayering::new();
        layering.push(
            table("[archive]\nsuite = \"experimental\"\n"),
            ConfigSource::Project(Utf8PathBuf::from("/src/app/npm2deb.toml")),
        );
        let env = HashMap::from([
            (ENV_SUITE.to_string(), "bookworm".to_string()),
            (ENV_REGISTRY_TOKEN.to_string(), "t0ken".to_string()),
            ("NPM2DEB_UNKNOWN".to_string(), "ignored".to_string()),
        ]);

        let loaded = layering.finish(&env).unwrap();
        assert_eq!(loaded.config.archive.suite, "bookworm");
        assert_eq!(loaded.config.registry.token.as_deref(), Some("t0ken"));
        assert_eq!(
            loaded.sources[1..],
            [
                ConfigSource::Environment(ENV_REGISTRY_TOKEN.to_string()),
                ConfigSource::Environment(ENV_SUITE.to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_env_registry_is_rejected() {
        let env = HashMap::from([(ENV_REGISTRY.to_string(), "not a url".to_string())]);
        let err = ConfigLayering::new().finish(&env).unwrap_err();
        match err {
            Npm2DebError::ConfigValidation { field, reason } => {
                assert_eq!(field, "registry.url");
                assert!(reason.contains("environment"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_config_path_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        let root = utf8_dir(&temp_dir);
        let nested = root.join("packages").join("app");
        tokio::fs::create_dir_all(&nested).await.unwrap();
        tokio::fs::write(root.join(PROJECT_CONFIG_FILE), "").await.unwrap();

        let loader = ConfigLoader::new(nested);
        assert_eq!(
            loader.resolve_config_path(PROJECT_CONFIG_FILE),
            Some(root.join(PROJECT_CONFIG_FILE))
        );
        assert_eq!(loader.resolve_config_path("missing.toml"), None);
    }

    #[tokio::test]
    async fn test_load_layers_global_and_project() {
        let temp_dir = TempDir::new().unwrap();
        let root = utf8_dir(&temp_dir);
        let global = root.join("global.toml");
        let project = root.join("project");
        tokio::fs::create_dir_all(&project).await.unwrap();
        let global_toml = "[registry]\ntoken = \"global-token\"\n[resolve]\nrecursive = true\n";
        tokio::fs::write(&global, global_toml).await.unwrap();
        tokio::fs::write(project.join(PROJECT_CONFIG_FILE), "[resolve]\nforce = true\n")
            .await
            .unwrap();

        let loader = ConfigLoader::new(project.clone()).with_global_path(Some(global.clone()));
        let loaded = loader.load_with_env(HashMap::new()).await.unwrap();

        assert_eq!(loaded.config.registry.token.as_deref(), Some("global-token"));
        assert!(loaded.config.resolve.recursive);
        assert!(loaded.config.resolve.force);
        assert_eq!(
            loaded.sources,
            vec![
                ConfigSource::Global(global),
                ConfigSource::Project(project.join(PROJECT_CONFIG_FILE)),
            ]
        );
    }

    #[tokio::test]
    async fn test_load_without_files_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader::new(utf8_dir(&temp_dir)).with_global_path(None);

        let loaded = loader.load_with_env(HashMap::new()).await.unwrap();
        assert_eq!(loaded.config, Npm2DebToml::default());
        assert!(loaded.sources.is_empty());
    }

    #[tokio::test]
    async fn test_load_reports_broken_project_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = utf8_dir(&temp_dir);
        tokio::fs::write(root.join(PROJECT_CONFIG_FILE), "[archive]\nsuite = \n").await.unwrap();

        let loader = ConfigLoader::new(root).with_global_path(None);
        let err = loader.load_with_env(HashMap::new()).await.unwrap_err();
        assert!(matches!(err, Npm2DebError::TomlParse { .. }));
    }

    #[test]
    fn test_collect_env_overrides() {
        std::env::set_var("NPM2DEB_COLLECT_TEST", "1");
        std::env::set_var("NOT_NPM2DEB_COLLECT_TEST", "1");

        let overrides = ConfigLayering::collect_env_overrides();
        assert!(overrides.contains_key("NPM2DEB_COLLECT_TEST"));
        assert!(!overrides.contains_key("NOT_NPM2DEB_COLLECT_TEST"));

        std::env::remove_var("NPM2DEB_COLLECT_TEST");
        std::env::remove_var("NOT_NPM2DEB_COLLECT_TEST");
    }
}
