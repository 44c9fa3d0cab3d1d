//! Command implementations and dispatch logic.
//!
//! Each command is an async function taking a `CommandContext`. The context is
//! generic over the registry and archive so commands run unchanged against
//! in-memory fixtures.

use std::time::Duration;

use camino::Utf8PathBuf;
use tracing::{debug, info};

use npm2deb_archive::{ArchiveLookup, DebianArchive};
use npm2deb_config::{ConfigLoader, Npm2DebToml, RegistrySection};
use npm2deb_core::error::{Npm2DebError, Npm2DebResult};
use npm2deb_registry::{AuthConfig, RegistryClient, RegistrySource, RetryConfig};

pub mod depends;
pub mod rdepends;
pub mod search;


use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext<R = RegistryClient, A = DebianArchive> {
    pub config: Npm2DebToml,
    pub output: OutputHandler,
    pub registry: R,
    pub archive: A,
}

impl CommandContext {
    /// Load the configuration and build the real collaborators
    pub async fn new() -> Npm2DebResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| Npm2DebError::io("Failed to get current directory".to_string(), e))?;
        let cwd = Utf8PathBuf::try_from(cwd).map_err(|e| Npm2DebError::ConfigValidation {
            field: "cwd".to_string(),
            reason: format!("Current directory is not valid UTF-8: {}", e),
        })?;

        let loaded = ConfigLoader::new(cwd).load().await?;
        for source in &loaded.sources {
            debug!("Configuration layer: {:?}", source);
        }
        let config = loaded.config;

        let registry = registry_client(&config.registry)?;
        let archive = DebianArchive::new(config.archive.name.clone(), config.archive.suite.clone())
            .with_tools(config.archive.madison.clone(), config.archive.apt_cache.clone());

        Ok(Self {
            config,
            output: OutputHandler::new(),
            registry,
            archive,
        })
    }
}

fn registry_client(section: &RegistrySection) -> Npm2DebResult<RegistryClient> {
    let auth = section.token.clone().map(|token| AuthConfig {
        token: Some(token),
        ..AuthConfig::default()
    });
    let retry = RetryConfig {
        max_retries: section.max_retries,
        ..RetryConfig::default()
    };

    let timeout = Duration::from_secs(section.timeout_secs);
    RegistryClient::with_options(&section.url, auth, retry, timeout)
}

/// Dispatch a command to its handler
pub async fn dispatch_command<R, A>(
    command: Commands,
    ctx: &CommandContext<R, A>,
) -> Npm2DebResult<()>
where
    R: RegistrySource,
    A: ArchiveLookup,
{
    match command {
        Commands::Depends {
            module,
            recursive,
            no_recursive,
            force,
            no_force,
            binary,
            builddep,
            json,
        } => {
            info!("Showing dependencies of {}", module);
            let options = depends::DependsOptions {
                recursive: flag_or_default(recursive, no_recursive, ctx.config.resolve.recursive),
                force: flag_or_default(force, no_force, ctx.config.resolve.force),
                binary,
                builddep,
                json,
            };
            depends::execute(&module, options, ctx).await
        }
        Commands::Rdepends { module } => {
            info!("Showing reverse dependencies of {}", module);
            rdepends::execute(&module, ctx).await
        }
        Commands::Search { module } => {
            info!("Searching Debian for {}", module);
            search::execute(&module, ctx).await
        }
    }
}

/// An explicit flag or its `--no-` form beats the configured default
pub(crate) fn flag_or_default(on: bool, off: bool, configured: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        configured
    }
}
