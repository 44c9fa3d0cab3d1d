//! HTTP client implementation with connection pooling and retry logic

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use tracing::{debug, warn};
use url::Url;

use npm2deb_core::error::Npm2DebError;
use npm2deb_core::types::{DependencyKind, ModuleName};

use crate::api::PackageMetadataResponse;
use crate::cache::MetadataCache;
use crate::source::RegistrySource;
use crate::RegistryResult;

/// Public npm registry
pub const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org";

/// Configuration for exponential backoff retry logic
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Initial delay before first retry
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            multiplier: 2.0,
        }
    }
}

/// Authentication configuration for registry access
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// Bearer token for authentication
    pub token: Option<String>,
    /// Basic auth username
    pub username: Option<String>,
    /// Basic auth password
    pub password: Option<String>,
}

/// HTTP client for the npm registry
#[derive(Debug, Clone)]
pub struct RegistryClient {
    /// Underlying HTTP client with connection pooling
    client: Client,
    /// Retry configuration
    retry_config: RetryConfig,
    /// Base registry URL, without trailing slash
    base_url: String,
    /// Metadata documents fetched so far
    cache: Arc<MetadataCache>,
}

impl RegistryClient {
    /// Create a client for the public npm registry
    pub fn new() -> RegistryResult<Self> {
        Self::with_options(DEFAULT_REGISTRY, None, RetryConfig::default(), Duration::from_secs(30))
    }

    /// Create a client for the public npm registry with authentication
    pub fn with_auth(auth: AuthConfig) -> RegistryResult<Self> {
        Self::with_options(
            DEFAULT_REGISTRY,
            Some(auth),
            RetryConfig::default(),
            Duration::from_secs(30),
        )
    }

    /// Create a client with full configuration
    pub fn with_options(
        base_url: &str,
        auth: Option<AuthConfig>,
        retry_config: RetryConfig,
        timeout: Duration,
    ) -> RegistryResult<Self> {
        let parsed = Url::parse(base_url).map_err(|e| Npm2DebError::ConfigValidation {
            field: "registry.url".to_string(),
            reason: format!("'{}' is not a valid URL: {}", base_url, e),
        })?;

        let mut builder = ClientBuilder::new()
            .pool_max_idle_per_host(16)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(timeout)
            .gzip(true)
            .user_agent(concat!("npm2deb/", env!("CARGO_PKG_VERSION")));

        if let Some(header) = auth.and_then(|auth| Self::authorization_header(&auth)) {
            let value = header
                .parse::<reqwest::header::HeaderValue>()
                .map_err(|e| Npm2DebError::network("Invalid registry credentials".to_string(), e))?;
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(reqwest::header::AUTHORIZATION, value);
            builder = builder.default_headers(headers);
        }

        let client = builder
            .build()
            .map_err(|e| Npm2DebError::network("Failed to create HTTP client".to_string(), e))?;

        Ok(Self {
            client,
            retry_config,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            cache: Arc::new(MetadataCache::new()),
        })
    }

    /// Build the Authorization header value, bearer token first
    fn authorization_header(auth: &AuthConfig) -> Option<String> {
        if let Some(token) = &auth.token {
            return Some(format!("Bearer {}", token));
        }

        match (&auth.username, &auth.password) {
            (Some(username), Some(password)) => {
                use base64::{engine::general_purpose, Engine as _};
                let encoded =
                    general_purpose::STANDARD.encode(format!("{}:{}", username, password));
                Some(format!("Basic {}", encoded))
            }
            _ => None,
        }
    }

    /// Registry base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Shared metadata cache
    pub fn cache(&self) -> &MetadataCache {
        &self.cache
    }

    /// Execute a request with exponential backoff retry logic
    async fn with_retry<F, Fut, T>(&self, operation: F) -> RegistryResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = RegistryResult<T>>,
    {
        let mut delay = self.retry_config.initial_delay;
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(error) => {
                    // A missing module stays missing
                    if !error.is_recoverable() || attempt >= self.retry_config.max_retries {
                        return Err(error);
                    }

                    attempt += 1;
                    warn!("Registry request failed (attempt {}), retrying: {}", attempt, error);
                    tokio::time::sleep(delay).await;

                    delay = std::cmp::min(
                        Duration::from_millis(
                            (delay.as_millis() as f64 * self.retry_config.multiplier) as u64,
                        ),
                        self.retry_config.max_delay,
                    );
                }
            }
        }
    }

    /// Fetch package metadata, consulting the cache first
    pub async fn fetch_metadata(
        &self,
        module: &ModuleName,
    ) -> RegistryResult<PackageMetadataResponse> {
        if let Some(cached) = self.cache.get(module.as_str()) {
            debug!("Registry cache hit for {}", module);
            return Ok(cached);
        }

        let url = format!("{}/{}", self.base_url, Self::encode_package_name(module.as_str()));
        debug!("Fetching {}", url);

        let metadata = self
            .with_retry(|| async {
                let response = self
                    .client
                    .get(&url)
                    .header("Accept", "application/vnd.npm.install-v1+json")
                    .send()
                    .await
                    .map_err(|e| Npm2DebError::network(format!("Failed to fetch {}", module), e))?;

                match response.status() {
                    reqwest::StatusCode::OK => response
                        .json::<PackageMetadataResponse>()
                        .await
                        .map_err(|e| {
                            let message = format!("Failed to parse metadata for {}", module);
                            Npm2DebError::network(message, e)
                        }),
                    reqwest::StatusCode::NOT_FOUND => Err(Npm2DebError::ModuleNotFound {
                        name: module.to_string(),
                    }),
                    status => Err(Npm2DebError::Network {
                        message: format!("Registry returned status {} for {}", status, module),
                        source: None,
                    }),
                }
            })
            .await?;

        self.cache.insert(module.to_string(), metadata.clone());
        Ok(metadata)
    }

    /// Encode package name for URL (handle scoped packages)
    fn encode_package_name(name: &str) -> String {
        if name.starts_with('@') {
            // Scoped package: @org/pkg -> @org%2fpkg
            name.replace('/', "%2f")
        } else {
            name.to_string()
        }
    }
}

#[async_trait]
impl RegistrySource for RegistryClient {
    async fn dependencies(
        &self,
        module: &ModuleName,
        kind: DependencyKind,
    ) -> RegistryResult<Vec<ModuleName>> {
        let metadata = self.fetch_metadata(module).await?;

        // Fully unpublished modules keep a document but lose every version
        let latest = metadata.latest().ok_or_else(|| Npm2DebError::ModuleNotFound {
            name: module.to_string(),
        })?;

        let mut names = Vec::new();
        for raw in latest.dependency_names(kind) {
            match ModuleName::parse(raw) {
                Ok(name) => names.push(name),
                Err(e) => warn!("Skipping {} of {}: {}", kind.manifest_field(), module, e),
            }
        }

        debug!("{} has {} {} dependencies", module, names.len(), kind);
        Ok(names)
    }
}
