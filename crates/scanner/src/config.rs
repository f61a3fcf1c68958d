use std::fmt;

use url::Url;

use crate::ConfigError;

/// Env var holding the node provider API key.
pub const API_KEY_ENV: &str = "ETH_API_KEY";

/// Env var overriding [`DEFAULT_PROVIDER_HOST`].
pub const PROVIDER_HOST_ENV: &str = "ETH_PROVIDER_HOST";

/// Provider host used when none is configured.
pub const DEFAULT_PROVIDER_HOST: &str = "go.getblock.io";

/// Where to reach the node.
#[derive(Clone, PartialEq, Eq)]
pub struct ScanConfig {
    api_key: String,
    provider_host: String,
}

impl ScanConfig {
    /// Creates a config for the default provider host.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }

        Ok(Self { api_key, provider_host: DEFAULT_PROVIDER_HOST.to_string() })
    }

    /// Reads the config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the config through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey(API_KEY_ENV))?;
        let config = Self::new(api_key)?;

        Ok(match lookup(PROVIDER_HOST_ENV) {
            Some(host) if !host.trim().is_empty() => config.with_provider_host(host),
            _ => config,
        })
    }

    /// Sets the provider host, e.g. `go.getblock.io`.
    pub fn with_provider_host(mut self, host: impl Into<String>) -> Self {
        self.provider_host = host.into();
        self
    }

    /// Returns the host the RPC url points at.
    pub fn provider_host(&self) -> &str {
        &self.provider_host
    }

    /// Returns `https://<provider-host>/<api-key>`.
    pub fn rpc_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&format!("https://{}/{}", self.provider_host, self.api_key))?;

        Ok(url)
    }
}

impl fmt::Debug for ScanConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanConfig")
            .field("api_key", &"<redacted>")
            .field("provider_host", &self.provider_host)
            .finish()
    }
}
