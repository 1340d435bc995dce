//! Client configuration types.
//!
//! [`ClientConfig`] tunes the transport (timeouts, pooling).
//! [`BackendConfig`] adds what the executor needs: the backend base URL and
//! the default headers. Both have builders; [`BackendConfig::from_env`] reads
//! the deployment settings from the environment.

use std::time::Duration;

use derive_more::{Display, Error};
use url::Url;

/// Environment variable holding the backend base URL.
pub const BACKEND_URL_ENV: &str = "KONTHOKOSH_BACKEND_URL";

/// Environment variable holding the request timeout in milliseconds.
pub const TIMEOUT_MS_ENV: &str = "KONTHOKOSH_TIMEOUT_MS";

/// Configuration for the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Whole-request timeout (connect, headers and body).
    pub timeout: Duration,
    /// Connection timeout duration.
    pub connect_timeout: Duration,
    /// Maximum idle connections per host.
    pub pool_idle_per_host: usize,
    /// Idle connection timeout.
    pub pool_idle_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    pool_idle_per_host: Option<usize>,
    pool_idle_timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Set the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub const fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.pool_idle_per_host = Some(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            timeout: self.timeout.unwrap_or(defaults.timeout),
            connect_timeout: self.connect_timeout.unwrap_or(defaults.connect_timeout),
            pool_idle_per_host: self
                .pool_idle_per_host
                .unwrap_or(defaults.pool_idle_per_host),
            pool_idle_timeout: self.pool_idle_timeout.unwrap_or(defaults.pool_idle_timeout),
        }
    }
}

/// Configuration loading failures.
#[derive(Debug, Display, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[display("missing required environment variable: {_0}")]
    MissingVar(#[error(not(source))] &'static str),

    /// The base URL does not parse.
    #[display("invalid backend URL '{value}': {source}")]
    InvalidUrl {
        /// The rejected value.
        value: String,
        /// Parse failure.
        source: url::ParseError,
    },

    /// The timeout is not a positive integer.
    #[display("invalid {TIMEOUT_MS_ENV} value '{_0}'")]
    InvalidTimeout(#[error(not(source))] String),
}

/// Everything needed to talk to one backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL every request path is resolved against.
    pub base_url: Url,
    /// Headers applied to every request before per-call overrides.
    pub default_headers: Vec<(String, String)>,
    /// Transport settings.
    pub client: ClientConfig,
}

impl BackendConfig {
    /// Defaults for `base_url`: JSON `Accept` and `Content-Type` headers,
    /// 30 second timeout.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            default_headers: default_headers(),
            client: ClientConfig::default(),
        }
    }

    /// Parse `base_url` and apply defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the URL does not parse.
    pub fn parse(base_url: &str) -> Result<Self, ConfigError> {
        Url::parse(base_url)
            .map(Self::new)
            .map_err(|source| ConfigError::InvalidUrl {
                value: base_url.to_string(),
                source,
            })
    }

    /// Load from the process environment.
    ///
    /// Reads [`BACKEND_URL_ENV`] (required) and [`TIMEOUT_MS_ENV`] (optional).
    ///
    /// # Errors
    ///
    /// See [`BackendConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key/value source.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is missing or invalid, or when the
    /// timeout is not a positive number of milliseconds.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(BACKEND_URL_ENV)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingVar(BACKEND_URL_ENV))?;
        let mut config = Self::parse(base_url.trim())?;

        if let Some(raw) = lookup(TIMEOUT_MS_ENV) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|millis| *millis > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout(raw.clone()))?;
            config.client.timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.client.timeout = timeout;
        self
    }

    /// Replace the transport settings.
    #[must_use]
    pub fn client_config(mut self, client: ClientConfig) -> Self {
        self.client = client;
        self
    }

    /// Add a default header.
    #[must_use]
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Drop all default headers.
    #[must_use]
    pub fn without_default_headers(mut self) -> Self {
        self.default_headers.clear();
        self
    }
}

fn default_headers() -> Vec<(String, String)> {
    vec![
        ("Accept".to_string(), "application/json".to_string()),
        ("Content-Type".to_string(), "application/json".to_string()),
    ]
}
