//! Configuration for the platform client.

use platform_core::PlatformError;
use std::env;
use std::time::Duration;

/// Configuration for [`crate::StreamClient`].
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Platform API base URL.
    pub base_url: String,

    /// Public API key (also echoed by the platform in the
    /// `x-api-key` webhook header).
    pub api_key: String,

    /// Shared secret: signs webhook payloads and user tokens.
    pub api_secret: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://video.stream-io-api.com".to_string(),
            api_key: String::new(),
            api_secret: String::new(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl StreamConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `STREAM_API_KEY` - public API key
    /// - `STREAM_API_SECRET` - shared signing secret
    ///
    /// Optional environment variables:
    /// - `STREAM_BASE_URL` - API base URL (default: https://video.stream-io-api.com)
    /// - `STREAM_TIMEOUT_SECS` - request timeout seconds (default: 10)
    pub fn from_env() -> Result<Self, PlatformError> {
        let api_key = env::var("STREAM_API_KEY")
            .map_err(|_| PlatformError::Configuration("STREAM_API_KEY not set".to_string()))?;

        let api_secret = env::var("STREAM_API_SECRET")
            .map_err(|_| PlatformError::Configuration("STREAM_API_SECRET not set".to_string()))?;

        let base_url = env::var("STREAM_BASE_URL")
            .unwrap_or_else(|_| "https://video.stream-io-api.com".to_string());

        let timeout = env::var("STREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(10));

        Ok(Self {
            base_url,
            api_key,
            api_secret,
            timeout,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> StreamConfigBuilder {
        StreamConfigBuilder::default()
    }
}

/// Builder for [`StreamConfig`].
#[derive(Debug, Default)]
pub struct StreamConfigBuilder {
    config: StreamConfig,
}

impl StreamConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the signing secret.
    pub fn api_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.api_secret = secret.into();
        self
    }

    /// Set the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> StreamConfig {
        self.config
    }
}
