//! Client configuration
//!
//! [`ClientOptions`] holds caller overrides; [`ClientConfig::resolve`] turns
//! them into the immutable settings a client runs with, filling defaults and
//! looking up the credential in the environment when none was given.

use crate::errors::{DatagenError, Result};
use std::time::Duration;

/// Environment variable consulted for the API key
pub const API_KEY_ENV: &str = "DATAGEN_API_KEY";

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Default per-request timeout (30 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default backoff base (500 milliseconds)
pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(500);

/// Optional overrides for every client setting
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
    pub retries: Option<u32>,
    pub backoff: Option<Duration>,
}

impl ClientOptions {
    /// Options with only the API key set
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }
}

/// Resolved, immutable client settings
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    timeout: Duration,
    retries: u32,
    backoff: Duration,
}

impl ClientConfig {
    /// Resolve options against the process environment
    pub fn from_options(options: ClientOptions) -> Result<Self> {
        Self::resolve(options, |name| std::env::var(name).ok())
    }

    /// Resolve options, reading environment variables through `lookup`
    ///
    /// Fails with [`DatagenError::Auth`] when neither the options nor the
    /// environment provide a non-empty API key.
    pub fn resolve<F>(options: ClientOptions, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = options
            .api_key
            .filter(|key| !key.is_empty())
            .or_else(|| lookup(API_KEY_ENV).filter(|key| !key.is_empty()))
            .ok_or_else(|| {
                DatagenError::Auth(format!(
                    "API key missing. Set {} or pass api_key.",
                    API_KEY_ENV
                ))
            })?;

        let base_url = options
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            base_url: normalize_base_url(&base_url),
            timeout: options.timeout.unwrap_or(DEFAULT_TIMEOUT),
            retries: options.retries.unwrap_or(0),
            backoff: options.backoff.unwrap_or(DEFAULT_BACKOFF),
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Extra attempts after the first; 0 disables retrying
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Delay before the first retry; doubles for each later one
    pub fn backoff(&self) -> Duration {
        self.backoff
    }
}

// Keep the credential out of logs and panic messages.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("retries", &self.retries)
            .field("backoff", &self.backoff)
            .finish()
    }
}

/// Strip a single trailing `/` from the endpoint
pub fn normalize_base_url(url: &str) -> String {
    url.strip_suffix('/').unwrap_or(url).to_string()
}
