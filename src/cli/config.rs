//! Settings file for the datagen CLI
//!
//! TOML-based settings with defaults.
//! Location: ~/.datagen/config.toml
//!
//! The API key is deliberately not read from this file; it comes from
//! `--api-key` or `DATAGEN_API_KEY`.

use crate::cli::args::Args;
use crate::config::ClientOptions;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Contents of the settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub client: ClientSettings,
}

/// `[client]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub retries: Option<u32>,
    pub backoff_secs: Option<f64>,
}

impl Settings {
    /// Load settings from `path`, or from the default location if present.
    /// A missing default file yields empty settings; a missing explicit
    /// file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Get the default settings file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".datagen").join("config.toml"))
    }

    /// Validate settings values
    pub fn validate(&self) -> Result<()> {
        if let Some(secs) = self.client.backoff_secs {
            if Duration::try_from_secs_f64(secs).is_err() {
                bail!("backoff_secs must be a non-negative number of seconds, got {}", secs);
            }
        }
        if self.client.timeout_secs == Some(0) {
            bail!("timeout_secs must be greater than 0");
        }
        Ok(())
    }

    /// Combine command-line flags with these settings. Flags win.
    pub fn client_options(&self, args: &Args) -> Result<ClientOptions> {
        let backoff = match args.backoff_duration().map_err(anyhow::Error::msg)? {
            Some(backoff) => Some(backoff),
            None => self
                .client
                .backoff_secs
                .map(|secs| {
                    Duration::try_from_secs_f64(secs)
                        .with_context(|| format!("Invalid backoff_secs: {}", secs))
                })
                .transpose()?,
        };

        Ok(ClientOptions {
            api_key: args.api_key.clone(),
            base_url: args.base_url.clone().or_else(|| self.client.base_url.clone()),
            timeout: args
                .timeout_duration()
                .or_else(|| self.client.timeout_secs.map(Duration::from_secs)),
            retries: args.retries.or(self.client.retries),
            backoff,
        })
    }
}
