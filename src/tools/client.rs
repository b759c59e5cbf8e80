//! Datagen tool execution client
//!
//! Wraps `POST /api/tools/execute`:
//! - Authenticates with the `X-API-Key` header
//! - Unwraps the API and tool envelopes into the bare tool result
//! - Retries transient HTTP failures with exponential backoff

use crate::config::{ClientConfig, ClientOptions};
use crate::errors::{DatagenError, Result};
use crate::tools::retry::RetryPolicy;
use crate::tools::types::{unwrap_response, ToolRequest};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use tracing::debug;

/// Path of the tool execution endpoint, relative to the base URL
pub const EXECUTE_PATH: &str = "/api/tools/execute";

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// HTTP client for the Datagen API
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct DatagenClient {
    client: Client,
    config: ClientConfig,
    retry: RetryPolicy,
}

impl DatagenClient {
    /// Create a client from already resolved settings
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| DatagenError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let retry = RetryPolicy::new(config.retries(), config.backoff());

        Ok(Self {
            client,
            config,
            retry,
        })
    }

    /// Create a client from overrides, reading `DATAGEN_API_KEY` if needed
    pub fn from_options(options: ClientOptions) -> Result<Self> {
        Self::new(ClientConfig::from_options(options)?)
    }

    /// Create a client with every setting defaulted
    pub fn from_env() -> Result<Self> {
        Self::from_options(ClientOptions::default())
    }

    /// Execute a tool and return its result
    ///
    /// # Arguments
    /// * `tool_alias_name` - Tool to run (must be non-empty)
    /// * `parameters` - Tool arguments; `None` sends an empty object
    ///
    /// # Returns
    /// The inner `result` value (`null` when the tool returned none)
    pub async fn execute_tool(
        &self,
        tool_alias_name: &str,
        parameters: Option<Map<String, Value>>,
    ) -> Result<Value> {
        let request = ToolRequest::new(tool_alias_name, parameters)?;
        self.execute(&request).await
    }

    /// Execute a prepared request with the configured retry policy
    pub async fn execute(&self, request: &ToolRequest) -> Result<Value> {
        let result = self
            .retry
            .execute_with_retry(|attempt| self.attempt(request, attempt))
            .await;

        if let Err(e) = &result {
            debug!(tool = %request.tool_alias_name, kind = %e.kind(), error = %e, "Tool execution failed");
        }
        result
    }

    /// One POST plus response classification
    async fn attempt(&self, request: &ToolRequest, attempt: u32) -> Result<Value> {
        let url = self.execute_url();
        debug!(tool = %request.tool_alias_name, attempt = attempt + 1, url = %url, "Executing tool");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.config.api_key())
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(DatagenError::Auth(format!("Auth failed: {}", body)));
        }

        if status.as_u16() >= 400 {
            return Err(DatagenError::Status {
                status: status.as_u16(),
                body,
            });
        }

        unwrap_response(&body)
    }

    /// Full URL of the execute endpoint
    pub fn execute_url(&self) -> String {
        format!("{}{}", self.config.base_url(), EXECUTE_PATH)
    }

    /// Get resolved settings
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get base URL
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }
}
