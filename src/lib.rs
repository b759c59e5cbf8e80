//! Datagen SDK
//!
//! Client for the Datagen tool execution API: run a named tool with JSON
//! parameters and get back its result.
//!
//! ```no_run
//! use datagen_sdk::{ClientOptions, DatagenClient};
//! use serde_json::json;
//!
//! # async fn run() -> datagen_sdk::Result<()> {
//! let client = DatagenClient::from_options(ClientOptions {
//!     retries: Some(2),
//!     ..ClientOptions::default()
//! })?;
//!
//! let params = json!({"limit": 10}).as_object().cloned();
//! let issues = client.execute_tool("mcp_Linear_list_issues", params).await?;
//! println!("{}", issues);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod tools;

// Re-export commonly used types
pub use config::{ClientConfig, ClientOptions};
pub use errors::{DatagenError, ErrorKind, Result};
pub use tools::{DatagenClient, RetryPolicy, ToolRequest};
