//! Tool execution API
//!
//! - `client`: HTTP client for `POST /api/tools/execute`
//! - `types`: request body and response envelopes
//! - `retry`: exponential backoff policy

pub mod client;
pub mod retry;
pub mod types;

// Re-export commonly used types
pub use client::DatagenClient;
pub use retry::RetryPolicy;
pub use types::{ResponseEnvelope, ToolEnvelope, ToolRequest};
