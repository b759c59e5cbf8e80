//! Wire types for the tool execution endpoint
//!
//! The endpoint answers with two nested envelopes: an outer one describing
//! the API call and an inner one describing the tool run. Both are decoded
//! once here so the client never pokes at raw JSON.

use crate::errors::{DatagenError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message used when a failed tool run carries no error text
pub const GENERIC_TOOL_FAILURE: &str = "Tool reported failure";

/// Body of `POST /api/tools/execute`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRequest {
    /// Alias of the tool to run (e.g., "mcp_Linear_list_issues")
    pub tool_alias_name: String,

    /// Tool arguments
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

impl ToolRequest {
    /// Build a request, rejecting an empty tool alias
    pub fn new(tool_alias_name: &str, parameters: Option<Map<String, Value>>) -> Result<Self> {
        if tool_alias_name.is_empty() {
            return Err(DatagenError::InvalidArgument(
                "tool_alias_name is required".to_string(),
            ));
        }

        Ok(Self {
            tool_alias_name: tool_alias_name.to_string(),
            parameters: parameters.unwrap_or_default(),
        })
    }
}

/// Outer, API-level envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseEnvelope {
    /// Missing or `null` counts as failure
    #[serde(default)]
    pub success: Option<bool>,

    /// Missing or `null` counts as a failed tool run
    #[serde(default)]
    pub data: Option<ToolEnvelope>,

    #[serde(default)]
    pub error: Option<Value>,
}

/// Inner, tool-level envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolEnvelope {
    #[serde(default)]
    pub success: Option<bool>,

    #[serde(default)]
    pub result: Value,

    #[serde(default)]
    pub error: Option<Value>,
}

impl ToolEnvelope {
    /// Tool result, or the tool's own failure message
    pub fn into_result(self) -> Result<Value> {
        if self.success == Some(true) {
            return Ok(self.result);
        }

        let message = match self.error {
            Some(error) if is_blank(&error) => GENERIC_TOOL_FAILURE.to_string(),
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => GENERIC_TOOL_FAILURE.to_string(),
        };
        Err(DatagenError::Tool(message))
    }
}

/// `null`, `false`, zero and empty strings or containers carry no message
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Decode a 2xx response body and unwrap both envelopes
pub fn unwrap_response(body: &str) -> Result<Value> {
    let payload: Value = serde_json::from_str(body)
        .map_err(|_| DatagenError::UnexpectedResponse(body.to_string()))?;

    let envelope: ResponseEnvelope = serde_json::from_value(payload.clone())
        .map_err(|_| DatagenError::UnexpectedResponse(payload.to_string()))?;

    if envelope.success != Some(true) {
        return Err(DatagenError::UnexpectedResponse(payload.to_string()));
    }

    envelope.data.unwrap_or_default().into_result()
}
