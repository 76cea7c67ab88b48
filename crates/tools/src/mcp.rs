//! MCP-compatible tool interface types
//!
//! The minimal protocol surface an agent framework needs to discover and
//! call tools: a `Tool` trait, JSON-schema-shaped input descriptions, and
//! tagged output/error types.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Default timeout for tool execution
pub const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 30;

/// Errors surfaced to the calling agent framework
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Tool '{tool}' timed out after {timeout_secs}s")]
    Timeout { tool: String, timeout_secs: u64 },
}

impl ToolError {
    pub fn invalid_params(message: impl Into<String>) -> Self {
        ToolError::InvalidParams(message.into())
    }

    pub fn execution(message: impl Into<String>) -> Self {
        ToolError::ExecutionFailed(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ToolError::NotFound(message.into())
    }

    pub fn timeout(tool: impl Into<String>, timeout_secs: u64) -> Self {
        ToolError::Timeout {
            tool: tool.into(),
            timeout_secs,
        }
    }
}

/// Schema describing one tool to the agent framework
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub input_schema: InputSchema,
}

/// JSON-schema-shaped description of a tool's input object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(default)]
    pub properties: HashMap<String, PropertySchema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl InputSchema {
    /// An object schema with no properties yet
    pub fn object() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: HashMap::new(),
            required: Vec::new(),
        }
    }

    /// Add a property, optionally marking it required
    pub fn property(mut self, name: impl Into<String>, schema: PropertySchema, required: bool) -> Self {
        let name = name.into();
        if required {
            self.required.push(name.clone());
        }
        self.properties.insert(name, schema);
        self
    }
}

/// Schema for one input property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub property_type: String,
    pub description: String,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

impl PropertySchema {
    pub fn string(description: impl Into<String>) -> Self {
        Self {
            property_type: "string".to_string(),
            description: description.into(),
            enum_values: None,
        }
    }

    pub fn number(description: impl Into<String>) -> Self {
        Self {
            property_type: "number".to_string(),
            description: description.into(),
            enum_values: None,
        }
    }

    pub fn object(description: impl Into<String>) -> Self {
        Self {
            property_type: "object".to_string(),
            description: description.into(),
            enum_values: None,
        }
    }

    pub fn enum_type(description: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            property_type: "string".to_string(),
            description: description.into(),
            enum_values: Some(values),
        }
    }
}

/// Output returned by a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    pub content: Value,
}

impl ToolOutput {
    /// Plain-text output
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: Value::String(text.into()),
        }
    }

    /// Structured JSON output
    pub fn json(content: Value) -> Self {
        Self { content }
    }
}

/// An executable tool exposed to the agent framework
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name the framework dispatches on
    fn name(&self) -> &str;

    /// Human-readable purpose, shown to the agent
    fn description(&self) -> &str;

    /// Input schema
    fn schema(&self) -> ToolSchema;

    /// Validate input before execution. The default checks that every
    /// required property is present.
    fn validate(&self, input: &Value) -> Result<(), ToolError> {
        for required in &self.schema().input_schema.required {
            if input.get(required).is_none() {
                return Err(ToolError::invalid_params(format!("{} is required", required)));
            }
        }
        Ok(())
    }

    /// Maximum execution time before the registry cancels the call
    fn timeout_secs(&self) -> u64 {
        DEFAULT_TOOL_TIMEOUT_SECS
    }

    /// Execute the tool
    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError>;
}
