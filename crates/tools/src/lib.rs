//! MCP Tools for the Claims Agent
//!
//! Implements an MCP (Model Context Protocol) compatible tool interface
//! exposing the claim pipeline to an agent framework: structural
//! validation, eligibility and network lookups, and full adjudication.

pub mod claim_tools;
pub mod mcp;
pub mod registry;

pub use claim_tools::{
    AdjudicateClaimTool, CheckEligibilityTool, CheckNetworkStatusTool, ValidateClaimTool,
};
pub use mcp::{
    InputSchema, PropertySchema, Tool, ToolError, ToolOutput, ToolSchema,
    DEFAULT_TOOL_TIMEOUT_SECS,
};
pub use registry::{
    create_demo_registry, create_registry, demo_dependencies, ToolExecutor, ToolRegistry,
};
