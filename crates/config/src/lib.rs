//! Configuration for the claims agent
//!
//! Supports loading configuration from:
//! - YAML files
//! - In-code defaults (every field has a production-sensible default)
//!
//! The permissive fallback behaviors of the adjudication pipeline (what to
//! do when pre-authorization or guideline lookups have nothing on file) are
//! deliberate policy choices and are exposed here as explicit flags rather
//! than hardcoded defaults.

pub mod adjudication;

pub use adjudication::{
    AdjudicationConfig, MissingPreAuthPolicy, ServiceTypeMap, UnknownGuidelinePolicy,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}
