//! Common types and utilities for endpoint-codegen
//!
//! This crate contains the endpoint data model, error types, artifact kinds
//! and layout configuration shared by the parser, generator, and CLI
//! components.

mod artifact;
mod config;
mod model;

pub use artifact::ArtifactKind;
pub use config::GeneratorConfig;
pub use model::{
    DisplayAttributes, EndpointDescriptor, MediaType, NormalizedParameter, NormalizedSchema,
    Operation, ParamType, Parameter, ParameterLocation, RequestBody, Schema,
};

use thiserror::Error;

/// Errors that can occur during stub generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// A parameter uses a schema type outside the supported set.
    ///
    /// Batch drivers skip the endpoint and continue on this variant; every
    /// other variant is fatal.
    #[error("can't generate {path:?} because parameter type of {schema_type:?} for {parameter} is unsupported")]
    UnsupportedSchema {
        path: String,
        parameter: String,
        schema_type: String,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl GeneratorError {
    /// Whether this is the unsupported-schema sentinel
    pub fn is_unsupported(&self) -> bool {
        matches!(self, GeneratorError::UnsupportedSchema { .. })
    }
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_is_distinguished() {
        let err = GeneratorError::UnsupportedSchema {
            path: "/transform/{name}".to_string(),
            parameter: "config".to_string(),
            schema_type: "object".to_string(),
        };
        assert!(err.is_unsupported());
        assert!(!GeneratorError::Generation("boom".to_string()).is_unsupported());
    }

    #[test]
    fn test_unsupported_message_names_endpoint_parameter_and_type() {
        let err = GeneratorError::UnsupportedSchema {
            path: "/transform/{name}".to_string(),
            parameter: "config".to_string(),
            schema_type: "object".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("/transform/{name}"));
        assert!(message.contains("config"));
        assert!(message.contains("object"));
    }
}
