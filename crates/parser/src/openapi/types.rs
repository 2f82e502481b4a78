//! OpenAPI 3.0 document types
//!
//! Only the parts the generator reads are modelled; path items deserialize
//! straight into `EndpointDescriptor`.

use endpoint_codegen_common::{EndpointDescriptor, Schema};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// OpenAPI document root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenApiDocument {
    /// OpenAPI version (e.g., "3.0.2")
    pub openapi: String,

    /// API metadata
    pub info: Info,

    /// API paths (endpoints)
    #[serde(default)]
    pub paths: HashMap<String, EndpointDescriptor>,

    /// Reusable components
    #[serde(default)]
    pub components: Option<Components>,
}

/// API information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    /// API title
    pub title: String,

    /// API version
    pub version: String,

    /// API description
    #[serde(default)]
    pub description: Option<String>,
}

/// Reusable components
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Components {
    /// Schemas
    #[serde(default)]
    pub schemas: HashMap<String, Schema>,
}

impl OpenApiDocument {
    /// Get a schema by reference path
    /// e.g., "#/components/schemas/KvWriteRequest" -> returns that schema
    pub fn resolve_schema_ref(&self, ref_path: &str) -> Option<&Schema> {
        let schema_name = ref_path.strip_prefix(SCHEMA_REF_PREFIX)?;
        self.components
            .as_ref()
            .and_then(|c| c.schemas.get(schema_name))
    }
}
