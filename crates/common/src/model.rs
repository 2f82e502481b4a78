//! Endpoint description model
//!
//! Mirrors the subset of an OpenAPI path item the generator consumes, with
//! the Vault-style `x-vault-displayAttrs` extension for display metadata.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// One API path with its operations and top-level parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    /// API path (e.g. "/transform/transformation/{name}"), taken from the
    /// key of the `paths` map rather than the item body
    #[serde(skip)]
    pub path: String,

    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Path-level parameters
    #[serde(default)]
    pub parameters: Vec<Parameter>,

    /// GET operation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,

    /// POST operation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,

    /// DELETE operation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
}

impl EndpointDescriptor {
    /// Create an empty descriptor for a path
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Set the path, keeping everything else
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn supports_read(&self) -> bool {
        self.get.is_some()
    }

    pub fn supports_write(&self) -> bool {
        self.post.is_some()
    }

    pub fn supports_delete(&self) -> bool {
        self.delete.is_some()
    }
}

/// HTTP operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Operation ID
    #[serde(rename = "operationId", default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    /// Summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Tags (for grouping)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default)]
    pub deprecated: bool,

    /// Request body
    #[serde(rename = "requestBody", default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
}

/// Request body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Required flag
    #[serde(default)]
    pub required: bool,

    /// Content types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<HashMap<String, MediaType>>,
}

/// Media type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    /// Schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

/// Where a parameter is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
    /// Lifted out of the POST request body
    Post,
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
            ParameterLocation::Post => "post",
        };
        f.write_str(label)
    }
}

/// Parameter definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name, unique within an endpoint
    pub name: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Location: path, query, header, cookie
    #[serde(rename = "in")]
    pub location: ParameterLocation,

    /// Required flag
    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub deprecated: bool,

    /// Schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

/// Schema definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Type: string, integer, boolean, array, object, ...
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Format (e.g., int64, duration)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Array item schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    /// Object properties; a property may be declared without a schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, Option<Schema>>>,

    /// Required property names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    /// Allowed values
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    /// Reference to a component schema ("#/components/schemas/...")
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Display metadata
    #[serde(
        rename = "x-vault-displayAttrs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub display_attrs: Option<DisplayAttributes>,
}

/// UI display metadata attached to a schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Value must be masked (passwords, tokens, keys)
    #[serde(default)]
    pub sensitive: bool,

    #[serde(default)]
    pub navigation: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_type: Option<String>,
}

/// Schema with display attributes guaranteed present
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSchema {
    /// Raw type tag; empty when the source schema declared none
    #[serde(rename = "type")]
    pub schema_type: String,

    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    pub display_attrs: DisplayAttributes,
}

impl NormalizedSchema {
    /// Type label used in diagnostics; arrays report their item type
    /// when it is not a string
    pub fn type_label(&self) -> String {
        match (self.schema_type.as_str(), self.items.as_deref()) {
            ("array", Some(items)) if !has_string_items(items) => {
                format!("array<{}>", item_label(items))
            }
            (tag, _) => tag.to_string(),
        }
    }
}

impl From<Schema> for NormalizedSchema {
    fn from(schema: Schema) -> Self {
        Self {
            schema_type: schema.schema_type.unwrap_or_default(),
            description: schema.description.unwrap_or_default(),
            format: schema.format,
            items: schema.items,
            enum_values: schema.enum_values,
            default: schema.default,
            display_attrs: schema.display_attrs.unwrap_or_default(),
        }
    }
}

/// Item schema is a concrete `string`; unresolved refs and untyped items are not
fn has_string_items(items: &Schema) -> bool {
    items.reference.is_none() && items.schema_type.as_deref() == Some("string")
}

fn item_label(items: &Schema) -> &str {
    match (items.schema_type.as_deref(), items.reference.as_deref()) {
        (Some(tag), _) => tag,
        (None, Some(reference)) => reference,
        (None, None) => "untyped",
    }
}

/// Parameter whose schema and display attributes are always present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedParameter {
    pub name: String,
    pub description: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    pub required: bool,
    pub deprecated: bool,
    pub schema: NormalizedSchema,
}

impl NormalizedParameter {
    pub fn sensitive(&self) -> bool {
        self.schema.display_attrs.sensitive
    }
}

/// Parameter types the generator can map onto generated fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// Arrays are only supported with string items
    #[serde(rename = "array")]
    StringArray,
    Boolean,
    Integer,
    String,
}

impl ParamType {
    /// Map a normalized schema onto a supported type
    ///
    /// # Examples
    /// ```
    /// use endpoint_codegen_common::{NormalizedSchema, ParamType, Schema};
    ///
    /// let schema = NormalizedSchema::from(Schema {
    ///     schema_type: Some("integer".to_string()),
    ///     ..Schema::default()
    /// });
    /// assert_eq!(ParamType::from_schema(&schema), Some(ParamType::Integer));
    /// ```
    pub fn from_schema(schema: &NormalizedSchema) -> Option<Self> {
        match schema.schema_type.as_str() {
            "array" => match schema.items.as_deref() {
                None => Some(ParamType::StringArray),
                Some(items) if has_string_items(items) => Some(ParamType::StringArray),
                Some(_) => None,
            },
            "boolean" => Some(ParamType::Boolean),
            "integer" => Some(ParamType::Integer),
            "string" => Some(ParamType::String),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::StringArray => "array",
            ParamType::Boolean => "boolean",
            ParamType::Integer => "integer",
            ParamType::String => "string",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
