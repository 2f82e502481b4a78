//! OpenAPI document parser

use super::types::OpenApiDocument;
use endpoint_codegen_common::{EndpointDescriptor, GeneratorError, Result, Schema};
use std::fs;
use std::path::Path;

/// Maximum `$ref` hops followed before giving up on a cycle
const MAX_REF_DEPTH: usize = 16;

/// OpenAPI document parser
///
/// Reads a whole OpenAPI 3.0 document (e.g. the output of Vault's
/// `sys/internal/specs/openapi`) and hands out one `EndpointDescriptor` per
/// path.
pub struct OpenApiParser {
    /// Loaded document, request-body refs already resolved
    document: OpenApiDocument,
}

impl OpenApiParser {
    /// Load an OpenAPI document from a JSON or YAML file
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = OpenApiParser::from_file("vault-openapi.json")?;
    /// let endpoint = parser.endpoint("/transform/role/{name}");
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            GeneratorError::Parse(format!(
                "Failed to read OpenAPI file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_content(&content).map_err(|e| {
            GeneratorError::Parse(format!(
                "Failed to parse OpenAPI file {}: {}",
                path.as_ref().display(),
                e
            ))
        })
    }

    /// Parse content as JSON, falling back to YAML
    pub fn from_content(content: &str) -> Result<Self> {
        match serde_json::from_str::<OpenApiDocument>(content) {
            Ok(document) => Self::from_document(document),
            Err(json_err) => match serde_yaml::from_str::<OpenApiDocument>(content) {
                Ok(document) => Self::from_document(document),
                Err(yaml_err) => Err(GeneratorError::Parse(format!(
                    "content is neither a valid JSON ({}) nor YAML ({}) OpenAPI document",
                    json_err, yaml_err
                ))),
            },
        }
    }

    /// Parse OpenAPI document from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let document: OpenApiDocument = serde_json::from_str(json)
            .map_err(|e| GeneratorError::Parse(format!("Failed to parse OpenAPI JSON: {}", e)))?;
        Self::from_document(document)
    }

    /// Parse OpenAPI document from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let document: OpenApiDocument = serde_yaml::from_str(yaml)
            .map_err(|e| GeneratorError::Parse(format!("Failed to parse OpenAPI YAML: {}", e)))?;
        Self::from_document(document)
    }

    fn from_document(mut document: OpenApiDocument) -> Result<Self> {
        let mut paths = std::mem::take(&mut document.paths);
        for (path, endpoint) in paths.iter_mut() {
            endpoint.path = path.clone();
            resolve_endpoint(&document, endpoint)?;
        }
        document.paths = paths;

        log::debug!(
            "Loaded OpenAPI document {} {} with {} paths",
            document.info.title,
            document.info.version,
            document.paths.len()
        );
        Ok(Self { document })
    }

    /// Descriptor for one path, if the document declares it
    pub fn endpoint(&self, path: &str) -> Option<EndpointDescriptor> {
        self.document.paths.get(path).cloned()
    }

    /// All descriptors, sorted by path
    pub fn endpoints(&self) -> Vec<EndpointDescriptor> {
        let mut endpoints: Vec<EndpointDescriptor> =
            self.document.paths.values().cloned().collect();
        endpoints.sort_by(|a, b| a.path.cmp(&b.path));
        endpoints
    }

    /// Descriptors whose path starts with `prefix`, sorted by path
    pub fn endpoints_with_prefix(&self, prefix: &str) -> Vec<EndpointDescriptor> {
        self.endpoints()
            .into_iter()
            .filter(|endpoint| endpoint.path.starts_with(prefix))
            .collect()
    }

    /// Get reference to the underlying document
    pub fn document(&self) -> &OpenApiDocument {
        &self.document
    }
}

/// Resolve `$ref` schemas of top-level parameters and of every POST body
/// (the body schema, its properties, and their array items)
fn resolve_endpoint(document: &OpenApiDocument, endpoint: &mut EndpointDescriptor) -> Result<()> {
    for parameter in endpoint.parameters.iter_mut() {
        if let Some(schema) = parameter.schema.as_mut() {
            *schema = resolve_nested(document, schema, 0)?;
        }
    }

    let Some(content) = endpoint
        .post
        .as_mut()
        .and_then(|op| op.request_body.as_mut())
        .and_then(|body| body.content.as_mut())
    else {
        return Ok(());
    };

    for media in content.values_mut() {
        let Some(schema) = media.schema.as_mut() else {
            continue;
        };
        *schema = resolve_schema(document, schema)?;
        if let Some(properties) = schema.properties.as_mut() {
            for property in properties.values_mut().flatten() {
                *property = resolve_nested(document, property, 0)?;
            }
        }
    }

    Ok(())
}

/// Resolve a schema and, recursively, its array items
///
/// Items nested past `MAX_REF_DEPTH` keep their `$ref`, which the type
/// check rejects.
fn resolve_nested(document: &OpenApiDocument, schema: &Schema, depth: usize) -> Result<Schema> {
    let mut resolved = resolve_schema(document, schema)?;
    if depth < MAX_REF_DEPTH {
        if let Some(items) = resolved.items.as_mut() {
            **items = resolve_nested(document, items, depth + 1)?;
        }
    }
    Ok(resolved)
}

/// Follow `$ref` links until a concrete schema is reached
fn resolve_schema(document: &OpenApiDocument, schema: &Schema) -> Result<Schema> {
    let mut current = schema;
    for _ in 0..MAX_REF_DEPTH {
        let Some(ref_path) = current.reference.as_deref() else {
            return Ok(current.clone());
        };
        current = document.resolve_schema_ref(ref_path).ok_or_else(|| {
            GeneratorError::Parse(format!("Unresolved schema reference {}", ref_path))
        })?;
    }
    Err(GeneratorError::Parse(format!(
        "Schema reference chain deeper than {} starting at {:?}",
        MAX_REF_DEPTH, schema.reference
    )))
}
