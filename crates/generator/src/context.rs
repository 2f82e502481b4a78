//! Rendering context assembly

use crate::extract::extract_parameters;
use crate::naming::NamePrefixes;
use crate::validate::{validate_parameters, TypedParameter};
use endpoint_codegen_common::{EndpointDescriptor, Result};
use serde::Serialize;
use std::path::Path;

/// Everything a template sees for one endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderingContext {
    /// Endpoint path as given (e.g. "/transform/role/{name}")
    pub endpoint: String,
    /// Name of the directory the output file is written to
    pub dir_name: String,
    pub exported_func_prefix: String,
    pub private_func_prefix: String,
    /// Parameters sorted by name
    pub parameters: Vec<TypedParameter>,
    pub supports_read: bool,
    pub supports_write: bool,
    pub supports_delete: bool,
}

impl RenderingContext {
    /// Build the context for an endpoint rendered into `output_dir`
    pub fn build(endpoint: &EndpointDescriptor, output_dir: &Path) -> Result<Self> {
        let prefixes = NamePrefixes::from_path(&endpoint.path);

        let mut parameters = validate_parameters(&endpoint.path, extract_parameters(endpoint))?;

        // Body properties come out of a map; sort so regeneration is stable.
        parameters.sort_by(|a, b| a.parameter.name.cmp(&b.parameter.name));

        Ok(Self {
            endpoint: endpoint.path.clone(),
            dir_name: dir_name(output_dir),
            exported_func_prefix: prefixes.exported,
            private_func_prefix: prefixes.private,
            parameters,
            supports_read: endpoint.supports_read(),
            supports_write: endpoint.supports_write(),
            supports_delete: endpoint.supports_delete(),
        })
    }

    /// Convert into a Tera context
    pub fn to_tera(&self) -> Result<tera::Context> {
        tera::Context::from_serialize(self).map_err(crate::templates::template_error)
    }
}

fn dir_name(output_dir: &Path) -> String {
    output_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
