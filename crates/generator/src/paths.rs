//! Output path mapping

use crate::naming::strip_curly_braces;
use endpoint_codegen_common::{ArtifactKind, GeneratorConfig};
use std::path::PathBuf;

/// Source stub path for a code artifact
///
/// `/transform/transformation/{name}` as a resource maps to
/// `<code root>/resources/transform/transformation/name.rs`.
pub fn code_path(config: &GeneratorConfig, kind: ArtifactKind, endpoint: &str) -> PathBuf {
    let relative = format!("{}/{}.rs", kind.dir_label(), endpoint.trim_start_matches('/'));
    config.code_root().join(strip_curly_braces(&relative))
}

/// Documentation stub path for an endpoint documented under `kind`
///
/// Docs stay flat: `/transform/transformation/{name}` maps to
/// `<docs root>/resources/transform-transformation-name.md`.
pub fn doc_path(config: &GeneratorConfig, kind: ArtifactKind, endpoint: &str) -> PathBuf {
    let relative = format!(
        "{}/{}.md",
        kind.dir_label(),
        replace_slashes_with_dashes(endpoint)
    );
    config.docs_root().join(strip_curly_braces(&relative))
}

/// "/transform/transformation/{name}" -> "transform-transformation-{name}"
///
/// Only one leading slash is dropped.
pub fn replace_slashes_with_dashes(s: &str) -> String {
    s.strip_prefix('/').unwrap_or(s).replace('/', "-")
}
