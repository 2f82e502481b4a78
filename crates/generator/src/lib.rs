//! Stub generation for single API endpoints
//!
//! This crate turns an `EndpointDescriptor` into a source stub for a resource
//! or data source binding, plus a companion documentation stub:
//! - body parameters are lifted next to path parameters ([`extract`])
//! - parameter types are checked against the supported set ([`validate`])
//! - symbol prefixes are derived from the path ([`naming`])
//! - everything is assembled into a [`RenderingContext`] and rendered with Tera

pub mod context;
pub mod extract;
pub mod naming;
pub mod paths;
pub mod templates;
pub mod validate;

pub use context::RenderingContext;
pub use templates::{BuiltinTemplates, TemplateSource};
pub use validate::TypedParameter;

use endpoint_codegen_common::{
    ArtifactKind, EndpointDescriptor, GeneratorConfig, GeneratorError, Result,
};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tera::Tera;

/// Paths written by [`EndpointGenerator::generate_files`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFiles {
    pub code: PathBuf,
    pub doc: PathBuf,
}

/// Endpoint stub generator
///
/// Holds the output layout and the compiled templates. Each call is
/// independent; nothing is cached between endpoints.
pub struct EndpointGenerator {
    config: GeneratorConfig,
    tera: Tera,
}

impl EndpointGenerator {
    /// Create a generator using the built-in templates
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        Self::with_templates(config, &BuiltinTemplates)
    }

    /// Create a generator with template bodies from `source`
    pub fn with_templates(config: GeneratorConfig, source: &dyn TemplateSource) -> Result<Self> {
        let tera = templates::load_templates(source)?;
        Ok(Self { config, tera })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the source stub and the doc stub for one endpoint
    ///
    /// For example "/transform/transformation/{name}" as a resource writes
    /// `generated/resources/transform/transformation/name.rs` and
    /// `website/docs/generated/resources/transform-transformation-name.md`.
    pub fn generate_files(
        &self,
        kind: ArtifactKind,
        endpoint: &EndpointDescriptor,
    ) -> Result<GeneratedFiles> {
        let code = self.generate_code(kind, endpoint)?;
        let doc = self.generate_doc(kind, endpoint)?;
        Ok(GeneratedFiles { code, doc })
    }

    /// Generate the source stub for a resource or data source
    pub fn generate_code(
        &self,
        kind: ArtifactKind,
        endpoint: &EndpointDescriptor,
    ) -> Result<PathBuf> {
        ensure_code_kind(kind)?;
        let output_path = paths::code_path(&self.config, kind, &endpoint.path);
        self.generate_file(&output_path, kind, endpoint)?;
        Ok(output_path)
    }

    /// Generate the documentation stub for a resource or data source
    ///
    /// The stub has placeholders for the author to fill in.
    pub fn generate_doc(
        &self,
        kind: ArtifactKind,
        endpoint: &EndpointDescriptor,
    ) -> Result<PathBuf> {
        ensure_code_kind(kind)?;
        let output_path = paths::doc_path(&self.config, kind, &endpoint.path);
        self.generate_file(&output_path, ArtifactKind::Doc, endpoint)?;
        Ok(output_path)
    }

    /// Build the context the source stub for `kind` would be rendered with
    pub fn build_context(
        &self,
        kind: ArtifactKind,
        endpoint: &EndpointDescriptor,
    ) -> Result<RenderingContext> {
        ensure_code_kind(kind)?;
        let output_path = paths::code_path(&self.config, kind, &endpoint.path);
        RenderingContext::build(endpoint, parent_dir(&output_path)?)
    }

    fn generate_file(
        &self,
        output_path: &Path,
        template: ArtifactKind,
        endpoint: &EndpointDescriptor,
    ) -> Result<()> {
        let parent = parent_dir(output_path)?;

        // Validation failures must leave the filesystem untouched.
        let context = RenderingContext::build(endpoint, parent)?.to_tera()?;

        log::debug!(
            "Rendering {} for {} to {}",
            template.template_name(),
            endpoint.path,
            output_path.display()
        );

        fs::create_dir_all(parent)?;
        let mut writer = BufWriter::new(File::create(output_path)?);

        let rendered = self
            .tera
            .render_to(template.template_name(), &context, &mut writer)
            .map_err(templates::template_error);

        close_output(output_path, writer, rendered)
    }
}

/// Flush and release the output file
///
/// Flush failures are logged, not returned: the render result decides the
/// outcome.
fn close_output<W: Write>(path: &Path, writer: BufWriter<W>, rendered: Result<()>) -> Result<()> {
    match writer.into_inner() {
        Ok(inner) => drop(inner),
        Err(e) => log::error!("Failed to flush {}: {}", path.display(), e.error()),
    }
    rendered
}

fn parent_dir(path: &Path) -> Result<&Path> {
    path.parent().ok_or_else(|| {
        GeneratorError::Generation(format!("Output path {} has no parent", path.display()))
    })
}

fn ensure_code_kind(kind: ArtifactKind) -> Result<()> {
    if kind.is_code() {
        Ok(())
    } else {
        Err(GeneratorError::Generation(format!(
            "{} is not a code artifact kind",
            kind
        )))
    }
}

/// Generate code and doc stubs for one endpoint (convenience function)
pub fn generate_files(
    config: GeneratorConfig,
    kind: ArtifactKind,
    endpoint: &EndpointDescriptor,
) -> Result<GeneratedFiles> {
    let generator = EndpointGenerator::new(config)?;
    generator.generate_files(kind, endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::MockTemplateSource;
    use endpoint_codegen_common::Operation;
    use tempfile::TempDir;

    fn minimal_templates() -> MockTemplateSource {
        let mut source = MockTemplateSource::new();
        source.expect_template_body().returning(|kind| {
            format!("{}:{{{{ exported_func_prefix }}}}", kind.template_name())
        });
        source
    }

    #[test]
    fn test_generator_creation() {
        let result = EndpointGenerator::new(GeneratorConfig::new("/repo"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_templates_selected_by_kind() {
        let temp_dir = TempDir::new().unwrap();
        let config = GeneratorConfig::new(temp_dir.path());
        let generator = EndpointGenerator::with_templates(config, &minimal_templates()).unwrap();
        let mut endpoint = EndpointDescriptor::new("/kv/{secret_name}");
        endpoint.get = Some(Operation::default());

        let files = generator
            .generate_files(ArtifactKind::DataSource, &endpoint)
            .unwrap();

        assert_eq!(
            fs::read_to_string(&files.code).unwrap(),
            "data_source.rs:Secretname"
        );
        assert_eq!(fs::read_to_string(&files.doc).unwrap(), "doc.md:Secretname");
    }

    #[test]
    fn test_doc_kind_is_not_a_code_kind() {
        let generator = EndpointGenerator::new(GeneratorConfig::new("/repo")).unwrap();
        let endpoint = EndpointDescriptor::new("/transform/{name}");

        let err = generator
            .generate_files(ArtifactKind::Doc, &endpoint)
            .unwrap_err();
        assert!(matches!(err, GeneratorError::Generation(_)));
    }

    #[test]
    fn test_render_failure_is_returned() {
        let temp_dir = TempDir::new().unwrap();
        let mut source = MockTemplateSource::new();
        source
            .expect_template_body()
            .returning(|_| "{{ missing_variable }}".to_string());
        let generator =
            EndpointGenerator::with_templates(GeneratorConfig::new(temp_dir.path()), &source)
                .unwrap();

        let err = generator
            .generate_code(ArtifactKind::Resource, &EndpointDescriptor::new("/sys/mounts"))
            .unwrap_err();
        assert!(matches!(err, GeneratorError::Template(_)));
    }

    /// Accepts nothing; every write fails
    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("no space left on device"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn pending_writer() -> BufWriter<FullDisk> {
        let mut writer = BufWriter::new(FullDisk);
        writer.write_all(b"pub struct NameFields;").unwrap();
        writer
    }

    #[test]
    fn test_flush_failure_keeps_render_result() {
        let path = Path::new("/repo/generated/resources/transform/name.rs");

        assert!(close_output(path, pending_writer(), Ok(())).is_ok());

        let err = close_output(
            path,
            pending_writer(),
            Err(GeneratorError::Template("render failed".to_string())),
        )
        .unwrap_err();
        assert!(matches!(err, GeneratorError::Template(_)));
    }
}
