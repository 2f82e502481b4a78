//! Template loading and management

use endpoint_codegen_common::{ArtifactKind, GeneratorError, Result};
use std::collections::HashMap;
use std::error::Error as _;
use tera::{Tera, Value};

/// Supplies the template body for each artifact kind
#[cfg_attr(test, mockall::automock)]
pub trait TemplateSource {
    fn template_body(&self, kind: ArtifactKind) -> String;
}

/// Template bodies embedded in the crate
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl TemplateSource for BuiltinTemplates {
    fn template_body(&self, kind: ArtifactKind) -> String {
        let body = match kind {
            ArtifactKind::Resource => include_str!("../templates/resource.rs.tera"),
            ArtifactKind::DataSource => include_str!("../templates/data_source.rs.tera"),
            ArtifactKind::Doc => include_str!("../templates/doc.md.tera"),
        };
        body.to_string()
    }
}

/// Compile the template for every artifact kind
pub fn load_templates(source: &dyn TemplateSource) -> Result<Tera> {
    let mut tera = Tera::default();

    // Register custom filters
    tera.register_filter("rust_type", rust_type_filter);
    tera.register_filter("rust_ident", rust_ident_filter);
    tera.register_filter("doc_type", doc_type_filter);
    tera.register_filter("capitalize", capitalize_filter);

    let templates: Vec<(&str, String)> = ArtifactKind::ALL
        .iter()
        .map(|kind| (kind.template_name(), source.template_body(*kind)))
        .collect();

    // Added together so inheritance between bodies resolves
    tera.add_raw_templates(templates).map_err(|e| {
        GeneratorError::Template(format!("Failed to load templates: {}", chain(&e)))
    })?;

    Ok(tera)
}

/// Flatten a Tera error and its causes into one message
pub(crate) fn template_error(e: tera::Error) -> GeneratorError {
    GeneratorError::Template(chain(&e))
}

fn chain(e: &tera::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Filter to convert a parameter type tag to a Rust type
fn rust_type_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let type_str = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("rust_type filter expects a string"))?;

    let rust_type = match type_str {
        "array" => "Vec<String>",
        "boolean" => "bool",
        "integer" => "i64",
        "string" => "String",
        other => return Err(tera::Error::msg(format!("no Rust type for {:?}", other))),
    };

    Ok(Value::String(rust_type.to_string()))
}

const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "if", "impl", "in", "let",
    "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return",
    "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized", "use",
    "virtual", "where", "while", "yield",
];

/// Keywords that cannot be written as raw identifiers
const RESERVED_IDENTS: &[&str] = &["crate", "self", "Self", "super", "_"];

/// Filter to turn a parameter name into a Rust field identifier
///
/// Keywords become raw identifiers (`r#type`); characters outside
/// `[A-Za-z0-9_]` become `_`, and a leading digit or a name that cannot be
/// raw gets an underscore affix.
fn rust_ident_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let name = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("rust_ident filter expects a string"))?;

    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if RESERVED_IDENTS.contains(&ident.as_str()) {
        ident.push('_');
    } else if RUST_KEYWORDS.contains(&ident.as_str()) {
        ident.insert_str(0, "r#");
    }

    Ok(Value::String(ident))
}

/// Filter to describe a parameter type tag in prose
fn doc_type_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let type_str = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("doc_type filter expects a string"))?;

    let doc_type = match type_str {
        "array" => "list of strings",
        other => other,
    };

    Ok(Value::String(doc_type.to_string()))
}

/// Filter to capitalize first letter
fn capitalize_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("capitalize filter expects a string"))?;

    let mut chars = s.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };

    Ok(Value::String(capitalized))
}
