//! OpenAPI 3.0 document loading
//!
//! Loads a complete OpenAPI document and exposes its paths as
//! `EndpointDescriptor`s for the generator.
//!
//! ## Vault
//! The document served by `vault read sys/internal/specs/openapi` carries
//! display metadata in `x-vault-displayAttrs` extensions, which are kept.
//!
//! ## Usage
//! ```rust,ignore
//! use endpoint_codegen_parser::openapi::OpenApiParser;
//!
//! let parser = OpenApiParser::from_file("vault-openapi.json")?;
//! for endpoint in parser.endpoints_with_prefix("/transform/") {
//!     println!("{}", endpoint.path);
//! }
//! ```

mod parser;
mod types;

pub use parser::OpenApiParser;
pub use types::*;
