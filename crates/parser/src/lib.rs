//! API description loading for endpoint-codegen
//!
//! This crate reads OpenAPI documents and turns each path item into an
//! `EndpointDescriptor`. Request-body schemas given by reference are resolved
//! while loading, so the generator only ever sees concrete schemas.

pub mod openapi;

pub use openapi::OpenApiParser;
