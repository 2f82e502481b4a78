//! Parameter extraction
//!
//! Lifts properties declared in a POST request body up next to the
//! endpoint's top-level parameters so templates iterate a single list.

use endpoint_codegen_common::{
    EndpointDescriptor, NormalizedParameter, NormalizedSchema, Parameter, ParameterLocation,
};
use std::collections::HashSet;

/// Merge body properties into the top-level parameters
///
/// Top-level parameters always win over a same-named body property. Every
/// returned parameter carries a present schema and display attributes.
/// The descriptor is not modified.
pub fn extract_parameters(endpoint: &EndpointDescriptor) -> Vec<NormalizedParameter> {
    let mut parameters: Vec<NormalizedParameter> =
        endpoint.parameters.iter().cloned().map(normalize).collect();
    append_post_parameters(endpoint, &mut parameters);
    parameters
}

/// Append POST body properties not already present in `parameters`
///
/// The seen-set is seeded from `parameters` before any insertion, so calling
/// this again on its own output adds nothing.
pub fn append_post_parameters(
    endpoint: &EndpointDescriptor,
    parameters: &mut Vec<NormalizedParameter>,
) {
    let Some(content) = endpoint
        .post
        .as_ref()
        .and_then(|op| op.request_body.as_ref())
        .and_then(|body| body.content.as_ref())
    else {
        return;
    };

    let mut seen: HashSet<String> = parameters.iter().map(|p| p.name.clone()).collect();

    for media_type in content.values() {
        let Some(properties) = media_type
            .schema
            .as_ref()
            .and_then(|schema| schema.properties.as_ref())
        else {
            continue;
        };

        for (name, schema) in properties {
            if !seen.insert(name.clone()) {
                continue;
            }

            let schema = NormalizedSchema::from(schema.clone().unwrap_or_default());
            parameters.push(NormalizedParameter {
                name: name.clone(),
                description: schema.description.clone(),
                location: ParameterLocation::Post,
                required: false,
                deprecated: false,
                schema,
            });
        }
    }
}

fn normalize(parameter: Parameter) -> NormalizedParameter {
    NormalizedParameter {
        name: parameter.name,
        description: parameter.description,
        location: parameter.location,
        required: parameter.required,
        deprecated: parameter.deprecated,
        schema: NormalizedSchema::from(parameter.schema.unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use endpoint_codegen_common::{
        DisplayAttributes, MediaType, Operation, RequestBody, Schema,
    };
    use std::collections::HashMap;

    fn typed(schema_type: &str) -> Schema {
        Schema {
            schema_type: Some(schema_type.to_string()),
            ..Schema::default()
        }
    }

    fn endpoint_with_body(properties: Vec<(&str, Option<Schema>)>) -> EndpointDescriptor {
        let mut endpoint = EndpointDescriptor::new("/transform/role/{name}");
        endpoint.parameters.push(Parameter {
            name: "name".to_string(),
            description: "Name of the role".to_string(),
            location: ParameterLocation::Path,
            required: true,
            deprecated: false,
            schema: Some(typed("string")),
        });

        let body_schema = Schema {
            schema_type: Some("object".to_string()),
            properties: Some(
                properties
                    .into_iter()
                    .map(|(name, schema)| (name.to_string(), schema))
                    .collect(),
            ),
            ..Schema::default()
        };
        let mut content = HashMap::new();
        content.insert(
            "application/json".to_string(),
            MediaType {
                schema: Some(body_schema),
            },
        );
        endpoint.post = Some(Operation {
            request_body: Some(RequestBody {
                content: Some(content),
                ..RequestBody::default()
            }),
            ..Operation::default()
        });
        endpoint
    }

    #[test]
    fn test_body_properties_become_post_parameters() {
        let endpoint = endpoint_with_body(vec![(
            "transformations",
            Some(Schema {
                description: Some("Transformations the role may use".to_string()),
                ..typed("array")
            }),
        )]);

        let params = extract_parameters(&endpoint);
        assert_eq!(params.len(), 2);

        let lifted = params.iter().find(|p| p.name == "transformations").unwrap();
        assert_eq!(lifted.location, ParameterLocation::Post);
        assert_eq!(lifted.description, "Transformations the role may use");
        assert_eq!(lifted.schema.schema_type, "array");
    }

    #[test]
    fn test_top_level_parameter_takes_precedence() {
        let endpoint = endpoint_with_body(vec![(
            "name",
            Some(Schema {
                description: Some("body copy".to_string()),
                ..typed("integer")
            }),
        )]);

        let params = extract_parameters(&endpoint);
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].location, ParameterLocation::Path);
        assert_eq!(params[0].description, "Name of the role");
        assert_eq!(params[0].schema.schema_type, "string");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let endpoint = endpoint_with_body(vec![
            ("tweak_source", Some(typed("string"))),
            ("allowed_roles", Some(typed("array"))),
        ]);

        let once = extract_parameters(&endpoint);
        let mut twice = once.clone();
        append_post_parameters(&endpoint, &mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_missing_schemas_are_filled() {
        let mut endpoint = endpoint_with_body(vec![("template", None)]);
        endpoint.parameters[0].schema = None;

        let params = extract_parameters(&endpoint);
        for param in &params {
            assert_eq!(param.schema.display_attrs, DisplayAttributes::default());
        }
        let template = params.iter().find(|p| p.name == "template").unwrap();
        assert_eq!(template.schema.schema_type, "");
    }

    #[test]
    fn test_duplicate_across_media_types_added_once() {
        let mut endpoint = endpoint_with_body(vec![("ttl", Some(typed("integer")))]);
        let body = endpoint
            .post
            .as_mut()
            .and_then(|op| op.request_body.as_mut())
            .and_then(|body| body.content.as_mut())
            .unwrap();
        let json = body.get("application/json").cloned().unwrap();
        body.insert("application/x-www-form-urlencoded".to_string(), json);

        let params = extract_parameters(&endpoint);
        assert_eq!(params.iter().filter(|p| p.name == "ttl").count(), 1);
    }

    #[test]
    fn test_no_body_is_noop() {
        let mut endpoint = EndpointDescriptor::new("/sys/mounts");
        endpoint.post = Some(Operation::default());
        assert!(extract_parameters(&endpoint).is_empty());

        endpoint.post = Some(Operation {
            request_body: Some(RequestBody::default()),
            ..Operation::default()
        });
        assert!(extract_parameters(&endpoint).is_empty());

        let mut content = HashMap::new();
        content.insert("application/json".to_string(), MediaType { schema: None });
        endpoint.post = Some(Operation {
            request_body: Some(RequestBody {
                content: Some(content),
                ..RequestBody::default()
            }),
            ..Operation::default()
        });
        assert!(extract_parameters(&endpoint).is_empty());
    }

    #[test]
    fn test_descriptor_is_not_mutated() {
        let endpoint = endpoint_with_body(vec![("ttl", Some(typed("integer")))]);
        let before = endpoint.clone();
        let _ = extract_parameters(&endpoint);
        assert_eq!(endpoint, before);
    }
}
