//! Parameter type validation

use endpoint_codegen_common::{GeneratorError, NormalizedParameter, ParamType, Result};
use serde::Serialize;

/// A parameter that passed validation, with its resolved type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypedParameter {
    #[serde(flatten)]
    pub parameter: NormalizedParameter,

    /// Resolved type; templates read it as `param.param_type`
    pub param_type: ParamType,

    pub sensitive: bool,
}

/// Resolve every parameter to a supported type
///
/// Fails on the first parameter whose schema type is outside the supported
/// set; nothing partial is returned.
pub fn validate_parameters(
    path: &str,
    parameters: Vec<NormalizedParameter>,
) -> Result<Vec<TypedParameter>> {
    parameters
        .into_iter()
        .map(|parameter| match ParamType::from_schema(&parameter.schema) {
            Some(param_type) => Ok(TypedParameter {
                sensitive: parameter.sensitive(),
                parameter,
                param_type,
            }),
            None => {
                let schema_type = parameter.schema.type_label();
                log::error!(
                    "can't generate {:?} because parameter type of {:?} for {} is unsupported",
                    path,
                    schema_type,
                    parameter.name
                );
                Err(GeneratorError::UnsupportedSchema {
                    path: path.to_string(),
                    parameter: parameter.name,
                    schema_type,
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use endpoint_codegen_common::{NormalizedSchema, ParameterLocation};

    fn param(name: &str, schema_type: &str) -> NormalizedParameter {
        NormalizedParameter {
            name: name.to_string(),
            description: String::new(),
            location: ParameterLocation::Post,
            required: false,
            deprecated: false,
            schema: NormalizedSchema {
                schema_type: schema_type.to_string(),
                ..NormalizedSchema::default()
            },
        }
    }

    #[test]
    fn test_all_supported() {
        let typed = validate_parameters(
            "/transform/role/{name}",
            vec![
                param("name", "string"),
                param("ttl", "integer"),
                param("enabled", "boolean"),
                param("transformations", "array"),
            ],
        )
        .unwrap();

        let types: Vec<ParamType> = typed.iter().map(|p| p.param_type).collect();
        assert_eq!(
            types,
            vec![
                ParamType::String,
                ParamType::Integer,
                ParamType::Boolean,
                ParamType::StringArray
            ]
        );
    }

    #[test]
    fn test_object_is_rejected() {
        let err = validate_parameters(
            "/transform/role/{name}",
            vec![param("name", "string"), param("settings", "object")],
        )
        .unwrap_err();

        match err {
            GeneratorError::UnsupportedSchema {
                path,
                parameter,
                schema_type,
            } => {
                assert_eq!(path, "/transform/role/{name}");
                assert_eq!(parameter, "settings");
                assert_eq!(schema_type, "object");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_type_is_rejected() {
        let err = validate_parameters("/sys/mounts", vec![param("options", "")]).unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn test_sensitive_flag_is_lifted() {
        let mut secret = param("password", "string");
        secret.schema.display_attrs.sensitive = true;

        let typed = validate_parameters("/auth/userpass/users/{name}", vec![secret]).unwrap();
        assert!(typed[0].sensitive);
    }
}
