use super::components::{Components, Definitions};
use super::parameter::{Parameter, ParameterOrRef};
use super::request_body::{RequestBody, RequestBodyOrRef};
use super::response::{Response, ResponseOrRef};
use super::schema::{Schema, SchemaOrRef};
use super::spec::OpenApiSpec;
use crate::error::ResolveError;

/// The simple name of a reference: its last path segment.
///
/// `#/components/schemas/Telegraf` → `Telegraf`.
pub fn simple_ref(ref_path: &str) -> &str {
    ref_path.rsplit('/').next().unwrap_or(ref_path)
}

/// Look a schema reference up in the definitions mapping.
///
/// Resolution is a single hop: a definitions entry that is itself a bare
/// `$ref` does not resolve. Callers treat `None` as "not found" and carry on.
pub fn lookup_schema<'a>(definitions: &'a Definitions, ref_path: &str) -> Option<&'a Schema> {
    match definitions.get(simple_ref(ref_path)) {
        Some(SchemaOrRef::Schema(schema)) => Some(schema),
        Some(SchemaOrRef::Ref { .. }) => {
            log::debug!("{ref_path} points at another reference, not following it");
            None
        }
        None => {
            log::debug!("{ref_path} has no entry in the schema definitions");
            None
        }
    }
}

/// Follow at most one reference from a schema node.
pub fn deref_schema<'a>(
    definitions: &'a Definitions,
    schema_or_ref: &'a SchemaOrRef,
) -> Option<&'a Schema> {
    match schema_or_ref {
        SchemaOrRef::Schema(schema) => Some(schema),
        SchemaOrRef::Ref { ref_path } => lookup_schema(definitions, ref_path),
    }
}

/// Resolves parameter, request body and response references against the
/// document components. Unlike schema lookups these are hard errors: an
/// operation cannot be built from a dangling parameter.
pub struct RefLookup<'a> {
    components: Option<&'a Components>,
}

impl<'a> RefLookup<'a> {
    pub fn new(spec: &'a OpenApiSpec) -> Self {
        Self {
            components: spec.components.as_ref(),
        }
    }

    pub fn parameter(&self, param: &'a ParameterOrRef) -> Result<&'a Parameter, ResolveError> {
        match param {
            ParameterOrRef::Parameter(p) => Ok(p),
            ParameterOrRef::Ref { ref_path } => {
                let name = parse_ref_name(ref_path, "parameters")?;
                self.components
                    .and_then(|c| c.parameters.get(name))
                    .and_then(|p| match p {
                        ParameterOrRef::Parameter(p) => Some(p),
                        ParameterOrRef::Ref { .. } => None,
                    })
                    .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.clone()))
            }
        }
    }

    pub fn request_body(
        &self,
        body: &'a RequestBodyOrRef,
    ) -> Result<&'a RequestBody, ResolveError> {
        match body {
            RequestBodyOrRef::RequestBody(rb) => Ok(rb),
            RequestBodyOrRef::Ref { ref_path } => {
                let name = parse_ref_name(ref_path, "requestBodies")?;
                self.components
                    .and_then(|c| c.request_bodies.get(name))
                    .and_then(|rb| match rb {
                        RequestBodyOrRef::RequestBody(rb) => Some(rb),
                        RequestBodyOrRef::Ref { .. } => None,
                    })
                    .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.clone()))
            }
        }
    }

    pub fn response(&self, resp: &'a ResponseOrRef) -> Result<&'a Response, ResolveError> {
        match resp {
            ResponseOrRef::Response(r) => Ok(r),
            ResponseOrRef::Ref { ref_path } => {
                let name = parse_ref_name(ref_path, "responses")?;
                self.components
                    .and_then(|c| c.responses.get(name))
                    .and_then(|r| match r {
                        ResponseOrRef::Response(r) => Some(r),
                        ResponseOrRef::Ref { .. } => None,
                    })
                    .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.clone()))
            }
        }
    }
}

/// Parse a `$ref` path like `#/components/parameters/TraceSpan` and extract the name.
fn parse_ref_name<'a>(ref_path: &'a str, expected_section: &str) -> Result<&'a str, ResolveError> {
    let stripped = ref_path
        .strip_prefix("#/components/")
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    let (section, name) = stripped
        .split_once('/')
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    if section != expected_section {
        return Err(ResolveError::InvalidRefFormat(format!(
            "expected section '{expected_section}', got '{section}' in {ref_path}"
        )));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_ref() {
        assert_eq!(simple_ref("#/components/schemas/Telegraf"), "Telegraf");
        assert_eq!(simple_ref("Telegraf"), "Telegraf");
    }

    #[test]
    fn test_lookup_schema_single_hop() {
        let definitions: Definitions = serde_yaml_ng::from_str(
            r#"
Bucket:
  type: object
  properties:
    name: {type: string}
BucketAlias:
  $ref: '#/components/schemas/Bucket'
"#,
        )
        .unwrap();

        assert!(lookup_schema(&definitions, "#/components/schemas/Bucket").is_some());
        assert!(lookup_schema(&definitions, "#/components/schemas/BucketAlias").is_none());
        assert!(lookup_schema(&definitions, "#/components/schemas/Missing").is_none());
    }

    #[test]
    fn test_parse_ref_name_checks_section() {
        assert_eq!(
            parse_ref_name("#/components/parameters/TraceSpan", "parameters").unwrap(),
            "TraceSpan"
        );
        assert!(matches!(
            parse_ref_name("#/components/schemas/TraceSpan", "parameters"),
            Err(ResolveError::InvalidRefFormat(_))
        ));
        assert!(matches!(
            parse_ref_name("TraceSpan", "parameters"),
            Err(ResolveError::InvalidRefFormat(_))
        ));
    }
}
