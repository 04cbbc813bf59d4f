use indexmap::IndexMap;

use icg_core::model::{CodegenOperation, CodegenParameter};
use icg_core::parse::components::Definitions;
use icg_core::parse::media_type::APPLICATION_JSON;
use icg_core::parse::operation::Operation;
use icg_core::parse::schema::SchemaOrRef;
use icg_core::parse::server::closest_server;
use icg_core::parse::spec::OpenApiSpec;

/// Return type of the extra methods generated for non-JSON representations.
const RAW_RETURN_TYPE: &str = "string";

fn params_mut(op: &mut CodegenOperation) -> impl Iterator<Item = &mut CodegenParameter> {
    op.all_params
        .iter_mut()
        .chain(op.path_params.iter_mut())
        .chain(op.query_params.iter_mut())
        .chain(op.header_params.iter_mut())
        .chain(op.body_param.iter_mut())
}

/// Optional parameters typed by an enum definition, with no default, become
/// nullable so callers can leave them out.
pub fn mark_optional_enum_params(op: &mut CodegenOperation, definitions: &Definitions) {
    let is_enum_definition = |data_type: &str| {
        definitions
            .get(data_type)
            .and_then(SchemaOrRef::as_schema)
            .is_some_and(|schema| !schema.enum_values.is_empty())
    };

    for param in params_mut(op) {
        if param.default_value.is_none()
            && !param.required
            && !param.data_type.ends_with('?')
            && is_enum_definition(&param.data_type)
        {
            param.data_type.push('?');
        }
    }
}

/// Prefix the operation path with the URL of the closest declared server:
/// the operation's, then its path item's, then the document's.
pub fn prefix_base_path(op: &mut CodegenOperation, path: &str, operation: &Operation, spec: &OpenApiSpec) {
    let path_servers = spec.paths.get(path).map(|item| item.servers.as_slice()).unwrap_or_default();
    let server = closest_server(&[operation.servers.as_slice(), path_servers, spec.servers.as_slice()]);

    match server {
        Some(server) if !server.is_root() => op.path = format!("{}{}", server.resolved_url(), op.path),
        Some(_) => {}
        None => log::debug!("{} has no server, path left as {}", op.operation_id, op.path),
    }
}

fn authorization_param() -> CodegenParameter {
    CodegenParameter {
        base_name: "Authorization".to_string(),
        param_name: "authorization".to_string(),
        data_type: "string".to_string(),
        description: Some("An auth credential for the Basic scheme".to_string()),
        is_header_param: true,
        is_primitive_type: true,
        is_string: true,
        ..Default::default()
    }
}

/// Operations secured by HTTP basic auth take the credential as an
/// `Authorization` header argument, one per basic scheme.
pub fn add_basic_auth_headers(operations: &mut [CodegenOperation]) {
    for op in operations.iter_mut().filter(|op| op.has_auth_methods) {
        let basic_schemes = op.auth_methods.iter().filter(|m| m.is_basic).count();
        for _ in 0..basic_schemes {
            op.all_params.push(authorization_param());
            op.header_params.push(authorization_param());
        }
    }
}

/// Operations producing several media types get an extra method per
/// distinct non-JSON return type, placed right after the original.
pub fn split_by_media_type(operations: Vec<CodegenOperation>) -> Vec<CodegenOperation> {
    let mut result = Vec::with_capacity(operations.len());
    for op in operations {
        let variants = if op.produces.len() > 1 {
            media_type_variants(&op)
        } else {
            Vec::new()
        };
        result.push(op);
        result.extend(variants);
    }
    result
}

fn media_type_variants(op: &CodegenOperation) -> Vec<CodegenOperation> {
    // return type → first media type that maps to it
    let mut return_types: IndexMap<&str, &str> = IndexMap::new();
    for media_type in op.produces.iter().filter(|m| *m != APPLICATION_JSON) {
        return_types.entry(RAW_RETURN_TYPE).or_insert(media_type);
    }

    return_types
        .into_iter()
        .map(|(return_type, media_type)| {
            log::debug!("{} also returns {return_type} for {media_type}", op.operation_id);
            CodegenOperation {
                operation_id: format!("{}{return_type}", op.operation_id),
                base_name: format!("{}{return_type}", op.base_name),
                return_type: Some(return_type.to_string()),
                produces: vec![media_type.to_string()],
                ..op.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use icg_core::model::CodegenSecurity;

    fn param(base_name: &str, data_type: &str) -> CodegenParameter {
        CodegenParameter {
            base_name: base_name.to_string(),
            param_name: base_name.to_string(),
            data_type: data_type.to_string(),
            is_query_param: true,
            ..Default::default()
        }
    }

    fn definitions() -> Definitions {
        serde_yaml_ng::from_str(
            r#"
TelegrafStatus:
  type: string
  enum: [active, inactive]
Telegraf:
  type: object
  properties:
    id: {type: string}
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_optional_enum_params_become_nullable() {
        let status = param("status", "TelegrafStatus");
        let mut required = param("state", "TelegrafStatus");
        required.required = true;
        let mut defaulted = param("mode", "TelegrafStatus");
        defaulted.default_value = Some("TelegrafStatus.Active".to_string());
        let mut op = CodegenOperation {
            all_params: vec![status.clone(), required, defaulted, param("config", "Telegraf")],
            query_params: vec![status],
            ..Default::default()
        };

        mark_optional_enum_params(&mut op, &definitions());
        mark_optional_enum_params(&mut op, &definitions());

        let types: Vec<_> = op.all_params.iter().map(|p| p.data_type.as_str()).collect();
        assert_eq!(types, vec!["TelegrafStatus?", "TelegrafStatus", "TelegrafStatus", "Telegraf"]);
        assert_eq!(op.query_params[0].data_type, "TelegrafStatus?");
    }

    fn spec(yaml: &str) -> OpenApiSpec {
        icg_core::parse::from_yaml(yaml).unwrap()
    }

    const SERVERS: &str = r#"
openapi: "3.0.0"
info: {title: Test, version: "1.0"}
servers:
  - url: /api/v2
paths:
  /telegrafs:
    get:
      responses: {}
  /ready:
    servers:
      - url: /
    get:
      responses: {}
  /setup:
    servers:
      - url: /private
    get:
      servers:
        - url: /internal
      responses: {}
  /health:
    servers:
      - url: "/{version}"
        variables:
          version: {default: v1}
    get:
      responses: {}
"#;

    fn prefixed(spec: &OpenApiSpec, path: &str) -> String {
        let operation = spec.paths[path].get.as_ref().unwrap();
        let mut op = CodegenOperation {
            path: path.to_string(),
            ..Default::default()
        };
        prefix_base_path(&mut op, path, operation, spec);
        op.path
    }

    #[test]
    fn test_base_path_prefix() {
        let spec = spec(SERVERS);
        assert_eq!(prefixed(&spec, "/telegrafs"), "/api/v2/telegrafs");
        assert_eq!(prefixed(&spec, "/ready"), "/ready");
        assert_eq!(prefixed(&spec, "/setup"), "/internal/setup");
        assert_eq!(prefixed(&spec, "/health"), "/v1/health");
    }

    #[test]
    fn test_base_path_without_servers() {
        let spec = spec(
            r#"
openapi: "3.0.0"
info: {title: Test, version: "1.0"}
paths:
  /health:
    get:
      responses: {}
"#,
        );
        assert_eq!(prefixed(&spec, "/health"), "/health");
    }

    fn secured(is_basic: bool) -> CodegenOperation {
        CodegenOperation {
            operation_id: "PostSignin".to_string(),
            all_params: vec![param("zapTraceSpan", "string")],
            header_params: vec![param("zapTraceSpan", "string")],
            auth_methods: vec![CodegenSecurity {
                name: "BasicAuthentication".to_string(),
                is_basic,
                ..Default::default()
            }],
            has_auth_methods: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_basic_auth_header() {
        let mut operations = vec![secured(true), secured(false)];

        add_basic_auth_headers(&mut operations);

        let basic = &operations[0];
        assert_eq!(basic.all_params.len(), 2);
        assert_eq!(basic.header_params.len(), 2);
        let auth = basic.header_params.last().unwrap();
        assert_eq!(auth.base_name, "Authorization");
        assert_eq!(auth.param_name, "authorization");
        assert_eq!(auth.data_type, "string");
        assert!(auth.is_header_param && auth.is_primitive_type && auth.is_string);
        assert_eq!(auth.description.as_deref(), Some("An auth credential for the Basic scheme"));

        assert_eq!(operations[1].all_params.len(), 1);
    }

    #[test]
    fn test_split_by_media_type() {
        let get = CodegenOperation {
            operation_id: "GetTelegrafsID".to_string(),
            base_name: "Telegrafs".to_string(),
            return_type: Some("Telegraf".to_string()),
            produces: vec![
                "application/toml".to_string(),
                "application/json".to_string(),
                "application/octet-stream".to_string(),
            ],
            header_params: vec![param("Accept", "string")],
            ..Default::default()
        };
        let list = CodegenOperation {
            operation_id: "GetTelegrafs".to_string(),
            produces: vec!["application/json".to_string()],
            ..Default::default()
        };

        let operations = split_by_media_type(vec![get, list]);

        let ids: Vec<_> = operations.iter().map(|o| o.operation_id.as_str()).collect();
        assert_eq!(ids, vec!["GetTelegrafsID", "GetTelegrafsIDstring", "GetTelegrafs"]);
        let raw = &operations[1];
        assert_eq!(raw.base_name, "Telegrafsstring");
        assert_eq!(raw.return_type.as_deref(), Some("string"));
        assert_eq!(raw.produces, vec!["application/toml"]);
        assert_eq!(raw.header_params, operations[0].header_params);
        assert_eq!(operations[0].return_type.as_deref(), Some("Telegraf"));
    }

    #[test]
    fn test_split_skips_json_only() {
        let op = CodegenOperation {
            operation_id: "GetReady".to_string(),
            produces: vec!["application/json".to_string(), "application/json".to_string()],
            ..Default::default()
        };
        assert_eq!(split_by_media_type(vec![op]).len(), 1);
    }
}
