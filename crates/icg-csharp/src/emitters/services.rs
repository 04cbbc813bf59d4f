use minijinja::{Environment, context};
use serde::Serialize;

use icg_core::GeneratedFile;
use icg_core::model::{CodegenOperation, CodegenParameter, adapter::quote_list};

use super::{Header, to_param_name};
use crate::generator::{ApiGroup, GeneratorError};

#[derive(Debug, Serialize)]
struct ParamView<'a> {
    name: String,
    base_name: &'a str,
    description: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct OperationView<'a> {
    nickname: &'a str,
    summary: Option<&'a str>,
    notes: Option<&'a str>,
    deprecated: bool,
    path: &'a str,
    /// RestSharp `Method` member.
    method: String,
    return_type: Option<&'a str>,
    /// The response body is handed back as-is instead of deserialized.
    is_raw: bool,
    signature: String,
    async_signature: String,
    arguments: String,
    params: Vec<ParamView<'a>>,
    required_params: Vec<ParamView<'a>>,
    path_params: Vec<ParamView<'a>>,
    query_params: Vec<ParamView<'a>>,
    header_params: Vec<ParamView<'a>>,
    body: Option<String>,
    consumes: String,
    produces: String,
    api_key_headers: Vec<&'a str>,
}

fn param_view(param: &CodegenParameter) -> ParamView<'_> {
    ParamView {
        name: to_param_name(&param.param_name),
        base_name: &param.base_name,
        description: param.description.as_deref(),
    }
}

/// `string telegrafID, string zapTraceSpan = null`
fn signature(params: &[CodegenParameter]) -> String {
    params
        .iter()
        .map(|param| {
            let name = to_param_name(&param.param_name);
            if param.required {
                format!("{} {name}", param.data_type)
            } else {
                format!("{} {name} = null", param.data_type)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn param_views(params: &[CodegenParameter]) -> Vec<ParamView<'_>> {
    params.iter().map(param_view).collect()
}

fn rest_method(http_method: &str) -> String {
    let lower = http_method.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn operation_view(op: &CodegenOperation) -> OperationView<'_> {
    let signature = signature(&op.all_params);
    let async_signature = if signature.is_empty() {
        "CancellationToken cancellationToken = default".to_string()
    } else {
        format!("{signature}, CancellationToken cancellationToken = default")
    };

    OperationView {
        nickname: &op.operation_id,
        summary: op.summary.as_deref(),
        notes: op.notes.as_deref(),
        deprecated: op.deprecated,
        path: &op.path,
        method: rest_method(&op.http_method),
        return_type: op.return_type.as_deref(),
        is_raw: op.return_type.as_deref() == Some("string"),
        arguments: op
            .all_params
            .iter()
            .map(|p| to_param_name(&p.param_name))
            .collect::<Vec<_>>()
            .join(", "),
        signature,
        async_signature,
        params: param_views(&op.all_params),
        required_params: op.all_params.iter().filter(|p| p.required).map(param_view).collect(),
        path_params: param_views(&op.path_params),
        query_params: param_views(&op.query_params),
        header_params: param_views(&op.header_params),
        body: op.body_param.as_ref().map(|p| to_param_name(&p.param_name)),
        consumes: quote_list(&op.consumes),
        produces: quote_list(&op.produces),
        api_key_headers: op
            .auth_methods
            .iter()
            .filter(|m| m.is_api_key && m.is_key_in_header)
            .filter_map(|m| m.key_param_name.as_deref())
            .collect(),
    }
}

/// Render the interface and implementation of one API class.
pub fn emit_service(
    env: &Environment<'_>,
    header: &Header,
    api: &ApiGroup,
) -> Result<String, GeneratorError> {
    let tmpl = env.get_template("service.cs.j2")?;
    let operations: Vec<OperationView<'_>> = api.operations.iter().map(operation_view).collect();
    let rendered = tmpl.render(context! {
        header => header,
        api => api,
        operations => operations,
    })?;
    Ok(rendered)
}

/// Emit `Service/<Class>.cs` for every API group.
pub fn emit_services(
    env: &Environment<'_>,
    header: &Header,
    apis: &[ApiGroup],
) -> Result<Vec<GeneratedFile>, GeneratorError> {
    apis.iter()
        .map(|api| {
            Ok(GeneratedFile {
                path: format!("Service/{}.cs", api.classname),
                content: emit_service(env, header, api)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use icg_core::model::CodegenSecurity;

    fn header() -> Header {
        Header {
            title: "Influx API Service".to_string(),
            description: None,
            version: "2.0.0".to_string(),
            package_name: "InfluxDB.Client.Api".to_string(),
        }
    }

    fn param(base_name: &str, param_name: &str, required: bool) -> CodegenParameter {
        CodegenParameter {
            base_name: base_name.to_string(),
            param_name: param_name.to_string(),
            data_type: "string".to_string(),
            required,
            ..Default::default()
        }
    }

    fn get_telegraf() -> CodegenOperation {
        let id = CodegenParameter {
            is_path_param: true,
            ..param("telegrafID", "telegrafID", true)
        };
        let span = CodegenParameter {
            is_header_param: true,
            ..param("Zap-Trace-Span", "zapTraceSpan", false)
        };
        CodegenOperation {
            operation_id: "GetTelegrafsID".to_string(),
            base_name: "Telegrafs".to_string(),
            path: "/api/v2/telegrafs/{telegrafID}".to_string(),
            http_method: "GET".to_string(),
            summary: Some("Retrieve a Telegraf configuration".to_string()),
            all_params: vec![id.clone(), span.clone()],
            path_params: vec![id],
            header_params: vec![span],
            return_type: Some("Telegraf".to_string()),
            produces: vec!["application/json".to_string()],
            auth_methods: vec![CodegenSecurity {
                name: "TokenAuthentication".to_string(),
                is_api_key: true,
                is_key_in_header: true,
                key_param_name: Some("Authorization".to_string()),
                ..Default::default()
            }],
            has_auth_methods: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_signature() {
        let op = get_telegraf();
        assert_eq!(signature(&op.all_params), "string telegrafID, string zapTraceSpan = null");
        assert_eq!(signature(&[]), "");
    }

    #[test]
    fn test_rest_method() {
        assert_eq!(rest_method("GET"), "Get");
        assert_eq!(rest_method("DELETE"), "Delete");
    }

    #[test]
    fn test_service() {
        let env = super::super::environment().unwrap();
        let raw = CodegenOperation {
            operation_id: "GetTelegrafsIDstring".to_string(),
            return_type: Some("string".to_string()),
            produces: vec!["application/toml".to_string()],
            ..get_telegraf()
        };
        let api = ApiGroup {
            base_name: "Telegrafs".to_string(),
            classname: "TelegrafsService".to_string(),
            operations: vec![get_telegraf(), raw],
        };

        let cs = emit_service(&env, &header(), &api).unwrap();

        assert!(cs.contains("namespace InfluxDB.Client.Api.Service"));
        assert!(cs.contains("public interface ITelegrafsService : IApiAccessor"));
        assert!(cs.contains("public partial class TelegrafsService : ITelegrafsService"));
        assert!(cs.contains("Telegraf GetTelegrafsID(string telegrafID, string zapTraceSpan = null);"));
        assert!(cs.contains(
            "System.Threading.Tasks.Task<string> GetTelegrafsIDstringAsync(string telegrafID, string zapTraceSpan = null, CancellationToken cancellationToken = default);"
        ));
        assert!(cs.contains("new RestRequest(\"/api/v2/telegrafs/{telegrafID}\", Method.Get)"));
        assert!(cs.contains("localVarRequest.AddUrlSegment(\"telegrafID\""));
        assert!(cs.contains("localVarRequest.AddHeader(\"Zap-Trace-Span\""));
        assert!(cs.contains("GetApiKeyWithPrefix(\"Authorization\")"));
        assert!(cs.contains("new string[] { \"application/toml\" }"));
        assert!(cs.contains("localVarResponse.Content);"));
        assert!(cs.contains("(Telegraf) Configuration.ApiClient.Deserialize(localVarResponse, typeof(Telegraf))"));
    }

    #[test]
    fn test_services_paths() {
        let env = super::super::environment().unwrap();
        let apis = vec![ApiGroup {
            base_name: "Default".to_string(),
            classname: "DefaultService".to_string(),
            operations: Vec::new(),
        }];

        let files = emit_services(&env, &header(), &apis).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "Service/DefaultService.cs");
    }
}
