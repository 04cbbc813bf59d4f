use serde::Serialize;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Trace => "TRACE",
        }
    }
}

/// A resolved path/query/header/body parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CodegenParameter {
    /// Name on the wire.
    pub base_name: String,
    /// Identifier used in generated method signatures.
    pub param_name: String,
    pub data_type: String,
    pub description: Option<String>,
    pub default_value: Option<String>,
    pub required: bool,
    pub is_path_param: bool,
    pub is_query_param: bool,
    pub is_header_param: bool,
    pub is_body_param: bool,
    pub is_primitive_type: bool,
    pub is_string: bool,
}

/// An authentication method an operation accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CodegenSecurity {
    pub name: String,
    pub is_basic: bool,
    pub is_bearer: bool,
    pub is_api_key: bool,
    pub key_param_name: Option<String>,
    pub is_key_in_header: bool,
}

/// An API operation ready for rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CodegenOperation {
    pub operation_id: String,
    /// Group (tag) the operation is rendered under.
    pub base_name: String,
    pub path: String,
    pub http_method: String,
    pub summary: Option<String>,
    pub notes: Option<String>,
    pub deprecated: bool,
    pub all_params: Vec<CodegenParameter>,
    pub path_params: Vec<CodegenParameter>,
    pub query_params: Vec<CodegenParameter>,
    pub header_params: Vec<CodegenParameter>,
    pub body_param: Option<CodegenParameter>,
    pub return_type: Option<String>,
    /// Media types of the success response, in declaration order.
    pub produces: Vec<String>,
    /// Media types accepted for the request body.
    pub consumes: Vec<String>,
    pub auth_methods: Vec<CodegenSecurity>,
    pub has_auth_methods: bool,
}
