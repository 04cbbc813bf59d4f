use indexmap::IndexMap;

use icg_core::error::CodegenError;
use icg_core::model::{
    CodegenModel, CodegenOperation, CodegenParameter, CodegenProperty, CodegenSecurity, EnumVar,
    HttpMethod, SupportingFile,
};
use icg_core::parse::components::Definitions;
use icg_core::parse::operation::Operation;
use icg_core::parse::parameter::{Parameter, ParameterLocation};
use icg_core::parse::ref_resolve::{RefLookup, lookup_schema, simple_ref};
use icg_core::parse::response::find_success_response;
use icg_core::parse::schema::{AdditionalProperties, Schema, SchemaOrRef};
use icg_core::parse::security::{SecurityScheme, SecuritySchemeType};
use icg_core::parse::spec::OpenApiSpec;
use icg_core::transform::name_normalizer::{initial_caps, normalize_name, operation_id_from_route};
use icg_core::ClientCodegen;

use crate::type_mapper::{
    default_literal, is_primitive, schema_or_ref_to_csharp, to_enum_var_name, to_model_name,
};

/// Folder the client runtime files are written to.
pub const CLIENT_FOLDER: &str = "Client";

/// Plain C# client generator: models, `<Tag>Api` classes and the client runtime.
#[derive(Debug, Clone)]
pub struct CSharpClientCodegen {
    package_name: String,
    supporting_files: Vec<SupportingFile>,
}

impl CSharpClientCodegen {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            supporting_files: Vec::new(),
        }
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    fn from_property(&self, base_name: &str, schema: &SchemaOrRef, required: bool) -> CodegenProperty {
        let normalized = normalize_name(base_name);
        let mut property = CodegenProperty {
            base_name: base_name.to_string(),
            name: normalized.pascal_case.clone(),
            name_in_camel_case: normalized.pascal_case.clone(),
            name_in_snake_case: normalized.screaming_snake,
            data_type: schema_or_ref_to_csharp(schema),
            required,
            ..Default::default()
        };

        let inline = match schema {
            SchemaOrRef::Ref { ref_path } => {
                property.complex_type = Some(to_model_name(simple_ref(ref_path)));
                return property;
            }
            SchemaOrRef::Schema(inline) => inline,
        };

        property.description = inline.description.clone();
        property.is_read_only = inline.is_read_only();
        property.is_nullable = inline.is_nullable();
        property.is_container = inline.is_array()
            || matches!(inline.additional_properties, Some(AdditionalProperties::Schema(_)));
        property.complex_type = inline
            .items
            .as_deref()
            .and_then(SchemaOrRef::as_ref_path)
            .map(|ref_path| to_model_name(simple_ref(ref_path)));

        if inline.is_string() && !inline.enum_values.is_empty() {
            let literals = inline.enum_literals();
            let enum_vars = enum_vars(&literals);
            property.is_enum = true;
            property.datatype_with_enum = Some(format!("{}Enum", normalized.pascal_case));
            property.default_value = inline.default_value.as_ref().and_then(|default| {
                let default = default.as_str()?;
                let var = enum_vars.iter().find(|v| v.value == default)?;
                Some(format!("{}Enum.{}", normalized.pascal_case, var.name))
            });
            property.enum_values = literals;
            property.enum_vars = enum_vars;
        } else {
            property.default_value = inline.default_value.as_ref().map(default_literal);
        }

        property
    }

    fn from_parameter(&self, param: &Parameter) -> CodegenParameter {
        let data_type = param
            .schema
            .as_ref()
            .map(schema_or_ref_to_csharp)
            .unwrap_or_else(|| "string".to_string());
        let default_value = param.schema_default().map(default_literal);

        CodegenParameter {
            base_name: param.name.clone(),
            param_name: normalize_name(&param.name).camel_case,
            description: param.description.clone(),
            default_value,
            required: param.is_required(),
            is_path_param: param.location == ParameterLocation::Path,
            is_query_param: param.location == ParameterLocation::Query,
            is_header_param: param.location == ParameterLocation::Header,
            is_body_param: false,
            is_primitive_type: is_primitive(&data_type),
            is_string: data_type == "string",
            data_type,
        }
    }
}

/// Enum constants for the given wire values, in declaration order.
pub fn enum_vars(values: &[String]) -> Vec<EnumVar> {
    values
        .iter()
        .map(|value| EnumVar {
            name: to_enum_var_name(value),
            value: value.clone(),
        })
        .collect()
}

fn from_security(name: &str, scheme: &SecurityScheme) -> CodegenSecurity {
    let is_api_key = scheme.scheme_type == SecuritySchemeType::ApiKey;
    CodegenSecurity {
        name: name.to_string(),
        is_basic: scheme.is_basic(),
        is_bearer: scheme.is_bearer(),
        is_api_key,
        key_param_name: if is_api_key { scheme.name.clone() } else { None },
        is_key_in_header: scheme.api_key_header().is_some(),
    }
}

fn split_views(model: &mut CodegenModel) {
    for var in &model.vars {
        if var.required {
            model.required_vars.push(var.clone());
        } else {
            model.optional_vars.push(var.clone());
        }
        if var.is_read_only {
            model.read_only_vars.push(var.clone());
        } else {
            model.read_write_vars.push(var.clone());
        }
    }
    model.all_vars = model
        .parent_vars
        .iter()
        .chain(&model.vars)
        .cloned()
        .collect();
}

impl ClientCodegen for CSharpClientCodegen {
    fn name(&self) -> &str {
        "csharp"
    }

    fn help(&self) -> &str {
        "Generates a C# client library."
    }

    fn process_opts(&mut self) {
        let project_file = format!("{}.csproj", self.package_name);
        let mut files: Vec<SupportingFile> = [
            "IApiAccessor.cs",
            "Configuration.cs",
            "IReadableConfiguration.cs",
            "GlobalConfiguration.cs",
            "ApiClient.cs",
            "ApiException.cs",
            "ApiResponse.cs",
            "ExceptionFactory.cs",
            "OpenAPIDateConverter.cs",
        ]
        .into_iter()
        .map(|file| SupportingFile::new(&format!("{file}.j2"), CLIENT_FOLDER, file))
        .collect();
        files.push(SupportingFile::new("README.md.j2", "", "README.md"));
        files.push(SupportingFile::new("gitignore.j2", "", ".gitignore"));
        files.push(SupportingFile::new("Project.csproj.j2", "", &project_file));
        self.supporting_files = files;
    }

    fn supporting_files(&self) -> &[SupportingFile] {
        &self.supporting_files
    }

    fn from_model(
        &self,
        name: &str,
        schema: &Schema,
        definitions: &Definitions,
    ) -> Result<CodegenModel, CodegenError> {
        let mut model = CodegenModel {
            name: name.to_string(),
            classname: to_model_name(name),
            description: schema.description.clone(),
            discriminator: schema
                .discriminator
                .as_ref()
                .map(|d| d.property_name.clone()),
            ..Default::default()
        };

        if !schema.enum_values.is_empty() {
            model.is_enum = true;
            model.enum_vars = enum_vars(&schema.enum_literals());
        }

        let mut properties: Vec<(&String, &SchemaOrRef)> = schema.properties.iter().collect();
        let mut required: Vec<&String> = schema.required.iter().collect();

        for member in &schema.all_of {
            match member {
                SchemaOrRef::Ref { ref_path } if model.parent.is_none() => {
                    model.parent = Some(to_model_name(simple_ref(ref_path)));
                    if let Some(parent) = lookup_schema(definitions, ref_path) {
                        model.parent_vars = parent
                            .properties
                            .iter()
                            .map(|(prop, s)| self.from_property(prop, s, parent.required.contains(prop)))
                            .collect();
                    }
                }
                SchemaOrRef::Ref { ref_path } => {
                    if let Some(mixin) = lookup_schema(definitions, ref_path) {
                        properties.extend(mixin.properties.iter());
                        required.extend(mixin.required.iter());
                    }
                }
                SchemaOrRef::Schema(inline) => {
                    properties.extend(inline.properties.iter());
                    required.extend(inline.required.iter());
                }
            }
        }

        model.interfaces = schema
            .one_of
            .iter()
            .filter_map(SchemaOrRef::as_ref_path)
            .map(|ref_path| to_model_name(simple_ref(ref_path)))
            .collect();

        model.vars = properties
            .into_iter()
            .map(|(prop, s)| self.from_property(prop, s, required.contains(&prop)))
            .collect();
        split_views(&mut model);

        Ok(model)
    }

    fn from_operation(
        &self,
        path: &str,
        method: HttpMethod,
        operation: &Operation,
        spec: &OpenApiSpec,
    ) -> Result<CodegenOperation, CodegenError> {
        let lookup = RefLookup::new(spec);
        let path_item = spec.paths.get(path);

        let mut op = CodegenOperation {
            operation_id: operation
                .operation_id
                .as_deref()
                .map(initial_caps)
                .unwrap_or_else(|| operation_id_from_route(method.as_str(), path)),
            base_name: operation
                .tags
                .first()
                .map(|tag| to_model_name(tag))
                .unwrap_or_else(|| "Default".to_string()),
            path: path.to_string(),
            http_method: method.as_str().to_string(),
            summary: operation.summary.clone(),
            notes: operation.description.clone(),
            deprecated: operation.deprecated.unwrap_or(false),
            ..Default::default()
        };

        let mut parameters: Vec<&Parameter> = Vec::new();
        let inherited = path_item.map(|item| item.parameters.as_slice()).unwrap_or_default();
        for param in inherited.iter().chain(&operation.parameters) {
            let param = lookup.parameter(param)?;
            match parameters.iter_mut().find(|p| p.same_slot(param)) {
                Some(existing) => *existing = param,
                None => parameters.push(param),
            }
        }
        for param in parameters {
            let param = self.from_parameter(param);
            if param.is_path_param {
                op.path_params.push(param.clone());
            } else if param.is_query_param {
                op.query_params.push(param.clone());
            } else if param.is_header_param {
                op.header_params.push(param.clone());
            }
            op.all_params.push(param);
        }

        if let Some(body) = operation.request_body.as_ref() {
            let body = lookup.request_body(body)?;
            op.consumes = body.content.keys().cloned().collect();
            if let Some(schema) = body.preferred_content().and_then(|(_, media)| media.schema.as_ref()) {
                let param_name = match schema.as_ref_path() {
                    Some(ref_path) => normalize_name(simple_ref(ref_path)).camel_case,
                    None => "body".to_string(),
                };
                let data_type = schema_or_ref_to_csharp(schema);
                let param = CodegenParameter {
                    base_name: param_name.clone(),
                    param_name,
                    description: body.description.clone(),
                    required: body.required,
                    is_body_param: true,
                    is_primitive_type: is_primitive(&data_type),
                    is_string: data_type == "string",
                    data_type,
                    ..Default::default()
                };
                op.body_param = Some(param.clone());
                op.all_params.push(param);
            }
        }
        op.all_params.sort_by_key(|p| !p.required);

        if let Some(response) = find_success_response(&operation.responses) {
            let response = lookup.response(response)?;
            op.produces = response.media_types();
            op.return_type = response
                .preferred_content()
                .map(|(_, media)| media)
                .and_then(|m| m.schema.as_ref())
                .map(schema_or_ref_to_csharp);
        }

        let requirements = operation.security.as_ref().or(spec.security.as_ref());
        for requirement in requirements.into_iter().flatten() {
            for scheme_name in requirement.keys() {
                if op.auth_methods.iter().any(|m| &m.name == scheme_name) {
                    continue;
                }
                match spec.security_scheme(scheme_name) {
                    Some(scheme) => op.auth_methods.push(from_security(scheme_name, scheme)),
                    None => log::debug!("{} requires undeclared scheme {scheme_name}", op.operation_id),
                }
            }
        }
        op.has_auth_methods = !op.auth_methods.is_empty();

        Ok(op)
    }

    fn post_process_all_models(
        &self,
        models: IndexMap<String, CodegenModel>,
    ) -> Result<IndexMap<String, CodegenModel>, CodegenError> {
        Ok(models)
    }

    fn post_process_operations_with_models(
        &self,
        operations: Vec<CodegenOperation>,
        _models: &IndexMap<String, CodegenModel>,
    ) -> Result<Vec<CodegenOperation>, CodegenError> {
        Ok(operations)
    }

    fn to_api_name(&self, name: &str) -> String {
        if name.is_empty() {
            return "DefaultApi".to_string();
        }
        format!("{}Api", initial_caps(name))
    }
}
