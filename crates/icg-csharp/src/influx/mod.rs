//! InfluxDB customizations layered over a C# client generator.

pub mod models;
pub mod operations;

use indexmap::IndexMap;

use icg_core::ClientCodegen;
use icg_core::error::CodegenError;
use icg_core::model::{CodegenModel, CodegenOperation, HttpMethod, SupportingFile};
use icg_core::parse::components::Definitions;
use icg_core::parse::operation::Operation;
use icg_core::parse::schema::Schema;
use icg_core::parse::spec::OpenApiSpec;
use icg_core::transform::name_normalizer::initial_caps;

use crate::base::CSharpClientCodegen;

/// Client runtime files kept from the delegate. Everything else it would
/// emit (project files, docs, tests) is maintained by hand.
pub const ACCEPTED_SUPPORTING_FILES: [&str; 9] = [
    "ApiResponse.cs",
    "OpenAPIDateConverter.cs",
    "ExceptionFactory.cs",
    "Configuration.cs",
    "ApiException.cs",
    "IApiAccessor.cs",
    "ApiClient.cs",
    "IReadableConfiguration.cs",
    "GlobalConfiguration.cs",
];

/// Wraps a C# generator and applies the InfluxDB-specific hooks to whatever
/// it produces.
#[derive(Debug, Clone)]
pub struct InfluxCSharpGenerator<D = CSharpClientCodegen> {
    delegate: D,
    supporting_files: Vec<SupportingFile>,
}

impl<D: ClientCodegen> InfluxCSharpGenerator<D> {
    pub fn new(delegate: D) -> Self {
        Self {
            delegate,
            supporting_files: Vec::new(),
        }
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }
}

impl InfluxCSharpGenerator<CSharpClientCodegen> {
    /// Generator over the plain C# delegate for the given package.
    pub fn for_package(package_name: impl Into<String>) -> Self {
        Self::new(CSharpClientCodegen::new(package_name))
    }
}

impl<D: ClientCodegen> ClientCodegen for InfluxCSharpGenerator<D> {
    fn name(&self) -> &str {
        "influx-csharp"
    }

    fn help(&self) -> &str {
        "Generates a influx-csharp client library."
    }

    fn process_opts(&mut self) {
        self.delegate.process_opts();
        self.supporting_files = self
            .delegate
            .supporting_files()
            .iter()
            .filter(|file| ACCEPTED_SUPPORTING_FILES.contains(&file.destination_filename.as_str()))
            .cloned()
            .collect();
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
        let mut model = self.delegate.from_model(name, schema, definitions)?;

        models::attach_type_adapters(&mut model, name, schema, definitions);
        models::set_enum_defaults(&mut model);
        models::prune_read_only_parent_vars(&mut model);
        if name == models::TELEGRAF_REQUEST_PLUGIN {
            models::add_plugin_type(&mut model);
        }

        Ok(model)
    }

    fn from_operation(
        &self,
        path: &str,
        method: HttpMethod,
        operation: &Operation,
        spec: &OpenApiSpec,
    ) -> Result<CodegenOperation, CodegenError> {
        let mut op = self.delegate.from_operation(path, method, operation, spec)?;

        operations::mark_optional_enum_params(&mut op, spec.definitions());
        operations::prefix_base_path(&mut op, path, operation, spec);

        Ok(op)
    }

    fn post_process_all_models(
        &self,
        models: IndexMap<String, CodegenModel>,
    ) -> Result<IndexMap<String, CodegenModel>, CodegenError> {
        let mut models = self.delegate.post_process_all_models(models)?;
        for (name, model) in models.iter_mut() {
            if models::is_telegraf_plugin(name) {
                models::configure_telegraf_plugin(model)?;
            }
        }
        Ok(models)
    }

    fn post_process_operations_with_models(
        &self,
        operations: Vec<CodegenOperation>,
        models: &IndexMap<String, CodegenModel>,
    ) -> Result<Vec<CodegenOperation>, CodegenError> {
        let mut operations = self
            .delegate
            .post_process_operations_with_models(operations, models)?;

        // Clones made by the split must carry the injected header too.
        operations::add_basic_auth_headers(&mut operations);
        Ok(operations::split_by_media_type(operations))
    }

    fn to_api_name(&self, name: &str) -> String {
        if name.is_empty() {
            return "DefaultService".to_string();
        }
        format!("{}Service", initial_caps(name))
    }
}

#[cfg(test)]
mod tests {
    use icg_core::parse::schema::SchemaOrRef;

    use super::*;

    const DEFINITIONS: &str = r#"
Blank:
  type: object
Holder:
  type: object
  properties:
    shapeID:
      oneOf:
        - $ref: '#/components/schemas/Blank'
        - $ref: '#/components/schemas/Missing'
    kind:
      type: string
      enum: [chronograf-v2, line-plus-single-stat]
"#;

    fn holder(definitions: &Definitions) -> &Schema {
        match &definitions["Holder"] {
            SchemaOrRef::Schema(schema) => &**schema,
            SchemaOrRef::Ref { .. } => panic!("Holder should be inline"),
        }
    }

    #[test]
    fn test_union_without_variants_gets_no_adapter() {
        let definitions: Definitions = serde_yaml_ng::from_str(DEFINITIONS).unwrap();
        let generator = InfluxCSharpGenerator::for_package("InfluxDB.Client.Api");

        let model = generator
            .from_model("Holder", holder(&definitions), &definitions)
            .unwrap();

        assert!(model.type_adapters.is_empty());
        assert!(model.vars.iter().all(|v| v.type_adapter.is_none()));
        assert!(model.all_vars.iter().all(|v| v.type_adapter.is_none()));
        assert_eq!(model.var("shapeID").unwrap().name, "ShapeID");
    }

    #[test]
    fn test_dashed_enum_values_default_to_camelized_constant() {
        let definitions: Definitions = serde_yaml_ng::from_str(DEFINITIONS).unwrap();
        let generator = InfluxCSharpGenerator::for_package("InfluxDB.Client.Api");

        let model = generator
            .from_model("Holder", holder(&definitions), &definitions)
            .unwrap();

        let kind = model.var("kind").unwrap();
        let names: Vec<_> = kind.enum_vars.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["ChronografV2", "LinePlusSingleStat"]);
        assert_eq!(kind.default_value.as_deref(), Some("KindEnum.ChronografV2"));
    }

    #[test]
    fn test_supporting_files_filtered() {
        let mut generator = InfluxCSharpGenerator::for_package("InfluxDB.Client.Api");
        generator.process_opts();

        assert_eq!(generator.delegate().supporting_files().len(), 12);
        let names: Vec<_> = generator
            .supporting_files()
            .iter()
            .map(|f| f.destination_filename.as_str())
            .collect();
        assert_eq!(names.len(), ACCEPTED_SUPPORTING_FILES.len());
        for name in names {
            assert!(ACCEPTED_SUPPORTING_FILES.contains(&name), "{name} should be filtered");
        }
        assert!(generator.supporting_files().iter().all(|f| f.folder == "Client"));
    }

    #[test]
    fn test_to_api_name() {
        let generator = InfluxCSharpGenerator::for_package("InfluxDB.Client.Api");
        assert_eq!(generator.to_api_name(""), "DefaultService");
        assert_eq!(generator.to_api_name("telegrafs"), "TelegrafsService");
        assert_eq!(generator.to_api_name("Telegrafs"), "TelegrafsService");
    }

    #[test]
    fn test_identity() {
        let generator = InfluxCSharpGenerator::for_package("InfluxDB.Client.Api");
        assert_eq!(generator.name(), "influx-csharp");
        assert_eq!(generator.delegate().name(), "csharp");
    }
}
