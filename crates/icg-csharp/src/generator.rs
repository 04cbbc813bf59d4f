use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use icg_core::config::{GeneratorKind, IcgConfig};
use icg_core::error::CodegenError;
use icg_core::model::{CodegenModel, CodegenOperation};
use icg_core::parse::schema::SchemaOrRef;
use icg_core::parse::spec::OpenApiSpec;
use icg_core::{ClientCodegen, CodeGenerator, GeneratedFile};

use crate::base::CSharpClientCodegen;
use crate::emitters;
use crate::influx::InfluxCSharpGenerator;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("no template for supporting file {0}")]
    MissingTemplate(String),
}

/// Operations rendered into one API class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiGroup {
    /// Tag the operations were grouped under.
    pub base_name: String,
    /// Class name from `ClientCodegen::to_api_name`.
    pub classname: String,
    pub operations: Vec<CodegenOperation>,
}

/// Everything the hooks produced for one document, ready for rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Generation {
    pub models: IndexMap<String, CodegenModel>,
    pub apis: Vec<ApiGroup>,
}

/// Run the hook pipeline over a document.
///
/// Order: `process_opts`, `from_model` per schema definition,
/// `post_process_all_models`, `from_operation` per operation, then per tag
/// group `post_process_operations_with_models` and `to_api_name`.
pub fn build<C: ClientCodegen>(codegen: &mut C, spec: &OpenApiSpec) -> Result<Generation, CodegenError> {
    codegen.process_opts();
    log::info!("building {} client for {}", codegen.name(), spec.info.title);

    let definitions = spec.definitions();
    let mut models = IndexMap::with_capacity(definitions.len());
    for (name, schema) in definitions {
        let SchemaOrRef::Schema(schema) = schema else {
            log::debug!("{name} is an alias, no model generated");
            continue;
        };
        models.insert(name.clone(), codegen.from_model(name, schema, definitions)?);
    }
    let models = codegen.post_process_all_models(models)?;
    log::info!("{} models", models.len());

    let mut groups: IndexMap<String, Vec<CodegenOperation>> = IndexMap::new();
    for (path, item) in &spec.paths {
        for (method, operation) in item.operations() {
            let op = codegen.from_operation(path, method, operation, spec)?;
            groups.entry(op.base_name.clone()).or_default().push(op);
        }
    }

    let mut apis = Vec::with_capacity(groups.len());
    for (base_name, operations) in groups {
        let operations = codegen.post_process_operations_with_models(operations, &models)?;
        apis.push(ApiGroup {
            classname: codegen.to_api_name(&base_name),
            base_name,
            operations,
        });
    }
    log::info!("{} API classes", apis.len());

    Ok(Generation { models, apis })
}

/// Build and render a document with the given generator.
pub fn generate_with<C: ClientCodegen>(
    mut codegen: C,
    spec: &OpenApiSpec,
    package_name: &str,
) -> Result<Vec<GeneratedFile>, GeneratorError> {
    let generation = build(&mut codegen, spec)?;
    let env = emitters::environment()?;
    let header = emitters::Header::new(spec, package_name);

    let mut files = emitters::models::emit_models(&env, &header, &generation.models)?;
    files.extend(emitters::services::emit_services(&env, &header, &generation.apis)?);
    files.extend(emitters::supporting::emit_supporting_files(
        &env,
        &header,
        codegen.supporting_files(),
    )?);
    Ok(files)
}

/// Select the configured generator and render a document with it.
pub struct CSharpGenerator;

impl CodeGenerator for CSharpGenerator {
    type Config = IcgConfig;
    type Error = GeneratorError;

    fn generate(
        &self,
        spec: &OpenApiSpec,
        config: &IcgConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        let package_name = config.package_name.as_str();
        match config.generator {
            GeneratorKind::InfluxCsharp => generate_with(
                InfluxCSharpGenerator::for_package(package_name),
                spec,
                package_name,
            ),
            GeneratorKind::Csharp => {
                generate_with(CSharpClientCodegen::new(package_name), spec, package_name)
            }
        }
    }
}
