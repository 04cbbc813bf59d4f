use indexmap::IndexMap;

use crate::error::CodegenError;
use crate::model::{CodegenModel, CodegenOperation, HttpMethod, SupportingFile};
use crate::parse::components::Definitions;
use crate::parse::operation::Operation;
use crate::parse::schema::Schema;
use crate::parse::spec::OpenApiSpec;

/// Extension points a client generator exposes to the generation pipeline.
///
/// The pipeline calls them in this order: `process_opts` once, `from_model`
/// for every schema definition, `post_process_all_models` once,
/// `from_operation` for every operation, then
/// `post_process_operations_with_models` and `to_api_name` once per
/// operation group.
///
/// Customizations wrap another `ClientCodegen` and delegate to it, adjusting
/// what comes back.
pub trait ClientCodegen {
    /// Identifier used to select the generator.
    fn name(&self) -> &str;

    fn help(&self) -> &str;

    /// Finalize options before any model or operation is built.
    fn process_opts(&mut self);

    /// Files emitted once per run.
    fn supporting_files(&self) -> &[SupportingFile];

    fn from_model(
        &self,
        name: &str,
        schema: &Schema,
        definitions: &Definitions,
    ) -> Result<CodegenModel, CodegenError>;

    fn from_operation(
        &self,
        path: &str,
        method: HttpMethod,
        operation: &Operation,
        spec: &OpenApiSpec,
    ) -> Result<CodegenOperation, CodegenError>;

    /// Cross-model adjustments, keyed by schema definition name.
    fn post_process_all_models(
        &self,
        models: IndexMap<String, CodegenModel>,
    ) -> Result<IndexMap<String, CodegenModel>, CodegenError>;

    /// Adjust the operations of one group with every model in view.
    fn post_process_operations_with_models(
        &self,
        operations: Vec<CodegenOperation>,
        models: &IndexMap<String, CodegenModel>,
    ) -> Result<Vec<CodegenOperation>, CodegenError>;

    /// Class name of the API rendered for an operation group.
    fn to_api_name(&self, name: &str) -> String;
}
