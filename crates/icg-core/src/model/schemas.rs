use indexmap::IndexMap;
use serde::Serialize;

use super::adapter::TypeAdapter;

/// One named constant of an enum, as the generated code spells it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumVar {
    /// Identifier of the constant, e.g. `Input`.
    pub name: String,
    /// Wire value, e.g. `input`.
    pub value: String,
}

/// A model property ready for rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CodegenProperty {
    /// Name as declared in the document.
    pub base_name: String,
    /// Identifier used in generated code.
    pub name: String,
    /// PascalCase variant used to derive helper type names.
    pub name_in_camel_case: String,
    /// SCREAMING_SNAKE variant.
    pub name_in_snake_case: String,
    pub data_type: String,
    /// Type name of the nested enum for inline enum properties.
    pub datatype_with_enum: Option<String>,
    /// Referenced model name, when the property points at one.
    pub complex_type: Option<String>,
    pub description: Option<String>,
    pub default_value: Option<String>,
    pub required: bool,
    pub is_read_only: bool,
    pub is_enum: bool,
    pub is_container: bool,
    pub is_nullable: bool,
    pub enum_values: Vec<String>,
    pub enum_vars: Vec<EnumVar>,
    /// Name of the type adapter registered on the owning model.
    pub type_adapter: Option<String>,
}

impl CodegenProperty {
    pub fn has_type_adapter(&self) -> bool {
        self.type_adapter.is_some()
    }

    /// Make this an enum over the given wire values.
    pub fn set_enum(&mut self, values: &[&str], enum_vars: Vec<EnumVar>) {
        self.is_enum = true;
        self.enum_values = values.iter().map(|v| v.to_string()).collect();
        self.enum_vars = enum_vars;
    }
}

/// A model (class) ready for rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CodegenModel {
    /// Name of the schema definition.
    pub name: String,
    pub classname: String,
    pub description: Option<String>,
    pub parent: Option<String>,
    pub interfaces: Vec<String>,
    /// Properties declared by this model.
    pub vars: Vec<CodegenProperty>,
    /// Properties inherited from `parent`.
    pub parent_vars: Vec<CodegenProperty>,
    /// `parent_vars` followed by `vars`.
    pub all_vars: Vec<CodegenProperty>,
    pub required_vars: Vec<CodegenProperty>,
    pub optional_vars: Vec<CodegenProperty>,
    pub read_only_vars: Vec<CodegenProperty>,
    pub read_write_vars: Vec<CodegenProperty>,
    pub is_enum: bool,
    pub enum_vars: Vec<EnumVar>,
    /// Property name of the document-level discriminator, if declared.
    pub discriminator: Option<String>,
    pub type_adapters: IndexMap<String, TypeAdapter>,
    /// Statements emitted into the generated constructor body.
    pub constructor_items: Vec<String>,
    /// Enum properties whose nested enum type is emitted on this class.
    pub inner_enums: Vec<CodegenProperty>,
}

impl CodegenModel {
    /// Declared property by its document name.
    pub fn var(&self, base_name: &str) -> Option<&CodegenProperty> {
        self.vars.iter().find(|p| p.base_name == base_name)
    }

    pub fn has_type_adapters(&self) -> bool {
        !self.type_adapters.is_empty()
    }

    /// Register an adapter and point the property it was resolved for at it.
    pub fn attach_type_adapter(&mut self, property: &str, adapter: TypeAdapter) {
        let name = adapter.classname.clone();
        for list in [&mut self.vars, &mut self.all_vars, &mut self.read_write_vars] {
            if let Some(var) = list.iter_mut().find(|p| p.base_name == property) {
                var.type_adapter = Some(name.clone());
            }
        }
        self.type_adapters.insert(name, adapter);
    }
}
