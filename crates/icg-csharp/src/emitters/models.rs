use indexmap::IndexMap;
use minijinja::{Environment, context};
use serde::Serialize;

use icg_core::GeneratedFile;
use icg_core::model::{CodegenModel, CodegenProperty, TypeAdapter};

use super::{Header, to_param_name};
use crate::generator::GeneratorError;

#[derive(Debug, Serialize)]
struct PropertyView<'a> {
    name: &'a str,
    base_name: &'a str,
    description: Option<&'a str>,
    csharp_type: String,
    is_read_only: bool,
    type_adapter: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ConstructorParam<'a> {
    member: &'a str,
    param: String,
    csharp_type: String,
    default: &'a str,
    description: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct AdapterView<'a> {
    classname: &'a str,
    is_array: bool,
    /// `"name", "type"`
    discriminator: String,
    items: Vec<AdapterItemView<'a>>,
}

#[derive(Debug, Serialize)]
struct AdapterItemView<'a> {
    classname: &'a str,
    values: String,
}

/// Declared C# type of a property; enum properties use their nested enum.
fn csharp_type(var: &CodegenProperty) -> String {
    match (&var.datatype_with_enum, var.is_enum) {
        (Some(enum_type), true) if var.required => enum_type.clone(),
        (Some(enum_type), true) => format!("{enum_type}?"),
        _ => var.data_type.clone(),
    }
}

fn constructor_param(var: &CodegenProperty) -> ConstructorParam<'_> {
    ConstructorParam {
        member: &var.name,
        param: to_param_name(&var.name),
        csharp_type: csharp_type(var),
        default: var.default_value.as_deref().unwrap_or("default"),
        description: var.description.as_deref(),
    }
}

fn adapter_view(adapter: &TypeAdapter) -> AdapterView<'_> {
    AdapterView {
        classname: &adapter.classname,
        is_array: adapter.is_array,
        discriminator: adapter.discriminator_literal(),
        items: adapter
            .items
            .iter()
            .map(|item| AdapterItemView {
                classname: &item.classname,
                values: item.discriminator_value_literal(),
            })
            .collect(),
    }
}

/// Render one model class, or a plain enum for enum definitions.
pub fn emit_model(
    env: &Environment<'_>,
    header: &Header,
    model: &CodegenModel,
) -> Result<String, GeneratorError> {
    let tmpl = env.get_template("model.cs.j2")?;

    let nested_enums: Vec<&CodegenProperty> = if model.inner_enums.is_empty() {
        model.vars.iter().filter(|v| v.is_enum).collect()
    } else {
        model.inner_enums.iter().collect()
    };

    let properties: Vec<PropertyView<'_>> = model
        .vars
        .iter()
        .map(|var| PropertyView {
            name: &var.name,
            base_name: &var.base_name,
            description: var.description.as_deref(),
            csharp_type: csharp_type(var),
            is_read_only: var.is_read_only,
            type_adapter: var.type_adapter.as_deref(),
        })
        .collect();

    // Plugins fix their inherited members through constructor items and
    // use the parameterless base constructor.
    let chains_to_base = model.parent.is_some() && model.constructor_items.is_empty();
    let inherited: Vec<&CodegenProperty> = if chains_to_base {
        model.parent_vars.iter().filter(|v| !v.is_read_only).collect()
    } else {
        Vec::new()
    };
    let own: Vec<&CodegenProperty> = model.vars.iter().filter(|v| !v.is_read_only).collect();
    let base_arguments: Vec<String> = inherited.iter().map(|v| to_param_name(&v.name)).collect();
    let constructor_params: Vec<ConstructorParam<'_>> = inherited
        .iter()
        .chain(&own)
        .map(|var| constructor_param(var))
        .collect();
    let assignments: Vec<ConstructorParam<'_>> = own.iter().map(|var| constructor_param(var)).collect();

    let adapters: Vec<AdapterView<'_>> = model.type_adapters.values().map(adapter_view).collect();

    let rendered = tmpl.render(context! {
        header => header,
        model => model,
        nested_enums => nested_enums,
        properties => properties,
        constructor_params => constructor_params,
        assignments => assignments,
        base_arguments => base_arguments,
        adapters => adapters,
    })?;
    Ok(rendered)
}

/// Emit `Model/<Class>.cs` for every model.
pub fn emit_models(
    env: &Environment<'_>,
    header: &Header,
    models: &IndexMap<String, CodegenModel>,
) -> Result<Vec<GeneratedFile>, GeneratorError> {
    models
        .values()
        .map(|model| {
            Ok(GeneratedFile {
                path: format!("Model/{}.cs", model.classname),
                content: emit_model(env, header, model)?,
            })
        })
        .collect()
}
