use icg_core::error::CodegenError;
use icg_core::model::{CodegenModel, CodegenProperty, EnumVar};
use icg_core::parse::components::Definitions;
use icg_core::parse::schema::Schema;
use icg_core::transform::name_normalizer::normalize_name;
use icg_core::transform::resolve_type_adapter;

use crate::type_mapper::to_enum_var_name;

/// Common base class of every Telegraf plugin model.
pub const TELEGRAF_REQUEST_PLUGIN: &str = "TelegrafRequestPlugin";

const PLUGIN_TYPES: [&str; 2] = ["input", "output"];

/// Resolve a type adapter for every property the schema declares itself.
pub fn attach_type_adapters(
    model: &mut CodegenModel,
    name: &str,
    schema: &Schema,
    definitions: &Definitions,
) {
    for (property, property_schema) in &schema.properties {
        if let Some(adapter) = resolve_type_adapter(property, property_schema, name, definitions) {
            log::debug!("{name}.{property} dispatches through {}", adapter.classname);
            model.attach_type_adapter(property, adapter);
        }
    }
}

/// Enum properties without a declared default start at their first constant.
pub fn set_enum_defaults(model: &mut CodegenModel) {
    for var in model.all_vars.iter_mut().chain(model.vars.iter_mut()) {
        if !var.is_enum || var.default_value.is_some() {
            continue;
        }
        if let (Some(datatype), Some(first)) = (&var.datatype_with_enum, var.enum_vars.first()) {
            var.default_value = Some(format!("{datatype}.{}", first.name.replace('-', "_")));
        }
    }
}

pub fn prune_read_only_parent_vars(model: &mut CodegenModel) {
    model.parent_vars.retain(|var| !var.is_read_only);
}

/// Give the plugin union a writable `type` discriminator of its own.
pub fn add_plugin_type(model: &mut CodegenModel) {
    model.interfaces.clear();
    model.read_write_vars.clear();

    let mut type_property = CodegenProperty {
        base_name: "type".to_string(),
        name: "Type".to_string(),
        name_in_camel_case: "Type".to_string(),
        name_in_snake_case: "TYPE".to_string(),
        data_type: "string".to_string(),
        datatype_with_enum: Some("TypeEnum".to_string()),
        ..Default::default()
    };
    let enum_vars = PLUGIN_TYPES
        .iter()
        .map(|value| EnumVar {
            name: to_enum_var_name(value),
            value: value.to_string(),
        })
        .collect();
    type_property.set_enum(&PLUGIN_TYPES, enum_vars);

    model.vars.push(type_property.clone());
    model.read_write_vars.push(type_property);
}

/// Concrete plugin models: `TelegrafPlugin*`, except request wrappers and
/// nested config objects.
pub fn is_telegraf_plugin(name: &str) -> bool {
    name.starts_with("TelegrafPlugin")
        && !name.ends_with("Request")
        && !name.to_lowercase().contains("config")
}

/// Wire a plugin model to [`TELEGRAF_REQUEST_PLUGIN`]: `name` and `type`
/// are fixed in the constructor and `type` moves to the base class.
pub fn configure_telegraf_plugin(model: &mut CodegenModel) -> Result<(), CodegenError> {
    let type_default = enum_default(model, "type")?;
    let name_default = enum_default(model, "name")?;

    let type_index = property_index(model, "type")?;
    let mut type_property = model.vars.remove(type_index);
    type_property.default_value = Some(format!("TypeEnum.{type_default}"));

    let name_index = property_index(model, "name")?;
    let name_property = &mut model.vars[name_index];
    name_property.default_value = Some(format!("NameEnum.{name_default}"));
    model.inner_enums = vec![name_property.clone()];

    model.parent = Some(TELEGRAF_REQUEST_PLUGIN.to_string());
    model.constructor_items = vec![
        format!("Name = {}.NameEnum.{name_default};", model.classname),
        format!("Type = {TELEGRAF_REQUEST_PLUGIN}.TypeEnum.{type_default};"),
    ];
    model.parent_vars.push(type_property);

    Ok(())
}

fn property_index(model: &CodegenModel, property: &str) -> Result<usize, CodegenError> {
    model
        .vars
        .iter()
        .position(|var| var.base_name == property)
        .ok_or_else(|| CodegenError::MissingProperty {
            model: model.name.clone(),
            property: property.to_string(),
        })
}

/// First enum constant of `property`, usable as a C# member name.
fn enum_default(model: &CodegenModel, property: &str) -> Result<String, CodegenError> {
    let index = property_index(model, property)?;
    let first = model.vars[index]
        .enum_vars
        .first()
        .ok_or_else(|| CodegenError::MissingEnumVars {
            model: model.name.clone(),
            property: property.to_string(),
        })?;
    Ok(first.name.replace('-', "_"))
}
