//! Discriminated-union resolution.
//!
//! A property whose value is a `oneOf` union (directly, through a reference,
//! or as the item type of an array) gets a [`TypeAdapter`]: for every variant
//! the keys that tell it apart and the literal values those keys carry.
//!
//! Resolution is best effort. References that don't resolve, variants with no
//! usable keys and keys that aren't strings are skipped, never reported as
//! errors, so one odd property can't stop a generation run.

use crate::model::{TypeAdapter, TypeAdapterItem};
use crate::parse::components::Definitions;
use crate::parse::ref_resolve::{deref_schema, lookup_schema, simple_ref};
use crate::parse::schema::{Schema, SchemaOrRef, literal_to_string};

use super::name_normalizer::normalize_name;

/// Resolve the type adapter for one property of `model_name`.
///
/// Returns `None` when the property isn't a union or when no variant yields
/// a discriminator.
pub fn resolve_type_adapter(
    property_name: &str,
    property_schema: &SchemaOrRef,
    model_name: &str,
    definitions: &Definitions,
) -> Option<TypeAdapter> {
    let union = effective_union(property_schema, definitions)?;

    let mut adapter = TypeAdapter {
        classname: format!(
            "{model_name}{}Adapter",
            normalize_name(property_name).pascal_case
        ),
        is_array: matches!(property_schema, SchemaOrRef::Schema(s) if s.is_array()),
        ..Default::default()
    };

    for member in expand_members(union, definitions) {
        let Some((classname, variant)) = resolve_variant(member, definitions) else {
            continue;
        };

        let keys = discriminator_keys(variant);
        if keys.is_empty() {
            log::debug!("{classname} declares no properties, not a {model_name}.{property_name} variant");
            continue;
        }
        let values = discriminator_values(&classname, variant, &keys, definitions);

        adapter.discriminator = keys.clone();
        adapter.items.push(TypeAdapterItem {
            classname,
            discriminator_keys: keys,
            discriminator_values: values,
        });
    }

    if adapter.items.is_empty() {
        log::debug!("no variant of {model_name}.{property_name} has a discriminator");
        return None;
    }

    for item in adapter.mismatched_items() {
        log::warn!(
            "{}: variant {} has values [{}] for discriminator [{}]",
            adapter.classname,
            item.classname,
            item.discriminator_value_literal(),
            adapter.discriminator_literal(),
        );
    }

    Some(adapter)
}

/// The union a property's value is drawn from, if any.
fn effective_union<'a>(
    property_schema: &'a SchemaOrRef,
    definitions: &'a Definitions,
) -> Option<&'a Schema> {
    let effective = match property_schema {
        SchemaOrRef::Schema(schema) if schema.is_array() => schema
            .items
            .as_deref()
            .and_then(SchemaOrRef::as_ref_path)
            .and_then(|ref_path| lookup_schema(definitions, ref_path))
            .filter(|items| items.is_composed())
            .unwrap_or(schema),
        SchemaOrRef::Ref { ref_path } => lookup_schema(definitions, ref_path)?,
        SchemaOrRef::Schema(schema) => schema,
    };
    effective.is_composed().then_some(effective)
}

/// Union members with referenced unions spliced in, one level deep.
fn expand_members<'a>(union: &'a Schema, definitions: &'a Definitions) -> Vec<&'a SchemaOrRef> {
    let mut members = Vec::with_capacity(union.one_of.len());
    for member in &union.one_of {
        match member {
            SchemaOrRef::Ref { ref_path } => match lookup_schema(definitions, ref_path) {
                Some(nested) if nested.is_composed() => members.extend(nested.one_of.iter()),
                Some(_) => members.push(member),
                None => log::debug!("skipping union member {ref_path}: unresolved"),
            },
            SchemaOrRef::Schema(_) => members.push(member),
        }
    }
    members
}

/// Class name and schema of one union member.
fn resolve_variant<'a>(
    member: &'a SchemaOrRef,
    definitions: &'a Definitions,
) -> Option<(String, &'a Schema)> {
    match member {
        SchemaOrRef::Ref { ref_path } => {
            let schema = lookup_schema(definitions, ref_path)?;
            Some((simple_ref(ref_path).to_string(), schema))
        }
        SchemaOrRef::Schema(schema) => match &schema.title {
            Some(title) => Some((title.clone(), &**schema)),
            None => {
                log::debug!("skipping untitled inline union member");
                None
            }
        },
    }
}

/// The first declared property, then every later property pinned to a single literal.
fn discriminator_keys(variant: &Schema) -> Vec<String> {
    variant
        .properties
        .iter()
        .enumerate()
        .filter(|(position, (_, schema))| *position == 0 || declares_single_literal(schema))
        .map(|(_, (name, _))| name.clone())
        .collect()
}

fn declares_single_literal(schema: &SchemaOrRef) -> bool {
    matches!(schema, SchemaOrRef::Schema(s) if s.enum_values.len() == 1)
}

/// Literal values for `keys`. Keys whose schema isn't a string contribute nothing.
fn discriminator_values(
    classname: &str,
    variant: &Schema,
    keys: &[String],
    definitions: &Definitions,
) -> Vec<String> {
    keys.iter()
        .filter_map(|key| {
            let value_schema = variant
                .properties
                .get(key)
                .and_then(|schema| deref_schema(definitions, schema))?;
            if !value_schema.is_string() {
                log::debug!("{classname}.{key} is not a string, no discriminator value");
                return None;
            }
            Some(
                value_schema
                    .enum_values
                    .first()
                    .map(literal_to_string)
                    .unwrap_or_else(|| classname.to_string()),
            )
        })
        .collect()
}
