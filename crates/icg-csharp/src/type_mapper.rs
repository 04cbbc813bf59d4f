use icg_core::parse::ref_resolve::simple_ref;
use icg_core::parse::schema::{AdditionalProperties, Schema, SchemaOrRef, SchemaType, TypeSet};
use icg_core::transform::name_normalizer::camelize;

/// C# types rendered without a model import.
pub const LANGUAGE_PRIMITIVES: &[&str] = &[
    "string",
    "bool?",
    "int?",
    "long?",
    "float?",
    "double?",
    "decimal?",
    "DateTime?",
    "byte[]",
    "System.IO.Stream",
    "Object",
];

/// C# class name for a schema definition.
///
/// Separators are dropped and every segment gets an upper-case initial;
/// acronyms survive (`DBRPUpdate`, `TelegrafPluginInputCpu`).
pub fn to_model_name(name: &str) -> String {
    let joined = camelize(name);
    match joined.strip_prefix('_') {
        Some(digits) => format!("Model{digits}"),
        None => joined,
    }
}

/// Map a schema node to its C# type.
pub fn schema_or_ref_to_csharp(schema: &SchemaOrRef) -> String {
    match schema {
        SchemaOrRef::Ref { ref_path } => to_model_name(simple_ref(ref_path)),
        SchemaOrRef::Schema(schema) => schema_to_csharp(schema),
    }
}

pub fn schema_to_csharp(schema: &Schema) -> String {
    if schema.is_array() {
        let item = schema
            .items
            .as_deref()
            .map(schema_or_ref_to_csharp)
            .unwrap_or_else(|| "Object".to_string());
        return format!("List<{item}>");
    }

    let format = schema.format.as_deref();
    match schema.schema_type.as_ref().and_then(TypeSet::primary) {
        Some(SchemaType::String) => match format {
            Some("date") | Some("date-time") => "DateTime?",
            Some("byte") => "byte[]",
            Some("binary") => "System.IO.Stream",
            _ => "string",
        }
        .to_string(),
        Some(SchemaType::Integer) => match format {
            Some("int64") => "long?",
            _ => "int?",
        }
        .to_string(),
        Some(SchemaType::Number) => match format {
            Some("float") => "float?",
            Some("double") => "double?",
            _ => "decimal?",
        }
        .to_string(),
        Some(SchemaType::Boolean) => "bool?".to_string(),
        Some(SchemaType::Object) | None => match schema.additional_properties {
            Some(AdditionalProperties::Schema(ref value)) if schema.properties.is_empty() => {
                format!("Dictionary<string, {}>", schema_or_ref_to_csharp(value))
            }
            _ => "Object".to_string(),
        },
        Some(SchemaType::Array) | Some(SchemaType::Null) => "Object".to_string(),
    }
}

pub fn is_primitive(data_type: &str) -> bool {
    LANGUAGE_PRIMITIVES.contains(&data_type)
}

/// A declared default rendered as a C# literal.
pub fn default_literal(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => format!("\"{}\"", s.replace('"', "\\\"")),
        other => other.to_string(),
    }
}

/// Identifier of an enum constant: `input` → `Input`, `chronograf-v2` → `ChronografV2`.
pub fn to_enum_var_name(value: &str) -> String {
    if value.is_empty() {
        return "Empty".to_string();
    }
    camelize(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(yaml: &str) -> SchemaOrRef {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    #[test]
    fn test_primitives() {
        assert_eq!(schema_or_ref_to_csharp(&schema("type: string")), "string");
        assert_eq!(schema_or_ref_to_csharp(&schema("{type: string, format: date-time}")), "DateTime?");
        assert_eq!(schema_or_ref_to_csharp(&schema("{type: string, format: binary}")), "System.IO.Stream");
        assert_eq!(schema_or_ref_to_csharp(&schema("type: integer")), "int?");
        assert_eq!(schema_or_ref_to_csharp(&schema("{type: integer, format: int64}")), "long?");
        assert_eq!(schema_or_ref_to_csharp(&schema("type: number")), "decimal?");
        assert_eq!(schema_or_ref_to_csharp(&schema("type: boolean")), "bool?");
        assert_eq!(schema_or_ref_to_csharp(&schema("type: object")), "Object");
    }

    #[test]
    fn test_containers() {
        assert_eq!(
            schema_or_ref_to_csharp(&schema(
                "{type: array, items: {$ref: '#/components/schemas/TelegrafRequestPlugin'}}"
            )),
            "List<TelegrafRequestPlugin>"
        );
        assert_eq!(
            schema_or_ref_to_csharp(&schema(
                "{type: object, additionalProperties: {type: string}}"
            )),
            "Dictionary<string, string>"
        );
    }

    #[test]
    fn test_ref() {
        assert_eq!(
            schema_or_ref_to_csharp(&schema("$ref: '#/components/schemas/TelegrafStatus'")),
            "TelegrafStatus"
        );
    }

    #[test]
    fn test_model_name() {
        assert_eq!(to_model_name("TelegrafPluginInputCpu"), "TelegrafPluginInputCpu");
        assert_eq!(to_model_name("DBRPUpdate"), "DBRPUpdate");
        assert_eq!(to_model_name("label mapping"), "LabelMapping");
        assert_eq!(to_model_name("2xx"), "Model2xx");
    }

    #[test]
    fn test_enum_var_name() {
        assert_eq!(to_enum_var_name("input"), "Input");
        assert_eq!(to_enum_var_name("application/toml"), "ApplicationToml");
        assert_eq!(to_enum_var_name("chronograf-v2"), "ChronografV2");
        assert_eq!(to_enum_var_name("line-plus-single-stat"), "LinePlusSingleStat");
        assert_eq!(to_enum_var_name("GZIP"), "GZIP");
        assert_eq!(to_enum_var_name("1h"), "_1h");
        assert_eq!(to_enum_var_name(""), "Empty");
    }

    #[test]
    fn test_default_literal() {
        assert_eq!(default_literal(&serde_json::json!("application/toml")), "\"application/toml\"");
        assert_eq!(default_literal(&serde_json::json!(20)), "20");
        assert_eq!(default_literal(&serde_json::json!(true)), "true");
    }
}
