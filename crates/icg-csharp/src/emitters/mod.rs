pub mod models;
pub mod services;
pub mod supporting;

use minijinja::Environment;
use serde::Serialize;

use icg_core::parse::spec::OpenApiSpec;

use crate::generator::GeneratorError;

/// Every template the emitters render, keyed by name.
const TEMPLATES: &[(&str, &str)] = &[
    ("partial_header.j2", include_str!("../../templates/partial_header.j2")),
    ("model.cs.j2", include_str!("../../templates/model.cs.j2")),
    ("service.cs.j2", include_str!("../../templates/service.cs.j2")),
    ("ApiClient.cs.j2", include_str!("../../templates/ApiClient.cs.j2")),
    ("ApiException.cs.j2", include_str!("../../templates/ApiException.cs.j2")),
    ("ApiResponse.cs.j2", include_str!("../../templates/ApiResponse.cs.j2")),
    ("Configuration.cs.j2", include_str!("../../templates/Configuration.cs.j2")),
    ("ExceptionFactory.cs.j2", include_str!("../../templates/ExceptionFactory.cs.j2")),
    ("GlobalConfiguration.cs.j2", include_str!("../../templates/GlobalConfiguration.cs.j2")),
    ("IApiAccessor.cs.j2", include_str!("../../templates/IApiAccessor.cs.j2")),
    ("IReadableConfiguration.cs.j2", include_str!("../../templates/IReadableConfiguration.cs.j2")),
    ("OpenAPIDateConverter.cs.j2", include_str!("../../templates/OpenAPIDateConverter.cs.j2")),
    ("README.md.j2", include_str!("../../templates/README.md.j2")),
    ("gitignore.j2", include_str!("../../templates/gitignore.j2")),
    ("Project.csproj.j2", include_str!("../../templates/Project.csproj.j2")),
];

/// Escape text placed inside `///` XML doc comments.
fn escape_xml_doc(value: String) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\n', " ")
}

/// Template environment with every template loaded.
pub fn environment() -> Result<Environment<'static>, GeneratorError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_filter("escape_xml_doc", escape_xml_doc);
    for (name, source) in TEMPLATES {
        env.add_template(name, source)?;
    }
    Ok(env)
}

/// Document facts shared by every rendered file.
#[derive(Debug, Clone, Serialize)]
pub struct Header {
    pub title: String,
    pub description: Option<String>,
    pub version: String,
    pub package_name: String,
}

impl Header {
    pub fn new(spec: &OpenApiSpec, package_name: &str) -> Self {
        Self {
            title: spec.info.title.clone(),
            description: spec.info.description.clone(),
            version: spec.info.version.clone(),
            package_name: package_name.to_string(),
        }
    }
}

/// C# keywords that can't be used as parameter names without `@`.
const RESERVED_WORDS: &[&str] = &[
    "abstract", "base", "bool", "class", "default", "event", "explicit", "fixed", "for",
    "internal", "is", "lock", "namespace", "new", "object", "operator", "out", "override",
    "params", "private", "public", "ref", "return", "string", "struct", "this", "void",
];

/// camelCase parameter name for a PascalCase member, escaped when reserved.
pub fn to_param_name(name: &str) -> String {
    let mut chars = name.chars();
    let param: String = match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    };
    if RESERVED_WORDS.contains(&param.as_str()) {
        format!("@{param}")
    } else {
        param
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_loads_every_template() {
        let env = environment().unwrap();
        for (name, _) in TEMPLATES {
            assert!(env.get_template(name).is_ok(), "{name} should load");
        }
    }

    #[test]
    fn test_param_name() {
        assert_eq!(to_param_name("OrgID"), "orgID");
        assert_eq!(to_param_name("Plugins"), "plugins");
        assert_eq!(to_param_name("Type"), "type");
        assert_eq!(to_param_name("Base"), "@base");
        assert_eq!(to_param_name(""), "");
    }

    #[test]
    fn test_escape_xml_doc() {
        assert_eq!(
            escape_xml_doc("List<Telegraf> & more\nlines".to_string()),
            "List&lt;Telegraf&gt; &amp; more lines"
        );
    }
}
