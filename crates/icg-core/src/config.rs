use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level project configuration loaded from `.icg.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IcgConfig {
    pub input: String,
    pub output: String,
    pub generator: GeneratorKind,
    /// Root namespace of the generated C# sources.
    pub package_name: String,
}

impl Default for IcgConfig {
    fn default() -> Self {
        Self {
            input: "swagger.yml".to_string(),
            output: "generated".to_string(),
            generator: GeneratorKind::InfluxCsharp,
            package_name: "InfluxDB.Client.Api".to_string(),
        }
    }
}

/// Which client generator runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    /// The Influx customizations layered over the generic C# generator.
    #[default]
    InfluxCsharp,
    /// The generic C# generator on its own.
    Csharp,
}

impl GeneratorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorKind::InfluxCsharp => "influx-csharp",
            GeneratorKind::Csharp => "csharp",
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".icg.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<IcgConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config: IcgConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# icg configuration
input: swagger.yml
output: generated
generator: influx_csharp   # influx_csharp | csharp

# Root namespace of the generated sources
package_name: InfluxDB.Client.Api
"#
}
