use std::fmt;

use serde::Serialize;

/// A name with multiple casing variants pre-computed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NormalizedName {
    pub original: String,
    pub pascal_case: String,
    pub camel_case: String,
    pub snake_case: String,
    pub screaming_snake: String,
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

/// A file emitted once per generation run rather than once per model or API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportingFile {
    /// Template the file is rendered from.
    pub template: String,
    /// Output folder relative to the generation root.
    pub folder: String,
    pub destination_filename: String,
}

impl SupportingFile {
    pub fn new(template: &str, folder: &str, destination_filename: &str) -> Self {
        Self {
            template: template.to_string(),
            folder: folder.to_string(),
            destination_filename: destination_filename.to_string(),
        }
    }

    /// Output path relative to the generation root.
    pub fn path(&self) -> String {
        if self.folder.is_empty() {
            self.destination_filename.clone()
        } else {
            format!("{}/{}", self.folder, self.destination_filename)
        }
    }
}
