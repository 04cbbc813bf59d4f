use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::media_type::{MediaType, is_json};

/// A request body definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub content: IndexMap<String, MediaType>,

    #[serde(default)]
    pub required: bool,
}

impl RequestBody {
    /// The first JSON content type when one is declared, otherwise the first.
    pub fn preferred_content(&self) -> Option<(&String, &MediaType)> {
        self.content
            .iter()
            .find(|(media_type, _)| is_json(media_type))
            .or_else(|| self.content.first())
    }
}

/// A reference or inline request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestBodyOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    RequestBody(RequestBody),
}
