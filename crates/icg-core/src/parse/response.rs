use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::media_type::{MediaType, is_json};

/// A response definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub description: String,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, serde_json::Value>,
}

impl Response {
    /// The first JSON representation when one is declared, otherwise the first.
    pub fn preferred_content(&self) -> Option<(&String, &MediaType)> {
        self.content
            .iter()
            .find(|(media_type, _)| is_json(media_type))
            .or_else(|| self.content.first())
    }

    /// Declared media types, in declaration order.
    pub fn media_types(&self) -> Vec<String> {
        self.content.keys().cloned().collect()
    }
}

/// A reference or inline response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Response(Response),
}

/// Status codes tried, in order, when picking the response a client method returns.
pub const SUCCESS_STATUS_CODES: [&str; 4] = ["200", "201", "2XX", "default"];

/// The first declared success response of an operation.
pub fn find_success_response(
    responses: &IndexMap<String, ResponseOrRef>,
) -> Option<&ResponseOrRef> {
    SUCCESS_STATUS_CODES
        .iter()
        .find_map(|code| responses.get(*code))
}
