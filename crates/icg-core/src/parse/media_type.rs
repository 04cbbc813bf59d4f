use serde::{Deserialize, Serialize};

use super::schema::SchemaOrRef;

/// Media type for JSON payloads; the only one the C# client deserializes into models.
pub const APPLICATION_JSON: &str = "application/json";

/// `application/json`, a `+json` structured suffix, either with parameters.
pub fn is_json(media_type: &str) -> bool {
    let essence = media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == APPLICATION_JSON || essence.ends_with("+json")
}

/// The schema carried by one entry of a `content` map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,
}
