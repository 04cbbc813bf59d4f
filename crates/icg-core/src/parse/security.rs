use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A security scheme type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SecuritySchemeType {
    ApiKey,
    Http,
    OAuth2,
    OpenIdConnect,
    MutualTLS,
}

/// Location of an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Query,
    Header,
    Cookie,
}

/// A security scheme definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub scheme_type: SecuritySchemeType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub location: Option<ApiKeyLocation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,

    #[serde(rename = "bearerFormat", skip_serializing_if = "Option::is_none")]
    pub bearer_format: Option<String>,
}

impl SecurityScheme {
    fn http_scheme_is(&self, expected: &str) -> bool {
        self.scheme_type == SecuritySchemeType::Http
            && self
                .scheme
                .as_deref()
                .is_some_and(|s| s.eq_ignore_ascii_case(expected))
    }

    /// HTTP basic authentication.
    pub fn is_basic(&self) -> bool {
        self.http_scheme_is("basic")
    }

    pub fn is_bearer(&self) -> bool {
        self.http_scheme_is("bearer")
    }

    /// Header an API key is sent in, for `apiKey` schemes located in a header.
    pub fn api_key_header(&self) -> Option<&str> {
        match (self.scheme_type, self.location) {
            (SecuritySchemeType::ApiKey, Some(ApiKeyLocation::Header)) => self.name.as_deref(),
            _ => None,
        }
    }
}

/// A security requirement: map of scheme name → required scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;
