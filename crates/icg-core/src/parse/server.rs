use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A `{name}` placeholder in a server URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerVariable {
    pub default: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
}

/// A server URL. Declared on the document, a path item or an operation; the
/// most specific declaration wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub variables: IndexMap<String, ServerVariable>,
}

impl Server {
    /// The URL with every declared variable replaced by its default.
    /// Undeclared placeholders are left as written.
    pub fn resolved_url(&self) -> String {
        self.variables
            .iter()
            .fold(self.url.clone(), |url, (name, variable)| {
                url.replace(&format!("{{{name}}}"), &variable.default)
            })
    }

    /// `/`, which adds nothing in front of an operation path.
    pub fn is_root(&self) -> bool {
        self.url == "/"
    }
}

/// The first server of the first non-empty list, most specific list first.
pub fn closest_server<'a>(levels: &[&'a [Server]]) -> Option<&'a Server> {
    levels.iter().find_map(|servers| servers.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(yaml: &str) -> Server {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    #[test]
    fn test_resolved_url() {
        let cloud = server(
            r#"
url: "{scheme}://{host}/api/v2"
variables:
  scheme: {default: https, enum: [http, https]}
  host: {default: us-west-2-1.aws.cloud2.influxdata.com}
"#,
        );
        assert_eq!(cloud.resolved_url(), "https://us-west-2-1.aws.cloud2.influxdata.com/api/v2");

        let plain = server("url: /api/v2/{undeclared}");
        assert_eq!(plain.resolved_url(), "/api/v2/{undeclared}");
    }

    #[test]
    fn test_closest_server() {
        let document = vec![server("url: /api/v2")];
        let operation = vec![server("url: /")];

        let none: &[Server] = &[];

        let closest = closest_server(&[operation.as_slice(), none, document.as_slice()]).unwrap();
        assert!(closest.is_root());
        assert_eq!(closest_server(&[none, document.as_slice()]).unwrap().url, "/api/v2");
        assert!(closest_server(&[none, none]).is_none());
    }
}
