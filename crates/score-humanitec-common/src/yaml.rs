//! YAML loading for Score and extension documents
//!
//! Documents are parsed with yaml-rust2 and converted into `serde_json::Value`
//! so overrides and feature fragments can be merged as plain JSON trees before
//! typed deserialization.

use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use yaml_rust2::{Yaml, YamlLoader};

/// Error type for YAML parsing
#[derive(Debug, Clone)]
pub struct YamlError(String);

impl std::fmt::Display for YamlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for YamlError {}

/// Parse a YAML document into a JSON tree.
///
/// Only the first document of a multi-document stream is used; an empty
/// stream yields an empty object so callers can always merge into it. Aliases
/// are expanded to a copy of their anchored node.
pub fn parse_document(input: &str) -> Result<Value, YamlError> {
    let docs = YamlLoader::load_from_str(input).map_err(|e| YamlError(e.to_string()))?;
    match docs.into_iter().next() {
        Some(Yaml::Null) | None => Ok(Value::Object(Map::new())),
        Some(doc) => yaml_to_json(doc),
    }
}

/// Parse a YAML document straight into a typed value
pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T, YamlError> {
    let value = parse_document(input)?;
    serde_json::from_value(value).map_err(|e| YamlError(e.to_string()))
}

/// Parse a single scalar the way a YAML value would be read.
///
/// `8080` becomes a number, `true` a boolean and anything unparseable stays a
/// string, which is what command line property overrides expect.
pub fn parse_scalar(input: &str) -> Value {
    match YamlLoader::load_from_str(input) {
        Ok(docs) => match docs.into_iter().next() {
            Some(doc @ (Yaml::Integer(_) | Yaml::Real(_) | Yaml::Boolean(_) | Yaml::Null)) => {
                yaml_to_json(doc).unwrap_or_else(|_| Value::String(input.to_string()))
            }
            _ => Value::String(input.to_string()),
        },
        Err(_) => Value::String(input.to_string()),
    }
}

fn yaml_to_json(yaml: Yaml) -> Result<Value, YamlError> {
    match yaml {
        Yaml::Null => Ok(Value::Null),
        Yaml::Boolean(b) => Ok(Value::Bool(b)),
        Yaml::Integer(i) => Ok(Value::Number(i.into())),
        Yaml::Real(s) => {
            let f: f64 = s
                .parse()
                .map_err(|e: std::num::ParseFloatError| YamlError(e.to_string()))?;
            Ok(Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null))
        }
        Yaml::String(s) => Ok(Value::String(s)),
        Yaml::Array(arr) => arr
            .into_iter()
            .map(yaml_to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Yaml::Hash(map) => map
            .into_iter()
            .map(|(k, v)| {
                let key = match k {
                    Yaml::String(s) => s,
                    Yaml::Integer(i) => i.to_string(),
                    Yaml::Real(r) => r,
                    Yaml::Boolean(b) => b.to_string(),
                    _ => return Err(YamlError("unsupported YAML key type".to_string())),
                };
                yaml_to_json(v).map(|v| (key, v))
            })
            .collect::<Result<Map<String, Value>, _>>()
            .map(Value::Object),
        Yaml::Alias(_) => Err(YamlError("YAML aliases not supported".to_string())),
        Yaml::BadValue => Err(YamlError("bad YAML value".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score_document() {
        let yaml = r#"
apiVersion: score.dev/v1b1
metadata:
  name: backend
containers:
  backend:
    image: busybox
    variables:
      PORT: 8080
"#;
        let doc = parse_document(yaml).unwrap();
        assert_eq!(doc["metadata"]["name"], "backend");
        assert_eq!(doc["containers"]["backend"]["image"], "busybox");
        assert_eq!(doc["containers"]["backend"]["variables"]["PORT"], 8080);
    }

    #[test]
    fn test_empty_document_is_empty_object() {
        assert_eq!(parse_document("").unwrap(), Value::Object(Map::new()));
        assert_eq!(parse_document("---\n").unwrap(), Value::Object(Map::new()));
    }

    #[test]
    fn test_only_first_document_is_used() {
        let doc = parse_document("name: first\n---\nname: second\n").unwrap();
        assert_eq!(doc["name"], "first");
    }

    #[test]
    fn test_invalid_yaml_fails() {
        assert!(parse_document("not: valid: yaml: {{").is_err());
    }

    #[test]
    fn test_aliases_resolve_to_anchored_node() {
        let yaml = "base: &b\n  a: 1\nother: *b\n";
        let doc = parse_document(yaml).unwrap();
        assert_eq!(doc["other"], serde_json::json!({"a": 1}));
        assert_eq!(doc["base"], doc["other"]);
    }

    #[test]
    fn test_file_content_lines_stay_array() {
        let yaml = "content:\n  - \"---\"\n  - \"DEBUG: ${resources.env.DEBUG}\"\n";
        let doc = parse_document(yaml).unwrap();
        let lines = doc["content"].as_array().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "DEBUG: ${resources.env.DEBUG}");
    }

    #[test]
    fn test_parse_scalar_types() {
        assert_eq!(parse_scalar("8080"), Value::from(8080));
        assert_eq!(parse_scalar("true"), Value::Bool(true));
        assert_eq!(parse_scalar("nginx:1.25"), Value::from("nginx:1.25"));
        assert_eq!(parse_scalar("a: b"), Value::from("a: b"));
        assert_eq!(parse_scalar("${resources.db.host}"), Value::from("${resources.db.host}"));
    }

    #[test]
    fn test_from_str_typed() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Probe {
            path: String,
            port: u16,
        }

        let probe: Probe = from_str("path: /alive\nport: 8080").unwrap();
        assert_eq!(
            probe,
            Probe {
                path: "/alive".to_string(),
                port: 8080
            }
        );
    }
}
