//! Deep merge of JSON trees
//!
//! Used for two things: layering an overrides file on top of a Score file, and
//! merging the extension feature fragment into the generated module spec. In
//! both cases the overlay wins on conflicting scalar keys, maps are merged key
//! by key, and a map meeting a non-map is a conflict.

use serde_json::{Map, Value};

use crate::{Error, Result};

/// Merge `overlay` into `base`, overlay values taking precedence.
///
/// Returns `Error::Merge` naming the dotted path when one side holds a map and
/// the other a non-null scalar or list. A `null` overlay value replaces the
/// base value.
pub fn deep_merge(base: &mut Map<String, Value>, overlay: Map<String, Value>) -> Result<()> {
    merge_at(base, overlay, "")
}

fn merge_at(base: &mut Map<String, Value>, overlay: Map<String, Value>, prefix: &str) -> Result<()> {
    for (key, incoming) in overlay {
        let path = join(prefix, &key);
        let Some(existing) = base.get_mut(&key) else {
            base.insert(key, incoming);
            continue;
        };

        match incoming {
            Value::Object(nested) => match existing {
                Value::Object(existing) => merge_at(existing, nested, &path)?,
                Value::Null => *existing = Value::Object(nested),
                other => {
                    return Err(Error::merge(
                        path,
                        format!("cannot replace {} with object", kind_of(other)),
                    ))
                }
            },
            Value::Null => *existing = Value::Null,
            scalar => {
                if existing.is_object() {
                    return Err(Error::merge(
                        path,
                        format!("cannot replace object with {}", kind_of(&scalar)),
                    ));
                }
                *existing = scalar;
            }
        }
    }
    Ok(())
}

/// Set a value at a dotted path, creating intermediate maps as needed.
///
/// Fails when an intermediate segment already holds a non-map value.
pub fn set_path(root: &mut Map<String, Value>, path: &str, value: Value) -> Result<()> {
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(Error::validation(format!("invalid property path '{}'", path)));
    }

    let (last, parents) = segments
        .split_last()
        .ok_or_else(|| Error::validation("empty property path"))?;

    let mut current = root;
    let mut walked = String::new();
    for segment in parents {
        walked = join(&walked, segment);
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        current = match entry {
            Value::Object(map) => map,
            other => {
                return Err(Error::merge(
                    walked,
                    format!("cannot descend into {}", kind_of(other)),
                ))
            }
        };
    }
    current.insert(last.to_string(), value);
    Ok(())
}

/// Human readable JSON kind, used in error messages
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_overlay_wins_on_scalars() {
        let mut base = obj(json!({"a": 1, "b": {"c": "x", "d": true}}));
        deep_merge(&mut base, obj(json!({"a": 2, "b": {"c": "y"}}))).unwrap();
        assert_eq!(Value::Object(base), json!({"a": 2, "b": {"c": "y", "d": true}}));
    }

    #[test]
    fn test_new_keys_are_added() {
        let mut base = obj(json!({"containers": {"main": {"id": "main"}}}));
        deep_merge(
            &mut base,
            obj(json!({"labels": {"team": "core"}, "containers": {"main": {"image": "nginx"}}})),
        )
        .unwrap();
        assert_eq!(
            Value::Object(base),
            json!({
                "containers": {"main": {"id": "main", "image": "nginx"}},
                "labels": {"team": "core"}
            })
        );
    }

    #[test]
    fn test_arrays_are_replaced_not_concatenated() {
        let mut base = obj(json!({"args": ["-a", "-b"]}));
        deep_merge(&mut base, obj(json!({"args": ["-c"]}))).unwrap();
        assert_eq!(Value::Object(base), json!({"args": ["-c"]}));
    }

    #[test]
    fn test_scalar_over_map_conflicts() {
        let mut base = obj(json!({"containers": {"main": {}}}));
        let err = deep_merge(&mut base, obj(json!({"containers": "oops"}))).unwrap_err();
        assert!(matches!(err, Error::Merge { ref path, .. } if path == "containers"));
    }

    #[test]
    fn test_map_over_scalar_conflicts_with_nested_path() {
        let mut base = obj(json!({"service": {"ports": 80}}));
        let err = deep_merge(&mut base, obj(json!({"service": {"ports": {"www": 1}}}))).unwrap_err();
        assert!(err.to_string().contains("service.ports"));
    }

    #[test]
    fn test_null_overlay_replaces() {
        let mut base = obj(json!({"a": {"b": 1}}));
        deep_merge(&mut base, obj(json!({"a": null}))).unwrap();
        assert_eq!(Value::Object(base), json!({"a": null}));
    }

    #[test]
    fn test_set_path_creates_maps() {
        let mut root = obj(json!({"containers": {"backend": {"image": "busybox"}}}));
        set_path(&mut root, "containers.backend.image", json!("nginx")).unwrap();
        set_path(&mut root, "service.ports.www.port", json!(80)).unwrap();
        assert_eq!(
            Value::Object(root),
            json!({
                "containers": {"backend": {"image": "nginx"}},
                "service": {"ports": {"www": {"port": 80}}}
            })
        );
    }

    #[test]
    fn test_set_path_rejects_scalar_parent() {
        let mut root = obj(json!({"metadata": {"name": "x"}}));
        assert!(set_path(&mut root, "metadata.name.first", json!("y")).is_err());
        assert!(set_path(&mut root, "metadata..name", json!("y")).is_err());
    }
}
