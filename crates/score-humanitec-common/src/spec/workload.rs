//! Top-level Score workload specification

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::container::ContainerSpec;
use super::ports::ServiceSpec;
use super::resources::ResourceSpec;

/// Workload metadata (Score: metadata)
///
/// Only `name` is required. Every other field is kept as-is so it can be
/// referenced through `${metadata.FIELD}` placeholders.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct WorkloadMetadata {
    /// Workload name, also the Humanitec module id
    pub name: String,

    /// Any additional metadata fields (annotations, labels, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WorkloadMetadata {
    /// Create metadata with just a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: Map::new(),
        }
    }

    /// Metadata as a JSON map, `name` included
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = self.extra.clone();
        map.insert("name".to_string(), Value::String(self.name.clone()));
        map
    }
}

/// Score workload specification
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadSpec {
    /// Score schema version (e.g. `score.dev/v1b1`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Workload metadata
    pub metadata: WorkloadMetadata,

    /// Containers keyed by name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub containers: BTreeMap<String, ContainerSpec>,

    /// Declared resource dependencies keyed by name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resources: BTreeMap<String, ResourceSpec>,

    /// Exposed service ports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::resources::ResourceType;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_workload() {
        let spec: WorkloadSpec = serde_json::from_value(json!({
            "apiVersion": "score.dev/v1b1",
            "metadata": {"name": "backend", "annotations": {"team": "core"}},
            "service": {"ports": {"www": {"port": 80, "targetPort": 8080}}},
            "containers": {
                "backend": {"image": "busybox", "variables": {"GREETING": "hello"}}
            },
            "resources": {
                "db": {"type": "postgres"},
                "env": {"type": "environment"}
            }
        }))
        .unwrap();

        assert_eq!(spec.metadata.name, "backend");
        assert_eq!(spec.metadata.extra["annotations"]["team"], "core");
        assert_eq!(spec.containers["backend"].image.as_deref(), Some("busybox"));
        assert_eq!(spec.resources["db"].type_, ResourceType::Custom("postgres".into()));
        assert_eq!(spec.resources["env"].type_, ResourceType::Environment);
        let ports = &spec.service.as_ref().unwrap().ports;
        assert_eq!(ports["www"].target_port, Some(8080));
    }

    #[test]
    fn test_metadata_map_includes_name() {
        let mut meta = WorkloadMetadata::named("api");
        meta.extra.insert("version".into(), json!(2));
        let map = meta.to_map();
        assert_eq!(map["name"], "api");
        assert_eq!(map["version"], 2);
    }

    #[test]
    fn test_missing_metadata_fails() {
        let result: Result<WorkloadSpec, _> = serde_json::from_value(json!({"containers": {}}));
        assert!(result.is_err());
    }
}
