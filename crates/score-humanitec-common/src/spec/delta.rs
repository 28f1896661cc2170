//! Humanitec deployment delta (output document)
//!
//! Field names follow the Humanitec API (`snake_case`, `op`), not Score.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Delta document
// =============================================================================

/// Delta metadata
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct DeltaMetadata {
    /// Target environment id
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub env_id: String,

    /// Human readable delta name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

/// Module changes carried by a delta
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ModuleDeltas {
    /// Modules to add, keyed by workload name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub add: BTreeMap<String, ModuleDefinition>,
}

/// A workload module definition
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ModuleDefinition {
    /// Workload profile
    pub profile: String,

    /// Module spec. Open-ended since feature fragments merge into it.
    pub spec: Map<String, Value>,

    /// Resources embedded in this module
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub externals: BTreeMap<String, ResourceDelta>,
}

/// Declared resource (external or shared)
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ResourceDelta {
    /// Resource type
    #[serde(rename = "type")]
    pub type_: String,

    /// Resource class
    pub class: String,

    /// Provisioning parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Map<String, Value>>,
}

/// JSON-patch style operation on the shared resources manifest
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UpdateOperation {
    /// Add a resource
    Add,
}

/// Update of the shared resources manifest
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct UpdateAction {
    /// Operation
    pub op: UpdateOperation,

    /// Path of the resource (`/<id>`)
    pub path: String,

    /// Resource definition
    pub value: ResourceDelta,
}

impl UpdateAction {
    /// Create an `add` operation for a shared resource id
    pub fn add(id: &str, value: ResourceDelta) -> Self {
        Self {
            op: UpdateOperation::Add,
            path: format!("/{}", id),
            value,
        }
    }
}

/// Deployment delta request
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct DeploymentDelta {
    /// Delta metadata
    pub metadata: DeltaMetadata,

    /// Module changes
    pub modules: ModuleDeltas,

    /// Shared resource updates
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shared: Vec<UpdateAction>,
}

// =============================================================================
// Module spec building blocks
// =============================================================================

/// HTTP probe as understood by the default module
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ProbeDelta {
    /// Probe type, always `http`
    #[serde(rename = "type")]
    pub type_: String,

    /// Request path
    pub path: String,

    /// Request port
    pub port: u16,

    /// Request headers
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

/// Container resource requests and limits
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ResourcesDelta {
    /// Requested resources
    pub requests: BTreeMap<String, Value>,

    /// Maximum resources
    pub limits: BTreeMap<String, Value>,
}

/// Mounted file
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct FileDelta {
    /// File mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// File content
    pub value: String,
}

/// Mounted volume
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct VolumeMountDelta {
    /// Resolved volume reference
    pub id: String,

    /// Sub path in the volume
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_path: Option<String>,

    /// Mount as read-only
    pub read_only: bool,
}

/// Container definition
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ContainerDelta {
    /// Container id
    pub id: String,

    /// Image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Entrypoint override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,

    /// Arguments override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,

    /// Environment variables
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, String>,

    /// Resource requests and limits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourcesDelta>,

    /// Liveness probe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness_probe: Option<ProbeDelta>,

    /// Readiness probe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readiness_probe: Option<ProbeDelta>,

    /// Files keyed by mount target
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub files: BTreeMap<String, FileDelta>,

    /// Volumes keyed by mount target
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub volume_mounts: BTreeMap<String, VolumeMountDelta>,
}

/// Service port
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PortDelta {
    /// Protocol
    pub protocol: String,

    /// Published port
    pub service_port: u16,

    /// Container port
    pub container_port: u16,
}

/// Module service block
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ServiceDelta {
    /// Named ports
    pub ports: BTreeMap<String, PortDelta>,
}

/// Ingress path target
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct IngressPath {
    /// Path match type
    #[serde(rename = "type")]
    pub type_: String,

    /// Service port
    pub port: u16,
}

/// Module ingress block: host → protocol → path → target
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct IngressDelta {
    /// Rules keyed by host
    pub rules: BTreeMap<String, BTreeMap<String, BTreeMap<String, IngressPath>>>,
}

/// Typed part of a module spec, before feature fragments are merged in
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ModuleSpec {
    /// Provenance annotations
    pub annotations: BTreeMap<String, String>,

    /// Containers keyed by name
    pub containers: BTreeMap<String, ContainerDelta>,

    /// Service ports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceDelta>,

    /// Ingress routes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress: Option<IngressDelta>,
}
