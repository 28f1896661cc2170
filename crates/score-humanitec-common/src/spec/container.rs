//! Container specifications: probes, file and volume mounts, resource
//! requirements.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::template::TemplateString;

// =============================================================================
// Probes
// =============================================================================

/// HTTP header for probes
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct HttpHeader {
    /// Header name
    pub name: String,
    /// Header value
    pub value: String,
}

/// HTTP GET probe configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HttpGetProbe {
    /// HTTP scheme (HTTP or HTTPS)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,

    /// Optional host header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Path to probe. An empty path disables the probe.
    #[serde(default)]
    pub path: String,

    /// Port to probe
    #[serde(default)]
    pub port: u16,

    /// Additional request headers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub http_headers: Vec<HttpHeader>,
}

/// Liveness or readiness probe
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContainerProbe {
    /// HTTP GET probe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_get: Option<HttpGetProbe>,
}

// =============================================================================
// File and Volume Mounts
// =============================================================================

/// Inline file content
///
/// A plain string is the current format. A list of lines is the deprecated
/// format; lines are joined with `\n`. Anything else is kept so the converter
/// can report it.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum FileContent {
    /// Content as a single string
    Text(String),
    /// Deprecated: content as a list of lines
    Lines(Vec<Value>),
    /// Unsupported content shape
    Other(Value),
}

impl From<&str> for FileContent {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// File mount specification
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileMount {
    /// Path of the file inside the container
    pub target: String,

    /// File mode in octal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// Local file to read the content from, relative to the Score file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Inline content (supports `${...}` placeholders)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<FileContent>,

    /// Keep `${...}` in the content literal instead of resolving it
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub no_expand: bool,
}

/// Volume mount specification
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMount {
    /// Volume reference (supports `${...}` placeholders)
    pub source: TemplateString,

    /// Sub path in the volume
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Mount path inside the container
    pub target: String,

    /// Mount as read-only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
}

// =============================================================================
// Resource Requirements
// =============================================================================

/// Compute resource requirements.
///
/// Quantities are passed through to the platform untouched, so they stay
/// opaque JSON values.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ResourceRequirements {
    /// Maximum resources
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub limits: BTreeMap<String, Value>,

    /// Requested resources
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub requests: BTreeMap<String, Value>,
}

impl ResourceRequirements {
    /// True when neither limits nor requests are set
    pub fn is_empty(&self) -> bool {
        self.limits.is_empty() && self.requests.is_empty()
    }
}

// =============================================================================
// Container Spec
// =============================================================================

/// Container specification (Score-compatible)
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSpec {
    /// Container image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Override container entrypoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,

    /// Override container arguments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,

    /// Environment variables (values support `${...}` placeholders)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, TemplateString>,

    /// Resource requirements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    /// Files to mount in the container
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileMount>,

    /// Volumes to mount
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<VolumeMount>,

    /// Liveness probe - restarts container when it fails
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness_probe: Option<ContainerProbe>,

    /// Readiness probe - removes container from service endpoints when it fails
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readiness_probe: Option<ContainerProbe>,
}
