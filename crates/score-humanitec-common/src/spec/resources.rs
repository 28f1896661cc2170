//! Resource dependency types: `ResourceType`, `ResourceSpec` and declared
//! properties.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Resource Type
// =============================================================================

/// Type of resource dependency
///
/// `environment`, `service` and `workload` are pseudo-resources with their
/// own addressing. Everything else is a backing resource provisioned by the
/// platform (`postgres`, `dns`, `volume`, ...).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResourceType {
    /// Environment values (`${values.KEY}`)
    Environment,
    /// Another workload, addressed through its service
    Service,
    /// Reserved: another workload
    Workload,
    /// Backing resource of any other type
    Custom(String),
}

impl Default for ResourceType {
    fn default() -> Self {
        Self::Custom(String::new())
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ResourceType {
    /// Get the string representation of this resource type
    pub fn as_str(&self) -> &str {
        match self {
            Self::Environment => "environment",
            Self::Service => "service",
            Self::Workload => "workload",
            Self::Custom(s) => s.as_str(),
        }
    }

    /// Returns true if this is a backing resource provisioned by the platform
    ///
    /// `workload` is reserved but still provisioned like any other type.
    pub fn is_backing(&self) -> bool {
        matches!(self, Self::Workload | Self::Custom(_))
    }
}

impl From<&str> for ResourceType {
    fn from(s: &str) -> Self {
        match s {
            "environment" => Self::Environment,
            "service" => Self::Service,
            "workload" => Self::Workload,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl Serialize for ResourceType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ResourceType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s.as_str()))
    }
}

// =============================================================================
// Resource Metadata and Properties
// =============================================================================

/// Resource metadata (Score-compatible)
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ResourceMetadata {
    /// Annotations for the resource
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

/// Declared resource property (Score v1b1: properties)
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ResourcePropertySpec {
    /// Property type hint
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// Default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Whether the property must be provided
    #[serde(default)]
    pub required: bool,

    /// Whether the value is sensitive
    #[serde(default)]
    pub secret: bool,
}

// =============================================================================
// Resource Spec
// =============================================================================

/// Resource dependency specification (Score-compatible)
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ResourceSpec {
    /// Type of resource
    #[serde(rename = "type")]
    pub type_: ResourceType,

    /// Optional specialization class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    /// Resource metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ResourceMetadata>,

    /// Provisioner-interpreted parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Map<String, Value>>,

    /// Declared properties. `None` means any property may be referenced.
    ///
    /// A property may be declared with an empty body (`host:`), hence the
    /// optional values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Option<ResourcePropertySpec>>>,
}

impl ResourceSpec {
    /// Create a resource of the given type
    pub fn of_type(type_: impl Into<ResourceType>) -> Self {
        Self {
            type_: type_.into(),
            ..Default::default()
        }
    }

    /// Look up an annotation value
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.annotations.get(key))
            .map(String::as_str)
    }

    /// Declared property names, if the resource restricts them
    pub fn declared_properties(&self) -> Option<impl Iterator<Item = &str>> {
        self.properties
            .as_ref()
            .map(|props| props.keys().map(String::as_str))
    }
}
