//! Humanitec extensions document
//!
//! ```yaml
//! apiVersion: humanitec.org/v1b1
//! profile: "humanitec/default-module"
//! spec:
//!   labels:
//!     "tags.datadoghq.com/env": "${resources.env.DATADOG_ENV}"
//! routes:
//!   http:
//!     "/":
//!       from: ${resources.dns}
//!       type: prefix
//!       port: 80
//! resources:        # deprecated, use the resId annotation
//!   dns:
//!     scope: shared
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::template::TemplateString;

/// Deprecated per-resource scope declaration
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct LegacyResourceExtension {
    /// `external` (default) or `shared`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl LegacyResourceExtension {
    /// Create a legacy entry with the given scope
    pub fn scoped(scope: impl Into<String>) -> Self {
        Self {
            scope: Some(scope.into()),
        }
    }
}

/// A single ingress route
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct RouteRule {
    /// Host the route is served from (supports `${...}` placeholders)
    pub from: TemplateString,

    /// Path match type (e.g. `prefix`, `exact`)
    #[serde(rename = "type")]
    pub type_: String,

    /// Service port the route forwards to
    pub port: u16,
}

/// Extensions applied on top of the Score conversion
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionsSpec {
    /// Extensions schema version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Workload profile for the generated module
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Feature fragment merged into the module spec
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<Map<String, Value>>,

    /// Ingress routes keyed by protocol, then path
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub routes: BTreeMap<String, BTreeMap<String, RouteRule>>,

    /// Deprecated per-resource scopes
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resources: BTreeMap<String, LegacyResourceExtension>,
}

impl ExtensionsSpec {
    /// Profile declared by the extensions, ignoring empty values
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref().filter(|p| !p.is_empty())
    }

    /// Feature fragment, ignoring an empty one
    pub fn features(&self) -> Option<&Map<String, Value>> {
        self.spec.as_ref().filter(|s| !s.is_empty())
    }
}
