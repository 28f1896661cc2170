//! Resource scope classification
//!
//! Every resource in a workload maps onto one addressing scheme in the
//! Humanitec namespace:
//!
//! | Resource type | Placeholder source                       |
//! |---------------|------------------------------------------|
//! | `environment` | `values`                                 |
//! | `service`     | `modules.<name>` (properties under `service.`) |
//! | anything else | `externals.<id>` or `shared.<id>`, optionally inside `modules.<workload>.` |
//!
//! `workload` is a reserved type: it is warned about and then addressed like
//! any other backing resource.
//!
//! Backing resources pick their address from three tiers, first match wins:
//!
//! 1. the `score.humanitec.io/resId` annotation
//! 2. the deprecated `resources.<name>.scope` entry of the extensions file
//! 3. `externals.<name>`

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use super::error::ScopeError;
use crate::spec::{LegacyResourceExtension, ResourceSpec, ResourceType};
use crate::ANNOTATION_RESOURCE_ID;

// =============================================================================
// Addresses
// =============================================================================

/// Where a backing resource lives
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackingScope {
    /// Embedded in the module under `externals`
    External,
    /// Declared once in the environment's shared resources
    Shared,
}

impl BackingScope {
    /// Namespace segment used in placeholders
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::External => "externals",
            Self::Shared => "shared",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "external" | "externals" => Some(Self::External),
            "shared" => Some(Self::Shared),
            _ => None,
        }
    }
}

impl fmt::Display for BackingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully resolved address of a backing resource
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceAddress {
    /// Owning workload module, when the resource belongs to another module
    pub workload: Option<String>,
    /// External or shared
    pub scope: BackingScope,
    /// Resource id within the scope
    pub id: String,
}

impl ResourceAddress {
    /// A resource embedded in the current module
    pub fn external(id: impl Into<String>) -> Self {
        Self {
            workload: None,
            scope: BackingScope::External,
            id: id.into(),
        }
    }

    /// A shared resource
    pub fn shared(id: impl Into<String>) -> Self {
        Self {
            workload: None,
            scope: BackingScope::Shared,
            id: id.into(),
        }
    }

    /// Whether the current workload declares this resource
    pub fn is_local(&self) -> bool {
        self.workload.is_none()
    }

    /// Dotted path used as placeholder source
    pub fn path(&self) -> String {
        match &self.workload {
            Some(workload) => format!("modules.{}.{}.{}", workload, self.scope, self.id),
            None => format!("{}.{}", self.scope, self.id),
        }
    }
}

impl fmt::Display for ResourceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for ResourceAddress {
    type Err = ScopeError;

    /// Parse a resource id annotation value
    fn from_str(value: &str) -> Result<Self, ScopeError> {
        let unsupported = || ScopeError::unsupported_reference(value);
        let parts: Vec<&str> = value.splitn(4, '.').collect();

        let (workload, scope, id) = match parts.as_slice() {
            [scope, id] => (None, *scope, *id),
            ["modules", workload, scope, id] if !workload.is_empty() => {
                (Some(workload.to_string()), *scope, *id)
            }
            _ => return Err(unsupported()),
        };

        let scope = BackingScope::parse(scope).ok_or_else(unsupported)?;
        if id.is_empty() {
            return Err(unsupported());
        }

        Ok(Self {
            workload,
            scope,
            id: id.to_string(),
        })
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Addressing scheme of a workload resource
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    /// `environment` pseudo-resource
    EnvironmentValues,
    /// Another workload module
    ModuleReference {
        /// Referenced module name
        module: String,
    },
    /// Backing resource
    Backing(ResourceAddress),
}

impl Classification {
    /// Placeholder source for `${resources.<name>}`
    pub fn source(&self) -> String {
        match self {
            Self::EnvironmentValues => "values".to_string(),
            Self::ModuleReference { module } => format!("modules.{}", module),
            Self::Backing(address) => address.path(),
        }
    }

    /// Placeholder for `${resources.<name>.<property>}`
    pub fn property(&self, property: &str) -> String {
        match self {
            Self::ModuleReference { module } => {
                format!("${{modules.{}.service.{}}}", module, property)
            }
            _ => format!("${{{}.{}}}", self.source(), property),
        }
    }

    /// The backing address, for resources the platform provisions
    pub fn address(&self) -> Option<&ResourceAddress> {
        match self {
            Self::Backing(address) => Some(address),
            _ => None,
        }
    }
}

/// Classify a workload resource
///
/// Returns `None` when the resource id annotation can't be parsed; the
/// resource then has no address at all and references to it stay unresolved.
pub fn classify(
    name: &str,
    resource: &ResourceSpec,
    legacy: Option<&LegacyResourceExtension>,
) -> Option<Classification> {
    match &resource.type_ {
        ResourceType::Environment => Some(Classification::EnvironmentValues),
        ResourceType::Service => Some(Classification::ModuleReference {
            module: name.to_string(),
        }),
        ResourceType::Workload | ResourceType::Custom(_) => {
            if resource.type_ == ResourceType::Workload {
                warn!(
                    resource = %name,
                    "'workload' is a reserved resource type, its usage may lead to compatibility issues with future releases"
                );
            }
            resolve_address(
                name,
                resource.annotation(ANNOTATION_RESOURCE_ID),
                legacy,
            )
            .map(Classification::Backing)
        }
    }
}

/// Resolve the address of a backing resource through the precedence tiers
pub fn resolve_address(
    name: &str,
    annotation: Option<&str>,
    legacy: Option<&LegacyResourceExtension>,
) -> Option<ResourceAddress> {
    if legacy.is_some() {
        warn!(
            resource = %name,
            "resource scope in extensions is deprecated, use the '{}' annotation instead",
            ANNOTATION_RESOURCE_ID
        );
    }

    if let Some(value) = annotation.filter(|v| !v.is_empty()) {
        return match value.parse::<ResourceAddress>() {
            Ok(address) => Some(address),
            Err(err) => {
                warn!(resource = %name, error = %err, "skipping resource");
                None
            }
        };
    }

    if let Some(ext) = legacy {
        match legacy_address(name, ext) {
            Ok(address) => return Some(address),
            Err(err) => warn!(resource = %name, error = %err, "using the default scope"),
        }
    }

    Some(ResourceAddress::external(name))
}

fn legacy_address(
    name: &str,
    ext: &LegacyResourceExtension,
) -> Result<ResourceAddress, ScopeError> {
    match ext.scope.as_deref().unwrap_or_default() {
        "" | "external" | "externals" => Ok(ResourceAddress::external(name)),
        "shared" => Ok(ResourceAddress::shared(name)),
        other => Err(ScopeError::unsupported_scope(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::ResourceMetadata;
    use rstest::rstest;
    use std::collections::BTreeMap;

    fn annotated(type_: &str, res_id: &str) -> ResourceSpec {
        ResourceSpec {
            metadata: Some(ResourceMetadata {
                annotations: BTreeMap::from([(
                    ANNOTATION_RESOURCE_ID.to_string(),
                    res_id.to_string(),
                )]),
            }),
            ..ResourceSpec::of_type(type_)
        }
    }

    // =========================================================================
    // Annotation parsing
    // =========================================================================

    #[rstest]
    #[case("externals.db-id", None, BackingScope::External, "db-id")]
    #[case("external.db-id", None, BackingScope::External, "db-id")]
    #[case("shared.dns", None, BackingScope::Shared, "dns")]
    #[case("modules.api.externals.db", Some("api"), BackingScope::External, "db")]
    #[case("modules.api.shared.dns.v2", Some("api"), BackingScope::Shared, "dns.v2")]
    fn test_supported_annotations(
        #[case] value: &str,
        #[case] workload: Option<&str>,
        #[case] scope: BackingScope,
        #[case] id: &str,
    ) {
        let address: ResourceAddress = value.parse().unwrap();
        assert_eq!(address.workload.as_deref(), workload);
        assert_eq!(address.scope, scope);
        assert_eq!(address.id, id);
    }

    #[rstest]
    #[case("db-id")]
    #[case("shared.a.b")]
    #[case("global.db")]
    #[case("shared.")]
    #[case("modules..shared.db")]
    #[case("modules.api.volumes.db")]
    fn test_unsupported_annotations(#[case] value: &str) {
        let err = value.parse::<ResourceAddress>().unwrap_err();
        assert_eq!(err, ScopeError::unsupported_reference(value));
    }

    #[test]
    fn test_address_path() {
        assert_eq!(ResourceAddress::external("db").path(), "externals.db");
        assert_eq!(ResourceAddress::shared("dns").to_string(), "shared.dns");
        let remote: ResourceAddress = "modules.api.external.db".parse().unwrap();
        assert_eq!(remote.path(), "modules.api.externals.db");
        assert!(!remote.is_local());
    }

    // =========================================================================
    // Precedence tiers
    // =========================================================================

    #[rstest]
    #[case::default_tier(None, None, Some("externals.db"))]
    #[case::annotation_tier(Some("shared.main-db"), None, Some("shared.main-db"))]
    #[case::annotation_beats_legacy(Some("externals.x"), Some("shared"), Some("externals.x"))]
    #[case::empty_annotation_ignored(Some(""), Some("shared"), Some("shared.db"))]
    #[case::bad_annotation_skips(Some("x"), Some("shared"), None)]
    #[case::legacy_shared(None, Some("shared"), Some("shared.db"))]
    #[case::legacy_external(None, Some("external"), Some("externals.db"))]
    #[case::legacy_empty(None, Some(""), Some("externals.db"))]
    #[case::legacy_unknown(None, Some("global"), Some("externals.db"))]
    fn test_resolve_address(
        #[case] annotation: Option<&str>,
        #[case] legacy_scope: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let legacy = legacy_scope.map(LegacyResourceExtension::scoped);
        let address = resolve_address("db", annotation, legacy.as_ref());
        assert_eq!(address.map(|a| a.path()).as_deref(), expected);
    }

    #[test]
    fn test_legacy_entry_without_scope_is_external() {
        let legacy = LegacyResourceExtension::default();
        let address = resolve_address("db", None, Some(&legacy)).unwrap();
        assert_eq!(address, ResourceAddress::external("db"));
    }

    // =========================================================================
    // Classification by type
    // =========================================================================

    #[test]
    fn test_pseudo_resources() {
        let env = classify("env", &ResourceSpec::of_type("environment"), None).unwrap();
        assert_eq!(env, Classification::EnvironmentValues);
        assert_eq!(env.source(), "values");
        assert_eq!(env.property("DEBUG"), "${values.DEBUG}");

        let svc = classify("api", &ResourceSpec::of_type("service"), None).unwrap();
        assert_eq!(svc.source(), "modules.api");
        assert_eq!(svc.property("port"), "${modules.api.service.port}");

    }

    #[test]
    fn test_reserved_workload_type_is_a_backing_resource() {
        let wl = classify("worker", &ResourceSpec::of_type("workload"), None).unwrap();
        assert_eq!(wl.source(), "externals.worker");
        assert_eq!(wl.property("host"), "${externals.worker.host}");

        let shared = classify("worker", &annotated("workload", "shared.jobs"), None).unwrap();
        assert_eq!(shared.source(), "shared.jobs");
    }

    #[test]
    fn test_annotations_on_pseudo_resources_are_ignored() {
        let env = classify("env", &annotated("environment", "shared.x"), None).unwrap();
        assert_eq!(env, Classification::EnvironmentValues);

        let legacy = LegacyResourceExtension::scoped("shared");
        let svc = classify("api", &annotated("service", "shared.x"), Some(&legacy)).unwrap();
        assert_eq!(svc.source(), "modules.api");
    }

    #[test]
    fn test_backing_resource_properties() {
        let db = classify("db", &annotated("postgres", "externals.annotations-db-id"), None)
            .unwrap();
        assert_eq!(db.source(), "externals.annotations-db-id");
        assert_eq!(db.property("host"), "${externals.annotations-db-id.host}");
        assert!(db.address().unwrap().is_local());
    }

    #[test]
    fn test_unparseable_annotation_has_no_classification() {
        assert!(classify("db", &annotated("postgres", "db-id"), None).is_none());
    }
}
