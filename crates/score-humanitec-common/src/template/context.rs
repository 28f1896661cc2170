//! Reference resolution context
//!
//! Maps Score placeholder references onto the Humanitec namespace:
//! - `${metadata.FIELD}` - literal value from the workload metadata
//! - `${resources.NAME}` - scope path (`values`, `modules.NAME`, `externals.ID`, `shared.ID`)
//! - `${resources.NAME.PROP}` - placeholder in the target namespace, resolved
//!   by the platform at deployment time (`${externals.ID.PROP}`, ...)

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::engine::Substitutor;
use super::scope::{self, Classification};
use crate::spec::{LegacyResourceExtension, ResourceSpec, WorkloadMetadata};
use crate::{Error, Result};

/// Source of values for `${...}` references
pub trait ReferenceResolver {
    /// Value of a reference path, `None` when it isn't known
    fn lookup(&self, path: &str) -> Option<String>;

    /// Value of a reference path, or the placeholder itself when unknown
    fn resolve(&self, path: &str) -> String {
        self.lookup(path).unwrap_or_else(|| {
            warn!(
                reference = %path,
                "can not resolve reference, resource or property is not declared"
            );
            format!("${{{}}}", path)
        })
    }
}

impl ReferenceResolver for BTreeMap<String, String> {
    fn lookup(&self, path: &str) -> Option<String> {
        self.get(path).cloned()
    }
}

/// Resolution context for one conversion
#[derive(Clone, Debug, Default)]
pub struct ResolutionContext {
    /// Exact references
    values: BTreeMap<String, String>,
    /// Resources without declared properties: any property resolves
    open: BTreeSet<String>,
    /// Classification of every addressable resource
    classifications: BTreeMap<String, Classification>,
}

impl ResolutionContext {
    /// Build the context from workload metadata, resources and legacy scopes
    ///
    /// Fails when two sources produce the same reference.
    pub fn build(
        metadata: &WorkloadMetadata,
        resources: &BTreeMap<String, ResourceSpec>,
        legacy: &BTreeMap<String, LegacyResourceExtension>,
    ) -> Result<Self> {
        let mut ctx = Self::default();

        let mut flattened = Vec::new();
        flatten("metadata", &metadata.to_map(), &mut flattened);
        for (reference, value) in flattened {
            ctx.insert(reference, value)?;
        }

        for (name, resource) in resources {
            let Some(classification) = scope::classify(name, resource, legacy.get(name)) else {
                continue;
            };

            ctx.insert(format!("resources.{}", name), classification.source())?;
            match resource.declared_properties() {
                Some(properties) => {
                    for property in properties {
                        ctx.insert(
                            format!("resources.{}.{}", name, property),
                            classification.property(property),
                        )?;
                    }
                }
                None => {
                    ctx.open.insert(name.clone());
                }
            }

            debug!(resource = %name, source = %classification.source(), "classified resource");
            ctx.classifications.insert(name.clone(), classification);
        }

        Ok(ctx)
    }

    fn insert(&mut self, reference: String, value: String) -> Result<()> {
        if self.values.contains_key(&reference) {
            return Err(Error::ambiguous(reference));
        }
        self.values.insert(reference, value);
        Ok(())
    }

    /// Classification of a resource, `None` if it was skipped
    pub fn classification(&self, resource: &str) -> Option<&Classification> {
        self.classifications.get(resource)
    }

    /// Substitutor backed by this context
    pub fn substitutor(&self) -> Substitutor<'_, Self> {
        Substitutor::new(self)
    }
}

impl ReferenceResolver for ResolutionContext {
    fn lookup(&self, path: &str) -> Option<String> {
        if let Some(value) = self.values.get(path) {
            return Some(value.clone());
        }

        let (name, property) = path.strip_prefix("resources.")?.split_once('.')?;
        if property.is_empty() || !self.open.contains(name) {
            return None;
        }
        self.classifications
            .get(name)
            .map(|class| class.property(property))
    }
}

/// Flatten nested metadata into `prefix.a.b` references with string values
///
/// Maps are also reachable as a whole, in compact JSON form.
fn flatten(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, String)>) {
    for (key, value) in map {
        let reference = format!("{}.{}", prefix, key);
        match value {
            Value::Object(nested) => {
                out.push((reference.clone(), value.to_string()));
                flatten(&reference, nested, out);
            }
            Value::String(s) => out.push((reference, s.clone())),
            Value::Null => out.push((reference, String::new())),
            other => out.push((reference, other.to_string())),
        }
    }
}
