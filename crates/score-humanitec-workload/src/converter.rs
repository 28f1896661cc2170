//! SpecConverter: orchestrates the conversion pipeline
//!
//! This is the single entry point for turning a Score `WorkloadSpec` into a
//! Humanitec `DeploymentDelta`. The resolution context is built once per
//! conversion and dropped with it.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use score_humanitec_common::merge::{deep_merge, kind_of};
use score_humanitec_common::spec::{
    DeltaMetadata, DeploymentDelta, ExtensionsSpec, ModuleDefinition, ModuleDeltas, ModuleSpec,
    WorkloadSpec,
};
use score_humanitec_common::template::ResolutionContext;
use score_humanitec_common::{
    Error, ANNOTATION_MANAGED_BY, ANNOTATION_WORKLOAD_SOURCE, DEFAULT_WORKLOAD_PROFILE,
    MANAGED_BY,
};

use crate::error::ConversionError;
use crate::pipeline::{containers, externals, service};

/// Settings for one conversion
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConvertConfig {
    /// Delta name
    pub name: String,
    /// Target environment id
    pub env_id: String,
    /// Directory that relative file mount sources are read from
    pub base_dir: PathBuf,
    /// URL of the file that manages the workload, added as an annotation
    pub workload_source_url: Option<String>,
}

impl ConvertConfig {
    /// Create a config for a delta name and environment
    pub fn new(name: impl Into<String>, env_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            env_id: env_id.into(),
            base_dir: PathBuf::from("."),
            workload_source_url: None,
        }
    }

    /// Set the base directory for file mount sources
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Set the workload source URL; an empty URL clears it
    pub fn with_workload_source_url(mut self, url: Option<String>) -> Self {
        self.workload_source_url = url.filter(|u| !u.is_empty());
        self
    }
}

/// Converts a Score workload into a Humanitec deployment delta.
///
/// ```rust,ignore
/// let delta = SpecConverter::new(&config, &workload)
///     .with_extensions(&extensions)
///     .convert()?;
/// ```
pub struct SpecConverter<'a> {
    config: &'a ConvertConfig,
    spec: &'a WorkloadSpec,
    extensions: Option<&'a ExtensionsSpec>,
}

impl<'a> SpecConverter<'a> {
    /// Create a converter for a workload
    pub fn new(config: &'a ConvertConfig, spec: &'a WorkloadSpec) -> Self {
        Self {
            config,
            spec,
            extensions: None,
        }
    }

    /// Apply a Humanitec extensions document
    pub fn with_extensions(mut self, extensions: &'a ExtensionsSpec) -> Self {
        self.extensions = Some(extensions);
        self
    }

    /// Run the conversion.
    ///
    /// Steps: context → containers → service and routes → feature merge →
    /// profile → resource partition → delta.
    pub fn convert(self) -> Result<DeploymentDelta, ConversionError> {
        let no_extensions = ExtensionsSpec::default();
        let ext = self.extensions.unwrap_or(&no_extensions);
        let workload = self.spec.metadata.name.as_str();

        // 1. Resolution context
        let ctx = ResolutionContext::build(&self.spec.metadata, &self.spec.resources, &ext.resources)
            .map_err(ConversionError::Context)?;
        let subst = ctx.substitutor();

        // 2. Containers
        let mut module = ModuleSpec {
            annotations: self.annotations(),
            ..Default::default()
        };
        for (name, container) in &self.spec.containers {
            let delta = containers::convert(name, container, &subst, &self.config.base_dir)
                .map_err(|source| ConversionError::container(name.as_str(), source))?;
            module.containers.insert(name.clone(), delta);
        }

        // 3. Service ports and ingress routes
        module.service = service::ports(self.spec.service.as_ref());
        module.ingress = service::routes(&ext.routes, &subst);

        // 4. Feature fragment, overriding the generated spec
        let mut spec = to_map(&module).map_err(ConversionError::Encode)?;
        if let Some(features) = ext.features() {
            debug!(workload = %workload, "applying workload profile features");
            deep_merge(&mut spec, subst.substitute_map(features))
                .map_err(ConversionError::Features)?;
        }

        // 5. Profile
        let profile = ext.profile().unwrap_or(DEFAULT_WORKLOAD_PROFILE).to_string();

        // 6. Backing resources
        let declared = externals::partition(workload, &self.spec.resources, &ctx, &subst);

        info!(
            workload = %workload,
            profile = %profile,
            externals = declared.externals.len(),
            shared = declared.shared.len(),
            "converted workload"
        );

        // 7. Delta
        let module = ModuleDefinition {
            profile,
            spec,
            externals: declared.externals,
        };
        Ok(DeploymentDelta {
            metadata: DeltaMetadata {
                env_id: self.config.env_id.clone(),
                name: self.config.name.clone(),
            },
            modules: ModuleDeltas {
                add: BTreeMap::from([(workload.to_string(), module)]),
            },
            shared: declared.shared,
        })
    }

    fn annotations(&self) -> BTreeMap<String, String> {
        let mut annotations = BTreeMap::from([(
            ANNOTATION_MANAGED_BY.to_string(),
            MANAGED_BY.to_string(),
        )]);
        if let Some(url) = &self.config.workload_source_url {
            annotations.insert(ANNOTATION_WORKLOAD_SOURCE.to_string(), url.clone());
        }
        annotations
    }
}

/// Convert a workload with optional extensions
pub fn convert(
    config: &ConvertConfig,
    spec: &WorkloadSpec,
    extensions: Option<&ExtensionsSpec>,
) -> Result<DeploymentDelta, ConversionError> {
    let converter = SpecConverter::new(config, spec);
    match extensions {
        Some(ext) => converter.with_extensions(ext).convert(),
        None => converter.convert(),
    }
}

fn to_map<T: Serialize>(value: &T) -> Result<Map<String, Value>, Error> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(Error::serialization_for(
            "module spec",
            format!("expected an object, found {}", kind_of(&other)),
        )),
    }
}
