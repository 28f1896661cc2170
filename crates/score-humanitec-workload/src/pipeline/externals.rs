//! Backing resource declarations
//!
//! Every backing resource the workload owns is declared exactly once: under
//! the module's `externals` when its scope is external, or as an `add`
//! operation on the environment's shared resources when it is shared.
//! Resources addressed into another workload module are only referenced.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use score_humanitec_common::spec::{ResourceDelta, ResourceSpec, UpdateAction};
use score_humanitec_common::template::{
    BackingScope, Classification, ReferenceResolver, ResolutionContext, Substitutor,
};
use score_humanitec_common::DEFAULT_RESOURCE_CLASS;

/// Resources declared by one workload
#[derive(Debug, Default)]
pub struct Declared {
    /// Module-embedded resources keyed by id
    pub externals: BTreeMap<String, ResourceDelta>,
    /// Shared resources, one operation per path
    pub shared: Vec<UpdateAction>,
}

/// Partition the workload's backing resources by scope
pub fn partition<R: ReferenceResolver + ?Sized>(
    workload: &str,
    resources: &BTreeMap<String, ResourceSpec>,
    ctx: &ResolutionContext,
    subst: &Substitutor<'_, R>,
) -> Declared {
    let mut externals = BTreeMap::new();
    let mut shared = BTreeMap::new();

    for (name, resource) in resources {
        if !resource.type_.is_backing() {
            continue;
        }
        let Some(address) = ctx.classification(name).and_then(Classification::address) else {
            continue;
        };
        if let Some(owner) = address.workload.as_deref().filter(|w| *w != workload) {
            debug!(resource = %name, module = %owner, "resource belongs to another module");
            continue;
        }

        let value = ResourceDelta {
            type_: resource.type_.to_string(),
            class: resource
                .class
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_RESOURCE_CLASS.to_string()),
            params: resource
                .params
                .as_ref()
                .filter(|p| !p.is_empty())
                .map(|p| subst.substitute_map(p)),
        };

        let target = match address.scope {
            BackingScope::External => &mut externals,
            BackingScope::Shared => &mut shared,
        };
        declare(target, address.scope, &address.id, name, value);
    }

    Declared {
        externals: externals
            .into_iter()
            .map(|(id, (_, value))| (id, value))
            .collect(),
        shared: shared
            .into_iter()
            .map(|(id, (_, value))| UpdateAction::add(&id, value))
            .collect(),
    }
}

/// Record a declaration; on a duplicate id the later resource wins
fn declare(
    into: &mut BTreeMap<String, (String, ResourceDelta)>,
    scope: BackingScope,
    id: &str,
    name: &str,
    value: ResourceDelta,
) {
    if let Some((previous, _)) = into.insert(id.to_string(), (name.to_string(), value)) {
        warn!(
            resource = %name,
            previous = %previous,
            scope = %scope,
            id = %id,
            "duplicate resource id, '{}' replaces '{}'",
            name,
            previous
        );
    }
}
