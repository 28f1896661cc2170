//! Container conversion
//!
//! Image, command and args are copied as-is. Variable values and volume
//! sources go through substitution. Resource quantities are opaque and copied
//! verbatim. Probes are kept only when they name an HTTP path.

use std::collections::BTreeMap;
use std::path::Path;

use score_humanitec_common::spec::{
    ContainerDelta, ContainerProbe, ContainerSpec, ProbeDelta, ResourcesDelta, VolumeMountDelta,
};
use score_humanitec_common::template::{ReferenceResolver, Substitutor};
use score_humanitec_common::Result;

use super::files;

/// Convert a single container
pub fn convert<R: ReferenceResolver + ?Sized>(
    name: &str,
    spec: &ContainerSpec,
    subst: &Substitutor<'_, R>,
    base_dir: &Path,
) -> Result<ContainerDelta> {
    let variables = spec
        .variables
        .iter()
        .map(|(key, value)| (key.clone(), subst.substitute(value.as_str())))
        .collect();

    let resources = spec
        .resources
        .as_ref()
        .filter(|r| !r.is_empty())
        .map(|r| ResourcesDelta {
            requests: r.requests.clone(),
            limits: r.limits.clone(),
        });

    let mut file_deltas = BTreeMap::new();
    for file in &spec.files {
        let (target, delta) = files::convert(file, subst, base_dir)?;
        file_deltas.insert(target, delta);
    }

    let volume_mounts = spec
        .volumes
        .iter()
        .map(|vol| {
            (
                vol.target.clone(),
                VolumeMountDelta {
                    id: subst.substitute(vol.source.as_str()),
                    sub_path: vol.path.clone().filter(|p| !p.is_empty()),
                    read_only: vol.read_only.unwrap_or(false),
                },
            )
        })
        .collect();

    Ok(ContainerDelta {
        id: name.to_string(),
        image: spec.image.clone().filter(|i| !i.is_empty()),
        command: spec.command.clone().filter(|c| !c.is_empty()),
        args: spec.args.clone().filter(|a| !a.is_empty()),
        variables,
        resources,
        liveness_probe: spec.liveness_probe.as_ref().and_then(probe),
        readiness_probe: spec.readiness_probe.as_ref().and_then(probe),
        files: file_deltas,
        volume_mounts,
    })
}

/// HTTP probe details, `None` when no path is set
fn probe(spec: &ContainerProbe) -> Option<ProbeDelta> {
    let http = spec.http_get.as_ref().filter(|h| !h.path.is_empty())?;

    Some(ProbeDelta {
        type_: "http".to_string(),
        path: http.path.clone(),
        port: http.port,
        headers: http
            .http_headers
            .iter()
            .map(|h| (h.name.clone(), h.value.clone()))
            .collect(),
    })
}
