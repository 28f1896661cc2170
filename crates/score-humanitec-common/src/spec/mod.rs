//! Input and output document models.
//!
//! The Score side (`WorkloadSpec` and its building blocks) and the Humanitec
//! extensions document are inputs; the deployment delta is the output.
//! Open-ended trees (resource params, feature fragments, resource limits) stay
//! as `serde_json` values since their schema belongs to the target platform.

pub mod container;
pub mod delta;
pub mod extensions;
pub mod ports;
pub mod resources;
pub mod workload;

pub use container::{
    ContainerProbe, ContainerSpec, FileContent, FileMount, HttpGetProbe, HttpHeader,
    ResourceRequirements, VolumeMount,
};
pub use delta::{
    ContainerDelta, DeltaMetadata, DeploymentDelta, FileDelta, IngressDelta, IngressPath,
    ModuleDefinition, ModuleDeltas, ModuleSpec, PortDelta, ProbeDelta, ResourceDelta,
    ResourcesDelta, ServiceDelta, UpdateAction, UpdateOperation, VolumeMountDelta,
};
pub use extensions::{ExtensionsSpec, LegacyResourceExtension, RouteRule};
pub use ports::{PortSpec, ServiceSpec};
pub use resources::{ResourceMetadata, ResourcePropertySpec, ResourceSpec, ResourceType};
pub use workload::{WorkloadMetadata, WorkloadSpec};
