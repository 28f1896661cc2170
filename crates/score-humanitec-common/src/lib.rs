//! Common types for score-humanitec: the Score workload model, the Humanitec
//! delta model, placeholder resolution and file/tree utilities

#![deny(missing_docs)]

pub mod error;
pub mod merge;
pub mod spec;
pub mod template;
pub mod yaml;

pub use error::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Resource annotation carrying an explicit Humanitec resource id
pub const ANNOTATION_RESOURCE_ID: &str = "score.humanitec.io/resId";

/// Annotation marking a module as managed by this tool
pub const ANNOTATION_MANAGED_BY: &str = "humanitec.io/managed-by";

/// Value of the managed-by annotation
pub const MANAGED_BY: &str = "score-humanitec";

/// Annotation carrying the URL of the file that manages the workload
pub const ANNOTATION_WORKLOAD_SOURCE: &str = "score.humanitec.io/workload-source-url";

/// Workload profile used when extensions don't name one
pub const DEFAULT_WORKLOAD_PROFILE: &str = "humanitec/default-module";

/// Resource class used when a backing resource doesn't name one
pub const DEFAULT_RESOURCE_CLASS: &str = "default";
