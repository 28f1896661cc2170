//! Score to Humanitec conversion pipeline
//!
//! Converts a Score `WorkloadSpec` (plus the optional Humanitec extensions
//! document) into a Humanitec deployment delta: one workload module with its
//! containers, service, ingress and embedded resources, and the shared
//! resources it depends on.
//!
//! # Usage
//!
//! ```rust,ignore
//! let config = ConvertConfig::new("Auto-generated (SCORE)", "development")
//!     .with_base_dir(score_dir)
//!     .with_workload_source_url(url);
//! let delta = SpecConverter::new(&config, &workload)
//!     .with_extensions(&extensions)
//!     .convert()?;
//! ```

mod converter;
pub mod error;

mod pipeline;

pub use converter::{convert, ConvertConfig, SpecConverter};
pub use error::ConversionError;
