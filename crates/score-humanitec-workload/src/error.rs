//! Conversion error types
//!
//! Each variant names the conversion step that failed and keeps the
//! underlying error as its source.

use score_humanitec_common::Error;
use thiserror::Error;

/// Errors that abort a conversion
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The resolution context could not be built
    #[error("preparing context: {0}")]
    Context(#[source] Error),

    /// A container could not be converted
    #[error("processing container specification for '{container}': {source}")]
    Container {
        /// Container name
        container: String,
        /// Underlying error
        #[source]
        source: Error,
    },

    /// The extensions feature fragment could not be merged
    #[error("applying workload profile features: {0}")]
    Features(#[source] Error),

    /// The module spec could not be encoded as JSON
    #[error("encoding module spec: {0}")]
    Encode(#[source] Error),
}

impl ConversionError {
    /// Create a container error
    pub fn container(container: impl Into<String>, source: Error) -> Self {
        Self::Container {
            container: container.into(),
            source,
        }
    }
}
