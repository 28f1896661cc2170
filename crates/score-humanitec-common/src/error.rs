//! Error types shared by the conversion crates
//!
//! Every variant that can abort a conversion carries enough context (the
//! reference, the merge path, the file) to explain the failure without a
//! backtrace. Recoverable anomalies are not errors: they are logged as
//! warnings where they happen.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for score-humanitec operations
#[derive(Debug, Error)]
pub enum Error {
    /// Two sources map onto the same placeholder reference
    #[error("ambiguous property reference '{reference}'")]
    AmbiguousReference {
        /// The dotted reference both sources produce (e.g. `metadata.a.b`)
        reference: String,
    },

    /// Deep merge found a map on one side and a scalar on the other
    #[error("merge conflict at '{path}': {message}")]
    Merge {
        /// Dotted path of the conflicting key
        path: String,
        /// Description of the conflict
        message: String,
    },

    /// A file referenced by the workload could not be read
    #[error("reading '{}': {source}", path.display())]
    FileRead {
        /// Resolved path of the file
        path: PathBuf,
        /// The underlying io error
        #[source]
        source: std::io::Error,
    },

    /// Inline file content is neither a string nor a list of lines
    #[error("can not use '{kind}' as a content for '{target}': not supported")]
    UnsupportedContent {
        /// Mount target of the file
        target: String,
        /// JSON kind that was found (object, number, ...)
        kind: String,
    },

    /// YAML input could not be parsed
    #[error("yaml error: {message}")]
    Yaml {
        /// Description of what failed
        message: String,
    },

    /// Serialization/deserialization error
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of what failed
        message: String,
        /// The document being (de)serialized, if known
        kind: Option<String>,
    },

    /// Input is structurally valid but semantically unusable
    #[error("validation error: {message}")]
    Validation {
        /// Description of what's invalid
        message: String,
    },
}

impl Error {
    /// Create an ambiguous reference error
    pub fn ambiguous(reference: impl Into<String>) -> Self {
        Self::AmbiguousReference {
            reference: reference.into(),
        }
    }

    /// Create a merge conflict error
    pub fn merge(path: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Merge {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create a file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization error for a named document kind
    pub fn serialization_for(kind: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Serialization {
            message: msg.into(),
            kind: Some(kind.into()),
        }
    }

    /// Create a validation error with the given message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
            kind: None,
        }
    }
}

impl From<crate::yaml::YamlError> for Error {
    fn from(err: crate::yaml::YamlError) -> Self {
        Self::Yaml {
            message: err.to_string(),
        }
    }
}
