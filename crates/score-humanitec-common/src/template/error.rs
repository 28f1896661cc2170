//! Resource scope errors
//!
//! These never abort a conversion. The classifier logs them and either skips
//! the resource or falls back to the default scope.

use thiserror::Error;

/// A resource id annotation or legacy scope that can't be interpreted
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScopeError {
    /// Annotation value is not `{externals|shared}.<id>` or
    /// `modules.<workload>.{externals|shared}.<id>`
    #[error("unsupported resource reference '{value}'")]
    UnsupportedReference {
        /// The annotation value
        value: String,
    },

    /// Legacy scope is neither `external` nor `shared`
    #[error("unsupported resource scope '{scope}'")]
    UnsupportedScope {
        /// The declared scope
        scope: String,
    },
}

impl ScopeError {
    /// Create an unsupported reference error
    pub fn unsupported_reference(value: impl Into<String>) -> Self {
        Self::UnsupportedReference {
            value: value.into(),
        }
    }

    /// Create an unsupported scope error
    pub fn unsupported_scope(scope: impl Into<String>) -> Self {
        Self::UnsupportedScope {
            scope: scope.into(),
        }
    }
}
