//! Score placeholder resolution for Humanitec
//!
//! Score files reference metadata and resources with `${...}` placeholders.
//! Humanitec uses the same syntax with its own namespace, so resolution here
//! is a rewrite rather than a render: metadata becomes literal text while
//! resource references become Humanitec placeholders that the platform
//! resolves at deployment time.
//!
//! # Placeholders
//!
//! - `${metadata.name}`, `${metadata.annotations.KEY}` - workload metadata
//! - `${resources.NAME}` - the resource's Humanitec path (`externals.db`, `shared.dns`, ...)
//! - `${resources.NAME.PROP}` - `${externals.db.PROP}`, `${values.PROP}`,
//!   `${modules.NAME.service.PROP}`, ...
//! - `$$` - a literal `$`
//!
//! Unknown references are kept as written and logged. Content that must not
//! be expanded is passed through [`escape`], which rewrites `${x}` as `$\{x}`.

mod context;
mod engine;
mod error;
mod parser;
mod scope;
mod types;

pub use context::{ReferenceResolver, ResolutionContext};
pub use engine::{escape, Substitutor};
pub use error::ScopeError;
pub use parser::{is_reference_char, tokenize, Token, Tokens};
pub use scope::{classify, resolve_address, BackingScope, Classification, ResourceAddress};
pub use types::TemplateString;
