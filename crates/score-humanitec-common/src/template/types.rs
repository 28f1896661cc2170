//! String wrappers for values that may carry `${...}` placeholders

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A string that may contain `${...}` placeholders
///
/// Serializes as a plain string. Deserialization also accepts numbers and
/// booleans since YAML authors routinely write `PORT: 8080` for values that
/// end up as environment variables.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TemplateString(String);

impl TemplateString {
    /// Wrap a string
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Borrow the raw template text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TemplateString {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TemplateString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for TemplateString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for TemplateString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Self(s)),
            Value::Number(n) => Ok(Self(n.to_string())),
            Value::Bool(b) => Ok(Self(b.to_string())),
            Value::Null => Ok(Self::default()),
            other => Err(D::Error::custom(format!(
                "expected a string, found {}",
                crate::merge::kind_of(&other)
            ))),
        }
    }
}
