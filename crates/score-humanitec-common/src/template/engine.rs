//! Placeholder substitution and escaping

use serde_json::{Map, Value};

use super::context::ReferenceResolver;
use super::parser::{tokenize, Token};

/// Replaces `${...}` placeholders using a [`ReferenceResolver`]
///
/// `$$` collapses to `$`. Unknown references are left in place (see
/// [`ReferenceResolver::resolve`]). Text that isn't a valid placeholder is
/// copied unchanged.
#[derive(Debug)]
pub struct Substitutor<'a, R: ?Sized> {
    resolver: &'a R,
}

impl<'a, R: ReferenceResolver + ?Sized> Substitutor<'a, R> {
    /// Create a substitutor over a resolver
    pub fn new(resolver: &'a R) -> Self {
        Self { resolver }
    }

    /// Substitute every placeholder in `text`
    pub fn substitute(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for token in tokenize(text) {
            match token {
                Token::Literal(s) => out.push_str(s),
                Token::EscapedDollar => out.push('$'),
                Token::Reference { path, .. } => out.push_str(&self.resolver.resolve(path)),
            }
        }
        out
    }

    /// Substitute map keys and string values recursively
    ///
    /// Nested maps are walked all the way down. Arrays keep their shape: only
    /// their direct string elements are substituted.
    pub fn substitute_all(&self, value: &Value) -> Value {
        match value {
            Value::String(s) => Value::String(self.substitute(s)),
            Value::Object(map) => Value::Object(self.substitute_map(map)),
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => Value::String(self.substitute(s)),
                        other => other.clone(),
                    })
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    /// [`substitute_all`](Self::substitute_all) over a map
    pub fn substitute_map(&self, map: &Map<String, Value>) -> Map<String, Value> {
        map.iter()
            .map(|(key, value)| (self.substitute(key), self.substitute_all(value)))
            .collect()
    }
}

/// Neutralize every `${...}` placeholder as `$\{...}`
///
/// The result survives a later substitution pass literally. `$$` and bare
/// `$name` are not expansion candidates and are left alone.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for token in tokenize(text) {
        match token {
            Token::Literal(s) => out.push_str(s),
            Token::EscapedDollar => out.push_str("$$"),
            Token::Reference { path, .. } => {
                out.push_str("$\\{");
                out.push_str(path);
                out.push('}');
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn resolver() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("metadata.name".to_string(), "test-name".to_string()),
            ("resources.dns".to_string(), "shared.dns".to_string()),
            (
                "resources.db.host".to_string(),
                "${externals.db.host}".to_string(),
            ),
            ("resources.db.port".to_string(), "5432".to_string()),
        ])
    }

    // =========================================================================
    // Story: substitute
    // =========================================================================

    #[test]
    fn test_substitute() {
        let values = resolver();
        let subst = Substitutor::new(&values);

        assert_eq!(subst.substitute(""), "");
        assert_eq!(subst.substitute("abc"), "abc");
        assert_eq!(subst.substitute("$abc"), "$abc");
        assert_eq!(subst.substitute("abc $$ abc"), "abc $ abc");
        assert_eq!(subst.substitute("$${abc}"), "${abc}");
        assert_eq!(subst.substitute("$${metadata.name}"), "${metadata.name}");
        assert_eq!(subst.substitute("${metadata.name}"), "test-name");
        assert_eq!(subst.substitute("${resources.dns}"), "shared.dns");
        assert_eq!(
            subst.substitute("postgresql://${resources.db.host}:${resources.db.port}/db"),
            "postgresql://${externals.db.host}:5432/db"
        );
    }

    #[test]
    fn test_unknown_and_invalid_pass_through() {
        let values = resolver();
        let subst = Substitutor::new(&values);

        assert_eq!(subst.substitute("${metadata.unknown}"), "${metadata.unknown}");
        assert_eq!(subst.substitute("${}"), "${}");
        assert_eq!(subst.substitute("${a b}"), "${a b}");
        assert_eq!(subst.substitute("${x"), "${x");
    }

    #[test]
    fn test_substitute_all() {
        let values = resolver();
        let subst = Substitutor::new(&values);

        let source = json!({
            "api": {
                "${metadata.name}-url": "http://${resources.dns}",
                "port": 80,
                "list": ["${metadata.name}", {"nested": "${metadata.name}"}, ["${metadata.name}"]]
            },
            "flag": true,
            "none": null
        });

        assert_eq!(
            subst.substitute_all(&source),
            json!({
                "api": {
                    "test-name-url": "http://shared.dns",
                    "port": 80,
                    "list": ["test-name", {"nested": "${metadata.name}"}, ["${metadata.name}"]]
                },
                "flag": true,
                "none": null
            })
        );
    }

    // =========================================================================
    // Story: escape
    // =========================================================================

    #[test]
    fn test_escape() {
        assert_eq!(escape(""), "");
        assert_eq!(escape("abc"), "abc");
        assert_eq!(escape("$abc"), "$abc");
        assert_eq!(escape("abc $$ abc"), "abc $$ abc");
        assert_eq!(escape("${abc}"), "$\\{abc}");
        assert_eq!(escape("$${abc}"), "$${abc}");
        assert_eq!(
            escape("debug=${resources.env.DEBUG} ${}"),
            "debug=$\\{resources.env.DEBUG} ${}"
        );
    }

    #[test]
    fn test_escaped_text_is_never_expanded() {
        let values = resolver();
        let subst = Substitutor::new(&values);

        for text in [
            "${metadata.name}",
            "a ${resources.dns} b ${resources.db.host}",
            "$${metadata.name}",
        ] {
            let out = subst.substitute(&escape(text));
            assert!(!out.contains("test-name"), "{text} expanded to {out}");
            assert!(!out.contains("shared.dns"), "{text} expanded to {out}");
        }
        assert_eq!(
            subst.substitute(&escape("${metadata.name}")),
            "$\\{metadata.name}"
        );
    }
}
