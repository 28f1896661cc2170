//! Placeholder scanner
//!
//! Splits text into literal runs, escaped dollars (`$$`) and references
//! (`${path}`). Substitution and escaping both walk this token stream, so
//! they always agree on what counts as a placeholder.
//!
//! A reference path is a non-empty run of ASCII letters, digits and
//! `. - _ [ ] " ' #`. Anything else after `${` (including `${}`) is not a
//! placeholder and stays literal text, as does a bare `$name`.

/// A token produced by [`tokenize`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// Text with no placeholders in it
    Literal(&'a str),
    /// `$$`
    EscapedDollar,
    /// `${path}`
    Reference {
        /// Full placeholder text, braces included
        raw: &'a str,
        /// Reference path between the braces
        path: &'a str,
    },
}

/// Returns true if `c` may appear inside `${...}`
pub fn is_reference_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '[' | ']' | '"' | '\'' | '#')
}

/// Iterate over the placeholder tokens of `text`
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens { src: text, pos: 0 }
}

/// Iterator returned by [`tokenize`]
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let rest = &self.src[self.pos..];
        if rest.is_empty() {
            return None;
        }

        let mut offset = 0;
        while let Some(found) = rest[offset..].find('$') {
            let at = offset + found;
            if let Some((token, len)) = placeholder_at(&rest[at..]) {
                if at > 0 {
                    self.pos += at;
                    return Some(Token::Literal(&rest[..at]));
                }
                self.pos += len;
                return Some(token);
            }
            offset = at + 1;
        }

        self.pos = self.src.len();
        Some(Token::Literal(rest))
    }
}

/// Parse a placeholder at the start of `s`, returning it with its byte length
fn placeholder_at(s: &str) -> Option<(Token<'_>, usize)> {
    let after = s.strip_prefix('$')?;
    if after.starts_with('$') {
        return Some((Token::EscapedDollar, 2));
    }

    let body = after.strip_prefix('{')?;
    let end = body.find(|c: char| !is_reference_char(c))?;
    if end == 0 || !body[end..].starts_with('}') {
        return None;
    }

    // "${" + path + "}"
    let len = end + 3;
    Some((
        Token::Reference {
            raw: &s[..len],
            path: &body[..end],
        },
        len,
    ))
}
