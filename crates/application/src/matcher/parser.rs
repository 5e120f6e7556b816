//! Matcher token recognition for `@type@` syntax.

use std::borrow::Cow;
use std::sync::LazyLock;

use apitest_domain::Document;
use regex::Regex;
use thiserror::Error;

use super::token::{MatcherKind, MatcherToken, ValueType};

/// `@identifier@` or `@*@`.
#[allow(clippy::expect_used)]
static MATCHER_SYNTAX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([A-Za-z_][A-Za-z0-9_]*|\*)@$").expect("valid regex"));

const WILDCARD: &str = "*";

/// A string written in matcher syntax whose type is not in the vocabulary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown matcher `{raw}` (expected one of @string@, @integer@, @number@, @boolean@, @uuid@, @*@; escape literals as `\\{raw}`)")]
pub struct MatcherSyntaxError {
    /// The offending string.
    pub raw: String,
}

/// Interpretation of an expected string leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leaf<'a> {
    /// Compare literally against this text.
    Literal(Cow<'a, str>),
    /// Apply this matcher.
    Matcher(MatcherToken),
}

/// Returns true if `raw` is written in matcher syntax (known type or not).
#[must_use]
pub fn is_matcher_syntax(raw: &str) -> bool {
    MATCHER_SYNTAX.is_match(raw)
}

/// Classifies an expected string leaf.
///
/// Strings outside matcher syntax are literals, unchanged. A backslash
/// followed by (possibly escaped) matcher syntax is an escape: one leading
/// backslash is dropped and the rest is a literal. `@*@` classifies as
/// [`MatcherKind::AnyValue`]; the array position that turns it into an
/// [`MatcherKind::ArrayWildcard`] is handled by [`array_wildcard`].
///
/// # Errors
///
/// Returns [`MatcherSyntaxError`] for matcher syntax naming an unknown type.
pub fn classify(raw: &str) -> Result<Leaf<'_>, MatcherSyntaxError> {
    if let Some(escaped) = raw.strip_prefix('\\') {
        if is_matcher_syntax(escaped.trim_start_matches('\\')) {
            return Ok(Leaf::Literal(Cow::Borrowed(escaped)));
        }
        return Ok(Leaf::Literal(Cow::Borrowed(raw)));
    }

    let Some(captures) = MATCHER_SYNTAX.captures(raw) else {
        return Ok(Leaf::Literal(Cow::Borrowed(raw)));
    };
    let name = captures.get(1).map_or("", |m| m.as_str());

    let kind = if name == WILDCARD {
        MatcherKind::AnyValue
    } else {
        ValueType::from_name(name).map(MatcherKind::Type).ok_or_else(|| MatcherSyntaxError {
            raw: raw.to_string(),
        })?
    };
    Ok(Leaf::Matcher(MatcherToken::new(kind, raw)))
}

/// Returns the array wildcard token if `items` is exactly `["@*@"]`.
#[must_use]
pub fn array_wildcard(items: &[Document]) -> Option<MatcherToken> {
    match items {
        [Document::String(raw)] => match classify(raw) {
            Ok(Leaf::Matcher(token)) if token.kind == MatcherKind::AnyValue => {
                Some(MatcherToken::new(MatcherKind::ArrayWildcard, token.raw))
            }
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn literal(s: &str) -> Leaf<'_> {
        Leaf::Literal(Cow::Borrowed(s))
    }

    #[test]
    fn test_type_matchers() {
        for value_type in ValueType::ALL {
            let raw = format!("@{}@", value_type.name());
            assert_eq!(
                classify(&raw),
                Ok(Leaf::Matcher(MatcherToken::new(MatcherKind::Type(value_type), raw.clone())))
            );
        }
    }

    #[test]
    fn test_wildcard_is_any_value() {
        assert_eq!(
            classify("@*@"),
            Ok(Leaf::Matcher(MatcherToken::new(MatcherKind::AnyValue, "@*@")))
        );
    }

    #[test]
    fn test_plain_strings_are_literals() {
        for raw in [
            "",
            "Hello ApiTestCase World!",
            "user@example.com",
            "@",
            "@@",
            "@ string@",
            "@string",
            "string@",
            "@string@ ",
            "@1abc@",
            "C:\\path",
            "\\n",
        ] {
            assert_eq!(classify(raw), Ok(literal(raw)), "{raw:?}");
        }
    }

    #[test]
    fn test_unknown_type_is_syntax_error() {
        let err = classify("@date@").unwrap_err();
        assert_eq!(err.raw, "@date@");
        assert!(err.to_string().contains("unknown matcher `@date@`"));
        assert!(classify("@Integer@").is_err());
    }

    #[test]
    fn test_escape_strips_one_backslash() {
        assert_eq!(classify(r"\@integer@"), Ok(literal("@integer@")));
        assert_eq!(classify(r"\@date@"), Ok(literal("@date@")));
        assert_eq!(classify(r"\\@integer@"), Ok(literal(r"\@integer@")));
        assert_eq!(classify(r"\@*@"), Ok(literal("@*@")));
    }

    #[test]
    fn test_backslash_without_matcher_is_unchanged() {
        assert_eq!(classify(r"\@not a matcher@"), Ok(literal(r"\@not a matcher@")));
        assert_eq!(classify(r"\\server\share"), Ok(literal(r"\\server\share")));
    }

    #[test]
    fn test_array_wildcard_only_as_sole_element() {
        let wildcard = Document::string("@*@");
        assert_eq!(
            array_wildcard(std::slice::from_ref(&wildcard)).map(|t| t.kind),
            Some(MatcherKind::ArrayWildcard)
        );
        assert_eq!(array_wildcard(&[wildcard.clone(), wildcard]), None);
        assert_eq!(array_wildcard(&[Document::string("@string@")]), None);
        assert_eq!(array_wildcard(&[Document::string(r"\@*@")]), None);
        assert_eq!(array_wildcard(&[]), None);
    }
}
