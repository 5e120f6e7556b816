//! Matcher token types.

use std::fmt;

use apitest_domain::Document;
use uuid::Uuid;

/// Scalar type named by a type matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// `@string@`
    String,
    /// `@integer@`
    Integer,
    /// `@number@`
    Number,
    /// `@boolean@`
    Boolean,
    /// `@uuid@`
    Uuid,
}

/// How scalar leaves of the actual document are typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalarMode {
    /// Leaves carry their own type (JSON).
    #[default]
    Typed,
    /// Every leaf is text (XML); typed matchers parse the text.
    Text,
}

impl ValueType {
    /// All type names recognised inside `@...@`.
    pub const ALL: [Self; 5] = [
        Self::String,
        Self::Integer,
        Self::Number,
        Self::Boolean,
        Self::Uuid,
    ];

    /// The keyword between the sigils.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Uuid => "uuid",
        }
    }

    /// Looks up a keyword.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Returns true if `actual` is a value of this type.
    #[must_use]
    pub fn accepts(self, actual: &Document, mode: ScalarMode) -> bool {
        match (self, actual) {
            (Self::String, Document::String(_)) => true,
            (Self::Integer, Document::Number(n)) => n.is_integral(),
            (Self::Number, Document::Number(_)) => true,
            (Self::Boolean, Document::Bool(_)) => true,
            (Self::Uuid, Document::String(s)) => is_canonical_uuid(s),
            (_, Document::String(text)) if mode == ScalarMode::Text => self.accepts_text(text),
            _ => false,
        }
    }

    fn accepts_text(self, text: &str) -> bool {
        match self {
            Self::String => true,
            Self::Integer => text.parse::<i64>().is_ok() || text.parse::<u64>().is_ok(),
            Self::Number => text.parse::<f64>().is_ok_and(f64::is_finite),
            Self::Boolean => matches!(text, "true" | "false"),
            Self::Uuid => is_canonical_uuid(text),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Only the hyphenated `8-4-4-4-12` form; braced, URN and simple forms are
/// rejected even though they parse.
fn is_canonical_uuid(s: &str) -> bool {
    s.len() == 36
        && s.as_bytes()
            .iter()
            .enumerate()
            .all(|(i, b)| if matches!(i, 8 | 13 | 18 | 23) { *b == b'-' } else { b.is_ascii_hexdigit() })
        && Uuid::try_parse(s).is_ok()
}

/// What a matcher token checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherKind {
    /// Actual must be a scalar of this type.
    Type(ValueType),
    /// Anything matches.
    AnyValue,
    /// Any array matches, whatever its length or contents.
    ArrayWildcard,
}

/// A recognised placeholder inside an expected document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatcherToken {
    /// What the token checks.
    pub kind: MatcherKind,
    /// The token as written in the fixture.
    pub raw: String,
}

impl MatcherToken {
    /// Creates a token.
    pub fn new(kind: MatcherKind, raw: impl Into<String>) -> Self {
        Self {
            kind,
            raw: raw.into(),
        }
    }

    /// Description used as the expected side of a mismatch.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.kind {
            MatcherKind::Type(value_type) => value_type.name().to_string(),
            MatcherKind::AnyValue => "any value".to_string(),
            MatcherKind::ArrayWildcard => "any array".to_string(),
        }
    }
}
