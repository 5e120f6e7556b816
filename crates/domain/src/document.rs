//! Canonical in-memory document tree.
//!
//! Every decoded body (JSON or XML, actual or expected) becomes a [`Document`].
//! Consumers match on it exhaustively; there is no dynamic traversal.

use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;

/// Ordered object map. Key order is kept for diagnostics only.
pub type Object = IndexMap<String, Document>;

/// A decoded response or fixture body.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// JSON `null`.
    Null,
    /// Boolean leaf.
    Bool(bool),
    /// Numeric leaf.
    Number(Number),
    /// String leaf. In expected documents this may hold a matcher token.
    String(String),
    /// Object with unique keys.
    Object(Object),
    /// Ordered array.
    Array(Vec<Document>),
}

/// The kind of a [`Document`] node, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `null`
    Null,
    /// `true` / `false`
    Bool,
    /// any number
    Number,
    /// any string
    String,
    /// object
    Object,
    /// array
    Array,
}

impl Kind {
    /// Lowercase name of the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Object => "object",
            Self::Array => "array",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Document {
    /// Returns the kind of this node.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Null => Kind::Null,
            Self::Bool(_) => Kind::Bool,
            Self::Number(_) => Kind::Number,
            Self::String(_) => Kind::String,
            Self::Object(_) => Kind::Object,
            Self::Array(_) => Kind::Array,
        }
    }

    /// Creates a string leaf.
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Returns the string value if this is a string leaf.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the object map if this is an object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the elements if this is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up a key of an object node.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Short human-readable rendering used in mismatch reports.
    ///
    /// Scalars render as their JSON text; containers render as their kind
    /// (arrays also carry their length).
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::String(s) => quote(s),
            Self::Object(_) => "object".to_string(),
            Self::Array(items) => describe_array_len(items.len()),
        }
    }

    /// Like [`describe`](Self::describe), prefixed with the kind for scalars
    /// (`string "42"`). Used when a type matcher rejects a value.
    #[must_use]
    pub fn describe_with_kind(&self) -> String {
        match self {
            Self::Null | Self::Object(_) | Self::Array(_) => self.describe(),
            _ => format!("{} {}", self.kind(), self.describe()),
        }
    }
}

/// Renders `"array of N elements"`.
#[must_use]
pub fn describe_array_len(len: usize) -> String {
    if len == 1 {
        "array of 1 element".to_string()
    } else {
        format!("array of {len} elements")
    }
}

fn quote(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

/// A JSON number, compared by mathematical value.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// Non-negative integer.
    PosInt(u64),
    /// Negative integer.
    NegInt(i64),
    /// Floating point value.
    Float(f64),
}

impl Number {
    /// Returns the value as `f64` (may lose precision for large integers).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_f64(self) -> f64 {
        match self {
            Self::PosInt(u) => u as f64,
            Self::NegInt(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    /// Returns true if the value has no fractional part (`3` and `3.0`).
    #[must_use]
    pub fn is_integral(self) -> bool {
        match self {
            Self::PosInt(_) | Self::NegInt(_) => true,
            Self::Float(f) => f.is_finite() && f.fract() == 0.0,
        }
    }

    /// The exact integer value, if there is one. Floats qualify only when
    /// integral and inside the `i128` range.
    #[allow(clippy::cast_possible_truncation)]
    fn exact_i128(self) -> Option<i128> {
        const LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0; // 2^127
        match self {
            Self::PosInt(u) => Some(i128::from(u)),
            Self::NegInt(i) => Some(i128::from(i)),
            Self::Float(f) if self.is_integral() && (-LIMIT..LIMIT).contains(&f) => Some(f as i128),
            Self::Float(_) => None,
        }
    }
}

impl PartialEq for Number {
    /// Exact mathematical equality. Mixed integer/float pairs are compared
    /// as integers, never through a lossy `f64` cast.
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Self::Float(a), Self::Float(b)) => a == b,
            _ => match (self.exact_i128(), other.exact_i128()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PosInt(u) => write!(f, "{u}"),
            Self::NegInt(i) => write!(f, "{i}"),
            Self::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        u64::try_from(value).map_or(Self::NegInt(value), Self::PosInt)
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Self::PosInt(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(u) = n.as_u64() {
            Self::PosInt(u)
        } else if let Some(i) = n.as_i64() {
            Self::NegInt(i)
        } else {
            Self::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(Number::from(&n)),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl TryFrom<&Document> for Value {
    type Error = Number;

    /// Converts back to JSON. Fails with the offending number when a float
    /// is not finite (JSON cannot represent it).
    fn try_from(document: &Document) -> Result<Self, Self::Error> {
        Ok(match document {
            Document::Null => Self::Null,
            Document::Bool(b) => Self::Bool(*b),
            Document::Number(n) => Self::Number(match *n {
                Number::PosInt(u) => u.into(),
                Number::NegInt(i) => i.into(),
                Number::Float(x) => serde_json::Number::from_f64(x).ok_or(*n)?,
            }),
            Document::String(s) => Self::String(s.clone()),
            Document::Array(items) => Self::Array(
                items
                    .iter()
                    .map(Self::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Document::Object(map) => {
                let mut out = serde_json::Map::with_capacity(map.len());
                for (key, value) in map {
                    out.insert(key.clone(), Self::try_from(value)?);
                }
                Self::Object(out)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_integer_equals_float_with_same_value() {
        assert_eq!(Number::PosInt(3), Number::Float(3.0));
        assert_eq!(Number::NegInt(-2), Number::Float(-2.0));
        assert_ne!(Number::PosInt(3), Number::Float(3.5));
    }

    #[test]
    fn test_integer_representations_compare_exactly() {
        assert_eq!(Number::from(7_i64), Number::PosInt(7));
        assert_ne!(Number::PosInt(u64::MAX), Number::NegInt(-1));
    }

    #[test]
    fn test_mixed_comparison_beyond_f64_precision() {
        // 2^53 + 1 has no exact f64 representation.
        assert_ne!(Number::PosInt(9_007_199_254_740_993), Number::Float(9_007_199_254_740_992.0));
        assert_eq!(Number::PosInt(9_007_199_254_740_992), Number::Float(9_007_199_254_740_992.0));
        assert_ne!(Number::NegInt(i64::MIN + 1), Number::Float(-9_223_372_036_854_775_808.0));
        assert_ne!(Number::PosInt(u64::MAX), Number::Float(1e300));
        assert_ne!(Number::PosInt(0), Number::Float(f64::NAN));
    }

    #[test]
    fn test_from_json_preserves_key_order() {
        let doc = Document::from(json!({"zebra": 1, "apple": 2, "mango": 3}));
        let keys: Vec<_> = doc.as_object().map(|m| m.keys().cloned().collect()).unwrap_or_default();
        assert_eq!(keys, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_json_roundtrip() {
        let value = json!({"a": [1, -2, 2.5, null, true], "b": {"c": "d"}});
        let doc = Document::from(value.clone());
        assert_eq!(Value::try_from(&doc), Ok(value));
    }

    #[test]
    fn test_non_finite_float_cannot_become_json() {
        let doc = Document::Array(vec![Document::Number(Number::Float(f64::INFINITY))]);
        assert!(Value::try_from(&doc).is_err());
    }

    #[test]
    fn test_describe() {
        assert_eq!(Document::string("x\"y").describe(), r#""x\"y""#);
        assert_eq!(Document::Number(Number::Float(3.0)).describe(), "3.0");
        assert_eq!(Document::Array(vec![Document::Null]).describe(), "array of 1 element");
        assert_eq!(Document::Object(Object::new()).describe(), "object");
        assert_eq!(Document::string("42").describe_with_kind(), r#"string "42""#);
        assert_eq!(Document::Null.describe_with_kind(), "null");
    }

    #[test]
    fn test_is_integral() {
        assert!(Number::PosInt(1).is_integral());
        assert!(Number::Float(3.0).is_integral());
        assert!(!Number::Float(3.1).is_integral());
        assert!(!Number::Float(f64::NAN).is_integral());
    }
}
