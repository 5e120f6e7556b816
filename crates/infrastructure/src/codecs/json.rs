//! JSON codec.
//!
//! Decoding keeps object key order (`serde_json` with `preserve_order`).
//! Encoding is deterministic:
//! - 2-space indentation
//! - Trailing newline
//! - Keys in document order

use apitest_application::{Codec, DecodeError, EncodeError, Location};
use apitest_domain::{Document, Format};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Codec for `application/json` bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Creates a new `JsonCodec`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Codec for JsonCodec {
    fn format(&self) -> Format {
        Format::Json
    }

    fn decode(&self, bytes: &[u8]) -> Result<Document, DecodeError> {
        serde_json::from_slice::<Value>(bytes)
            .map(Document::from)
            .map_err(|e| {
                DecodeError::new(
                    Format::Json,
                    Location::LineColumn {
                        line: e.line(),
                        column: e.column(),
                    },
                    e.to_string(),
                )
            })
    }

    fn encode(&self, document: &Document) -> Result<Vec<u8>, EncodeError> {
        let value = Value::try_from(document)
            .map_err(|n| EncodeError::new(Format::Json, format!("number {n} is not finite")))?;
        to_json_stable_bytes(&value).map_err(|e| EncodeError::new(Format::Json, e.to_string()))
    }
}

/// Serializes a value to pretty JSON with 2-space indentation and a trailing
/// newline.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    buffer.push(b'\n');
    Ok(buffer)
}
