//! Codec port

use apitest_domain::{Document, Format};

use crate::error::{DecodeError, EncodeError};

/// Converts raw bytes of one format to and from a [`Document`].
///
/// Implementations are stateless and have no side effects beyond parsing.
pub trait Codec: Send + Sync {
    /// Format handled by this codec.
    fn format(&self) -> Format;

    /// Decodes bytes into a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not well-formed for this format.
    fn decode(&self, bytes: &[u8]) -> Result<Document, DecodeError>;

    /// Encodes a document into bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be represented in this format.
    fn encode(&self, document: &Document) -> Result<Vec<u8>, EncodeError>;
}
