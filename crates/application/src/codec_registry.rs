//! Codec registry.
//!
//! Maps each [`Format`] to the codec that decodes and encodes it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use apitest_domain::{Document, Format};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::Codec;

/// Codecs keyed by format.
#[derive(Clone, Default)]
pub struct CodecRegistry {
    codecs: HashMap<Format, Arc<dyn Codec>>,
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formats: Vec<_> = self.codecs.keys().map(|format| format.extension()).collect();
        formats.sort_unstable();
        f.debug_struct("CodecRegistry").field("formats", &formats).finish()
    }
}

impl CodecRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a codec under its own format, replacing any previous one.
    pub fn register(&mut self, codec: impl Codec + 'static) {
        let format = codec.format();
        if self.codecs.insert(format, Arc::new(codec)).is_some() {
            tracing::warn!(%format, "replaced previously registered codec");
        }
    }

    /// Registers a codec (builder pattern).
    #[must_use]
    pub fn with_codec(mut self, codec: impl Codec + 'static) -> Self {
        self.register(codec);
        self
    }

    /// Returns the codec for a format.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::UnsupportedFormat`] if none is registered.
    pub fn get(&self, format: Format) -> ApplicationResult<&dyn Codec> {
        self.codecs
            .get(&format)
            .map(|codec| &**codec)
            .ok_or(ApplicationError::UnsupportedFormat { format })
    }

    /// True if a codec is registered for the format.
    #[must_use]
    pub fn supports(&self, format: Format) -> bool {
        self.codecs.contains_key(&format)
    }

    /// Decodes bytes with the codec registered for `format`.
    ///
    /// # Errors
    ///
    /// Returns an error if no codec is registered or the bytes are malformed.
    pub fn decode(&self, bytes: &[u8], format: Format) -> ApplicationResult<Document> {
        Ok(self.get(format)?.decode(bytes)?)
    }

    /// Encodes a document with the codec registered for `format`.
    ///
    /// # Errors
    ///
    /// Returns an error if no codec is registered or the document cannot be
    /// represented in that format.
    pub fn encode(&self, document: &Document, format: Format) -> ApplicationResult<Vec<u8>> {
        Ok(self.get(format)?.encode(document)?)
    }
}
