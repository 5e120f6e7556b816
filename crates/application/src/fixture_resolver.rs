//! Fixture resolution.
//!
//! Turns a fixture name and format into a decoded [`Document`] by reading the
//! raw bytes from a [`FixtureStore`] and decoding them through the
//! [`CodecRegistry`].

use apitest_domain::{Document, FixtureRef, Format};

use crate::codec_registry::CodecRegistry;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{FixtureStore, FixtureStoreError};

/// Resolves named fixtures from a store.
#[derive(Debug, Clone)]
pub struct FixtureResolver<S> {
    store: S,
    codecs: CodecRegistry,
}

impl<S: FixtureStore> FixtureResolver<S> {
    /// Creates a resolver over a store and a codec registry.
    pub const fn new(store: S, codecs: CodecRegistry) -> Self {
        Self { store, codecs }
    }

    /// The codec registry used for decoding.
    pub const fn codecs(&self) -> &CodecRegistry {
        &self.codecs
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Loads and decodes the fixture `name` stored as `format`.
    ///
    /// Only the requested format is consulted; a fixture that exists solely
    /// in another format is reported as missing.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::FixtureNotFound`] if the fixture is absent,
    /// [`ApplicationError::Domain`] for an invalid name, and propagates
    /// decode and codec lookup errors unchanged.
    pub fn resolve(&self, name: &str, format: Format) -> ApplicationResult<Document> {
        let fixture = FixtureRef::new(name, format)?;
        self.resolve_ref(&fixture)
    }

    /// Loads and decodes an already validated fixture reference.
    ///
    /// # Errors
    ///
    /// Same as [`resolve`](Self::resolve).
    pub fn resolve_ref(&self, fixture: &FixtureRef) -> ApplicationResult<Document> {
        let codec = self.codecs.get(fixture.format())?;
        let bytes = self.store.read(fixture).map_err(|e| match e {
            FixtureStoreError::NotFound { name, format } => {
                ApplicationError::FixtureNotFound { name, format }
            }
            other @ FixtureStoreError::Io { .. } => ApplicationError::Storage(other),
        })?;
        tracing::debug!(fixture = %fixture, bytes = bytes.len(), "resolved fixture");

        Ok(codec.decode(&bytes)?)
    }
}
