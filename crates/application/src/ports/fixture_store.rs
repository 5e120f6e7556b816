//! Fixture store port

use std::path::PathBuf;

use apitest_domain::{FixtureRef, Format};
use thiserror::Error;

/// Errors from fixture stores.
#[derive(Debug, Error)]
pub enum FixtureStoreError {
    /// No fixture with this name exists in the requested format.
    #[error("fixture not found: {name} ({format})")]
    NotFound {
        /// Fixture name.
        name: String,
        /// Requested format.
        format: Format,
    },

    /// Reading the fixture failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
}

impl FixtureStoreError {
    /// Creates a not-found error for a fixture.
    #[must_use]
    pub fn not_found(fixture: &FixtureRef) -> Self {
        Self::NotFound {
            name: fixture.name().to_string(),
            format: fixture.format(),
        }
    }
}

/// Port for looking up raw fixture bytes.
///
/// A store must answer for exactly the requested format: it never falls back
/// to another extension or sniffs the content.
pub trait FixtureStore: Send + Sync {
    /// Reads the raw bytes of a fixture.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureStoreError::NotFound`] if the fixture is absent in
    /// that format, or [`FixtureStoreError::Io`] if it cannot be read.
    fn read(&self, fixture: &FixtureRef) -> Result<Vec<u8>, FixtureStoreError>;
}

impl<S: FixtureStore + ?Sized> FixtureStore for &S {
    fn read(&self, fixture: &FixtureRef) -> Result<Vec<u8>, FixtureStoreError> {
        (**self).read(fixture)
    }
}
