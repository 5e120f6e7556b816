//! In-memory fixture store.

use std::collections::HashMap;

use apitest_application::{FixtureStore, FixtureStoreError};
use apitest_domain::{FixtureRef, Format};

/// Fixtures held in memory, keyed by name and format.
///
/// Useful for tests that build fixtures inline instead of on disk.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFixtureStore {
    fixtures: HashMap<(String, Format), Vec<u8>>,
}

impl InMemoryFixtureStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a fixture.
    pub fn insert(&mut self, name: impl Into<String>, format: Format, body: impl Into<Vec<u8>>) {
        self.fixtures.insert((name.into(), format), body.into());
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_fixture(mut self, name: impl Into<String>, format: Format, body: impl Into<Vec<u8>>) -> Self {
        self.insert(name, format, body);
        self
    }

    /// Number of stored fixtures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    /// Returns true if no fixtures are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }
}

impl FixtureStore for InMemoryFixtureStore {
    fn read(&self, fixture: &FixtureRef) -> Result<Vec<u8>, FixtureStoreError> {
        self.fixtures
            .get(&(fixture.name().to_string(), fixture.format()))
            .cloned()
            .ok_or_else(|| FixtureStoreError::not_found(fixture))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_by_name_and_format() {
        let store = InMemoryFixtureStore::new()
            .with_fixture("greeting", Format::Json, r#""hi""#)
            .with_fixture("greeting", Format::Xml, "<g>hi</g>");
        assert_eq!(store.len(), 2);

        let json = FixtureRef::new("greeting", Format::Json).unwrap();
        assert_eq!(store.read(&json).unwrap(), br#""hi""#);

        let xml = FixtureRef::new("greeting", Format::Xml).unwrap();
        assert_eq!(store.read(&xml).unwrap(), b"<g>hi</g>");
    }

    #[test]
    fn test_missing_fixture() {
        let store = InMemoryFixtureStore::new();
        assert!(store.is_empty());
        let fixture = FixtureRef::new("absent", Format::Json).unwrap();
        assert!(matches!(store.read(&fixture), Err(FixtureStoreError::NotFound { .. })));
    }
}
