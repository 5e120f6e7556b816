//! Fixture store backed by a directory of `<name>.<ext>` files.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use apitest_application::{FixtureStore, FixtureStoreError};
use apitest_domain::FixtureRef;

/// Reads fixtures from `<root>/<name>.<ext>`.
#[derive(Debug, Clone)]
pub struct DirectoryFixtureStore {
    root: PathBuf,
}

impl DirectoryFixtureStore {
    /// Creates a store rooted at `root`. The directory is not checked until
    /// a fixture is read.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The fixture directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a fixture would be read from.
    #[must_use]
    pub fn path_of(&self, fixture: &FixtureRef) -> PathBuf {
        self.root.join(fixture.file_name())
    }
}

impl FixtureStore for DirectoryFixtureStore {
    fn read(&self, fixture: &FixtureRef) -> Result<Vec<u8>, FixtureStoreError> {
        let path = self.path_of(fixture);
        std::fs::read(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                FixtureStoreError::not_found(fixture)
            } else {
                FixtureStoreError::Io { path, source: e }
            }
        })
    }
}
