//! Fixture directory configuration.

use std::path::{Path, PathBuf};

/// Variable naming the expected-response fixture directory.
pub const EXPECTED_RESPONSE_DIR: &str = "EXPECTED_RESPONSE_DIR";

/// Variable naming the mocked-response fixture directory.
pub const MOCKED_RESPONSE_DIR: &str = "MOCKED_RESPONSE_DIR";

/// Default expected-response directory, relative to the working directory.
pub const DEFAULT_EXPECTED_DIR: &str = "tests/Responses/Expected";

/// Default mocked-response directory, relative to the working directory.
pub const DEFAULT_MOCKED_DIR: &str = "tests/Responses/Mocked";

/// Where fixtures live.
///
/// # Example
///
/// ```
/// use apitest_infrastructure::FixtureConfig;
///
/// let config = FixtureConfig::from_lookup(|name| {
///     (name == "EXPECTED_RESPONSE_DIR").then(|| "fixtures/expected".to_string())
/// });
/// assert_eq!(config.expected_dir().to_str(), Some("fixtures/expected"));
/// assert_eq!(config.mocked_dir().to_str(), Some("tests/Responses/Mocked"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureConfig {
    expected_dir: PathBuf,
    mocked_dir: PathBuf,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            expected_dir: PathBuf::from(DEFAULT_EXPECTED_DIR),
            mocked_dir: PathBuf::from(DEFAULT_MOCKED_DIR),
        }
    }
}

impl FixtureConfig {
    /// Reads the directories from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the directories through `lookup`. Unset or empty variables fall
    /// back to the defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str, default: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .map_or_else(|| PathBuf::from(default), PathBuf::from)
        };
        let config = Self {
            expected_dir: read(EXPECTED_RESPONSE_DIR, DEFAULT_EXPECTED_DIR),
            mocked_dir: read(MOCKED_RESPONSE_DIR, DEFAULT_MOCKED_DIR),
        };
        tracing::debug!(
            expected_dir = %config.expected_dir.display(),
            mocked_dir = %config.mocked_dir.display(),
            "fixture directories configured"
        );
        config
    }

    /// Overrides the expected-response directory.
    #[must_use]
    pub fn with_expected_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.expected_dir = dir.into();
        self
    }

    /// Overrides the mocked-response directory.
    #[must_use]
    pub fn with_mocked_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.mocked_dir = dir.into();
        self
    }

    /// Expected-response directory.
    #[must_use]
    pub fn expected_dir(&self) -> &Path {
        &self.expected_dir
    }

    /// Mocked-response directory.
    #[must_use]
    pub fn mocked_dir(&self) -> &Path {
        &self.mocked_dir
    }
}
