//! Entry point for test suites: assert responses against fixture files.

use apitest_application::{ApplicationResult, AssertResponse, EncodeError, FixtureResolver};
use apitest_domain::{Document, Format};
use serde_json::Value;

use crate::codecs::default_registry;
use crate::config::FixtureConfig;
use crate::persistence::DirectoryFixtureStore;

/// Asserts response bodies against expected-response fixtures and serves
/// mocked-response fixtures, both read from the directories in a
/// [`FixtureConfig`].
///
/// # Example
///
/// ```no_run
/// use apitest_infrastructure::ResponseAsserter;
///
/// let asserter = ResponseAsserter::from_env();
/// let body = br#"{"message": "Hello ApiTestCase World!"}"#;
/// asserter.assert_response(body, "application/json", "hello_world");
/// ```
#[derive(Debug, Clone)]
pub struct ResponseAsserter {
    expected: AssertResponse<DirectoryFixtureStore>,
    mocked: FixtureResolver<DirectoryFixtureStore>,
}

impl ResponseAsserter {
    /// Builds an asserter over the configured directories with the JSON and
    /// XML codecs.
    #[must_use]
    pub fn new(config: &FixtureConfig) -> Self {
        let codecs = default_registry();
        Self {
            expected: AssertResponse::new(FixtureResolver::new(
                DirectoryFixtureStore::new(config.expected_dir()),
                codecs.clone(),
            )),
            mocked: FixtureResolver::new(DirectoryFixtureStore::new(config.mocked_dir()), codecs),
        }
    }

    /// Builds an asserter from [`FixtureConfig::from_env`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(&FixtureConfig::from_env())
    }

    /// Checks `body` against the fixture without panicking.
    ///
    /// # Errors
    ///
    /// See [`AssertResponse::execute`].
    pub fn check_response(&self, body: &[u8], content_type: &str, fixture: &str) -> ApplicationResult<()> {
        self.expected.execute(body, content_type, fixture)
    }

    /// Asserts that `body` matches the fixture.
    ///
    /// # Panics
    ///
    /// Panics with every mismatch when the body does not match, or with a
    /// `fixture setup error:` message when the check itself could not run.
    #[track_caller]
    #[allow(clippy::panic)]
    pub fn assert_response(&self, body: &[u8], content_type: &str, fixture: &str) {
        match self.check_response(body, content_type, fixture) {
            Ok(()) => {}
            Err(err) if err.is_assertion_failure() => panic!("{err}"),
            Err(err) => panic!("fixture setup error: {err}"),
        }
    }

    /// Loads a mocked-response fixture.
    ///
    /// # Errors
    ///
    /// Fails if the fixture is missing or malformed.
    pub fn mocked_fixture(&self, name: &str, format: Format) -> ApplicationResult<Document> {
        self.mocked.resolve(name, format)
    }

    /// Loads a JSON mocked-response fixture as a `serde_json::Value`, ready to
    /// hand to a stubbed client.
    ///
    /// # Errors
    ///
    /// Fails if the fixture is missing or malformed.
    pub fn mocked_json(&self, name: &str) -> ApplicationResult<Value> {
        let document = self.mocked_fixture(name, Format::Json)?;
        let value = Value::try_from(&document)
            .map_err(|n| EncodeError::new(Format::Json, format!("number {n} is not finite")))?;
        Ok(value)
    }

    /// The expected-response use case.
    #[must_use]
    pub const fn expected(&self) -> &AssertResponse<DirectoryFixtureStore> {
        &self.expected
    }
}
