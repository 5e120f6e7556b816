//! Use case: assert that a response body matches a named fixture.

use apitest_domain::{AssertionFailure, Document, Format};

use crate::comparator::Comparator;
use crate::error::ApplicationResult;
use crate::fixture_resolver::FixtureResolver;
use crate::matcher::ScalarMode;
use crate::ports::FixtureStore;

/// Compares actual responses against expected-response fixtures.
///
/// The resolver (and through it the codec registry and fixture store) is
/// injected, so tests can swap in in-memory stores or custom codecs.
#[derive(Debug, Clone)]
pub struct AssertResponse<S> {
    fixtures: FixtureResolver<S>,
}

impl<S: FixtureStore> AssertResponse<S> {
    /// Creates the use case.
    pub const fn new(fixtures: FixtureResolver<S>) -> Self {
        Self { fixtures }
    }

    /// Asserts that `actual_body`, declared as `content_type`, matches the
    /// fixture `fixture_name`.
    ///
    /// The content type picks the format for both sides: anything mentioning
    /// `json` is JSON, exactly `application/xml` is XML.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Assertion`](crate::ApplicationError::Assertion)
    /// listing every difference when the body does not match. Any other
    /// variant is a setup problem: unsupported content type, undecodable
    /// body or fixture, missing fixture, or an unknown matcher.
    pub fn execute(&self, actual_body: &[u8], content_type: &str, fixture_name: &str) -> ApplicationResult<()> {
        let format = Format::from_content_type(content_type)?;
        tracing::debug!(content_type, %format, fixture = fixture_name, "asserting response");

        let actual = self.fixtures.codecs().decode(actual_body, format)?;
        let expected = self.fixtures.resolve(fixture_name, format)?;

        let trail = comparator_for(format).compare(&expected, &actual)?;
        if trail.is_empty() {
            Ok(())
        } else {
            tracing::debug!(fixture = fixture_name, mismatches = trail.len(), "response does not match fixture");
            Err(AssertionFailure::new(fixture_name, trail).into())
        }
    }

    /// Loads a decoded fixture, e.g. a canned third-party response to feed a
    /// test double.
    ///
    /// # Errors
    ///
    /// Same setup errors as [`execute`](Self::execute).
    pub fn expected_document(&self, fixture_name: &str, format: Format) -> ApplicationResult<Document> {
        self.fixtures.resolve(fixture_name, format)
    }

    /// The injected fixture resolver.
    pub const fn fixtures(&self) -> &FixtureResolver<S> {
        &self.fixtures
    }
}

/// XML carries no scalar types, so typed matchers parse text there.
const fn comparator_for(format: Format) -> Comparator {
    let mode = match format {
        Format::Json => ScalarMode::Typed,
        Format::Xml => ScalarMode::Text,
    };
    Comparator::new().with_scalar_mode(mode)
}
