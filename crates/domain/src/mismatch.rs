//! Mismatch reporting.
//!
//! A comparison produces a [`MismatchTrail`]; an empty trail means the actual
//! document satisfied the fixture.

use std::fmt;

use serde::Serialize;

/// One step from a parent node to a child node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object key.
    Key(String),
    /// Array index.
    Index(usize),
}

/// Location of a node inside a document, starting at the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DocumentPath {
    segments: Vec<PathSegment>,
}

impl DocumentPath {
    /// The root path.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Descends into an object key.
    pub fn push_key(&mut self, key: impl Into<String>) {
        self.segments.push(PathSegment::Key(key.into()));
    }

    /// Descends into an array element.
    pub fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    /// Returns to the parent node.
    pub fn pop(&mut self) {
        self.segments.pop();
    }

    /// Path segments from the root.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns a copy of this path extended by a key.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.push_key(key);
        self
    }

    /// Returns a copy of this path extended by an index.
    #[must_use]
    pub fn index(mut self, index: usize) -> Self {
        self.push_index(index);
        self
    }
}

impl fmt::Display for DocumentPath {
    /// Renders `a.b[0].c`; the root renders as `$`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("$");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Key(key) if needs_brackets(key) => {
                    write!(f, "[{}]", serde_json::Value::String(key.clone()))?;
                }
                PathSegment::Key(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
            }
        }
        Ok(())
    }
}

fn needs_brackets(key: &str) -> bool {
    key.is_empty()
        || key
            .chars()
            .any(|c| matches!(c, '.' | '[' | ']' | '"') || c.is_whitespace())
}

/// A single structural difference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    /// Where the difference was found.
    pub path: DocumentPath,
    /// What the fixture asked for.
    pub expected: String,
    /// What the actual document holds there.
    pub actual: String,
}

impl Mismatch {
    /// Creates a mismatch entry.
    pub fn new(path: DocumentPath, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            path,
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: expected {}, got {}", self.path, self.expected, self.actual)
    }
}

/// Ordered list of differences, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MismatchTrail {
    entries: Vec<Mismatch>,
}

impl MismatchTrail {
    /// Creates an empty trail.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry.
    pub fn record(&mut self, path: &DocumentPath, expected: impl Into<String>, actual: impl Into<String>) {
        self.entries.push(Mismatch::new(path.clone(), expected, actual));
    }

    /// True when no difference was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of recorded differences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Recorded differences.
    #[must_use]
    pub fn entries(&self) -> &[Mismatch] {
        &self.entries
    }

    /// Iterates over recorded differences.
    pub fn iter(&self) -> std::slice::Iter<'_, Mismatch> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a MismatchTrail {
    type Item = &'a Mismatch;
    type IntoIter = std::slice::Iter<'a, Mismatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for MismatchTrail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

/// An actual response that does not satisfy its fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssertionFailure {
    /// Fixture the response was compared against.
    pub fixture: String,
    /// Every difference found.
    pub trail: MismatchTrail,
}

impl AssertionFailure {
    /// Creates a failure for a fixture.
    pub fn new(fixture: impl Into<String>, trail: MismatchTrail) -> Self {
        Self {
            fixture: fixture.into(),
            trail,
        }
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.trail.len();
        write!(
            f,
            "response does not match fixture '{}' ({} mismatch{}):",
            self.fixture,
            count,
            if count == 1 { "" } else { "es" }
        )?;
        for entry in &self.trail {
            write!(f, "\n  {entry}")?;
        }
        Ok(())
    }
}

impl std::error::Error for AssertionFailure {}
