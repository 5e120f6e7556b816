//! Fixture identification and body formats.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A body format with a registered codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// `application/json` and every `*json*` media type.
    Json,
    /// `application/xml`.
    Xml,
}

impl Format {
    /// All supported formats.
    pub const ALL: [Self; 2] = [Self::Json, Self::Xml];

    /// File extension of fixtures stored in this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }

    /// Selects a format from a response content type.
    ///
    /// Any content type mentioning `json` selects JSON (so
    /// `application/problem+json; charset=utf-8` works); XML requires exactly
    /// `application/xml`, with no parameters or surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnsupportedContentType`] for anything else.
    pub fn from_content_type(content_type: &str) -> DomainResult<Self> {
        if content_type.contains("json") {
            Ok(Self::Json)
        } else if content_type == "application/xml" {
            Ok(Self::Xml)
        } else {
            Err(DomainError::UnsupportedContentType(content_type.to_string()))
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Identifies one fixture file: a name plus the format it is stored in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FixtureRef {
    name: String,
    format: Format,
}

impl FixtureRef {
    /// Creates a reference after validating the name.
    ///
    /// Fixture stores are flat: names must be non-empty and must not contain
    /// path separators, `..`, or NUL bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidFixtureName`] if the name is rejected.
    pub fn new(name: impl Into<String>, format: Format) -> DomainResult<Self> {
        let name = name.into();
        if !is_valid_fixture_name(&name) {
            return Err(DomainError::InvalidFixtureName(name));
        }
        Ok(Self { name, format })
    }

    /// The fixture name, without extension.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The stored format.
    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }

    /// File name of the fixture (`<name>.<ext>`).
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.format.extension())
    }
}

impl fmt::Display for FixtureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

fn is_valid_fixture_name(name: &str) -> bool {
    !name.trim().is_empty()
        && !name.contains(['/', '\\', '\0'])
        && !name.contains("..")
}
