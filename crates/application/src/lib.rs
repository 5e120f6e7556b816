//! ApiTest Application - Assertion engine
//!
//! This crate holds the matcher language, the structural comparator and the
//! assertion use case, plus the ports they depend on. Concrete codecs and
//! fixture stores live in the infrastructure crate.

pub mod codec_registry;
pub mod comparator;
pub mod error;
pub mod fixture_resolver;
pub mod matcher;
pub mod ports;
pub mod use_cases;

pub use codec_registry::CodecRegistry;
pub use comparator::Comparator;
pub use error::{ApplicationError, ApplicationResult, DecodeError, EncodeError, Location};
pub use fixture_resolver::FixtureResolver;
pub use matcher::{MatcherKind, MatcherSyntaxError, MatcherToken, ScalarMode, ValueType};
pub use ports::{Codec, FixtureStore, FixtureStoreError};
pub use use_cases::AssertResponse;
