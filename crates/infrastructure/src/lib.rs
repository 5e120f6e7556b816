//! API test fixtures - adapters and test harness
//!
//! This crate provides the concrete codecs and fixture stores behind the
//! ports of `apitest-application`, plus [`ResponseAsserter`], the entry point
//! test suites use to check response bodies against fixture files.

pub mod codecs;
pub mod config;
pub mod persistence;
pub mod testkit;

pub use codecs::{ATTRIBUTES_KEY, JsonCodec, TEXT_KEY, XmlCodec, default_registry, to_json_stable_bytes};
pub use config::FixtureConfig;
pub use persistence::{DirectoryFixtureStore, InMemoryFixtureStore};
pub use testkit::ResponseAsserter;
