//! ApiTest Domain - Core types
//!
//! This crate defines the document model, fixture references and mismatch
//! reports used by the response assertion engine.
//! All types here are pure Rust with no I/O dependencies.

pub mod document;
pub mod error;
pub mod fixture;
pub mod mismatch;

pub use document::{Document, Kind, Number, Object, describe_array_len};
pub use error::{DomainError, DomainResult};
pub use fixture::{FixtureRef, Format};
pub use mismatch::{AssertionFailure, DocumentPath, Mismatch, MismatchTrail, PathSegment};
