//! Structural comparison of expected and actual documents.

mod engine;

pub use engine::Comparator;
