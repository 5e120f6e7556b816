//! Use cases
//!
//! Application-level operations built on top of the ports.

mod assert_response;

pub use assert_response::AssertResponse;
