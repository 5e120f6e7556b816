//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the assertion core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod codec;
mod fixture_store;

pub use codec::Codec;
pub use fixture_store::{FixtureStore, FixtureStoreError};
