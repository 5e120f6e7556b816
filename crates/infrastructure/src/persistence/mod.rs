//! Fixture store implementations.

mod directory_store;
mod memory_store;

pub use directory_store::DirectoryFixtureStore;
pub use memory_store::InMemoryFixtureStore;
