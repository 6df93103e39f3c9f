// Cache module for persisted client state.
// Holds the key-value store seam and the TTL-bound repository list cache.

pub mod kv;
pub mod paths;
pub mod store;

pub use kv::{FileStore, SharedStore, shared};
#[cfg(test)]
pub use kv::{KeyValueStore, MemoryStore};
pub use store::RepoCache;
