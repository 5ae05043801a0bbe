//! Storage Module
//!
//! Provides the in-memory key-value engine: a map of elements plus a recency
//! list that keeps the least recently written key at the front for eviction.

mod element;
mod order;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use element::Element;
pub use order::{RecencyList, SlotId};
pub use stats::StorageStats;
pub use store::KvStore;
