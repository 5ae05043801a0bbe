//! kvserver - An in-memory key-value HTTP server
//!
//! Every entry expires a fixed TTL after its last write. A single background
//! task evicts the least recently written entry once it goes stale.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{KvError, Result};
pub use storage::KvStore;
pub use tasks::{spawn_eviction_task, EvictionScheduler};
