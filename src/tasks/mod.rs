//! Background Tasks Module
//!
//! Contains background tasks that run alongside request handling.
//!
//! # Tasks
//! - TTL Eviction: removes the oldest entry once it outlives the TTL

mod eviction;

pub use eviction::{
    sleep_period, spawn_eviction_task, EvictionScheduler, DEFAULT_TTL_DELIM, FALLBACK_SLEEP,
    MIN_SLEEP,
};
