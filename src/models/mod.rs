//! Request and Response models for the key-value API
//!
//! This module defines how form input is interpreted and the JSON bodies
//! returned by the write, stats and health endpoints.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{WriteRequest, VALUE_FIELD};
pub use responses::{DeleteResponse, HealthResponse, SetResponse, StatsResponse};
