//! API Module
//!
//! HTTP handlers and routing for the key-value server.
//!
//! # Endpoints
//! - `GET /key/{key}` - Read a value
//! - `POST /key/{key}` - Store or delete a value
//! - `GET /stats` - Storage statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
