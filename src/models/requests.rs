//! Request models for the key-value API
//!
//! Interprets the form fields sent with `POST /key/{key}`.

use std::collections::HashMap;

use crate::error::{KvError, Result};

/// Name of the form field carrying the value to store.
pub const VALUE_FIELD: &str = "value";

/// What a `POST /key/{key}` asks for.
///
/// A request with no form fields at all deletes the key; a request with a
/// `value` field stores it. Any other form is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteRequest {
    Set(String),
    Delete,
}

impl WriteRequest {
    /// Builds a request from already-merged query and body fields.
    pub fn from_fields(mut fields: HashMap<String, String>) -> Result<Self> {
        if fields.is_empty() {
            return Ok(WriteRequest::Delete);
        }
        match fields.remove(VALUE_FIELD) {
            Some(value) => Ok(WriteRequest::Set(value)),
            None => Err(KvError::InvalidRequest(format!(
                "form field `{VALUE_FIELD}` is required"
            ))),
        }
    }
}
