//! API Handlers
//!
//! HTTP request handlers for each key-value server endpoint.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        Path, Query, State,
    },
    response::{IntoResponse, Response},
    Form, Json,
};

use crate::error::{KvError, Result};
use crate::models::{DeleteResponse, HealthResponse, SetResponse, StatsResponse, WriteRequest};
use crate::storage::KvStore;

/// Application state shared across all handlers.
///
/// The same `Arc<KvStore>` is handed to the eviction scheduler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<KvStore>,
}

impl AppState {
    /// Creates a new AppState owning the given store.
    pub fn new(store: KvStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Handler for GET /key/{key}
///
/// Returns the stored value as a plain-text body. The key is everything after
/// `/key/`, slashes included.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<String> {
    state.store.get(&key)?.ok_or(KvError::NotFound(key))
}

/// Handler for POST /key/{key}
///
/// Form fields come from the query string and a urlencoded body, with body
/// fields taking precedence. A `value` field stores it under the key; no
/// fields at all deletes the key.
pub async fn write_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    query: std::result::Result<Query<HashMap<String, String>>, QueryRejection>,
    form: std::result::Result<Form<HashMap<String, String>>, FormRejection>,
) -> Result<Response> {
    let Query(mut fields) =
        query.map_err(|rejection| KvError::InvalidRequest(rejection.body_text()))?;

    match form {
        Ok(Form(body)) => fields.extend(body),
        // No urlencoded body: only query fields apply.
        Err(FormRejection::InvalidFormContentType(_)) => {}
        Err(rejection) => return Err(KvError::InvalidRequest(rejection.body_text())),
    }

    match WriteRequest::from_fields(fields)? {
        WriteRequest::Set(value) => {
            state.store.set(&key, value)?;
            Ok(Json(SetResponse::new(key)).into_response())
        }
        WriteRequest::Delete => {
            if state.store.delete(&key)? {
                Ok(Json(DeleteResponse::new(key)).into_response())
            } else {
                Err(KvError::NotFound(key))
            }
        }
    }
}

/// Handler for key paths without a key and for unsupported methods.
pub async fn malformed_request_handler() -> KvError {
    KvError::InvalidRequest("Malformed request".to_string())
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let stats = state.store.stats()?;
    Ok(Json(StatsResponse::from(stats)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
