//! JSON handlers for schema description, record lookup and traversal.

use crate::AppState;
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Json,
};
use chinook_records::{Record, RecordError, Related, Store, Value};
use chinook_registry::ConfigurationError;
use std::sync::Arc;

/// Separator between the columns of a composite key in a path segment.
const KEY_SEPARATOR: char = ',';

/// Maps a [`RecordError`] to the correct HTTP status code, logging 500s.
///
/// Missing rows, entities and relations → 404, a wrong number of key
/// values → 400, everything else → 500 (with error logged).
fn record_err_to_status(e: RecordError) -> StatusCode {
    match e {
        RecordError::NotFound { .. } => StatusCode::NOT_FOUND,
        RecordError::Configuration(
            ConfigurationError::UnknownEntity(_) | ConfigurationError::UnknownRelation { .. },
        ) => StatusCode::NOT_FOUND,
        RecordError::KeyArity { .. } => StatusCode::BAD_REQUEST,
        ref err => {
            tracing::error!(error = %err, "record operation failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Parses a path key segment into primary key values.
///
/// Composite keys are written `1,2`. Each part is trimmed, then binds as an
/// integer when it parses as one and as text otherwise.
pub fn parse_key(raw: &str) -> Vec<Value> {
    raw.split(KEY_SEPARATOR)
        .map(str::trim)
        .map(|part| match part.parse::<i64>() {
            Ok(n) => Value::Integer(n),
            Err(_) => Value::Text(part.to_string()),
        })
        .collect()
}

/// Runs `f` against a pooled connection on the blocking thread pool.
async fn with_store<T, F>(state: &AppState, f: F) -> Result<T, StatusCode>
where
    T: Send + 'static,
    F: FnOnce(Store<'_>) -> Result<T, RecordError> + Send + 'static,
{
    let pool = state.pool.clone();
    let registry = Arc::clone(&state.registry);

    tokio::task::spawn_blocking(move || {
        let conn = pool.get().map_err(|e| {
            tracing::error!(error = %e, "failed to get db connection");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        f(Store::new(&conn, &registry)).map_err(record_err_to_status)
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "db task panicked");
        StatusCode::INTERNAL_SERVER_ERROR
    })?
}

/// Handler for `GET /api/schema`.
pub async fn get_schema_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    serde_json::to_value(state.registry.describe())
        .map(Json)
        .map_err(|e| {
            tracing::error!(error = %e, "failed to serialize schema description");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// Handler for `GET /api/entities/{entity}`.
pub async fn list_records_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(entity): Path<String>,
) -> Result<Json<Vec<Record>>, StatusCode> {
    with_store(&state, move |store| store.all(&entity))
        .await
        .map(Json)
}

/// Handler for `GET /api/entities/{entity}/{key}`.
pub async fn get_record_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((entity, key)): Path<(String, String)>,
) -> Result<Json<Record>, StatusCode> {
    with_store(&state, move |store| store.find(&entity, &parse_key(&key)))
        .await
        .map(Json)
}

/// Handler for `GET /api/entities/{entity}/{key}/{relation}`.
///
/// To-one relations answer with the related record, or 404 when the
/// foreign key points nowhere. To-many relations always answer with an
/// array.
pub async fn traverse_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((entity, key, relation)): Path<(String, String, String)>,
) -> Result<Json<Related>, StatusCode> {
    with_store(&state, move |store| {
        let owner = store.find(&entity, &parse_key(&key))?;
        store.traverse(&owner, &relation)
    })
    .await
    .map(Json)
}
