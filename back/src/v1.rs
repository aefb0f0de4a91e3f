use std::sync::{atomic::Ordering, Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use join_api::v1::{document, StorePath, ValidationError};
use serde_json::{json, Value};
use tracing::info;

use crate::AppState;

/// Document routes. Every document path ends in `.json`, so `/generation`
/// never collides with stored data.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generation", get(get_generation))
        .route(
            "/*path",
            get(get_value)
                .put(put_value)
                .post(post_value)
                .delete(delete_value),
        )
}

async fn get_generation(State(state): State<Arc<AppState>>) -> Json<u64> {
    Json(state.generation.load(Ordering::Relaxed))
}

async fn get_value(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Json<Value>, StoreFault> {
    let path = document_path(&path)?;
    let root = state.root.lock().await;

    Ok(Json(document::get(&root, &path).cloned().unwrap_or(Value::Null)))
}

async fn put_value(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
    Json(value): Json<Value>,
) -> Result<Json<Value>, StoreFault> {
    let path = document_path(&path)?;
    let mut root = state.root.lock().await;
    document::put(&mut root, &path, value.clone());

    let generation = state.increment_generation();

    info!(%path, generation, "replaced value");

    Ok(Json(value))
}

async fn post_value(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
    Json(value): Json<Value>,
) -> Result<Json<Value>, StoreFault> {
    let path = document_path(&path)?;
    let mut root = state.root.lock().await;
    let key = document::push(&mut root, &path, value);

    let generation = state.increment_generation();

    info!(%path, %key, generation, "pushed value");

    Ok(Json(json!({ "name": key })))
}

async fn delete_value(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Json<Value>, StoreFault> {
    let path = document_path(&path)?;
    let mut root = state.root.lock().await;

    if document::delete(&mut root, &path) {
        let generation = state.increment_generation();
        info!(%path, generation, "deleted value");
    }

    Ok(Json(Value::Null))
}

fn document_path(raw: &str) -> Result<StorePath, StoreFault> {
    let path = raw.strip_suffix(".json").ok_or(StoreFault::NotFound)?;
    Ok(StorePath::parse(path)?)
}

#[derive(Debug)]
enum StoreFault {
    NotFound,
    Invalid(ValidationError),
}

impl From<ValidationError> for StoreFault {
    fn from(err: ValidationError) -> Self {
        StoreFault::Invalid(err)
    }
}

impl IntoResponse for StoreFault {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            StoreFault::NotFound => (StatusCode::NOT_FOUND, String::from("Not found")),
            StoreFault::Invalid(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
