use crate::api::types::{document_identity, HealthResponse, QueryError, StatusError};
use crate::error::{CodecoachError, Result};
use crate::pipeline::{Pipeline, QueryParams};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// HTTP front end over a [`Pipeline`]
pub struct HttpServer {
    state: AppState,
}

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    pipeline: Arc<Pipeline>,
    default_path: Arc<str>,
}

impl HttpServer {
    /// `default_path` is ingested when a request names only the repository.
    pub fn new(pipeline: Arc<Pipeline>, default_path: &str) -> Self {
        Self {
            state: AppState {
                pipeline,
                default_path: Arc::from(default_path),
            },
        }
    }

    /// Run the HTTP server until it fails
    pub async fn run(&self, addr: &str) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            CodecoachError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to bind to {}: {}", addr, e),
            ))
        })?;

        log::info!("Listening on http://{}", addr);
        log::info!("Routes: GET /, POST /ingest, POST /update, POST /query");

        axum::serve(listener, self.router())
            .await
            .map_err(|e| {
                CodecoachError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("HTTP server error: {}", e),
                ))
            })?;

        Ok(())
    }

    /// Create the axum router
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(handle_health))
            .route("/ingest", post(handle_ingest))
            .route("/update", post(handle_update))
            .route("/query", post(handle_query))
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
            .with_state(self.state.clone())
    }
}

async fn handle_health() -> Response {
    (StatusCode::OK, Json(HealthResponse { status: "ok" })).into_response()
}

/// Ingest and update share request parsing and error shaping
#[derive(Clone, Copy)]
enum DocumentAction {
    Ingest,
    Update,
}

async fn handle_ingest(State(state): State<AppState>, body: axum::body::Bytes) -> Response {
    handle_document(state, body, DocumentAction::Ingest).await
}

async fn handle_update(State(state): State<AppState>, body: axum::body::Bytes) -> Response {
    handle_document(state, body, DocumentAction::Update).await
}

async fn handle_document(state: AppState, body: axum::body::Bytes, action: DocumentAction) -> Response {
    let request: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(StatusError::new(format!("Invalid JSON: {}", e))),
            )
                .into_response();
        }
    };

    let identity = match document_identity(&request, &state.default_path) {
        Ok(identity) => identity,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(StatusError::new(e.to_string()))).into_response();
        }
    };

    let result = match action {
        DocumentAction::Ingest => state.pipeline.ingest(&identity).await,
        DocumentAction::Update => state.pipeline.update(&identity).await,
    };

    match result {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => {
            let endpoint = match action {
                DocumentAction::Ingest => "ingest",
                DocumentAction::Update => "update",
            };
            if e.is_upstream_fetch() {
                log::warn!("{} endpoint could not fetch {}: {}", endpoint, identity, e);
            } else {
                log::error!("Error in {} endpoint for {}: {}", endpoint, identity, e);
            }
            (status_for(&e), Json(StatusError::new(e.to_string()))).into_response()
        }
    }
}

async fn handle_query(State(state): State<AppState>, body: axum::body::Bytes) -> Response {
    let request: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(QueryError {
                    error: format!("Invalid JSON: {}", e),
                }),
            )
                .into_response();
        }
    };

    let params = match QueryParams::from_json(&request) {
        Ok(params) => params,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(QueryError { error: e.to_string() })).into_response();
        }
    };

    match state.pipeline.run_query(&params).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => (status_for(&e), Json(QueryError { error: e.to_string() })).into_response(),
    }
}

/// Validation failures are the client's; everything else is a 500.
fn status_for(error: &CodecoachError) -> StatusCode {
    if error.is_validation() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
