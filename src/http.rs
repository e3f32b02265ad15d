//! HTTP transport: router and request handlers.
//!
//! The transport decodes receipts, calls the pure scoring engine, and owns
//! every side effect the engine is not allowed to have (logging, id
//! generation, the store).

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::error::Error;
use crate::receipt::Receipt;
use crate::scoring::evaluate;
use crate::store::PointsStore;

/// Application state shared between handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PointsStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            store: Arc::new(PointsStore::new()),
            config: Arc::new(config),
        }
    }
}

/// Health check response
#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
    pub receipts_stored: usize,
}

/// Response to a successful processing request
#[derive(Serialize, Deserialize)]
pub struct ProcessResponse {
    pub id: String,
}

/// Response to a points lookup
#[derive(Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: u32,
}

/// Error body for 4xx responses
#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn create_app(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.timeout_seconds);
    Router::new()
        .route("/health", get(health_check))
        .route("/receipts/process", post(process_receipt))
        .route("/receipts/:id/points", get(get_points))
        .route("/receipts", get(list_receipts))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(timeout))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_headers(Any)
                        .allow_methods(Any),
                ),
        )
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        receipts_stored: state.store.len(),
    })
}

async fn process_receipt(
    State(state): State<AppState>,
    Json(receipt): Json<Receipt>,
) -> Response {
    match evaluate(&receipt) {
        Ok(result) => {
            let id = Uuid::new_v4().to_string();
            state.store.insert(id.clone(), result.total_points);
            info!(
                "scored receipt from {}: {} points (id {})",
                receipt.retailer, result.total_points, id
            );
            for line in &result.breakdown {
                debug!("breakdown: {}", line);
            }
            (StatusCode::OK, Json(ProcessResponse { id })).into_response()
        }
        Err(e) => {
            warn!("rejected receipt from {}: {}", receipt.retailer, e);
            let status = if e.is_validation() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (
                status,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn get_points(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store.get(&id) {
        Some(points) => (StatusCode::OK, Json(PointsResponse { points })).into_response(),
        None => {
            let e = Error::NotFound(format!("no receipt for id {}", id));
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn list_receipts(
    State(state): State<AppState>,
) -> Json<std::collections::HashMap<String, u32>> {
    Json(state.store.snapshot())
}
